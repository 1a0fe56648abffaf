//! Range reader: translates logical contig coordinates into a single
//! bounded byte read against the sequence store.
//!
//! Coordinates are 0-based and half-open (`[start, end)`). `start` is clamped
//! to 0 and `end` to the contig length before anything else happens.

use crate::index::{IndexTable, LayoutRecord};
use crate::{Error, Result};
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, warn};

/// Byte range of the store covering a logical subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteSpan {
    /// Absolute position of the first requested character
    pub start_byte: u64,
    /// Bytes from `start_byte` through the last requested character
    pub bytes_to_read: u64,
}

impl LayoutRecord {
    /// Clamp `[start, end)` to the contig and reject empty or inverted ranges.
    pub fn clamp(&self, start: i64, end: i64) -> Result<(u64, u64)> {
        let start = start.max(0);
        let end = end.min(i64::try_from(self.total_length).unwrap_or(i64::MAX));
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok((start as u64, end as u64))
    }

    /// Compute the byte span for an already clamped, non-empty range.
    ///
    /// Returns `None` if the span does not fit in 64-bit file offsets, which
    /// cannot happen for records built through [`LayoutRecord::new`].
    pub fn byte_span(&self, start: u64, end: u64) -> Option<ByteSpan> {
        debug_assert!(start < end);
        let cpl = self.chars_per_line;

        let lines_before = start / cpl;
        let start_leftover = start % cpl;
        let start_byte = lines_before
            .checked_mul(self.bytes_per_line)?
            .checked_add(start_leftover)?
            .checked_add(self.start_offset)?;

        // Terminators between the first and last requested character. The
        // last character sits `seq_length - 1` past the first on the same
        // logical line grid, so a terminator is crossed each time that
        // column wraps past `chars_per_line`.
        let seq_length = end - start;
        let terminators_crossed = (start_leftover + seq_length - 1) / cpl;
        let bytes_to_read = terminators_crossed
            .checked_mul(self.terminator_width())?
            .checked_add(seq_length)?;

        Some(ByteSpan {
            start_byte,
            bytes_to_read,
        })
    }
}

impl IndexTable {
    /// Extract `[start, end)` of `contig` from the sequence store behind `handle`.
    ///
    /// Performs one seek and one bounded read. A read cut short by end of file
    /// returns whatever was available. The handle is not shared state: callers
    /// reading concurrently need a handle per caller.
    pub fn get_sequence<R: Read + Seek>(
        &self,
        handle: &mut R,
        contig: &str,
        start: i64,
        end: i64,
    ) -> Result<String> {
        let record = self.get(contig)?;
        let (start, end) = record.clamp(start, end)?;
        let span = record.byte_span(start, end).ok_or_else(|| {
            Error::Internal(format!("byte span of {}:{}-{} overflows", contig, start, end))
        })?;
        debug!(
            "{}:{}-{} -> {} bytes at offset {}",
            contig, start, end, span.bytes_to_read, span.start_byte
        );

        handle.seek(SeekFrom::Start(span.start_byte))?;
        // Sized by what is actually read; the index may overstate the store
        let mut buf = Vec::new();
        handle
            .by_ref()
            .take(span.bytes_to_read)
            .read_to_end(&mut buf)?;

        if (buf.len() as u64) < span.bytes_to_read {
            warn!(
                "short read for {}:{}-{}: expected {} bytes, got {}",
                contig,
                start,
                end,
                span.bytes_to_read,
                buf.len()
            );
        }

        strip_whitespace(buf)
    }
}

fn strip_whitespace(mut buf: Vec<u8>) -> Result<String> {
    buf.retain(|b| !b.is_ascii_whitespace());
    String::from_utf8(buf)
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_index;
    use std::io::Cursor;

    /// Lay `seq` out as a single-contig FASTA and return it with its index.
    fn wrap(seq: &str, chars_per_line: usize, terminator: &str) -> (Vec<u8>, IndexTable) {
        let header = ">ctg description\n";
        let mut fasta = header.to_string();
        for chunk in seq.as_bytes().chunks(chars_per_line) {
            fasta.push_str(std::str::from_utf8(chunk).unwrap());
            fasta.push_str(terminator);
        }
        let fai = format!(
            "ctg\t{}\t{}\t{}\t{}",
            seq.len(),
            header.len(),
            chars_per_line,
            chars_per_line + terminator.len()
        );
        (fasta.into_bytes(), build_index([fai]).unwrap())
    }

    fn fetch(store: &[u8], table: &IndexTable, start: i64, end: i64) -> Result<String> {
        table.get_sequence(&mut Cursor::new(store), "ctg", start, end)
    }

    #[test]
    fn test_line_boundary_crossing() {
        let (store, table) = wrap("ACGTGGCCTT", 4, "\n");
        assert_eq!(fetch(&store, &table, 3, 6).unwrap(), "TGG");
    }

    #[test]
    fn test_byte_span_example() {
        let record = LayoutRecord::new(17, 4, 5, 10).unwrap();
        assert_eq!(
            record.byte_span(3, 6),
            Some(ByteSpan {
                start_byte: 20,
                bytes_to_read: 4
            })
        );
        // Ends exactly on a line end: the trailing terminator is not read
        assert_eq!(
            record.byte_span(0, 8),
            Some(ByteSpan {
                start_byte: 17,
                bytes_to_read: 9
            })
        );
    }

    #[test]
    fn test_byte_span_overflow_on_unvalidated_record() {
        let record = LayoutRecord {
            start_offset: u64::MAX,
            chars_per_line: 4,
            bytes_per_line: 5,
            total_length: 10,
        };
        assert_eq!(record.byte_span(2, 3), None);
    }

    #[test]
    fn test_oversized_line_width_reads_what_exists() {
        // Valid layout whose span is far larger than the store
        let table = build_index(["ctg\t10\t0\t1\t1000000000000000000"]).unwrap();
        let mut store = Cursor::new(b"ACGTGGCCTT\n".to_vec());
        assert_eq!(
            table.get_sequence(&mut store, "ctg", 0, 10).unwrap(),
            "ACGTGGCCTT"
        );
    }

    #[test]
    fn test_round_trip_whole_contig() {
        let (store, table) = wrap("ACGTGGCCTT", 4, "\n");
        assert_eq!(fetch(&store, &table, 0, 10).unwrap(), "ACGTGGCCTT");
    }

    #[test]
    fn test_clamping() {
        let (store, table) = wrap("ACGTGGCCTT", 4, "\n");
        assert_eq!(
            fetch(&store, &table, -5, 15).unwrap(),
            fetch(&store, &table, 0, 10).unwrap()
        );
    }

    #[test]
    fn test_invalid_ranges() {
        let (store, table) = wrap("ACGTGGCCTT", 4, "\n");
        assert!(matches!(
            fetch(&store, &table, 5, 5),
            Err(Error::InvalidRange { start: 5, end: 5 })
        ));
        assert!(matches!(
            fetch(&store, &table, 8, 3),
            Err(Error::InvalidRange { .. })
        ));
        // Entirely past the end of the contig
        assert!(matches!(
            fetch(&store, &table, 12, 20),
            Err(Error::InvalidRange { start: 12, end: 10 })
        ));
        assert!(matches!(
            fetch(&store, &table, -8, -2),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_unknown_contig() {
        let (store, table) = wrap("ACGT", 4, "\n");
        let err = table
            .get_sequence(&mut Cursor::new(&store), "chrUn", 0, 2)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownContig(_)));
    }

    #[test]
    fn test_short_read_is_not_an_error() {
        let (mut store, table) = wrap("ACGTGGCCTT", 4, "\n");
        // Store truncated relative to its index
        store.truncate(store.len() - 4);
        assert_eq!(fetch(&store, &table, 6, 10).unwrap(), "CC");
    }

    #[test]
    fn test_unterminated_final_line() {
        let (mut store, table) = wrap("ACGTGGCCTT", 4, "\n");
        store.pop();
        assert_eq!(fetch(&store, &table, 7, 10).unwrap(), "CTT");
    }

    #[test]
    fn test_non_utf8_store() {
        let record = "ctg\t4\t0\t4\t5";
        let table = build_index([record]).unwrap();
        let store = vec![b'A', 0xff, b'G', b'T', b'\n'];
        let err = table
            .get_sequence(&mut Cursor::new(store), "ctg", 0, 4)
            .unwrap_err();
        assert!(matches!(err, Error::Io(e) if e.kind() == std::io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_second_contig_offset() {
        let store = b">a\nACGT\nAC\n>b\nTTTTG\nGGG\n";
        let table = build_index(["a\t6\t3\t4\t5", "b\t8\t14\t5\t6"]).unwrap();
        let mut handle = Cursor::new(&store[..]);
        assert_eq!(table.get_sequence(&mut handle, "b", 3, 7).unwrap(), "TGGG");
        assert_eq!(table.get_sequence(&mut handle, "a", 0, 6).unwrap(), "ACGTAC");
    }

    /// Every `[a, c)` and split point `b` over a sweep of line widths and
    /// terminator widths.
    #[test]
    fn test_sweep_line_and_terminator_widths() {
        let seq = "ACGTTGCAAGGCTTACCGATGCAT";
        for terminator in ["\n", "\r\n"] {
            for cpl in 1..=8 {
                for len in 1..=seq.len() {
                    let expected = &seq[..len];
                    let (store, table) = wrap(expected, cpl, terminator);
                    let n = len as i64;

                    assert_eq!(fetch(&store, &table, 0, n).unwrap(), expected);
                    assert_eq!(fetch(&store, &table, -5, n + 5).unwrap(), expected);

                    for a in 0..n {
                        assert_eq!(
                            fetch(&store, &table, a, a + 1).unwrap().len(),
                            1,
                            "cpl={} term={:?} len={} i={}",
                            cpl,
                            terminator,
                            len,
                            a
                        );
                        for c in (a + 1)..=n {
                            let got = fetch(&store, &table, a, c).unwrap();
                            assert_eq!(
                                got,
                                &expected[a as usize..c as usize],
                                "cpl={} term={:?} len={} [{}, {})",
                                cpl,
                                terminator,
                                len,
                                a,
                                c
                            );
                            for b in (a + 1)..c {
                                let left = fetch(&store, &table, a, b).unwrap();
                                let right = fetch(&store, &table, b, c).unwrap();
                                assert_eq!(format!("{}{}", left, right), got);
                            }
                        }
                    }
                }
            }
        }
    }
}
