//! Index table for random access into a FASTA sequence store.
//!
//! Each line of a faidx index describes one contig with five
//! whitespace-separated fields:
//!
//! ```text
//! name  total_length  start_offset  chars_per_line  bytes_per_line
//! ```
//!
//! The table is built once and is read-only afterwards, so it can be shared
//! across threads behind an `Arc` without locking.

use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Per-contig line layout within the sequence store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutRecord {
    /// Byte position of the first character (just after the header line)
    pub start_offset: u64,
    /// Logical characters per full line
    pub chars_per_line: u64,
    /// Physical bytes per full line, terminator included
    pub bytes_per_line: u64,
    /// Logical length of the contig
    pub total_length: u64,
}

impl LayoutRecord {
    /// Create a record, rejecting layouts the offset arithmetic cannot handle.
    pub fn new(
        start_offset: u64,
        chars_per_line: u64,
        bytes_per_line: u64,
        total_length: u64,
    ) -> std::result::Result<Self, String> {
        if chars_per_line == 0 {
            return Err("chars_per_line must be positive".to_string());
        }
        if bytes_per_line < chars_per_line {
            return Err(format!(
                "bytes_per_line ({}) is smaller than chars_per_line ({})",
                bytes_per_line, chars_per_line
            ));
        }
        let record = Self {
            start_offset,
            chars_per_line,
            bytes_per_line,
            total_length,
        };
        if record.byte_extent().is_none() {
            return Err(format!(
                "contig of {} characters at offset {} overflows 64-bit file offsets",
                total_length, start_offset
            ));
        }
        Ok(record)
    }

    /// Byte position just past the contig's last character, if representable.
    pub fn byte_extent(&self) -> Option<u64> {
        let full_lines = self.total_length / self.chars_per_line;
        let leftover = self.total_length % self.chars_per_line;
        full_lines
            .checked_mul(self.bytes_per_line)?
            .checked_add(leftover)?
            .checked_add(self.start_offset)
    }

    /// Bytes of line terminator at the end of every full line.
    pub fn terminator_width(&self) -> u64 {
        self.bytes_per_line - self.chars_per_line
    }
}

/// Immutable mapping from contig name to its [`LayoutRecord`].
#[derive(Debug, Clone, Default)]
pub struct IndexTable {
    records: HashMap<String, LayoutRecord>,
    // First-seen order of contig names
    names: Vec<String>,
}

/// Build an index table from index lines.
///
/// The first malformed line aborts the whole build. Blank lines are skipped.
/// When a contig name repeats, the later line wins.
pub fn build_index<I, S>(lines: I) -> Result<IndexTable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = IndexTable::default();

    for (line_num, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let (name, record) =
            IndexTable::parse_line(line).map_err(|reason| Error::MalformedIndexEntry {
                line: line_num + 1,
                reason,
            })?;

        table.insert(name, record);
    }

    debug!("built index with {} contigs", table.len());
    Ok(table)
}

impl IndexTable {
    /// Parse one index line into a contig name and its layout.
    pub fn parse_line(line: &str) -> std::result::Result<(String, LayoutRecord), String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(format!("expected 5 fields, got {}", fields.len()));
        }

        let total_length = parse_field(fields[1], "total_length")?;
        let start_offset = parse_field(fields[2], "start_offset")?;
        let chars_per_line = parse_field(fields[3], "chars_per_line")?;
        let bytes_per_line = parse_field(fields[4], "bytes_per_line")?;

        let record = LayoutRecord::new(start_offset, chars_per_line, bytes_per_line, total_length)?;
        Ok((fields[0].to_string(), record))
    }

    /// Load an index from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
        build_index(lines)
    }

    /// Load an index file from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to open index {:?}: {}", path, e),
            ))
        })?;
        debug!("loading index from {:?}", path);
        Self::from_reader(BufReader::new(file))
    }

    fn insert(&mut self, name: String, record: LayoutRecord) {
        if self.records.insert(name.clone(), record).is_some() {
            warn!("duplicate contig {} in index, keeping the later entry", name);
        } else {
            self.names.push(name);
        }
    }

    /// Look up the layout of a contig.
    pub fn get(&self, contig: &str) -> Result<&LayoutRecord> {
        self.records
            .get(contig)
            .ok_or_else(|| Error::UnknownContig(contig.to_string()))
    }

    /// Whether the table has an entry for `contig`.
    pub fn contains(&self, contig: &str) -> bool {
        self.records.contains_key(contig)
    }

    /// Contig names in the order they first appeared.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Contigs and their layouts in the order of `names()`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayoutRecord)> {
        self.names
            .iter()
            .filter_map(|name| self.records.get(name).map(|r| (name.as_str(), r)))
    }

    /// Number of distinct contigs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no contigs.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_field(value: &str, field: &str) -> std::result::Result<u64, String> {
    value
        .parse::<u64>()
        .map_err(|e| format!("invalid {} {:?}: {}", field, value, e))
}
