use crate::index::IndexTable;
use crate::Result;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A FASTA file paired with its loaded index.
///
/// The index is read once at construction. Each query opens its own handle on
/// the FASTA file, so an `IndexedFasta` can be shared between threads.
#[derive(Debug, Clone)]
pub struct IndexedFasta {
    fasta_path: PathBuf,
    index: IndexTable,
}

impl IndexedFasta {
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(fasta_path: P, fai_path: Q) -> Result<Self> {
        let index = IndexTable::from_path(fai_path)?;
        Ok(Self {
            fasta_path: fasta_path.as_ref().to_path_buf(),
            index,
        })
    }

    /// Open using the conventional `<fasta>.fai` index next to the FASTA file.
    pub fn open_default<P: AsRef<Path>>(fasta_path: P) -> Result<Self> {
        let fasta_path = fasta_path.as_ref();
        let fai_path = PathBuf::from(format!("{}.fai", fasta_path.display()));
        Self::open(fasta_path, fai_path)
    }

    pub fn index(&self) -> &IndexTable {
        &self.index
    }

    pub fn path(&self) -> &Path {
        &self.fasta_path
    }

    /// Fetch `[start, end)` of `contig`, clamped to the contig bounds.
    pub fn get_sequence(&self, contig: &str, start: i64, end: i64) -> Result<String> {
        // Validate the query before touching the file
        self.index.get(contig)?.clamp(start, end)?;

        let mut handle = File::open(&self.fasta_path)?;
        self.index.get_sequence(&mut handle, contig, start, end)
    }
}
