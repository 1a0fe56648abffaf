//! Storage backend abstraction for indexed FASTA datasets.
//!
//! A dataset is addressed by an id and consists of a sequence store plus its
//! faidx index. Backends resolve ids to files and load the index; the
//! seek-and-read itself is done by [`IndexTable::get_sequence`].
//!
//! # Implementations
//!
//! - [`LocalStorage`] - Local filesystem storage
//!
//! # Example
//!
//! ```no_run
//! use faidx_server::storage::LocalStorage;
//! use std::path::PathBuf;
//!
//! let storage = LocalStorage::new(PathBuf::from("./data"));
//! ```

mod local;

pub use local::LocalStorage;

use crate::{Result, index::IndexTable};
use async_trait::async_trait;
use std::path::PathBuf;

/// Storage backend trait for locating FASTA datasets
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if the sequence store for a dataset exists
    async fn exists(&self, id: &str) -> Result<bool>;

    /// Path of the sequence store for a dataset
    fn sequence_path(&self, id: &str) -> Result<PathBuf>;

    /// Get index file path if available
    async fn index_path(&self, id: &str) -> Result<Option<PathBuf>>;

    /// Load and parse the index for a dataset
    async fn load_index(&self, id: &str) -> Result<IndexTable>;
}
