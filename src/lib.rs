pub mod config;
pub mod error;
pub mod fasta;
pub mod handlers;
pub mod index;
pub mod reader;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use fasta::IndexedFasta;
pub use index::{IndexTable, LayoutRecord, build_index};
pub use reader::ByteSpan;
