use super::Storage;
use crate::{Error, Result, index::build_index, index::IndexTable};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub struct LocalStorage {
    data_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve `id` to a file directly inside `data_dir`.
    fn make_file_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.data_dir.join(format!("{}.fa", id)))
    }
}

/// Dataset ids name a single file in the data directory, never a path.
fn validate_id(id: &str) -> Result<()> {
    let single_component = {
        let mut components = Path::new(id).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    };
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") || !single_component {
        return Err(Error::InvalidInput(format!("invalid dataset id: {:?}", id)));
    }
    Ok(())
}

#[async_trait]
impl Storage for LocalStorage {
    async fn exists(&self, id: &str) -> Result<bool> {
        Ok(fs::try_exists(self.make_file_path(id)?).await.unwrap_or(false))
    }

    fn sequence_path(&self, id: &str) -> Result<PathBuf> {
        self.make_file_path(id)
    }

    async fn index_path(&self, id: &str) -> Result<Option<PathBuf>> {
        let path = self.make_file_path(id)?;

        // Try appended index first (e.g., genome.fa.fai)
        let appended_idx = PathBuf::from(format!("{}.fai", path.display()));
        if fs::try_exists(&appended_idx).await.unwrap_or(false) {
            return Ok(Some(appended_idx));
        }

        // Try replaced extension (e.g., genome.fai)
        let replaced_idx = path.with_extension("fai");
        if fs::try_exists(&replaced_idx).await.unwrap_or(false) {
            return Ok(Some(replaced_idx));
        }

        Ok(None)
    }

    async fn load_index(&self, id: &str) -> Result<IndexTable> {
        let path = self
            .index_path(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("no index for {}", id)))?;

        debug!("loading index {:?}", path);
        let text = fs::read_to_string(&path).await?;
        build_index(text.lines())
    }
}
