//! File-backed state repository.
//!
//! Each state key lives in its own file under the state directory, written
//! through [`AtomicTextFile`]. Blocking file I/O runs on tokio's blocking pool.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::paths::EditransPaths;
use crate::storage::AtomicTextFile;
use editrans_core::error::{EditransError, Result};
use editrans_core::state::{StateKey, StateRepository};

#[derive(Debug, Clone)]
pub struct FileStateRepository {
    paths: EditransPaths,
}

impl FileStateRepository {
    pub fn new(paths: EditransPaths) -> Self {
        tracing::debug!("State directory: {}", paths.state_dir().display());
        Self { paths }
    }

    /// Keeps state files under `root/state` (tests, `--state-dir`).
    pub fn with_root(root: PathBuf) -> Self {
        Self::new(EditransPaths::with_root(root))
    }

    fn file(&self, key: StateKey) -> AtomicTextFile {
        AtomicTextFile::new(self.paths.state_file(key))
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| EditransError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl StateRepository for FileStateRepository {
    async fn load(&self, key: StateKey) -> Result<Option<String>> {
        let file = self.file(key);
        run_blocking(move || Ok(file.load()?)).await
    }

    async fn save(&self, key: StateKey, value: String) -> Result<()> {
        let file = self.file(key);
        run_blocking(move || Ok(file.save(&value)?)).await
    }

    async fn remove(&self, key: StateKey) -> Result<()> {
        let file = self.file(key);
        run_blocking(move || Ok(file.remove()?)).await
    }
}
