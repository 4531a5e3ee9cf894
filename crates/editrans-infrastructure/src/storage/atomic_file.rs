//! Atomic text file operations.
//!
//! Writes go to a temporary sibling, are fsynced, then renamed over the
//! target, all under an exclusive lock file. Readers never observe a
//! half-written value.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use thiserror::Error;

use editrans_core::EditransError;

/// Errors that can occur during atomic file operations.
#[derive(Debug, Error)]
pub enum AtomicFileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Lock error: {0}")]
    Lock(String),
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
}

impl From<AtomicFileError> for EditransError {
    fn from(err: AtomicFileError) -> Self {
        EditransError::persistence(err.to_string())
    }
}

/// A handle to a text file that is replaced atomically.
#[derive(Debug, Clone)]
pub struct AtomicTextFile {
    path: PathBuf,
}

impl AtomicTextFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: file contents
    /// - `Ok(None)`: the file does not exist
    /// - `Err`: the file exists but could not be read (including invalid UTF-8)
    pub fn load(&self) -> Result<Option<String>, AtomicFileError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Replaces the file contents atomically.
    pub fn save(&self, content: &str) -> Result<(), AtomicFileError> {
        let parent = self.parent()?;
        fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path).map_err(|e| self.io_error(e))?;
        tmp_file
            .write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;
        tmp_file.sync_all().map_err(|e| self.io_error(e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<(), AtomicFileError> {
        if !self.path.exists() {
            return Ok(());
        }
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn parent(&self) -> Result<&Path, AtomicFileError> {
        self.path
            .parent()
            .ok_or_else(|| AtomicFileError::InvalidPath(self.path.clone()))
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| AtomicFileError::InvalidPath(self.path.clone()))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.parent()?.join(tmp_name))
    }

    fn io_error(&self, source: std::io::Error) -> AtomicFileError {
        AtomicFileError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| AtomicFileError::Lock(format!("{}: {}", lock_path.display(), e)))?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::Lock(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}
