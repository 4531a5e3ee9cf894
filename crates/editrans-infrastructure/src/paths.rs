//! Unified path management for editrans configuration and state files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/editrans/          # Root (platform config dir, or an explicit override)
//! ├── config.toml              # Application configuration
//! ├── secret.json              # API keys
//! └── state/                   # Persisted session state, one file per key
//!     ├── input.txt
//!     ├── output.txt
//!     └── glossary.json
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

use editrans_core::state::StateKey;

const APP_DIR_NAME: &str = "editrans";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform config directory could not be determined.
    #[error("Cannot find the platform config directory")]
    ConfigDirNotFound,
}

/// Path resolver rooted at the editrans config directory.
#[derive(Debug, Clone)]
pub struct EditransPaths {
    root: PathBuf,
    state_dir: Option<PathBuf>,
}

impl EditransPaths {
    /// Resolves paths under `root`, or under the platform config directory
    /// (`~/.config/editrans` on Linux) when `root` is `None`.
    pub fn new(root: Option<PathBuf>) -> Result<Self, PathError> {
        let root = match root {
            Some(root) => root,
            None => dirs::config_dir()
                .ok_or(PathError::ConfigDirNotFound)?
                .join(APP_DIR_NAME),
        };
        Ok(Self::with_root(root))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            root,
            state_dir: None,
        }
    }

    /// Keeps state files directly in `dir` instead of `root/state`.
    pub fn with_state_dir(mut self, dir: PathBuf) -> Self {
        self.state_dir = Some(dir);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// The file should be readable by the owner only (600).
    pub fn secret_file(&self) -> PathBuf {
        self.root.join("secret.json")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| self.root.join("state"))
    }

    /// File backing one persisted state key.
    pub fn state_file(&self, key: StateKey) -> PathBuf {
        self.state_dir().join(state_file_name(key))
    }
}

fn state_file_name(key: StateKey) -> &'static str {
    match key {
        StateKey::Input => "input.txt",
        StateKey::Output => "output.txt",
        StateKey::Outcome => "outcome.txt",
        StateKey::Glossary => "glossary.json",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root() {
        let paths = EditransPaths::new(None).unwrap();
        assert!(paths.root().ends_with("editrans"));
        assert!(paths.config_file().starts_with(paths.root()));
    }

    #[test]
    fn test_explicit_root() {
        let paths = EditransPaths::new(Some(PathBuf::from("/tmp/editrans-test"))).unwrap();
        assert_eq!(
            paths.secret_file(),
            PathBuf::from("/tmp/editrans-test/secret.json")
        );
        assert_eq!(
            paths.state_file(StateKey::Glossary),
            PathBuf::from("/tmp/editrans-test/state/glossary.json")
        );
    }

    #[test]
    fn test_state_dir_override() {
        let paths = EditransPaths::with_root(PathBuf::from("/tmp/editrans-test"))
            .with_state_dir(PathBuf::from("/var/tmp/drafts"));
        assert_eq!(
            paths.state_file(StateKey::Input),
            PathBuf::from("/var/tmp/drafts/input.txt")
        );
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/editrans-test/config.toml")
        );
    }
}
