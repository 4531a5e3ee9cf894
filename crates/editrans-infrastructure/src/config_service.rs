//! Configuration service.
//!
//! Loads `config.toml` and `secret.json` from the editrans config directory
//! and resolves the Gemini API key. Environment variables win over the
//! secret file.

use std::fs;
use std::path::PathBuf;

use crate::paths::EditransPaths;
use editrans_core::config::{AppConfig, GeminiSecret, SecretConfig};
use editrans_core::error::{EditransError, Result};
use editrans_core::TranslationFailure;

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: EditransPaths,
}

impl ConfigService {
    pub fn new(paths: EditransPaths) -> Self {
        Self { paths }
    }

    /// Loads `config.toml`. A missing file yields defaults; a malformed one
    /// is a `Config` error.
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.paths.config_file();
        let Some(content) = read_optional(&path)? else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        };

        toml::from_str(&content).map_err(|e| {
            EditransError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Loads `secret.json`. A missing file yields an empty secret config.
    pub fn load_secrets(&self) -> Result<SecretConfig> {
        let path = self.paths.secret_file();
        let Some(content) = read_optional(&path)? else {
            return Ok(SecretConfig::default());
        };

        serde_json::from_str(&content).map_err(|e| {
            EditransError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Resolves the Gemini API key from the environment, then `secret.json`.
    ///
    /// Fails with an authentication error when no non-blank key is found.
    pub fn api_key(&self) -> Result<String> {
        let secrets = match self.load_secrets() {
            Ok(secrets) => secrets,
            Err(e) => {
                tracing::warn!("Ignoring unreadable secret file: {}", e);
                SecretConfig::default()
            }
        };

        resolve_api_key(&secrets, |name| std::env::var(name).ok()).ok_or_else(|| {
            EditransError::translation(
                TranslationFailure::Authentication,
                format!(
                    "No Gemini API key found. Set GEMINI_API_KEY or add it to {}",
                    self.paths.secret_file().display()
                ),
            )
        })
    }

    /// Writes a default `config.toml` unless one already exists.
    pub fn ensure_config_file(&self) -> Result<PathBuf> {
        let path = self.paths.config_file();
        if path.exists() {
            return Ok(path);
        }
        create_parent(&path)?;

        let template = toml::to_string_pretty(&AppConfig::default())?;
        fs::write(&path, template)?;
        Ok(path)
    }

    /// Ensures the secret file exists, creating an empty template if it
    /// doesn't.
    ///
    /// # Security Note
    ///
    /// A newly created file gets permissions 600 on Unix.
    pub fn ensure_secret_file(&self) -> Result<PathBuf> {
        let path = self.paths.secret_file();
        if path.exists() {
            return Ok(path);
        }
        create_parent(&path)?;

        let template = SecretConfig {
            gemini: Some(GeminiSecret {
                api_key: String::new(),
            }),
        };
        fs::write(&path, serde_json::to_string_pretty(&template)?)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(path)
    }
}

/// Picks the first non-blank key from the environment lookup, then the
/// secret config.
pub fn resolve_api_key<F>(secrets: &SecretConfig, env: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env(name))
        .chain(secrets.gemini.iter().map(|g| g.api_key.clone()))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

fn read_optional(path: &std::path::Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn create_parent(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
