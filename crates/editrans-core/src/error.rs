//! Error types for the Editrans application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic message shown to the user whenever a translation request fails.
pub const TRANSLATION_FAILED_MESSAGE: &str =
    "Failed to translate content. Please check your API key or connection.";

/// Classifies where a translation request broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslationFailure {
    /// The HTTP connection could not be established or was dropped mid-stream.
    Connection,
    /// The API rejected the credentials (HTTP 401/403 or missing API key).
    Authentication,
    /// The API answered with a non-success status or an in-stream error payload.
    Api,
    /// The stream carried data that could not be decoded.
    MalformedResponse,
}

impl std::fmt::Display for TranslationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Connection => "connection",
            Self::Authentication => "authentication",
            Self::Api => "api",
            Self::MalformedResponse => "malformed response",
        };
        f.write_str(label)
    }
}

/// A shared error type for the entire Editrans workspace.
///
/// Variants follow the three user-visible failure classes (validation,
/// persistence, translation) plus the plumbing errors that surface while
/// loading configuration or rendering instruction templates.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum EditransError {
    /// Input rejected before any work was done (empty term, empty text).
    #[error("Validation error: {0}")]
    Validation(String),

    /// State storage unavailable or corrupt.
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Failure of the external translation call.
    #[error("Translation error ({kind}): {message}")]
    Translation {
        kind: TranslationFailure,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", "template"
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EditransError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Creates a Translation error of the given kind
    pub fn translation(kind: TranslationFailure, message: impl Into<String>) -> Self {
        Self::Translation {
            kind,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    pub fn is_translation(&self) -> bool {
        matches!(self, Self::Translation { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the failure kind when this is a translation error.
    pub fn translation_failure(&self) -> Option<TranslationFailure> {
        match self {
            Self::Translation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Folds any error into a single translation error.
    ///
    /// Translation errors pass through untouched so the original kind is
    /// kept; everything else becomes an `Api` failure.
    pub fn into_translation(self) -> Self {
        match self {
            Self::Translation { .. } => self,
            other => Self::translation(TranslationFailure::Api, other.to_string()),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EditransError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EditransError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EditransError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for EditransError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for EditransError {
    fn from(err: minijinja::Error) -> Self {
        Self::Serialization {
            format: "template".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EditransError>`.
pub type Result<T> = std::result::Result<T, EditransError>;
