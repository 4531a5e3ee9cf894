pub mod config;
pub mod error;
pub mod glossary;
pub mod prompt;
pub mod session;
pub mod state;
pub mod translation;

// Re-export common error type
pub use error::{EditransError, Result, TranslationFailure};
