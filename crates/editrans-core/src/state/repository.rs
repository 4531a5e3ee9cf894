//! State repository trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::error::Result;

/// Keys of the string-valued persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StateKey {
    /// Raw source text.
    Input,
    /// Accumulated translation.
    Output,
    /// Status of the request that produced `Output`, written when it starts
    /// and again when it completes.
    Outcome,
    /// JSON array of glossary entries.
    Glossary,
}

/// Repository for the persisted session state.
///
/// Values are opaque strings; callers own their encoding. A key that was
/// never written, or was removed, loads as `None`.
#[async_trait]
pub trait StateRepository: Send + Sync {
    /// Loads the value stored under `key`.
    async fn load(&self, key: StateKey) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn save(&self, key: StateKey, value: String) -> Result<()>;

    /// Deletes the value stored under `key`. Removing a missing key is not an error.
    async fn remove(&self, key: StateKey) -> Result<()>;
}
