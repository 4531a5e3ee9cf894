//! In-memory state repository, used for `--ephemeral` runs and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::repository::{StateKey, StateRepository};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct InMemoryStateRepository {
    values: Mutex<HashMap<StateKey, String>>,
}

impl InMemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given values.
    pub fn with_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (StateKey, V)>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }

    /// Synchronous read for assertions.
    pub fn get(&self, key: StateKey) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }
}

#[async_trait]
impl StateRepository for InMemoryStateRepository {
    async fn load(&self, key: StateKey) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    async fn save(&self, key: StateKey, value: String) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: StateKey) -> Result<()> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        Ok(())
    }
}
