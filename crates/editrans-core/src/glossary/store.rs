//! Glossary store: ordered, persisted term overrides.

use std::sync::Arc;
use uuid::Uuid;

use super::model::GlossaryEntry;
use crate::error::{EditransError, Result};
use crate::state::{StateKey, StateRepository, StateWriter};

/// Ordered collection of glossary entries.
///
/// Insertion order is display order. Every mutation enqueues the full
/// sequence on the state writer under [`StateKey::Glossary`].
pub struct GlossaryStore {
    entries: Vec<GlossaryEntry>,
    writer: StateWriter,
}

impl GlossaryStore {
    /// Creates an empty store.
    pub fn new(writer: StateWriter) -> Self {
        Self {
            entries: Vec::new(),
            writer,
        }
    }

    /// Rebuilds the store from persisted state.
    ///
    /// Never fails: missing, unreadable or corrupt data yields an empty store,
    /// and individual entries with a blank term or definition are skipped.
    pub async fn load(repository: &dyn StateRepository, writer: StateWriter) -> Self {
        let entries = match repository.load(StateKey::Glossary).await {
            Ok(Some(raw)) => parse_entries(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read glossary, starting empty: {}", e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} glossary entries", entries.len());
        Self { entries, writer }
    }

    /// Appends a new entry.
    ///
    /// # Returns
    ///
    /// - `Ok(GlossaryEntry)`: the stored entry, with a fresh id and trimmed fields
    /// - `Err(EditransError::Validation)`: term or definition is blank
    pub fn add(&mut self, term: &str, definition: &str) -> Result<GlossaryEntry> {
        let term = term.trim();
        let definition = definition.trim();
        if term.is_empty() || definition.is_empty() {
            return Err(EditransError::validation(
                "glossary term and definition must both be non-empty",
            ));
        }

        let entry = GlossaryEntry {
            id: Uuid::new_v4().to_string(),
            term: term.to_string(),
            definition: definition.to_string(),
        };
        self.entries.push(entry.clone());
        self.persist();
        Ok(entry)
    }

    /// Removes the entry with `id`. Unknown ids are ignored.
    ///
    /// Returns the removed entry, if any.
    pub fn remove(&mut self, id: &str) -> Option<GlossaryEntry> {
        let position = self.entries.iter().position(|entry| entry.id == id);
        let removed = position.map(|index| self.entries.remove(index));
        self.persist();
        removed
    }

    pub fn get(&self, id: &str) -> Option<&GlossaryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entries(&self) -> &[GlossaryEntry] {
        &self.entries
    }

    /// Immutable copy handed to a translation request.
    pub fn snapshot(&self) -> Arc<[GlossaryEntry]> {
        Arc::from(self.entries.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => self.writer.save(StateKey::Glossary, json),
            Err(e) => tracing::warn!("Failed to serialize glossary: {}", e),
        }
    }
}

fn parse_entries(raw: &str) -> Vec<GlossaryEntry> {
    match serde_json::from_str::<Vec<GlossaryEntry>>(raw) {
        Ok(entries) => entries
            .into_iter()
            .filter(|entry| {
                let keep = entry.is_valid();
                if !keep {
                    tracing::debug!("Skipping blank glossary entry {}", entry.id);
                }
                keep
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Corrupt glossary data, starting empty: {}", e);
            Vec::new()
        }
    }
}
