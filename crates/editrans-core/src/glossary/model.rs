//! Glossary domain model.

use serde::{Deserialize, Serialize};

/// A user-defined translation override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Unique identifier (UUID format), assigned when the entry is added.
    pub id: String,
    /// Source term, trimmed.
    pub term: String,
    /// Required rendering of the term, trimmed.
    pub definition: String,
}

impl GlossaryEntry {
    /// True when both term and definition carry text.
    pub fn is_valid(&self) -> bool {
        !self.term.trim().is_empty() && !self.definition.trim().is_empty()
    }
}
