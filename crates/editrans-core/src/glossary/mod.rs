//! Glossary domain module: user-defined term overrides.

mod model;
mod store;

pub use model::GlossaryEntry;
pub use store::GlossaryStore;
