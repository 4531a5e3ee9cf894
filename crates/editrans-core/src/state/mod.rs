//! Persisted state: the key-value repository contract, an in-memory
//! implementation, and the background writer that applies mutations.

mod memory;
mod repository;
mod writer;

pub use memory::InMemoryStateRepository;
pub use repository::{StateKey, StateRepository};
pub use writer::StateWriter;
