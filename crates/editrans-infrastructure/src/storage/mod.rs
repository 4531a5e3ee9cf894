//! Storage primitives for state files.

mod atomic_file;

pub use atomic_file::{AtomicFileError, AtomicTextFile};
