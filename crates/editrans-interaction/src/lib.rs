//! Interaction layer: clients for the external model APIs.

pub mod gemini_stream_backend;
pub mod sse;
pub mod unavailable_backend;

pub use gemini_stream_backend::GeminiStreamBackend;
pub use unavailable_backend::UnavailableBackend;
