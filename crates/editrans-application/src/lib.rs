//! Application layer for editrans.
//!
//! This crate provides the translation orchestrator and the use case that
//! drives a session through a request, coordinating core state with the
//! model backend.

pub mod orchestrator;
pub mod translation_usecase;

pub use orchestrator::TranslationOrchestrator;
pub use translation_usecase::{SessionSnapshot, TranslationObserver, TranslationUseCase};
