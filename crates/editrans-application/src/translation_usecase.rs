//! Translation use case.
//!
//! `TranslationUseCase` owns the session state and the glossary for one
//! editing session and drives a request through its lifecycle:
//! `begin_request` → stream fragments into the output → `complete_request`.
//!
//! # Thread Safety
//!
//! Session and glossary sit behind `std::sync::Mutex`. Locks are taken per
//! mutation and never held across an `.await`, so a `clear()` or a second
//! submit can interleave with a running stream; the session's generation
//! ticket decides what still applies.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::orchestrator::TranslationOrchestrator;
use editrans_core::error::{Result, TRANSLATION_FAILED_MESSAGE};
use editrans_core::glossary::{GlossaryEntry, GlossaryStore};
use editrans_core::session::{
    ModelTier, RequestOutcome, SessionState, TranslationFormat, TranslationStatus,
};
use editrans_core::state::{StateRepository, StateWriter};

/// Receives progress of a running translation.
pub trait TranslationObserver: Send {
    /// Called when the session enters `Streaming` and when it reaches a
    /// terminal status.
    fn on_status(&mut self, _status: TranslationStatus) {}

    /// Called for every fragment accepted into the output.
    fn on_fragment(&mut self, _text: &str) {}
}

/// Observer that ignores everything.
impl TranslationObserver for () {}

/// Point-in-time summary of the session, for status displays.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub status: TranslationStatus,
    pub format: TranslationFormat,
    pub model_tier: ModelTier,
    pub input_chars: usize,
    pub output_chars: usize,
    pub glossary_len: usize,
    pub last_error: Option<String>,
}

pub struct TranslationUseCase {
    session: Mutex<SessionState>,
    glossary: Mutex<GlossaryStore>,
    writer: StateWriter,
}

impl TranslationUseCase {
    /// Restores session and glossary from `repository` and starts the
    /// background writer that persists later changes.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn open(repository: Arc<dyn StateRepository>) -> Self {
        let (writer, _writer_task) = StateWriter::spawn(Arc::clone(&repository));
        let session = SessionState::restore(repository.as_ref(), writer.clone()).await;
        let glossary = GlossaryStore::load(repository.as_ref(), writer.clone()).await;

        tracing::debug!(
            "Session opened: status={}, input_chars={}, glossary={}",
            session.status(),
            session.input_text().chars().count(),
            glossary.len()
        );

        Self {
            session: Mutex::new(session),
            glossary: Mutex::new(glossary),
            writer,
        }
    }

    // ============================================================================
    // Session
    // ============================================================================

    pub fn status(&self) -> TranslationStatus {
        self.session().status()
    }

    pub fn input_text(&self) -> String {
        self.session().input_text().to_string()
    }

    pub fn output_text(&self) -> String {
        self.session().output_text().to_string()
    }

    pub fn last_error(&self) -> Option<String> {
        self.session().last_error().map(str::to_string)
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.session().set_input(text);
    }

    pub fn set_format(&self, format: TranslationFormat) {
        self.session().set_format(format);
    }

    pub fn set_model_tier(&self, model_tier: ModelTier) {
        self.session().set_model_tier(model_tier);
    }

    /// Resets input, output and status. The glossary is left alone.
    pub fn clear(&self) {
        self.session().clear();
        tracing::info!("Session cleared");
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let glossary_len = self.glossary().len();
        let session = self.session();
        SessionSnapshot {
            status: session.status(),
            format: session.format(),
            model_tier: session.model_tier(),
            input_chars: session.input_text().chars().count(),
            output_chars: session.output_text().chars().count(),
            glossary_len,
            last_error: session.last_error().map(str::to_string),
        }
    }

    // ============================================================================
    // Glossary
    // ============================================================================

    /// Adds a glossary entry. Blank terms or definitions are rejected with a
    /// validation error and leave the glossary unchanged.
    pub fn add_glossary_entry(&self, term: &str, definition: &str) -> Result<GlossaryEntry> {
        self.glossary().add(term, definition)
    }

    pub fn remove_glossary_entry(&self, id: &str) -> Option<GlossaryEntry> {
        self.glossary().remove(id)
    }

    pub fn glossary_entries(&self) -> Vec<GlossaryEntry> {
        self.glossary().entries().to_vec()
    }

    // ============================================================================
    // Translation
    // ============================================================================

    /// Translates the current input.
    ///
    /// Returns `None` when the request was not started: another request is in
    /// flight or the input is blank. Otherwise returns the session status
    /// after the request finished, which is not necessarily terminal if the
    /// session was cleared or restarted meanwhile.
    ///
    /// Failures never escape: they land the session in `Error` with the
    /// generic failure message, keeping whatever output already streamed.
    pub async fn run_translation(
        &self,
        orchestrator: &TranslationOrchestrator,
        observer: &mut dyn TranslationObserver,
    ) -> Option<TranslationStatus> {
        let ticket = self.session().begin_request()?;
        observer.on_status(TranslationStatus::Streaming);

        let glossary = self.glossary().snapshot();
        let result = orchestrator
            .translate(
                &ticket.input,
                ticket.format,
                ticket.model_tier,
                &glossary,
                |text| {
                    if self.session().append_output_chunk(&ticket, text) {
                        observer.on_fragment(text);
                    }
                },
            )
            .await;

        let outcome = match result {
            Ok(()) => RequestOutcome::Success,
            Err(e) => {
                tracing::warn!("Translation failed: {}", e);
                RequestOutcome::Failed(TRANSLATION_FAILED_MESSAGE.to_string())
            }
        };

        let (completed, status) = {
            let mut session = self.session();
            let completed = session.complete_request(&ticket, outcome);
            (completed, session.status())
        };
        if completed {
            tracing::info!("Translation finished: {}", status);
            observer.on_status(status);
        } else {
            tracing::debug!("Request {} was superseded", ticket.generation);
        }
        Some(status)
    }

    /// Waits until every change made so far has reached storage.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    fn session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn glossary(&self) -> MutexGuard<'_, GlossaryStore> {
        self.glossary.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
