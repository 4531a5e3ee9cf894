//! Session state: the single owner of input, output and status.
//!
//! Every mutator enqueues its own persistence write. Streaming requests are
//! identified by a generation number; fragments or completions carrying a
//! stale ticket are dropped, so clearing or restarting mid-stream never
//! corrupts the visible output.

use super::model::{ModelTier, RequestOutcome, RequestTicket, TranslationFormat, TranslationStatus};
use crate::error::TRANSLATION_FAILED_MESSAGE;
use crate::state::{StateKey, StateRepository, StateWriter};

pub struct SessionState {
    input_text: String,
    output_text: String,
    status: TranslationStatus,
    format: TranslationFormat,
    model_tier: ModelTier,
    generation: u64,
    last_error: Option<String>,
    writer: StateWriter,
}

impl SessionState {
    /// Creates an empty, idle session.
    pub fn new(writer: StateWriter) -> Self {
        Self {
            input_text: String::new(),
            output_text: String::new(),
            status: TranslationStatus::Idle,
            format: TranslationFormat::default(),
            model_tier: ModelTier::default(),
            generation: 0,
            last_error: None,
            writer,
        }
    }

    /// Restores input, output and the last request's outcome from persisted
    /// state.
    ///
    /// Read failures fall back to empty strings. Only a request recorded as
    /// `Success` restores as `Success`; output from a request that never
    /// completed, or whose outcome is unknown, restores as `Error`.
    pub async fn restore(repository: &dyn StateRepository, writer: StateWriter) -> Self {
        let mut session = Self::new(writer);
        session.input_text = load_or_empty(repository, StateKey::Input).await;
        session.output_text = load_or_empty(repository, StateKey::Output).await;

        let outcome = load_or_empty(repository, StateKey::Outcome).await;
        session.status = match outcome.parse::<TranslationStatus>() {
            Ok(TranslationStatus::Success) => TranslationStatus::Success,
            Ok(TranslationStatus::Error) => TranslationStatus::Error,
            _ if session.output_text.is_empty() => TranslationStatus::Idle,
            _ => {
                tracing::warn!("Restored output from an unfinished request");
                TranslationStatus::Error
            }
        };
        if session.status == TranslationStatus::Error {
            session.last_error = Some(TRANSLATION_FAILED_MESSAGE.to_string());
        }
        session
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    pub fn status(&self) -> TranslationStatus {
        self.status
    }

    pub fn format(&self) -> TranslationFormat {
        self.format
    }

    pub fn model_tier(&self) -> ModelTier {
        self.model_tier
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ============================================================================
    // Mutators
    // ============================================================================

    /// Replaces the input text and persists it.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
        self.writer.save(StateKey::Input, self.input_text.clone());
    }

    /// Takes effect for the next request; an in-flight request keeps its own copy.
    pub fn set_format(&mut self, format: TranslationFormat) {
        self.format = format;
    }

    /// Takes effect for the next request; an in-flight request keeps its own copy.
    pub fn set_model_tier(&mut self, model_tier: ModelTier) {
        self.model_tier = model_tier;
    }

    /// Resets input, output and status and drops their persisted copies.
    ///
    /// Any request still streaming becomes stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.input_text.clear();
        self.output_text.clear();
        self.status = TranslationStatus::Idle;
        self.last_error = None;
        self.writer.remove(StateKey::Input);
        self.writer.remove(StateKey::Output);
        self.writer.remove(StateKey::Outcome);
    }

    /// Starts a new request.
    ///
    /// Returns `None` without touching anything when a request is already in
    /// flight or the input is blank.
    pub fn begin_request(&mut self) -> Option<RequestTicket> {
        if self.status.is_in_flight() {
            tracing::debug!("Ignoring translate request: {} in progress", self.status);
            return None;
        }
        if self.input_text.trim().is_empty() {
            return None;
        }

        self.generation += 1;
        self.status = TranslationStatus::Streaming;
        self.output_text.clear();
        self.last_error = None;
        self.writer.save(StateKey::Output, String::new());
        self.save_outcome();

        Some(RequestTicket {
            generation: self.generation,
            input: self.input_text.clone(),
            format: self.format,
            model_tier: self.model_tier,
        })
    }

    /// Appends a streamed fragment to the output.
    ///
    /// Returns `false` when the fragment was dropped because the ticket is
    /// stale or the request already completed.
    pub fn append_output_chunk(&mut self, ticket: &RequestTicket, text: &str) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding fragment from stale request {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        if self.status != TranslationStatus::Streaming {
            return false;
        }

        self.output_text.push_str(text);
        self.writer.save(StateKey::Output, self.output_text.clone());
        true
    }

    /// Moves the request to its terminal status.
    ///
    /// Partial output is kept on failure. Returns `false` for stale tickets
    /// and for requests that already completed.
    pub fn complete_request(&mut self, ticket: &RequestTicket, outcome: RequestOutcome) -> bool {
        if !self.is_current(ticket) || !self.status.is_in_flight() {
            return false;
        }

        match outcome {
            RequestOutcome::Success => {
                self.status = TranslationStatus::Success;
            }
            RequestOutcome::Failed(message) => {
                self.status = TranslationStatus::Error;
                self.last_error = Some(message);
            }
        }
        self.save_outcome();
        true
    }

    fn save_outcome(&self) {
        self.writer.save(StateKey::Outcome, self.status.to_string());
    }

    fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation
    }
}

async fn load_or_empty(repository: &dyn StateRepository, key: StateKey) -> String {
    match repository.load(key).await {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read persisted {}: {}", key, e);
            String::new()
        }
    }
}
