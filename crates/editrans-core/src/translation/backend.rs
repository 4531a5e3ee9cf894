//! Translation backend trait.
//!
//! The backend is the external model API. It receives a fully prepared
//! request and hands back the response as a lazy stream of text fragments.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::profile::ModelProfile;
use crate::error::Result;

/// Lazy, finite, non-restartable sequence of translated text fragments.
///
/// An `Err` item terminates the request; the orchestrator stops polling
/// after the first one.
pub type FragmentStream = BoxStream<'static, Result<String>>;

/// A request ready to be sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub profile: ModelProfile,
    pub instruction: String,
    pub input: String,
}

#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Opens the response stream.
    ///
    /// Setup failures (connection refused, rejected credentials, non-2xx
    /// status) are returned here; failures after the first fragment arrive
    /// as `Err` items of the stream.
    async fn stream_translation(&self, request: TranslationRequest) -> Result<FragmentStream>;
}
