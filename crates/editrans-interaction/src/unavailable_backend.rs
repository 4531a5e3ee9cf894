//! Stand-in backend for when the real one cannot be built.
//!
//! A missing API key must not stop the session from recording the attempt:
//! the request still runs through `begin_request`/`complete_request` and
//! ends in `Error` like any other failed call.

use async_trait::async_trait;

use editrans_core::error::{EditransError, Result};
use editrans_core::translation::{FragmentStream, TranslationBackend, TranslationRequest};

#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: EditransError,
}

impl UnavailableBackend {
    pub fn new(reason: EditransError) -> Self {
        Self { reason }
    }
}

#[async_trait]
impl TranslationBackend for UnavailableBackend {
    async fn stream_translation(&self, request: TranslationRequest) -> Result<FragmentStream> {
        tracing::debug!(
            "Backend unavailable, rejecting request for {}",
            request.profile.model
        );
        Err(self.reason.clone().into_translation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editrans_core::TranslationFailure;
    use editrans_core::translation::ModelProfile;

    #[tokio::test]
    async fn test_every_request_fails_with_reason() {
        let backend = UnavailableBackend::new(EditransError::translation(
            TranslationFailure::Authentication,
            "No Gemini API key found",
        ));
        let request = TranslationRequest {
            profile: ModelProfile::fast(),
            instruction: String::new(),
            input: "Hello".to_string(),
        };

        let err = backend.stream_translation(request).await.err().unwrap();
        assert_eq!(
            err.translation_failure(),
            Some(TranslationFailure::Authentication)
        );
        assert!(err.to_string().contains("No Gemini API key found"));
    }
}
