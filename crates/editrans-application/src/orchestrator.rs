//! Translation request orchestrator.
//!
//! Turns one captured request (input, format, tier, glossary snapshot) into a
//! backend call and relays the streamed fragments in arrival order.

use futures::StreamExt;
use std::sync::Arc;

use editrans_core::error::{EditransError, Result};
use editrans_core::glossary::GlossaryEntry;
use editrans_core::prompt::InstructionBuilder;
use editrans_core::session::{ModelTier, TranslationFormat};
use editrans_core::translation::{TierProfiles, TranslationBackend, TranslationRequest};

pub struct TranslationOrchestrator {
    backend: Arc<dyn TranslationBackend>,
    instructions: InstructionBuilder,
    profiles: TierProfiles,
}

impl TranslationOrchestrator {
    pub fn new(backend: Arc<dyn TranslationBackend>, profiles: TierProfiles) -> Result<Self> {
        Ok(Self {
            backend,
            instructions: InstructionBuilder::new()?,
            profiles,
        })
    }

    /// Runs one translation, calling `on_chunk` for every non-empty fragment.
    ///
    /// Blank input returns immediately without contacting the backend. Any
    /// failure, before or during streaming, comes back as a single
    /// `EditransError::Translation`; fragments already delivered stay delivered.
    pub async fn translate<F>(
        &self,
        input: &str,
        format: TranslationFormat,
        tier: ModelTier,
        glossary: &[GlossaryEntry],
        mut on_chunk: F,
    ) -> Result<()>
    where
        F: FnMut(&str) + Send,
    {
        if input.trim().is_empty() {
            return Ok(());
        }

        let instruction = self
            .instructions
            .build(format, tier, glossary)
            .map_err(EditransError::into_translation)?;
        let request = TranslationRequest {
            profile: self.profiles.get(tier).clone(),
            instruction,
            input: input.to_string(),
        };
        tracing::info!(
            "Translating {} chars: format={}, tier={}, model={}, glossary={}",
            input.chars().count(),
            format,
            tier,
            request.profile.model,
            glossary.len()
        );

        let mut fragments = self
            .backend
            .stream_translation(request)
            .await
            .map_err(EditransError::into_translation)?;

        let mut received = 0usize;
        while let Some(fragment) = fragments.next().await {
            let text = fragment.map_err(EditransError::into_translation)?;
            if text.is_empty() {
                continue;
            }
            received += 1;
            on_chunk(&text);
        }

        tracing::debug!("Stream finished after {} fragments", received);
        Ok(())
    }
}
