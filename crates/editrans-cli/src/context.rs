//! Wiring: configuration, state storage and the translation use case.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::GlobalArgs;
use editrans_application::{TranslationOrchestrator, TranslationUseCase};
use editrans_core::config::AppConfig;
use editrans_core::state::{InMemoryStateRepository, StateRepository};
use editrans_core::translation::TranslationBackend;
use editrans_infrastructure::{ConfigService, EditransPaths, FileStateRepository};
use editrans_interaction::{GeminiStreamBackend, UnavailableBackend};

pub struct AppContext {
    pub config: AppConfig,
    pub config_service: ConfigService,
    pub use_case: TranslationUseCase,
}

impl AppContext {
    pub async fn open(global: &GlobalArgs) -> Result<Self> {
        let mut paths = EditransPaths::new(global.config_dir.clone())
            .context("Failed to resolve the editrans config directory")?;
        if let Some(dir) = &global.state_dir {
            paths = paths.with_state_dir(dir.clone());
        }

        let config_service = ConfigService::new(paths.clone());
        let config = config_service.load_config()?;

        let repository: Arc<dyn StateRepository> = if global.ephemeral {
            tracing::debug!("Using in-memory state");
            Arc::new(InMemoryStateRepository::new())
        } else {
            Arc::new(FileStateRepository::new(paths))
        };

        let use_case = TranslationUseCase::open(repository).await;
        use_case.set_format(config.defaults.format);
        use_case.set_model_tier(config.defaults.tier);

        Ok(Self {
            config,
            config_service,
            use_case,
        })
    }

    /// Builds the orchestrator for the configured Gemini endpoint.
    ///
    /// Without a usable API key the orchestrator still works but every
    /// request fails, so the session records the attempt as an error.
    pub fn orchestrator(&self) -> Result<TranslationOrchestrator> {
        let backend: Arc<dyn TranslationBackend> = match self.config_service.api_key() {
            Ok(api_key) => Arc::new(GeminiStreamBackend::new(api_key, &self.config.api)?),
            Err(e) => {
                tracing::warn!("{}", e);
                Arc::new(UnavailableBackend::new(e))
            }
        };

        Ok(TranslationOrchestrator::new(
            backend,
            self.config.tier_profiles(),
        )?)
    }
}
