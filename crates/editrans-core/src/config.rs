//! Configuration models.
//!
//! `AppConfig` mirrors `config.toml`, `SecretConfig` mirrors `secret.json`.
//! Loading lives in `editrans-infrastructure`.

use serde::{Deserialize, Serialize};

use crate::session::{ModelTier, TranslationFormat};
use crate::translation::{TierOverrides, TierProfiles};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Root structure of `config.toml`. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
    pub tiers: TierOverrides,
}

impl AppConfig {
    /// Effective tier table after applying `[tiers]` overrides.
    pub fn tier_profiles(&self) -> TierProfiles {
        TierProfiles::with_overrides(&self.tiers)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Timeout for establishing the connection, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            connect_timeout_secs: 30,
        }
    }
}

/// Selections used when the command line does not name one.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DefaultsConfig {
    pub format: TranslationFormat,
    pub tier: ModelTier,
}

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiSecret>,
}

/// Gemini API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiSecret {
    pub api_key: String,
}
