//! Model profile table keyed by tier.

use serde::{Deserialize, Serialize};

use crate::session::ModelTier;

pub const FAST_MODEL: &str = "gemini-2.5-flash";
pub const DEEP_EDITORIAL_MODEL: &str = "gemini-3-pro-preview";

/// Model selector plus sampling parameters for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelProfile {
    pub model: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

impl ModelProfile {
    pub fn fast() -> Self {
        Self {
            model: FAST_MODEL.to_string(),
            temperature: 0.4,
            top_k: 40,
            top_p: 0.9,
        }
    }

    pub fn deep_editorial() -> Self {
        Self {
            model: DEEP_EDITORIAL_MODEL.to_string(),
            temperature: 0.2,
            top_k: 40,
            top_p: 0.9,
        }
    }

    fn apply(mut self, overrides: &ProfileOverride) -> Self {
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(top_k) = overrides.top_k {
            self.top_k = top_k;
        }
        if let Some(top_p) = overrides.top_p {
            self.top_p = top_p;
        }
        self
    }
}

/// Partial profile from `config.toml`; unset fields keep the tier default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileOverride {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_k: Option<u32>,
    pub top_p: Option<f32>,
}

/// The `[tiers]` section of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierOverrides {
    pub fast: ProfileOverride,
    pub deep_editorial: ProfileOverride,
}

/// Fixed table mapping each tier to its profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TierProfiles {
    pub fast: ModelProfile,
    pub deep_editorial: ModelProfile,
}

impl TierProfiles {
    /// Default table with configured overrides applied.
    pub fn with_overrides(overrides: &TierOverrides) -> Self {
        Self {
            fast: ModelProfile::fast().apply(&overrides.fast),
            deep_editorial: ModelProfile::deep_editorial().apply(&overrides.deep_editorial),
        }
    }

    pub fn get(&self, tier: ModelTier) -> &ModelProfile {
        match tier {
            ModelTier::Fast => &self.fast,
            ModelTier::DeepEditorial => &self.deep_editorial,
        }
    }
}

impl Default for TierProfiles {
    fn default() -> Self {
        Self {
            fast: ModelProfile::fast(),
            deep_editorial: ModelProfile::deep_editorial(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = TierProfiles::default();
        let fast = table.get(ModelTier::Fast);
        let deep = table.get(ModelTier::DeepEditorial);

        assert_eq!(fast.model, FAST_MODEL);
        assert_eq!(deep.model, DEEP_EDITORIAL_MODEL);
        assert!(fast.temperature > deep.temperature);
    }

    #[test]
    fn test_partial_override_keeps_tier_defaults() {
        let overrides = TierOverrides {
            deep_editorial: ProfileOverride {
                temperature: Some(0.1),
                ..Default::default()
            },
            ..Default::default()
        };
        let table = TierProfiles::with_overrides(&overrides);

        let deep = table.get(ModelTier::DeepEditorial);
        assert_eq!(deep.model, DEEP_EDITORIAL_MODEL);
        assert_eq!(deep.temperature, 0.1);
        assert_eq!(table.fast, ModelProfile::fast());
    }
}
