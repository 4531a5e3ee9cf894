//! Session domain types: status, format and tier selectors, request tickets.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle status of the translation session.
///
/// `Loading` is reserved for request setup before the first streamed byte;
/// it gates re-submission exactly like `Streaming`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TranslationStatus {
    #[default]
    Idle,
    Loading,
    Streaming,
    Success,
    Error,
}

impl TranslationStatus {
    /// True while a request owns the output buffer.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Loading | Self::Streaming)
    }
}

/// How the translated text is laid out.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum TranslationFormat {
    /// Each source paragraph followed by its translation.
    #[default]
    #[strum(serialize = "paragraph", to_string = "PARAGRAPH_BY_PARAGRAPH")]
    ParagraphByParagraph,
    /// The whole piece translated as one flowing article.
    #[strum(serialize = "full", to_string = "FULL_TRANSLATION")]
    FullTranslation,
}

/// Selector into the fixed model profile table.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum ModelTier {
    #[default]
    #[strum(serialize = "fast", serialize = "quick", to_string = "FAST")]
    Fast,
    #[strum(serialize = "deep", to_string = "DEEP_EDITORIAL")]
    DeepEditorial,
}

/// Everything a request needs from the session, captured at `begin_request`.
///
/// The generation number ties streamed fragments back to the request that
/// produced them; once the session moves on, the ticket goes stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    pub generation: u64,
    pub input: String,
    pub format: TranslationFormat,
    pub model_tier: ModelTier,
}

/// Terminal result reported through `complete_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Success,
    /// Carries the message shown to the user.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_parses_aliases_and_canonical_names() {
        assert_eq!(
            TranslationFormat::from_str("full").unwrap(),
            TranslationFormat::FullTranslation
        );
        assert_eq!(
            TranslationFormat::from_str("paragraph_by_paragraph").unwrap(),
            TranslationFormat::ParagraphByParagraph
        );
        assert!(TranslationFormat::from_str("verbatim").is_err());
    }

    #[test]
    fn test_tier_display_and_aliases() {
        assert_eq!(ModelTier::DeepEditorial.to_string(), "DEEP_EDITORIAL");
        assert_eq!(ModelTier::from_str("quick").unwrap(), ModelTier::Fast);
        assert_eq!(ModelTier::from_str("DEEP").unwrap(), ModelTier::DeepEditorial);
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        let json = serde_json::to_string(&TranslationStatus::Streaming).unwrap();
        assert_eq!(json, "\"STREAMING\"");
        assert!(TranslationStatus::Loading.is_in_flight());
        assert!(!TranslationStatus::Error.is_in_flight());
    }

    #[test]
    fn test_status_parses_its_display_form() {
        let status: TranslationStatus = TranslationStatus::Success.to_string().parse().unwrap();
        assert_eq!(status, TranslationStatus::Success);
        assert!("FINISHED".parse::<TranslationStatus>().is_err());
    }
}
