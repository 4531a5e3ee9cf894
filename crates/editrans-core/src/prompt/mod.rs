//! System instruction templating.
//!
//! The instruction sent with every request is a pure function of
//! `(format, tier, glossary)`. Literary content lives in the embedded
//! templates under `templates/`; this module only wires them together.

use minijinja::{AutoEscape, Environment, context};

use crate::error::Result;
use crate::glossary::GlossaryEntry;
use crate::session::{ModelTier, TranslationFormat};

const ROOT_TEMPLATE: &str = "instruction.txt";

const TEMPLATES: [(&str, &str); 5] = [
    (ROOT_TEMPLATE, include_str!("templates/instruction.txt")),
    ("style_guide.txt", include_str!("templates/style_guide.txt")),
    (
        "reference_examples.txt",
        include_str!("templates/reference_examples.txt"),
    ),
    ("mode_full.txt", include_str!("templates/mode_full.txt")),
    ("mode_paragraph.txt", include_str!("templates/mode_paragraph.txt")),
];

/// Renders system instructions from the embedded templates.
pub struct InstructionBuilder {
    env: Environment<'static>,
}

impl InstructionBuilder {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Builds the instruction for one request.
    ///
    /// Each glossary entry is rendered as its own `- "term" -> "definition"`
    /// override line, in glossary order.
    pub fn build(
        &self,
        format: TranslationFormat,
        tier: ModelTier,
        glossary: &[GlossaryEntry],
    ) -> Result<String> {
        let template = self.env.get_template(ROOT_TEMPLATE)?;
        let rendered = template.render(context! {
            format => format.to_string(),
            fast => tier == ModelTier::Fast,
            glossary => glossary,
        })?;
        Ok(rendered.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, term: &str, definition: &str) -> GlossaryEntry {
        GlossaryEntry {
            id: id.to_string(),
            term: term.to_string(),
            definition: definition.to_string(),
        }
    }

    fn override_line(term: &str, definition: &str) -> String {
        format!("- \"{term}\" -> \"{definition}\"")
    }

    #[test]
    fn test_glossary_entries_are_enumerated() {
        let builder = InstructionBuilder::new().unwrap();
        let glossary = vec![
            entry("1", "Syndicate", "সিন্ডিকেট"),
            entry("2", "Cadre", "ক্যাডার"),
        ];

        let instruction = builder
            .build(TranslationFormat::FullTranslation, ModelTier::Fast, &glossary)
            .unwrap();

        assert!(instruction.contains("USER-DEFINED GLOSSARY"));
        for item in &glossary {
            assert!(instruction.contains(&override_line(&item.term, &item.definition)));
        }
        let first = instruction.find("Syndicate").unwrap();
        let second = instruction.find("\"Cadre\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_glossary_has_no_override_block() {
        let builder = InstructionBuilder::new().unwrap();
        let instruction = builder
            .build(TranslationFormat::FullTranslation, ModelTier::Fast, &[])
            .unwrap();

        assert!(!instruction.contains("USER-DEFINED GLOSSARY"));
        assert!(!instruction.contains(&override_line("Syndicate", "সিন্ডিকেট")));
    }

    #[test]
    fn test_glossary_changes_instruction() {
        let builder = InstructionBuilder::new().unwrap();
        let glossary = vec![entry("1", "Syndicate", "সিন্ডিকেট")];

        for format in [
            TranslationFormat::ParagraphByParagraph,
            TranslationFormat::FullTranslation,
        ] {
            for tier in [ModelTier::Fast, ModelTier::DeepEditorial] {
                let with = builder.build(format, tier, &glossary).unwrap();
                let without = builder.build(format, tier, &[]).unwrap();
                assert_ne!(with, without);
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = InstructionBuilder::new().unwrap();
        let glossary = vec![entry("1", "Regime", "শাসনব্যবস্থা")];
        let a = builder
            .build(TranslationFormat::ParagraphByParagraph, ModelTier::DeepEditorial, &glossary)
            .unwrap();
        let b = builder
            .build(TranslationFormat::ParagraphByParagraph, ModelTier::DeepEditorial, &glossary)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_format_selects_mode_block() {
        let builder = InstructionBuilder::new().unwrap();
        let full = builder
            .build(TranslationFormat::FullTranslation, ModelTier::DeepEditorial, &[])
            .unwrap();
        let paragraph = builder
            .build(TranslationFormat::ParagraphByParagraph, ModelTier::DeepEditorial, &[])
            .unwrap();

        assert!(full.contains("MODE: FULL TRANSLATION"));
        assert!(!full.contains("MODE: PARAGRAPH BY PARAGRAPH"));
        assert!(paragraph.contains("MODE: PARAGRAPH BY PARAGRAPH"));
    }

    #[test]
    fn test_fast_tier_adds_quick_mode_override() {
        let builder = InstructionBuilder::new().unwrap();
        let fast = builder
            .build(TranslationFormat::FullTranslation, ModelTier::Fast, &[])
            .unwrap();
        let deep = builder
            .build(TranslationFormat::FullTranslation, ModelTier::DeepEditorial, &[])
            .unwrap();

        assert!(fast.contains("QUICK MODE EDITORIAL OVERRIDE"));
        assert!(!deep.contains("QUICK MODE EDITORIAL OVERRIDE"));
    }
}
