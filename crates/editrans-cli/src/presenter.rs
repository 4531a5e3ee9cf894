//! Terminal presentation.
//!
//! Translation text goes to stdout untouched so it can be piped; status
//! lines, notices and errors go to stderr with color.

use colored::{ColoredString, Colorize};
use std::io::Write;

use editrans_application::{SessionSnapshot, TranslationObserver};
use editrans_core::glossary::GlossaryEntry;
use editrans_core::session::TranslationStatus;

pub fn status_label(status: TranslationStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        TranslationStatus::Idle => label.dimmed(),
        TranslationStatus::Loading | TranslationStatus::Streaming => label.cyan(),
        TranslationStatus::Success => label.green(),
        TranslationStatus::Error => label.red(),
    }
}

pub fn notice(message: &str) {
    eprintln!("{}", message.yellow());
}

pub fn success(message: &str) {
    eprintln!("{}", message.green());
}

pub fn failure(message: &str) {
    eprintln!("{}", message.red());
}

pub fn render_snapshot(snapshot: &SessionSnapshot) -> String {
    let mut lines = vec![
        format!("Status:   {}", status_label(snapshot.status)),
        format!("Format:   {}", snapshot.format),
        format!("Tier:     {}", snapshot.model_tier),
        format!("Input:    {} chars", snapshot.input_chars),
        format!("Output:   {} chars", snapshot.output_chars),
        format!("Glossary: {} entries", snapshot.glossary_len),
    ];
    if let Some(error) = &snapshot.last_error {
        lines.push(format!("Error:    {}", error.red()));
    }
    lines.join("\n")
}

pub fn render_glossary(entries: &[GlossaryEntry]) -> String {
    if entries.is_empty() {
        return "No glossary entries.".to_string();
    }
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}  \"{}\" -> \"{}\"",
                entry.id.dimmed(),
                entry.term.bold(),
                entry.definition
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Streams fragments to stdout as they arrive and reports the outcome on
/// stderr.
pub struct StreamPrinter<W: Write + Send> {
    out: W,
    ends_with_newline: bool,
    printed_any: bool,
}

impl<W: Write + Send> StreamPrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            ends_with_newline: true,
            printed_any: false,
        }
    }

    fn finish_line(&mut self) {
        if self.printed_any && !self.ends_with_newline {
            let _ = writeln!(self.out);
            self.ends_with_newline = true;
        }
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> TranslationObserver for StreamPrinter<W> {
    fn on_status(&mut self, status: TranslationStatus) {
        match status {
            TranslationStatus::Streaming => eprintln!("{}", "Translating...".dimmed()),
            TranslationStatus::Success => self.finish_line(),
            TranslationStatus::Error => self.finish_line(),
            _ => {}
        }
    }

    fn on_fragment(&mut self, text: &str) {
        if self.out.write_all(text.as_bytes()).is_ok() {
            let _ = self.out.flush();
        }
        self.printed_any = true;
        self.ends_with_newline = text.ends_with('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editrans_core::session::{ModelTier, TranslationFormat};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_snapshot() {
        plain();
        let snapshot = SessionSnapshot {
            status: TranslationStatus::Error,
            format: TranslationFormat::FullTranslation,
            model_tier: ModelTier::Fast,
            input_chars: 27,
            output_chars: 7,
            glossary_len: 2,
            last_error: Some("Failed to translate content.".to_string()),
        };

        let rendered = render_snapshot(&snapshot);
        assert!(rendered.contains("Status:   ERROR"));
        assert!(rendered.contains("Format:   FULL_TRANSLATION"));
        assert!(rendered.contains("Glossary: 2 entries"));
        assert!(rendered.ends_with("Error:    Failed to translate content."));
    }

    #[test]
    fn test_render_glossary() {
        plain();
        assert_eq!(render_glossary(&[]), "No glossary entries.");

        let entries = vec![GlossaryEntry {
            id: "42".to_string(),
            term: "snag".to_string(),
            definition: "জটিলতা".to_string(),
        }];
        assert_eq!(render_glossary(&entries), "42  \"snag\" -> \"জটিলতা\"");
    }

    #[test]
    fn test_stream_printer_writes_fragments_and_terminates_line() {
        let mut printer = StreamPrinter::new(Vec::new());
        printer.on_fragment("Bang");
        printer.on_fragment("la: হ্যালো");
        printer.on_status(TranslationStatus::Success);

        assert_eq!(String::from_utf8(printer.out).unwrap(), "Bangla: হ্যালো\n");
    }

    #[test]
    fn test_stream_printer_no_output_no_newline() {
        let mut printer = StreamPrinter::new(Vec::new());
        printer.on_status(TranslationStatus::Error);
        assert!(printer.out.is_empty());
    }
}
