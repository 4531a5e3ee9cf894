//! Incremental server-sent events decoder.
//!
//! Bytes arrive in arbitrary chunks; lines are buffered until a newline is
//! seen, and `data:` lines are collected until the blank line that ends the
//! event. Only event payloads are surfaced. `event:`, `id:` and `retry:`
//! fields are not used by the Gemini stream and are ignored.

use editrans_core::error::{EditransError, Result};
use editrans_core::TranslationFailure;

#[derive(Debug, Default)]
pub struct SseDecoder {
    line_buffer: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one body chunk and returns the payloads of every event it
    /// completed, in order.
    ///
    /// A line that cannot be decoded ends the list with an `Err`; events
    /// completed before it in the same chunk are still returned ahead of it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<String>> {
        self.line_buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(newline_index) = self.line_buffer.iter().position(|byte| *byte == b'\n') {
            let mut line = self.line_buffer.drain(..=newline_index).collect::<Vec<_>>();
            line.pop();
            if matches!(line.last(), Some(b'\r')) {
                line.pop();
            }
            if let Err(e) = self.process_line(&line, &mut payloads) {
                self.reset();
                payloads.push(Err(e));
                break;
            }
        }
        payloads
    }

    /// Flushes a trailing line and any event left open when the body ended.
    pub fn finish(&mut self) -> Vec<Result<String>> {
        let mut payloads = Vec::new();
        if !self.line_buffer.is_empty() {
            let mut line = std::mem::take(&mut self.line_buffer);
            if matches!(line.last(), Some(b'\r')) {
                line.pop();
            }
            if let Err(e) = self.process_line(&line, &mut payloads) {
                self.reset();
                payloads.push(Err(e));
                return payloads;
            }
        }
        self.dispatch(&mut payloads);
        payloads
    }

    fn process_line(&mut self, line: &[u8], payloads: &mut Vec<Result<String>>) -> Result<()> {
        if line.is_empty() {
            self.dispatch(payloads);
            return Ok(());
        }

        let line = std::str::from_utf8(line).map_err(|e| {
            EditransError::translation(
                TranslationFailure::MalformedResponse,
                format!("Stream line is not valid UTF-8: {}", e),
            )
        })?;

        // Comment
        if line.starts_with(':') {
            return Ok(());
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data_lines.push(value.to_string());
        }
        Ok(())
    }

    fn dispatch(&mut self, payloads: &mut Vec<Result<String>>) {
        if !self.data_lines.is_empty() {
            payloads.push(Ok(self.data_lines.join("\n")));
            self.data_lines.clear();
        }
    }

    fn reset(&mut self) {
        self.line_buffer.clear();
        self.data_lines.clear();
    }
}
