use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::TextArgs;

/// Resolves the text given on the command line.
///
/// Returns `None` when neither text nor file was given, unless
/// `stdin_fallback` is set, in which case stdin is read instead.
pub fn read_text(args: TextArgs, stdin_fallback: bool) -> Result<Option<String>> {
    if let Some(text) = args.text {
        return Ok(Some(text));
    }
    match args.file {
        Some(path) if path.as_os_str() == "-" => read_stdin().map(Some),
        Some(path) => read_file(&path).map(Some),
        None if stdin_fallback => read_stdin().map(Some),
        None => Ok(None),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
