use anyhow::Result;
use std::process::ExitCode;

use crate::context::AppContext;
use crate::presenter;

pub fn add(ctx: &AppContext, term: &str, definition: &str) -> Result<ExitCode> {
    match ctx.use_case.add_glossary_entry(term, definition) {
        Ok(entry) => {
            println!("{}", entry.id);
            presenter::success(&format!(
                "Added \"{}\" -> \"{}\"",
                entry.term, entry.definition
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_validation() => {
            presenter::failure("Both the term and the definition must be non-empty.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Removing an unknown id changes nothing and is not an error.
pub fn remove(ctx: &AppContext, id: &str) {
    match ctx.use_case.remove_glossary_entry(id) {
        Some(entry) => presenter::success(&format!("Removed \"{}\"", entry.term)),
        None => presenter::notice(&format!("No glossary entry with id {id}; nothing removed")),
    }
}

pub fn list(ctx: &AppContext) {
    println!(
        "{}",
        presenter::render_glossary(&ctx.use_case.glossary_entries())
    );
}
