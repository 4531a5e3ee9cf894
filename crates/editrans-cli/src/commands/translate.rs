use anyhow::Result;
use std::process::ExitCode;

use super::utils::read_text;
use crate::context::AppContext;
use crate::presenter::{self, StreamPrinter};
use crate::{ModeArgs, TextArgs};
use editrans_core::session::TranslationStatus;

/// Optionally replaces the input, then streams a translation to stdout.
///
/// Exits with failure when the request ends in `Error`.
pub async fn run(ctx: &AppContext, text: TextArgs, mode: ModeArgs) -> Result<ExitCode> {
    let use_case = &ctx.use_case;
    if let Some(text) = read_text(text, false)? {
        use_case.set_input(text);
    }
    if let Some(format) = mode.format {
        use_case.set_format(format);
    }
    if let Some(tier) = mode.tier {
        use_case.set_model_tier(tier);
    }

    if use_case.input_text().trim().is_empty() {
        presenter::notice("Nothing to translate: the input is empty.");
        return Ok(ExitCode::SUCCESS);
    }

    let orchestrator = ctx.orchestrator()?;
    let mut printer = StreamPrinter::new(std::io::stdout());

    match use_case.run_translation(&orchestrator, &mut printer).await {
        Some(TranslationStatus::Error) => {
            let message = use_case.last_error().unwrap_or_default();
            presenter::failure(&message);
            Ok(ExitCode::FAILURE)
        }
        Some(_) => Ok(ExitCode::SUCCESS),
        None => {
            presenter::notice("A translation is already in progress.");
            Ok(ExitCode::SUCCESS)
        }
    }
}
