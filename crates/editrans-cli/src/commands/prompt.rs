use anyhow::Result;

use crate::ModeArgs;
use crate::context::AppContext;
use editrans_core::prompt::InstructionBuilder;

/// Prints the system instruction for the current glossary and the chosen
/// format and tier.
pub fn run(ctx: &AppContext, mode: ModeArgs) -> Result<()> {
    let format = mode.format.unwrap_or(ctx.config.defaults.format);
    let tier = mode.tier.unwrap_or(ctx.config.defaults.tier);

    let instruction =
        InstructionBuilder::new()?.build(format, tier, &ctx.use_case.glossary_entries())?;
    println!("{instruction}");
    Ok(())
}
