use anyhow::Result;

use crate::context::AppContext;
use crate::presenter;

/// Creates `config.toml` and `secret.json` templates, keeping existing files.
pub fn run(ctx: &AppContext) -> Result<()> {
    let config = ctx.config_service.ensure_config_file()?;
    let secret = ctx.config_service.ensure_secret_file()?;

    println!("{}", config.display());
    println!("{}", secret.display());
    presenter::success("Add your Gemini API key to secret.json or set GEMINI_API_KEY.");
    Ok(())
}
