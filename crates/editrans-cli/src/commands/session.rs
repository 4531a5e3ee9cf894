//! Commands that read or reset the stored session.

use anyhow::Result;

use super::utils::read_text;
use crate::TextArgs;
use crate::context::AppContext;
use crate::presenter;

pub fn set_input(ctx: &AppContext, text: TextArgs) -> Result<()> {
    if let Some(text) = read_text(text, true)? {
        let chars = text.chars().count();
        ctx.use_case.set_input(text);
        presenter::success(&format!("Input updated ({chars} chars)."));
    }
    Ok(())
}

pub fn show_input(ctx: &AppContext) {
    println!("{}", ctx.use_case.input_text());
}

pub fn show_output(ctx: &AppContext) {
    println!("{}", ctx.use_case.output_text());
}

pub fn status(ctx: &AppContext) {
    println!("{}", presenter::render_snapshot(&ctx.use_case.snapshot()));
}

pub fn clear(ctx: &AppContext) {
    ctx.use_case.clear();
    presenter::success("Cleared input and output.");
}
