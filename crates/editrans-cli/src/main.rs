use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use editrans_core::session::{ModelTier, TranslationFormat};

mod commands;
mod context;
mod logging;
mod presenter;

use context::AppContext;

#[derive(Parser)]
#[command(name = "editrans")]
#[command(version)]
#[command(about = "Editrans - editorial English/Bangla translation assistant", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Keep session state in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Directory holding the session state files
    #[arg(long, global = true, value_name = "PATH")]
    pub state_dir: Option<PathBuf>,

    /// Directory holding config.toml and secret.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config_dir: Option<PathBuf>,
}

/// Selections shared by `translate` and `prompt`.
#[derive(Args, Debug, Clone, Default)]
pub struct ModeArgs {
    /// Output layout: `paragraph` or `full`
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<TranslationFormat>,

    /// Model tier: `fast` or `deep`
    #[arg(long, value_name = "TIER")]
    pub tier: Option<ModelTier>,
}

/// Text given inline or read from a file.
#[derive(Args, Debug, Clone, Default)]
pub struct TextArgs {
    /// Source text
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the source text from a file (`-` for stdin)
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate the input, streaming the result to stdout
    Translate {
        #[command(flatten)]
        text: TextArgs,
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Show or replace the stored input text
    Input {
        #[command(subcommand)]
        action: InputAction,
    },
    /// Print the stored translation
    Output,
    /// Show session status
    Status,
    /// Clear input and output (the glossary is kept)
    Clear,
    /// Manage glossary overrides
    Glossary {
        #[command(subcommand)]
        action: GlossaryAction,
    },
    /// Print the system instruction that would be sent
    Prompt {
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Create config.toml and secret.json templates
    Init,
}

#[derive(Subcommand)]
enum InputAction {
    /// Replace the input text (reads stdin when no text or file is given)
    Set {
        #[command(flatten)]
        text: TextArgs,
    },
    /// Print the input text
    Show,
}

#[derive(Subcommand)]
enum GlossaryAction {
    /// Add a term and its required rendering
    Add { term: String, definition: String },
    /// Remove an entry by id
    Remove { id: String },
    /// List entries in insertion order
    List,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    logging::init();
    let cli = Cli::parse();

    let ctx = AppContext::open(&cli.global).await?;
    let result = dispatch(&ctx, cli.command).await;
    ctx.use_case.flush().await;
    result
}

async fn dispatch(ctx: &AppContext, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Translate { text, mode } => return commands::translate::run(ctx, text, mode).await,
        Commands::Input { action } => match action {
            InputAction::Set { text } => commands::session::set_input(ctx, text)?,
            InputAction::Show => commands::session::show_input(ctx),
        },
        Commands::Output => commands::session::show_output(ctx),
        Commands::Status => commands::session::status(ctx),
        Commands::Clear => commands::session::clear(ctx),
        Commands::Glossary { action } => match action {
            GlossaryAction::Add { term, definition } => {
                return commands::glossary::add(ctx, &term, &definition);
            }
            GlossaryAction::Remove { id } => commands::glossary::remove(ctx, &id),
            GlossaryAction::List => commands::glossary::list(ctx),
        },
        Commands::Prompt { mode } => commands::prompt::run(ctx, mode)?,
        Commands::Init => commands::init::run(ctx)?,
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_translate_arguments() {
        let cli = Cli::try_parse_from([
            "editrans",
            "translate",
            "The project has hit a snag.",
            "--format",
            "full",
            "--tier",
            "deep",
        ])
        .unwrap();

        match cli.command {
            Commands::Translate { text, mode } => {
                assert_eq!(text.text.as_deref(), Some("The project has hit a snag."));
                assert_eq!(mode.format, Some(TranslationFormat::FullTranslation));
                assert_eq!(mode.tier, Some(ModelTier::DeepEditorial));
            }
            _ => panic!("expected translate"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from(["editrans", "translate", "hello", "--file", "in.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let result = Cli::try_parse_from(["editrans", "prompt", "--tier", "turbo"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["editrans", "status", "--ephemeral"]).unwrap();
        assert!(cli.global.ephemeral);
        assert!(cli.global.state_dir.is_none());
    }

    #[test]
    fn test_glossary_add_arguments() {
        let cli = Cli::try_parse_from(["editrans", "glossary", "add", "snag", "জটিলতা"]).unwrap();
        match cli.command {
            Commands::Glossary {
                action: GlossaryAction::Add { term, definition },
            } => {
                assert_eq!(term, "snag");
                assert_eq!(definition, "জটিলতা");
            }
            _ => panic!("expected glossary add"),
        }
    }
}
