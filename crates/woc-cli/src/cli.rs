//! Command-line surface for previewing the site's translations.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use woc_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};

use crate::client::CliResult;
use crate::commands::locales::handle_locales;
use crate::commands::preview::handle_preview;

/// Parses CLI arguments and executes the requested command. Returns the
/// process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: LogFormat::Pretty,
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err:#}");
    }

    match dispatch(cli).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

async fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Preview(args) => handle_preview(args, cli.output).await,
        Command::Locales(args) => handle_locales(&args, cli.output),
    }
}

#[derive(Parser)]
#[command(name = "woc", about = "Preview the Wells of Change site translations")]
pub(crate) struct Cli {
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "WOC_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the page in a locale and print every translated slot.
    Preview(PreviewArgs),
    /// List the languages offered by the language menu.
    Locales(LocalesArgs),
}

#[derive(Args)]
pub(crate) struct PreviewArgs {
    #[arg(
        long,
        env = "WOC_SITE",
        help = "Site directory or http(s) origin serving locales/<tag>/translation.json"
    )]
    pub(crate) site: String,
    #[arg(long, help = "Locale to switch to after activation")]
    pub(crate) locale: Option<String>,
    #[arg(long, help = "Host name used to select the deployment base path")]
    pub(crate) host: Option<String>,
    #[arg(long, env = "WOC_CONFIG", help = "JSON file overriding the site configuration")]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Args, Default)]
pub(crate) struct LocalesArgs {
    #[arg(long, env = "WOC_CONFIG", help = "JSON file overriding the site configuration")]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}
