use crate::cli::{LocalesArgs, OutputFormat};
use crate::client::CliResult;
use crate::commands::load_config;
use crate::output::render_locales;

pub(crate) fn handle_locales(args: &LocalesArgs, format: OutputFormat) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;
    render_locales(&config, format)
}
