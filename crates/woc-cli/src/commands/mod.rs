//! Command handlers.

pub(crate) mod locales;
pub(crate) mod preview;

use std::path::Path;

use anyhow::Context;
use tracing::debug;
use woc_i18n::SiteConfig;

use crate::client::{CliError, CliResult};

/// Load the site configuration, falling back to the built-in defaults.
pub(crate) fn load_config(path: Option<&Path>) -> CliResult<SiteConfig> {
    let Some(path) = path else {
        return Ok(SiteConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;
    let config = SiteConfig::from_json(&raw).map_err(|err| {
        CliError::validation(format!("invalid configuration in {}: {err}", path.display()))
    })?;
    debug!(path = %path.display(), locales = config.locales.len(), "loaded site configuration");
    Ok(config)
}
