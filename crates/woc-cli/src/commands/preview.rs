//! `woc preview`: run the language controller against an in-memory page.

use anyhow::anyhow;
use serde::Serialize;
use tracing::{debug, info, warn};
use woc_i18n::{
    LocaleLoader, LocaleTag, MemoryPage, SiteConfig, SwitchController, Translate,
};

use crate::cli::{OutputFormat, PreviewArgs};
use crate::client::{CliError, CliResult, SiteFetcher};
use crate::commands::load_config;
use crate::output::render_preview;

/// Rendered state of the page after activation and the optional switch.
#[derive(Debug, Serialize)]
pub(crate) struct PreviewReport {
    pub(crate) locale: String,
    pub(crate) title: String,
    pub(crate) language: String,
    pub(crate) entries: usize,
    pub(crate) slots: Vec<SlotRow>,
    pub(crate) warnings: Vec<String>,
}

impl PreviewReport {
    pub(crate) fn untranslated(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.translated).count()
    }
}

/// One rendered slot.
#[derive(Debug, Serialize)]
pub(crate) struct SlotRow {
    pub(crate) id: &'static str,
    pub(crate) key: &'static str,
    pub(crate) text: String,
    pub(crate) translated: bool,
}

pub(crate) async fn handle_preview(args: PreviewArgs, format: OutputFormat) -> CliResult<()> {
    let report = build_preview(&args).await?;
    render_preview(&report, format)
}

pub(crate) async fn build_preview(args: &PreviewArgs) -> CliResult<PreviewReport> {
    let config = load_config(args.config.as_deref())?;
    let requested = args
        .locale
        .as_deref()
        .map(|tag| resolve_locale(&config, tag))
        .transpose()?;
    let fetcher = SiteFetcher::from_site(&args.site)?;
    let host = args
        .host
        .clone()
        .unwrap_or_else(|| fetcher.default_host());

    let locator = config.locator_for_host(&host);
    let loader = LocaleLoader::new(fetcher, locator, config.default_locale.clone());
    let page = MemoryPage::with_site_slots();
    page.add_selectors(config.locales.entries().iter().map(|entry| entry.tag.clone()));
    let controller = SwitchController::try_new(loader, page, config)
        .map_err(|err| CliError::validation(format!("invalid site configuration: {err}")))?;
    debug!(
        host = %host,
        base = controller.loader().locator().base_url(),
        "resolved translation base"
    );

    let mut warnings = Vec::new();
    controller
        .run(async {})
        .await
        .map_err(|err| CliError::failure(anyhow!("language controller failed: {err}")))?;
    if controller.loader().active_len() == 0 {
        warnings.push(format!(
            "no translations loaded for default locale '{}'",
            controller.config().default_locale
        ));
    }

    if let Some(locale) = requested {
        match controller.request_switch(locale.clone()).await {
            Ok(outcome) => info!(?outcome, "preview locale applied"),
            Err(err) => {
                warn!(locale = %locale, error = %err, "preview locale unavailable");
                warnings.push(err.to_string());
            }
        }
    }

    let report = controller.rerender();
    if !report.is_clean() {
        warnings.extend(
            report
                .failed
                .iter()
                .map(|id| format!("slot '{id}' could not be written")),
        );
    }

    let loader = controller.loader();
    let page = controller.page();
    let slots = controller
        .rehydrator()
        .slots()
        .iter()
        .filter_map(|slot| {
            page.text(slot.id).map(|text| SlotRow {
                id: slot.id,
                key: slot.key,
                translated: text != slot.key,
                text,
            })
        })
        .collect();

    Ok(PreviewReport {
        locale: loader.current_locale().to_string(),
        title: page.title(),
        language: page.language_summary(),
        entries: loader.active_len(),
        slots,
        warnings,
    })
}

fn resolve_locale(config: &SiteConfig, requested: &str) -> CliResult<LocaleTag> {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation("--locale must not be empty"));
    }
    Ok(config
        .locales
        .match_tag(trimmed)
        .map_or_else(|| LocaleTag::from(trimmed), |entry| entry.tag.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use anyhow::Result;
    use woc_test_support::fixtures::{sample_locales, write_site};

    fn args(site: &Path, locale: Option<&str>) -> PreviewArgs {
        PreviewArgs {
            site: site.display().to_string(),
            locale: locale.map(str::to_string),
            host: None,
            config: None,
        }
    }

    async fn preview(args: &PreviewArgs) -> Result<PreviewReport> {
        build_preview(args)
            .await
            .map_err(|err| anyhow!(err.display_message()))
    }

    #[tokio::test]
    async fn preview_renders_requested_locale() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_site(dir.path(), &sample_locales())?;

        let report = preview(&args(dir.path(), Some("fr"))).await?;

        assert_eq!(report.locale, "fr");
        assert_eq!(report.title, "Puits de Changement");
        assert_eq!(report.language, "🇫🇷 Français");
        assert!(report.warnings.is_empty());
        let title = report.slots.iter().find(|slot| slot.id == "title");
        assert_eq!(
            title.map(|slot| slot.text.as_str()),
            Some("Puits de Changement")
        );
        Ok(())
    }

    #[tokio::test]
    async fn locale_argument_is_matched_against_catalog() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_site(dir.path(), &sample_locales())?;

        let report = preview(&args(dir.path(), Some("PT-br"))).await?;

        assert_eq!(report.locale, "pt-BR");
        Ok(())
    }

    #[tokio::test]
    async fn unavailable_locale_keeps_default_and_warns() -> Result<()> {
        let dir = tempfile::tempdir()?;
        write_site(dir.path(), &sample_locales())?;

        let report = preview(&args(dir.path(), Some("xx"))).await?;

        assert_eq!(report.locale, "en");
        assert_eq!(report.title, "Wells of Change");
        assert_eq!(report.warnings.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn empty_site_renders_raw_keys() -> Result<()> {
        let dir = tempfile::tempdir()?;

        let report = preview(&args(dir.path(), None)).await?;

        assert_eq!(report.entries, 0);
        assert_eq!(report.title, "title");
        assert_eq!(report.untranslated(), report.slots.len());
        assert_eq!(report.warnings.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn inconsistent_config_file_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"fallback_locale": "de"}"#)?;
        let mut preview_args = args(dir.path(), None);
        preview_args.config = Some(config);

        let result = build_preview(&preview_args).await;

        assert!(matches!(result, Err(CliError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn blank_locale_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let result = build_preview(&args(dir.path(), Some("  "))).await;
        assert!(matches!(result, Err(CliError::Validation(_))));
        Ok(())
    }
}
