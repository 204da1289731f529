//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use serde::Serialize;
use woc_i18n::SiteConfig;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};
use crate::commands::preview::PreviewReport;

const TEXT_WIDTH: usize = 60;

pub(crate) fn render_preview(report: &PreviewReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report)?,
        OutputFormat::Table => {
            println!("locale: {}", report.locale);
            println!("title: {}", report.title);
            println!("language: {}", report.language);
            println!(
                "entries: {} ({} of {} slots untranslated)",
                report.entries,
                report.untranslated(),
                report.slots.len()
            );
            println!();
            println!("{:<24} {:<24} TEXT", "SLOT", "KEY");
            for slot in &report.slots {
                let marker = if slot.translated { "" } else { " (raw key)" };
                println!(
                    "{:<24} {:<24} {}{marker}",
                    slot.id,
                    slot.key,
                    truncate(&slot.text, TEXT_WIDTH)
                );
            }
            for warning in &report.warnings {
                println!("warning: {warning}");
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct LocaleRow<'a> {
    tag: &'a str,
    flag: &'a str,
    name: &'a str,
    default: bool,
}

pub(crate) fn render_locales(config: &SiteConfig, format: OutputFormat) -> CliResult<()> {
    let rows: Vec<LocaleRow<'_>> = config
        .locales
        .entries()
        .iter()
        .map(|entry| LocaleRow {
            tag: entry.tag.as_str(),
            flag: &entry.flag,
            name: &entry.name,
            default: entry.tag == config.default_locale,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Table => {
            println!("{:<8} {:<6} NAME", "TAG", "FLAG");
            for row in &rows {
                let marker = if row.default { " (default)" } else { "" };
                println!("{:<8} {:<6} {}{marker}", row.tag, row.flag, row.name);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
