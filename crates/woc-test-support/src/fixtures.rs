//! Sample translations, pages and on-disk site layouts.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Map, Value};
use woc_i18n::{LocaleTag, MemoryPage, SITE_SLOTS, SiteConfig};

/// English resource with a few hand-written entries.
pub const EN_TRANSLATION: &str = r#"{
  "title": "Wells of Change",
  "hero_title": "Clean water changes everything",
  "hero_cta": "Donate now",
  "project_button": "Learn more",
  "nav_about": "About",
  "footer_copyright": "© Wells of Change"
}"#;

/// French resource.
pub const FR_TRANSLATION: &str = r#"{
  "title": "Puits de Changement",
  "hero_title": "L'eau potable change tout",
  "hero_cta": "Faire un don",
  "project_button": "En savoir plus",
  "nav_about": "À propos",
  "footer_copyright": "© Puits de Changement"
}"#;

/// Spanish resource.
pub const ES_TRANSLATION: &str = r#"{
  "title": "Pozos de Cambio",
  "hero_title": "El agua potable lo cambia todo",
  "hero_cta": "Donar ahora",
  "project_button": "Más información",
  "nav_about": "Acerca de",
  "footer_copyright": "© Pozos de Cambio"
}"#;

/// Brazilian Portuguese resource.
pub const PT_BR_TRANSLATION: &str = r#"{
  "title": "Poços de Mudança",
  "hero_title": "Água limpa muda tudo",
  "hero_cta": "Doe agora",
  "project_button": "Saiba mais",
  "nav_about": "Sobre",
  "footer_copyright": "© Poços de Mudança"
}"#;

/// Every catalog locale paired with its sample resource.
#[must_use]
pub fn sample_locales() -> [(&'static str, &'static str); 4] {
    [
        ("en", EN_TRANSLATION),
        ("pt-BR", PT_BR_TRANSLATION),
        ("fr", FR_TRANSLATION),
        ("es", ES_TRANSLATION),
    ]
}

/// Resource covering every slot key, each value prefixed with `label`.
#[must_use]
pub fn complete_translation(label: &str) -> String {
    let mut entries = Map::new();
    for slot in SITE_SLOTS {
        entries.insert(
            slot.key.to_string(),
            Value::String(format!("{label} {}", slot.key)),
        );
    }
    Value::Object(entries).to_string()
}

/// Default deployment configuration.
#[must_use]
pub fn site_config() -> SiteConfig {
    SiteConfig::default()
}

/// Page with every slot and one selector per catalog locale.
#[must_use]
pub fn site_page(config: &SiteConfig) -> MemoryPage {
    let page = MemoryPage::with_site_slots();
    page.add_selectors(
        config
            .locales
            .entries()
            .iter()
            .map(|entry| entry.tag.clone()),
    );
    page
}

/// Relative resource path for a locale under the default template.
#[must_use]
pub fn resource_path(locale: &str) -> String {
    format!("/locales/{}/translation.json", LocaleTag::from(locale))
}

/// Write `locales/{tag}/translation.json` files below `root`.
///
/// # Errors
///
/// Returns any filesystem error.
pub fn write_site(root: &Path, locales: &[(&str, &str)]) -> io::Result<()> {
    for (tag, body) in locales {
        let dir = root.join("locales").join(tag);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("translation.json"), body)?;
    }
    Ok(())
}
