//! Page-supplied configuration overrides.

use tracing::warn;
use woc_i18n::SiteConfig;

/// Resolve the site configuration from an optional inline JSON document.
///
/// Missing or blank documents yield the defaults; a malformed or invalid
/// document is logged and the defaults are used instead.
#[must_use]
pub fn site_config_from(raw: Option<&str>) -> SiteConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json(raw) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "ignoring invalid i18n configuration override");
            SiteConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use woc_i18n::{LocaleTag, SwitchOrdering};

    #[test]
    fn absent_or_blank_documents_use_defaults() {
        assert_eq!(site_config_from(None), SiteConfig::default());
        assert_eq!(site_config_from(Some("  \n")), SiteConfig::default());
    }

    #[test]
    fn valid_documents_override_fields() {
        let config = site_config_from(Some(
            r#"{"default_locale":"fr","ordering":"last_requested"}"#,
        ));
        assert_eq!(config.default_locale, LocaleTag::from("fr"));
        assert_eq!(config.ordering, SwitchOrdering::LastRequested);
    }

    #[test]
    fn invalid_documents_fall_back_to_defaults() {
        assert_eq!(site_config_from(Some("{not json")), SiteConfig::default());
        assert_eq!(
            site_config_from(Some(r#"{"default_locale":"de"}"#)),
            SiteConfig::default()
        );
    }
}
