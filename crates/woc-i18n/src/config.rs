//! Site-level i18n settings and resource URL resolution.
//!
//! # Design
//! - Every field carries a default matching the production deployment so an
//!   empty JSON object is a valid configuration.
//! - Validation is explicit; callers decide whether to fall back to defaults.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::locale::{LocaleCatalog, LocaleEntry, LocaleTag};

/// Placeholder replaced with the base URL in [`SiteConfig::load_path`].
pub const BASE_PLACEHOLDER: &str = "{base}";
/// Placeholder replaced with the locale tag in [`SiteConfig::load_path`].
pub const LOCALE_PLACEHOLDER: &str = "{lng}";
/// Default resource path template.
pub const DEFAULT_LOAD_PATH: &str = "{base}/locales/{lng}/translation.json";

/// Maps a hosting environment to the subpath the site is served under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubpathRule {
    /// Substring matched against the page hostname.
    pub host_contains: String,
    /// Base prefixed to resource paths when the rule matches.
    pub base: String,
}

/// How overlapping switch requests are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchOrdering {
    /// Whichever fetch resolves last is rendered.
    #[default]
    LastResolved,
    /// Only the most recently requested locale may be rendered; older
    /// resolutions are discarded.
    LastRequested,
}

/// i18n configuration for one site deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Locale fetched at startup.
    pub default_locale: LocaleTag,
    /// Locale whose display entry is shown for tags missing from the catalog.
    pub fallback_locale: LocaleTag,
    /// Resource path template with `{base}` and `{lng}` placeholders.
    pub load_path: String,
    /// Hosting environments served from a subpath.
    pub subpath_hosts: Vec<SubpathRule>,
    /// Selectable locales in menu order.
    pub locales: LocaleCatalog,
    /// Resolution policy for overlapping switches.
    pub ordering: SwitchOrdering,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: LocaleTag::from("en"),
            fallback_locale: LocaleTag::from("en"),
            load_path: DEFAULT_LOAD_PATH.to_string(),
            subpath_hosts: vec![SubpathRule {
                host_contains: "github.io".to_string(),
                base: "/wellsofchange/site".to_string(),
            }],
            locales: LocaleCatalog::default(),
            ordering: SwitchOrdering::default(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] when the payload does not decode and
    /// any validation error from [`SiteConfig::validate`].
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|err| ConfigError::Malformed {
            detail: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.locales.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if !self.load_path.contains(LOCALE_PLACEHOLDER) {
            return Err(ConfigError::MissingLocalePlaceholder {
                template: self.load_path.clone(),
            });
        }
        let mut seen = HashSet::new();
        for entry in self.locales.entries() {
            if !seen.insert(&entry.tag) {
                return Err(ConfigError::DuplicateLocale {
                    tag: entry.tag.clone(),
                });
            }
        }
        for (field, tag) in [
            ("default_locale", &self.default_locale),
            ("fallback_locale", &self.fallback_locale),
        ] {
            if !self.locales.contains(tag) {
                return Err(ConfigError::UnknownLocale {
                    field,
                    tag: tag.clone(),
                });
            }
        }
        Ok(())
    }

    /// Display entry for a tag, falling back to the fallback locale's entry.
    #[must_use]
    pub fn display_for(&self, tag: &LocaleTag) -> Option<&LocaleEntry> {
        self.locales
            .get(tag)
            .or_else(|| self.locales.get(&self.fallback_locale))
    }

    /// Base URL for a page served from `hostname`.
    #[must_use]
    pub fn base_url_for_host(&self, hostname: &str) -> &str {
        let host = hostname.to_ascii_lowercase();
        self.subpath_hosts
            .iter()
            .find(|rule| host.contains(&rule.host_contains.to_ascii_lowercase()))
            .map_or("", |rule| rule.base.as_str())
    }

    /// Resource locator bound to the page host.
    #[must_use]
    pub fn locator_for_host(&self, hostname: &str) -> ResourceLocator {
        ResourceLocator::new(self.base_url_for_host(hostname), &self.load_path)
    }
}

/// Builds translation resource URLs for locale tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLocator {
    base_url: String,
    template: String,
}

impl ResourceLocator {
    /// Create a locator; a trailing slash on the base is dropped.
    #[must_use]
    pub fn new(base_url: &str, template: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            template: template.to_string(),
        }
    }

    /// Locator for relative hosting with the default template.
    #[must_use]
    pub fn relative() -> Self {
        Self::new("", DEFAULT_LOAD_PATH)
    }

    /// Base URL in use (`""` for relative hosting).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the translation resource for `locale`.
    #[must_use]
    pub fn url_for(&self, locale: &LocaleTag) -> String {
        self.template
            .replace(BASE_PLACEHOLDER, &self.base_url)
            .replace(LOCALE_PLACEHOLDER, locale.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(SiteConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_object_uses_defaults() -> ConfigResult<()> {
        let config = SiteConfig::from_json("{}")?;
        assert_eq!(config, SiteConfig::default());
        Ok(())
    }

    #[test]
    fn github_pages_hosts_use_subpath() {
        let config = SiteConfig::default();
        assert_eq!(
            config.base_url_for_host("wellsofchange.github.io"),
            "/wellsofchange/site"
        );
        assert_eq!(config.base_url_for_host("localhost"), "");
        assert_eq!(
            config
                .locator_for_host("WellsOfChange.GitHub.io")
                .url_for(&LocaleTag::from("fr")),
            "/wellsofchange/site/locales/fr/translation.json"
        );
    }

    #[test]
    fn relative_locator_builds_relative_paths() {
        let locator = ResourceLocator::relative();
        assert_eq!(locator.base_url(), "");
        assert_eq!(
            locator.url_for(&LocaleTag::from("pt-BR")),
            "/locales/pt-BR/translation.json"
        );
        let absolute = ResourceLocator::new("https://cdn.example/", DEFAULT_LOAD_PATH);
        assert_eq!(
            absolute.url_for(&LocaleTag::from("es")),
            "https://cdn.example/locales/es/translation.json"
        );
    }

    #[test]
    fn validation_rejects_inconsistent_settings() {
        let mut config = SiteConfig {
            locales: LocaleCatalog::new(Vec::new()),
            ..SiteConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyCatalog));

        config = SiteConfig {
            load_path: "/locales/translation.json".into(),
            ..SiteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingLocalePlaceholder { .. })
        ));

        config = SiteConfig {
            default_locale: LocaleTag::from("de"),
            ..SiteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownLocale {
                field: "default_locale",
                ..
            })
        ));

        config = SiteConfig {
            locales: LocaleCatalog::new(vec![
                LocaleEntry::new("en", "🇺🇸", "English"),
                LocaleEntry::new("en", "🇬🇧", "English"),
            ]),
            ..SiteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateLocale { .. })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            SiteConfig::from_json("{\"ordering\": 3}"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn ordering_parses_snake_case() -> ConfigResult<()> {
        let config = SiteConfig::from_json(r#"{"ordering":"last_requested"}"#)?;
        assert_eq!(config.ordering, SwitchOrdering::LastRequested);
        Ok(())
    }

    #[test]
    fn unknown_tags_display_fallback_entry() {
        let config = SiteConfig::default();
        assert_eq!(
            config
                .display_for(&LocaleTag::from("xx"))
                .map(LocaleEntry::summary),
            Some("🇺🇸 English".to_string())
        );
    }
}
