//! Error types for locale loading and switching.

use thiserror::Error;

use crate::locale::LocaleTag;

/// Failure reported by a [`crate::fetch::ResourceFetcher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("resource request returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code (404 for missing locale files).
        status: u16,
    },
    /// The request never produced a response (network, CORS, filesystem).
    #[error("resource request failed")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport-level detail.
        detail: String,
    },
}

impl FetchError {
    /// URL associated with the failure.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. } | Self::Transport { url, .. } => url,
        }
    }
}

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No locales configured.
    #[error("locale catalog is empty")]
    EmptyCatalog,
    /// The resource path template lacks the `{lng}` placeholder.
    #[error("load path is missing the {{lng}} placeholder")]
    MissingLocalePlaceholder {
        /// Offending template.
        template: String,
    },
    /// The same tag appears twice in the catalog.
    #[error("duplicate locale in catalog")]
    DuplicateLocale {
        /// Tag listed more than once.
        tag: LocaleTag,
    },
    /// A locale referenced by a setting is absent from the catalog.
    #[error("locale referenced by configuration is not in the catalog")]
    UnknownLocale {
        /// Setting that referenced the locale.
        field: &'static str,
        /// Referenced tag.
        tag: LocaleTag,
    },
    /// Configuration payload could not be decoded.
    #[error("invalid configuration payload")]
    Malformed {
        /// Decoder detail.
        detail: String,
    },
}

/// Primary error type for locale operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    /// The translation resource could not be fetched.
    #[error("failed to load translations")]
    Fetch {
        /// Locale being loaded.
        locale: LocaleTag,
        /// Underlying fetch failure.
        source: FetchError,
    },
    /// The translation resource was not valid JSON.
    #[error("failed to parse translations")]
    Parse {
        /// Locale being loaded.
        locale: LocaleTag,
        /// Parser detail.
        detail: String,
    },
    /// The translation resource parsed but was not a JSON object.
    #[error("translation resource is not a JSON object")]
    NotAnObject {
        /// Locale being loaded.
        locale: LocaleTag,
    },
    /// The readiness gate was opened twice.
    #[error("readiness gate already open")]
    GateAlreadyOpen,
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl I18nError {
    /// Locale the failure relates to, when there is one.
    #[must_use]
    pub const fn locale(&self) -> Option<&LocaleTag> {
        match self {
            Self::Fetch { locale, .. } | Self::Parse { locale, .. } | Self::NotAnObject { locale } => {
                Some(locale)
            }
            Self::GateAlreadyOpen | Self::Config(_) => None,
        }
    }
}

/// Convenience alias for locale results.
pub type I18nResult<T> = Result<T, I18nError>;

/// Convenience alias for fetch results.
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_exposes_url() {
        let err = FetchError::Status {
            url: "/locales/xx/translation.json".into(),
            status: 404,
        };
        assert_eq!(err.url(), "/locales/xx/translation.json");
        assert_eq!(err.to_string(), "resource request returned status 404");
    }

    #[test]
    fn i18n_error_reports_locale() {
        let err = I18nError::NotAnObject {
            locale: LocaleTag::from("fr"),
        };
        assert_eq!(err.locale().map(LocaleTag::as_str), Some("fr"));
        assert!(I18nError::GateAlreadyOpen.locale().is_none());
    }

    #[test]
    fn config_error_converts_transparently() {
        let err: I18nError = ConfigError::EmptyCatalog.into();
        assert_eq!(err.to_string(), "locale catalog is empty");
    }
}
