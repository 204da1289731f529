//! Locale resource loader with a single-slot table cache.
//!
//! # Design
//! - One table is active at a time; installing a new one evicts the old one.
//! - Fetching never mutates the active table, so a failed switch leaves the
//!   displayed translations intact.
//! - Lookups never fail: a miss yields the key itself.

use std::cell::{Cell, RefCell};

use tracing::{debug, warn};

use crate::config::ResourceLocator;
use crate::error::{I18nError, I18nResult};
use crate::fetch::ResourceFetcher;
use crate::locale::LocaleTag;
use crate::table::TranslationTable;

/// Read access to the active translations.
pub trait Translate {
    /// Translate `key` in the active locale, returning the key on a miss.
    fn lookup(&self, key: &str) -> String;

    /// Locale whose table is active.
    fn current_locale(&self) -> LocaleTag;
}

#[derive(Debug)]
struct ActiveTable {
    locale: LocaleTag,
    table: TranslationTable,
}

/// Fetches translation tables and owns the active one.
#[derive(Debug)]
pub struct LocaleLoader<F> {
    fetcher: F,
    locator: ResourceLocator,
    active: RefCell<ActiveTable>,
    initialized: Cell<bool>,
}

impl<F: ResourceFetcher> LocaleLoader<F> {
    /// Create a loader bound to `default_locale` with an empty table.
    ///
    /// Until [`LocaleLoader::initialize`] completes every lookup returns the
    /// raw key.
    #[must_use]
    pub fn new(fetcher: F, locator: ResourceLocator, default_locale: LocaleTag) -> Self {
        Self {
            fetcher,
            locator,
            active: RefCell::new(ActiveTable {
                locale: default_locale,
                table: TranslationTable::default(),
            }),
            initialized: Cell::new(false),
        }
    }

    /// Resource locator in use.
    #[must_use]
    pub const fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// Whether [`LocaleLoader::initialize`] has completed.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Fetch and install the default locale's table.
    ///
    /// The loader counts as initialized even when the fetch fails; in that
    /// case the locale is still bound with an empty table.
    ///
    /// # Errors
    ///
    /// Returns the fetch or parse failure for diagnostics.
    pub async fn initialize(&self, default_locale: LocaleTag) -> I18nResult<()> {
        let result = self.fetch_table(&default_locale).await;
        self.initialized.set(true);
        match result {
            Ok(table) => {
                self.install(default_locale, table);
                Ok(())
            }
            Err(err) => {
                warn!(
                    locale = %default_locale,
                    error = %err,
                    "initial translations unavailable; showing raw keys"
                );
                self.install(default_locale, TranslationTable::default());
                Err(err)
            }
        }
    }

    /// Fetch and parse the table for `locale` without touching the active one.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Fetch`] on transport failures and the parse
    /// errors of [`TranslationTable::parse`].
    pub async fn fetch_table(&self, locale: &LocaleTag) -> I18nResult<TranslationTable> {
        let url = self.locator.url_for(locale);
        debug!(locale = %locale, url = %url, "fetching translations");
        let body = self
            .fetcher
            .fetch_text(&url)
            .await
            .map_err(|source| I18nError::Fetch {
                locale: locale.clone(),
                source,
            })?;
        TranslationTable::parse(locale, &body)
    }

    /// Bind `table` as the active table, evicting the previous one.
    pub fn install(&self, locale: LocaleTag, table: TranslationTable) {
        let mut active = self.active.borrow_mut();
        debug!(
            from = %active.locale,
            to = %locale,
            entries = table.len(),
            "installing translations"
        );
        *active = ActiveTable { locale, table };
    }

    /// Fetch `locale` and make it active.
    ///
    /// # Errors
    ///
    /// Propagates the failure of [`LocaleLoader::fetch_table`]; the active
    /// table is left untouched in that case.
    pub async fn change_locale(&self, locale: LocaleTag) -> I18nResult<()> {
        let table = self.fetch_table(&locale).await?;
        self.install(locale, table);
        Ok(())
    }

    /// Number of entries in the active table.
    #[must_use]
    pub fn active_len(&self) -> usize {
        self.active.borrow().table.len()
    }
}

impl<F> Translate for LocaleLoader<F> {
    fn lookup(&self, key: &str) -> String {
        self.active
            .borrow()
            .table
            .get(key)
            .map_or_else(|| key.to_string(), ToString::to_string)
    }

    fn current_locale(&self) -> LocaleTag {
        self.active.borrow().locale.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{FetchError, FetchResult};

    struct MapFetcher(HashMap<&'static str, &'static str>);

    #[async_trait(?Send)]
    impl ResourceFetcher for MapFetcher {
        async fn fetch_text(&self, url: &str) -> FetchResult<String> {
            self.0
                .get(url)
                .map(|body| (*body).to_string())
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn loader() -> LocaleLoader<MapFetcher> {
        let fetcher = MapFetcher(HashMap::from([
            ("/locales/en/translation.json", r#"{"title":"Wells of Change"}"#),
            ("/locales/fr/translation.json", r#"{"title":"Puits de Changement"}"#),
            ("/locales/es/translation.json", "not json"),
        ]));
        LocaleLoader::new(fetcher, ResourceLocator::relative(), LocaleTag::from("en"))
    }

    #[test]
    fn lookups_before_initialize_return_keys() {
        let loader = loader();
        assert!(!loader.is_initialized());
        assert_eq!(loader.lookup("title"), "title");
        assert_eq!(loader.current_locale().as_str(), "en");
    }

    #[tokio::test]
    async fn initialize_installs_default_table() -> I18nResult<()> {
        let loader = loader();
        loader.initialize(LocaleTag::from("en")).await?;
        assert!(loader.is_initialized());
        assert_eq!(loader.lookup("title"), "Wells of Change");
        assert_eq!(loader.lookup("hero_title"), "hero_title");
        Ok(())
    }

    #[tokio::test]
    async fn failed_initialize_still_marks_ready() {
        let loader = loader();
        let result = loader.initialize(LocaleTag::from("de")).await;
        assert!(matches!(result, Err(I18nError::Fetch { .. })));
        assert!(loader.is_initialized());
        assert_eq!(loader.current_locale().as_str(), "de");
        assert_eq!(loader.lookup("title"), "title");
    }

    #[tokio::test]
    async fn failed_change_keeps_active_table() -> I18nResult<()> {
        let loader = loader();
        loader.initialize(LocaleTag::from("en")).await?;

        let missing = loader.change_locale(LocaleTag::from("xx")).await;
        assert!(matches!(missing, Err(I18nError::Fetch { .. })));
        let garbled = loader.change_locale(LocaleTag::from("es")).await;
        assert!(matches!(garbled, Err(I18nError::Parse { .. })));

        assert_eq!(loader.current_locale().as_str(), "en");
        assert_eq!(loader.lookup("title"), "Wells of Change");
        Ok(())
    }

    #[tokio::test]
    async fn change_evicts_previous_table() -> I18nResult<()> {
        let loader = loader();
        loader.initialize(LocaleTag::from("en")).await?;
        loader.change_locale(LocaleTag::from("fr")).await?;
        assert_eq!(loader.current_locale().as_str(), "fr");
        assert_eq!(loader.lookup("title"), "Puits de Changement");
        assert_eq!(loader.active_len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_table_leaves_active_table_alone() -> I18nResult<()> {
        let loader = loader();
        loader.initialize(LocaleTag::from("en")).await?;
        let table = loader.fetch_table(&LocaleTag::from("fr")).await?;
        assert_eq!(table.get("title"), Some("Puits de Changement"));
        assert_eq!(loader.lookup("title"), "Wells of Change");
        Ok(())
    }
}
