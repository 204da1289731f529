//! Language switch state machine.
//!
//! # Design
//! - `Uninitialized -> Gated -> Active`; the gate opens once, after the
//!   default table has been fetched (or failed to).
//! - Requests issued while gated are buffered, last write wins, and replayed
//!   as the first real switch.
//! - The active locale is bound and the page rendered only after a fetch
//!   resolves successfully; a failed fetch leaves the page as it was.
//! - Selector styling is recomputed in full from the active locale after
//!   every render.
//! - No `RefCell` borrow is held across an `.await`.

use std::cell::{Cell, RefCell};
use std::future::Future;

use tracing::{debug, error, info};

use crate::config::{SiteConfig, SwitchOrdering};
use crate::error::I18nResult;
use crate::fetch::ResourceFetcher;
use crate::gate::ReadinessGate;
use crate::loader::{LocaleLoader, Translate};
use crate::locale::LocaleTag;
use crate::page::{Page, SelectorState};
use crate::rehydrate::{RenderReport, Rehydrator};

/// Observable controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchState {
    /// Page listeners not attached yet.
    Uninitialized,
    /// Waiting for the loader; at most one request buffered.
    Gated {
        /// Latest buffered request.
        pending: Option<LocaleTag>,
    },
    /// Loader ready; switches fetch immediately.
    Active {
        /// Locale whose table is displayed.
        current: LocaleTag,
    },
}

/// Result of a switch request that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Buffered until the loader is ready.
    Deferred {
        /// Earlier buffered request that this one replaced.
        displaced: Option<LocaleTag>,
    },
    /// Fetched, installed and rendered.
    Switched {
        /// Newly active locale.
        locale: LocaleTag,
    },
    /// Already active; the cached table was re-rendered without a fetch.
    Reused {
        /// Active locale.
        locale: LocaleTag,
    },
    /// Resolved after a newer request and discarded.
    Superseded {
        /// Locale whose table was dropped.
        locale: LocaleTag,
    },
}

/// Owns the loader and page and sequences every locale change.
pub struct SwitchController<F, P> {
    loader: LocaleLoader<F>,
    page: P,
    config: SiteConfig,
    rehydrator: Rehydrator,
    attached: Cell<bool>,
    gate: RefCell<ReadinessGate>,
    latest_request: Cell<u64>,
}

impl<F, P> SwitchController<F, P>
where
    F: ResourceFetcher,
    P: Page,
{
    /// Build an unattached controller rendering the site slot table.
    #[must_use]
    pub fn new(loader: LocaleLoader<F>, page: P, config: SiteConfig) -> Self {
        Self {
            loader,
            page,
            config,
            rehydrator: Rehydrator::default(),
            attached: Cell::new(false),
            gate: RefCell::new(ReadinessGate::new()),
            latest_request: Cell::new(0),
        }
    }

    /// Build a controller after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::I18nError::Config`] when the configuration is
    /// inconsistent.
    pub fn try_new(loader: LocaleLoader<F>, page: P, config: SiteConfig) -> I18nResult<Self> {
        config.validate()?;
        Ok(Self::new(loader, page, config))
    }

    /// Replace the rehydrator (custom slot tables).
    #[must_use]
    pub const fn with_rehydrator(mut self, rehydrator: Rehydrator) -> Self {
        self.rehydrator = rehydrator;
        self
    }

    /// Loader backing the controller.
    pub const fn loader(&self) -> &LocaleLoader<F> {
        &self.loader
    }

    /// Page being rendered.
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Site configuration.
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Slot table driving every render.
    pub const fn rehydrator(&self) -> &Rehydrator {
        &self.rehydrator
    }

    /// Current state of the machine.
    pub fn state(&self) -> SwitchState {
        match &*self.gate.borrow() {
            ReadinessGate::Ready => SwitchState::Active {
                current: self.loader.current_locale(),
            },
            ReadinessGate::NotReady { pending } if self.attached.get() => SwitchState::Gated {
                pending: pending.clone(),
            },
            ReadinessGate::NotReady { .. } => SwitchState::Uninitialized,
        }
    }

    /// Enter the gated state and mark the default locale's selector.
    ///
    /// Calling it again is a no-op.
    pub fn attach(&self) {
        if self.attached.replace(true) {
            return;
        }
        self.apply_selector_state(&self.config.default_locale);
        debug!(default = %self.config.default_locale, "language controls attached");
    }

    /// Switch to `locale`, or buffer it until the loader is ready.
    ///
    /// # Errors
    ///
    /// Returns the fetch or parse failure of an active switch. The active
    /// locale, table and rendered page are unchanged in that case.
    pub async fn request_switch(&self, locale: LocaleTag) -> I18nResult<SwitchOutcome> {
        let held = self.gate.borrow_mut().hold(locale);
        match held {
            Ok(displaced) => {
                self.attach();
                let pending = self.gate.borrow().pending().cloned();
                if let Some(entry) = pending.as_ref().and_then(|tag| self.config.locales.get(tag)) {
                    self.page.set_language_summary(&entry.summary());
                }
                debug!(
                    pending = ?pending,
                    displaced = ?displaced,
                    "switch deferred until translations are ready"
                );
                Ok(SwitchOutcome::Deferred { displaced })
            }
            Err(locale) => self.switch_now(locale).await,
        }
    }

    /// Handle a click on a language menu entry.
    ///
    /// The menu closes and the button summary updates before the fetch
    /// starts; a failed switch restores the summary of the active locale.
    ///
    /// # Errors
    ///
    /// See [`SwitchController::request_switch`].
    pub async fn select_from_menu(&self, locale: LocaleTag) -> I18nResult<SwitchOutcome> {
        self.page.set_menu_open(false);
        if let Some(entry) = self.config.locales.get(&locale) {
            self.page.set_language_summary(&entry.summary());
        }
        self.request_switch(locale).await
    }

    /// Open the readiness gate after initializing the loader.
    ///
    /// A buffered request other than the default locale is replayed as the
    /// first switch; otherwise the default table is rendered directly. Load
    /// failures are logged, not returned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::I18nError::GateAlreadyOpen`] when called twice.
    pub async fn activate(&self) -> I18nResult<LocaleTag> {
        if self.gate.borrow().is_ready() {
            return Err(crate::error::I18nError::GateAlreadyOpen);
        }
        self.attach();
        let default = self.config.default_locale.clone();
        // failures are already logged by the loader; the gate opens regardless
        let _ = self.loader.initialize(default.clone()).await;

        let pending = self.gate.borrow_mut().open()?;
        info!(
            locale = %self.loader.current_locale(),
            pending = ?pending,
            "translations ready"
        );
        match pending {
            Some(locale) if locale != default => {
                if self.switch_now(locale).await.is_err() {
                    self.rerender();
                }
            }
            _ => {
                self.rerender();
            }
        }
        Ok(self.loader.current_locale())
    }

    /// Attach, wait for the host's readiness signal, then activate.
    ///
    /// # Errors
    ///
    /// See [`SwitchController::activate`].
    pub async fn run<R>(&self, ready: R) -> I18nResult<LocaleTag>
    where
        R: Future<Output = ()>,
    {
        self.attach();
        ready.await;
        self.activate().await
    }

    /// Toggle the language menu, returning whether it is now open.
    pub fn toggle_menu(&self) -> bool {
        let open = !self.page.is_menu_open();
        self.page.set_menu_open(open);
        open
    }

    /// Close the menu when a click landed outside the language controls.
    pub fn dismiss_menu(&self, inside_controls: bool) {
        if !inside_controls && self.page.is_menu_open() {
            self.page.set_menu_open(false);
        }
    }

    /// Re-apply selector styling for the active locale.
    ///
    /// Hosts call this once their selector controls exist, when they were
    /// not yet on the page at [`SwitchController::attach`].
    pub fn restyle_selectors(&self) {
        self.apply_selector_state(&self.loader.current_locale());
    }

    /// Re-render the page from the active table and restyle selectors.
    pub fn rerender(&self) -> RenderReport {
        let report = self
            .rehydrator
            .render_all(&self.page, &self.loader, &self.config);
        self.restyle_selectors();
        report
    }

    async fn switch_now(&self, locale: LocaleTag) -> I18nResult<SwitchOutcome> {
        let ticket = self.latest_request.get() + 1;
        self.latest_request.set(ticket);

        // an empty table means the locale is bound but never loaded; fetch again
        if locale == self.loader.current_locale() && self.loader.active_len() > 0 {
            self.rerender();
            return Ok(SwitchOutcome::Reused { locale });
        }

        match self.loader.fetch_table(&locale).await {
            Ok(table) => {
                if self.is_stale(ticket) {
                    debug!(locale = %locale, "discarding translations for a superseded switch");
                    return Ok(SwitchOutcome::Superseded { locale });
                }
                self.loader.install(locale.clone(), table);
                let report = self.rerender();
                info!(
                    locale = %locale,
                    written = report.written,
                    missing = report.missing.len(),
                    "language switched"
                );
                Ok(SwitchOutcome::Switched { locale })
            }
            Err(err) => {
                error!(locale = %locale, error = %err, "error changing language");
                if !self.is_stale(ticket) {
                    self.sync_summary();
                }
                Err(err)
            }
        }
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.config.ordering == SwitchOrdering::LastRequested
            && ticket != self.latest_request.get()
    }

    fn sync_summary(&self) {
        if let Some(entry) = self.config.display_for(&self.loader.current_locale()) {
            self.page.set_language_summary(&entry.summary());
        }
    }

    fn apply_selector_state(&self, active: &LocaleTag) {
        for tag in self.page.selector_locales() {
            self.page.set_selector_state(&tag, SelectorState::Unselected);
        }
        self.page.set_selector_state(active, SelectorState::Selected);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::rc::Rc;

    use async_trait::async_trait;

    use super::*;
    use crate::config::ResourceLocator;
    use crate::error::{FetchError, FetchResult, I18nError};
    use crate::page::MemoryPage;

    #[derive(Default)]
    struct CountingFetcher {
        bodies: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl CountingFetcher {
        fn with(mut self, locale: &str, body: &str) -> Self {
            self.bodies.insert(
                format!("/locales/{locale}/translation.json"),
                body.to_string(),
            );
            self
        }
    }

    #[async_trait(?Send)]
    impl ResourceFetcher for CountingFetcher {
        async fn fetch_text(&self, url: &str) -> FetchResult<String> {
            self.calls.borrow_mut().push(url.to_string());
            self.bodies.get(url).cloned().ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn controller(fetcher: Rc<CountingFetcher>) -> SwitchController<Rc<CountingFetcher>, MemoryPage> {
        let config = SiteConfig::default();
        let loader = LocaleLoader::new(fetcher, ResourceLocator::relative(), config.default_locale.clone());
        let page = MemoryPage::with_site_slots();
        page.add_selectors(config.locales.entries().iter().map(|entry| entry.tag.clone()));
        SwitchController::new(loader, page, config)
    }

    fn fetcher() -> Rc<CountingFetcher> {
        Rc::new(
            CountingFetcher::default()
                .with("en", r#"{"title":"Wells of Change","hero_cta":"Donate"}"#)
                .with("fr", r#"{"title":"Puits de Changement","hero_cta":"Faire un don"}"#)
                .with("es", r#"{"title":"Pozos de Cambio","hero_cta":"Donar"}"#),
        )
    }

    #[test]
    fn attach_moves_to_gated_and_marks_default() {
        let controller = controller(fetcher());
        assert_eq!(controller.state(), SwitchState::Uninitialized);
        controller.attach();
        assert_eq!(controller.state(), SwitchState::Gated { pending: None });
        assert_eq!(controller.page().selected_locales(), vec![LocaleTag::from("en")]);
    }

    #[tokio::test]
    async fn gated_requests_do_not_touch_content() -> I18nResult<()> {
        let fetcher = fetcher();
        let controller = controller(Rc::clone(&fetcher));
        controller.attach();

        let outcome = controller.request_switch(LocaleTag::from("fr")).await?;
        assert_eq!(outcome, SwitchOutcome::Deferred { displaced: None });
        assert_eq!(controller.page().text("title").as_deref(), Some(""));
        assert_eq!(controller.page().language_summary(), "🇫🇷 Français");
        assert!(fetcher.calls.borrow().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn activation_replays_only_the_latest_request() -> I18nResult<()> {
        let fetcher = fetcher();
        let controller = controller(Rc::clone(&fetcher));
        controller.attach();
        controller.request_switch(LocaleTag::from("fr")).await?;
        let outcome = controller.request_switch(LocaleTag::from("es")).await?;
        assert_eq!(
            outcome,
            SwitchOutcome::Deferred {
                displaced: Some(LocaleTag::from("fr"))
            }
        );

        let active = controller.activate().await?;
        assert_eq!(active.as_str(), "es");
        assert_eq!(controller.page().title(), "Pozos de Cambio");
        assert_eq!(
            *fetcher.calls.borrow(),
            vec![
                "/locales/en/translation.json".to_string(),
                "/locales/es/translation.json".to_string()
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn activation_without_pending_renders_default() -> I18nResult<()> {
        let fetcher = fetcher();
        let controller = controller(Rc::clone(&fetcher));
        controller.run(async {}).await?;
        assert_eq!(
            controller.state(),
            SwitchState::Active {
                current: LocaleTag::from("en")
            }
        );
        assert_eq!(controller.page().text("hero_cta").as_deref(), Some("Donate"));
        assert_eq!(controller.page().language_summary(), "🇺🇸 English");
        assert_eq!(fetcher.calls.borrow().len(), 1);
        assert_eq!(controller.activate().await, Err(I18nError::GateAlreadyOpen));
        Ok(())
    }

    #[tokio::test]
    async fn switching_to_active_locale_reuses_cached_table() -> I18nResult<()> {
        let fetcher = fetcher();
        let controller = controller(Rc::clone(&fetcher));
        controller.activate().await?;
        let outcome = controller.request_switch(LocaleTag::from("en")).await?;
        assert_eq!(
            outcome,
            SwitchOutcome::Reused {
                locale: LocaleTag::from("en")
            }
        );
        assert_eq!(fetcher.calls.borrow().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn menu_selection_closes_menu_and_switches() -> I18nResult<()> {
        let controller = controller(fetcher());
        controller.activate().await?;
        assert!(controller.toggle_menu());
        controller.dismiss_menu(true);
        assert!(controller.page().is_menu_open());

        controller.select_from_menu(LocaleTag::from("fr")).await?;
        assert!(!controller.page().is_menu_open());
        assert_eq!(controller.page().selected_locales(), vec![LocaleTag::from("fr")]);
        assert_eq!(controller.page().text("hero_cta").as_deref(), Some("Faire un don"));

        assert!(controller.toggle_menu());
        controller.dismiss_menu(false);
        assert!(!controller.page().is_menu_open());
        Ok(())
    }

    #[tokio::test]
    async fn failed_menu_selection_restores_summary() -> I18nResult<()> {
        let controller = controller(fetcher());
        controller.activate().await?;
        let result = controller.select_from_menu(LocaleTag::from("pt-BR")).await;
        assert!(matches!(result, Err(I18nError::Fetch { .. })));
        assert_eq!(controller.page().language_summary(), "🇺🇸 English");
        assert_eq!(controller.page().selected_locales(), vec![LocaleTag::from("en")]);
        Ok(())
    }

    #[test]
    fn selectors_added_after_attach_are_styled_on_restyle() {
        let config = SiteConfig::default();
        let loader = LocaleLoader::new(fetcher(), ResourceLocator::relative(), config.default_locale.clone());
        let controller = SwitchController::new(loader, MemoryPage::with_site_slots(), config);
        controller.attach();
        assert!(controller.page().selected_locales().is_empty());

        controller.page().add_selectors(["en", "pt-BR", "fr", "es"]);
        controller.restyle_selectors();

        assert_eq!(controller.page().selected_locales(), vec![LocaleTag::from("en")]);
        assert_eq!(
            controller.page().selector_state("fr"),
            Some(SelectorState::Unselected)
        );
    }

    #[test]
    fn inconsistent_config_is_rejected() {
        let config = SiteConfig {
            default_locale: LocaleTag::from("de"),
            ..SiteConfig::default()
        };
        let loader = LocaleLoader::new(fetcher(), ResourceLocator::relative(), config.default_locale.clone());
        let result = SwitchController::try_new(loader, MemoryPage::new(), config);
        assert!(matches!(
            result.err(),
            Some(I18nError::Config(crate::error::ConfigError::UnknownLocale {
                field: "default_locale",
                ..
            }))
        ));
    }
}
