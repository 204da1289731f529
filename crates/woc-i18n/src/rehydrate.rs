//! Rehydration pass that renders every slot from the active table.

use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::loader::Translate;
use crate::page::{Page, SlotWrite};
use crate::slots::{SITE_SLOTS, SlotBinding, TITLE_KEY};

/// Tally of one rehydration pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Slots whose text was written.
    pub written: usize,
    /// Slots absent from the page.
    pub missing: Vec<&'static str>,
    /// Slots the page refused to update.
    pub failed: Vec<&'static str>,
}

impl RenderReport {
    /// Whether every present slot was written.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Renders the slot table into a page.
#[derive(Clone, Debug)]
pub struct Rehydrator {
    slots: &'static [SlotBinding],
}

impl Default for Rehydrator {
    fn default() -> Self {
        Self::new(SITE_SLOTS)
    }
}

impl Rehydrator {
    /// Rehydrator over a custom slot table.
    #[must_use]
    pub const fn new(slots: &'static [SlotBinding]) -> Self {
        Self { slots }
    }

    /// Slot table in use.
    #[must_use]
    pub const fn slots(&self) -> &'static [SlotBinding] {
        self.slots
    }

    /// Render every slot, the document title and the language summary.
    ///
    /// A missing or failing slot never stops the remaining slots from being
    /// written.
    pub fn render_all<P, T>(&self, page: &P, translations: &T, config: &SiteConfig) -> RenderReport
    where
        P: Page + ?Sized,
        T: Translate + ?Sized,
    {
        let mut report = RenderReport::default();
        for slot in self.slots {
            let text = translations.lookup(slot.key);
            match page.write_slot(slot, &text) {
                Ok(SlotWrite::Written) => report.written += 1,
                Ok(SlotWrite::Missing) => report.missing.push(slot.id),
                Err(err) => {
                    warn!(slot = slot.id, error = %err, "failed to render slot");
                    report.failed.push(slot.id);
                }
            }
        }

        page.set_document_title(&translations.lookup(TITLE_KEY));

        let locale = translations.current_locale();
        if let Some(entry) = config.display_for(&locale) {
            page.set_language_summary(&entry.summary());
        }

        debug!(
            locale = %locale,
            written = report.written,
            missing = report.missing.len(),
            failed = report.failed.len(),
            "rehydrated page"
        );
        report
    }
}
