//! Page abstraction the rehydrator and controller write to.
//!
//! # Design
//! - The trait mirrors the handful of DOM operations the site needs, so the
//!   state machine can be exercised without a browser.
//! - Methods take `&self`; DOM handles are shared references in the browser
//!   and [`MemoryPage`] uses interior mutability to match.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::locale::LocaleTag;
use crate::slots::{SITE_SLOTS, SlotBinding, SlotKind};

/// Result of writing one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotWrite {
    /// Text was written.
    Written,
    /// The element (or its label node) is not on this page.
    Missing,
}

/// Visual state of a language selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorState {
    /// Raised style, marks the active locale.
    Selected,
    /// Outlined style.
    Unselected,
}

/// Failure raised by a page backend while writing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The host DOM rejected an operation.
    #[error("page operation failed")]
    Dom {
        /// Slot or control being updated.
        target: String,
        /// Backend detail.
        detail: String,
    },
}

/// Convenience alias for page results.
pub type PageResult<T> = Result<T, PageError>;

/// Addressable surfaces of the site page.
pub trait Page {
    /// Write `text` into the slot.
    ///
    /// # Errors
    ///
    /// Returns [`PageError`] when the backend rejects the write; absence of
    /// the element is reported as [`SlotWrite::Missing`] instead.
    fn write_slot(&self, slot: &SlotBinding, text: &str) -> PageResult<SlotWrite>;

    /// Replace the document title.
    fn set_document_title(&self, title: &str);

    /// Replace the language button's flag and name summary.
    fn set_language_summary(&self, summary: &str);

    /// Locale tags carried by the language selector controls, in page order.
    fn selector_locales(&self) -> Vec<LocaleTag>;

    /// Apply a visual state to every selector carrying `locale`.
    fn set_selector_state(&self, locale: &LocaleTag, state: SelectorState);

    /// Open or close the language menu.
    fn set_menu_open(&self, open: bool);

    /// Whether the language menu is open.
    fn is_menu_open(&self) -> bool;
}

impl<P: Page + ?Sized> Page for std::rc::Rc<P> {
    fn write_slot(&self, slot: &SlotBinding, text: &str) -> PageResult<SlotWrite> {
        (**self).write_slot(slot, text)
    }

    fn set_document_title(&self, title: &str) {
        (**self).set_document_title(title);
    }

    fn set_language_summary(&self, summary: &str) {
        (**self).set_language_summary(summary);
    }

    fn selector_locales(&self) -> Vec<LocaleTag> {
        (**self).selector_locales()
    }

    fn set_selector_state(&self, locale: &LocaleTag, state: SelectorState) {
        (**self).set_selector_state(locale, state);
    }

    fn set_menu_open(&self, open: bool) {
        (**self).set_menu_open(open);
    }

    fn is_menu_open(&self) -> bool {
        (**self).is_menu_open()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct MemorySlot {
    has_label: bool,
    text: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    slots: BTreeMap<String, MemorySlot>,
    failing: HashSet<String>,
    title: String,
    summary: String,
    selectors: Vec<(LocaleTag, SelectorState)>,
    menu_open: bool,
}

/// In-memory page used for headless previews and tests.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: RefCell<MemoryState>,
}

impl MemoryPage {
    /// Empty page with no slots or selectors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page containing every site slot, buttons with their label node.
    #[must_use]
    pub fn with_site_slots() -> Self {
        let page = Self::new();
        for slot in SITE_SLOTS {
            page.add_slot(slot.id, slot.kind == SlotKind::ButtonLabel);
        }
        page
    }

    /// Add a slot element; `has_label` adds a nested button label node.
    pub fn add_slot(&self, id: &str, has_label: bool) {
        self.state.borrow_mut().slots.insert(
            id.to_string(),
            MemorySlot {
                has_label,
                text: String::new(),
            },
        );
    }

    /// Remove a slot element.
    pub fn remove_slot(&self, id: &str) {
        self.state.borrow_mut().slots.remove(id);
    }

    /// Make writes to `id` fail with a backend error.
    pub fn fail_slot(&self, id: &str) {
        self.state.borrow_mut().failing.insert(id.to_string());
    }

    /// Add one unselected selector per tag.
    pub fn add_selectors<I, T>(&self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<LocaleTag>,
    {
        let mut state = self.state.borrow_mut();
        state.selectors.extend(
            tags.into_iter()
                .map(|tag| (tag.into(), SelectorState::Unselected)),
        );
    }

    /// Current text of a slot, `None` when the slot is absent.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<String> {
        self.state
            .borrow()
            .slots
            .get(id)
            .map(|slot| slot.text.clone())
    }

    /// Snapshot of every slot's text keyed by id.
    #[must_use]
    pub fn texts(&self) -> BTreeMap<String, String> {
        self.state
            .borrow()
            .slots
            .iter()
            .map(|(id, slot)| (id.clone(), slot.text.clone()))
            .collect()
    }

    /// Document title.
    #[must_use]
    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    /// Language button summary.
    #[must_use]
    pub fn language_summary(&self) -> String {
        self.state.borrow().summary.clone()
    }

    /// Visual state of the first selector carrying `locale`.
    #[must_use]
    pub fn selector_state(&self, locale: &str) -> Option<SelectorState> {
        self.state
            .borrow()
            .selectors
            .iter()
            .find(|(tag, _)| tag.as_str() == locale)
            .map(|(_, state)| *state)
    }

    /// Tags of the selectors currently marked selected.
    #[must_use]
    pub fn selected_locales(&self) -> Vec<LocaleTag> {
        self.state
            .borrow()
            .selectors
            .iter()
            .filter(|(_, state)| *state == SelectorState::Selected)
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}

impl Page for MemoryPage {
    fn write_slot(&self, slot: &SlotBinding, text: &str) -> PageResult<SlotWrite> {
        let mut state = self.state.borrow_mut();
        if state.failing.contains(slot.id) {
            return Err(PageError::Dom {
                target: slot.id.to_string(),
                detail: "write rejected".to_string(),
            });
        }
        let Some(element) = state.slots.get_mut(slot.id) else {
            return Ok(SlotWrite::Missing);
        };
        if slot.kind == SlotKind::ButtonLabel && !element.has_label {
            return Ok(SlotWrite::Missing);
        }
        text.clone_into(&mut element.text);
        Ok(SlotWrite::Written)
    }

    fn set_document_title(&self, title: &str) {
        title.clone_into(&mut self.state.borrow_mut().title);
    }

    fn set_language_summary(&self, summary: &str) {
        summary.clone_into(&mut self.state.borrow_mut().summary);
    }

    fn selector_locales(&self) -> Vec<LocaleTag> {
        self.state
            .borrow()
            .selectors
            .iter()
            .map(|(tag, _)| tag.clone())
            .collect()
    }

    fn set_selector_state(&self, locale: &LocaleTag, state: SelectorState) {
        for (tag, current) in &mut self.state.borrow_mut().selectors {
            if tag == locale {
                *current = state;
            }
        }
    }

    fn set_menu_open(&self, open: bool) {
        self.state.borrow_mut().menu_open = open;
    }

    fn is_menu_open(&self) -> bool {
        self.state.borrow().menu_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_slots_accept_writes() -> PageResult<()> {
        let page = MemoryPage::new();
        page.add_slot("hero_title", false);
        let outcome = page.write_slot(&SlotBinding::text("hero_title"), "Clean water")?;
        assert_eq!(outcome, SlotWrite::Written);
        assert_eq!(page.text("hero_title").as_deref(), Some("Clean water"));
        Ok(())
    }

    #[test]
    fn absent_elements_report_missing() -> PageResult<()> {
        let page = MemoryPage::new();
        assert_eq!(
            page.write_slot(&SlotBinding::text("nav_about"), "About")?,
            SlotWrite::Missing
        );
        page.add_slot("hero_cta", false);
        assert_eq!(
            page.write_slot(&SlotBinding::button("hero_cta"), "Donate")?,
            SlotWrite::Missing
        );
        assert_eq!(page.text("hero_cta").as_deref(), Some(""));
        Ok(())
    }

    #[test]
    fn failing_slots_return_errors() {
        let page = MemoryPage::with_site_slots();
        page.fail_slot("about_text");
        assert!(matches!(
            page.write_slot(&SlotBinding::text("about_text"), "x"),
            Err(PageError::Dom { .. })
        ));
    }

    #[test]
    fn selector_states_apply_per_tag() {
        let page = MemoryPage::new();
        page.add_selectors(["en", "fr"]);
        page.set_selector_state(&LocaleTag::from("fr"), SelectorState::Selected);
        assert_eq!(page.selector_state("fr"), Some(SelectorState::Selected));
        assert_eq!(page.selector_state("en"), Some(SelectorState::Unselected));
        assert_eq!(page.selected_locales(), vec![LocaleTag::from("fr")]);
    }
}
