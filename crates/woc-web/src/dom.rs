//! `web-sys` implementation of the page seam.

use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};
use woc_i18n::{LocaleTag, Page, PageError, PageResult, SelectorState, SlotBinding, SlotKind, SlotWrite};

use crate::hooks::DomHooks;

/// Live document addressed through the site's DOM hooks.
#[derive(Clone, Debug)]
pub(crate) struct DomPage {
    document: Document,
    hooks: DomHooks,
}

impl DomPage {
    pub(crate) const fn new(document: Document, hooks: DomHooks) -> Self {
        Self { document, hooks }
    }

    pub(crate) const fn hooks(&self) -> &DomHooks {
        &self.hooks
    }

    /// Every language selector element, in document order.
    pub(crate) fn selectors(&self) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(self.hooks.selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    pub(crate) fn menu(&self) -> Option<Element> {
        self.document.get_element_by_id(self.hooks.menu)
    }

    pub(crate) fn fab_button(&self) -> Option<Element> {
        self.document
            .query_selector(self.hooks.fab_button)
            .ok()
            .flatten()
    }
}

fn dom_error(target: &str, err: &wasm_bindgen::JsValue) -> PageError {
    PageError::Dom {
        target: target.to_string(),
        detail: format!("{err:?}"),
    }
}

impl Page for DomPage {
    fn write_slot(&self, slot: &SlotBinding, text: &str) -> PageResult<SlotWrite> {
        let Some(element) = self.document.get_element_by_id(slot.id) else {
            return Ok(SlotWrite::Missing);
        };
        let target = match slot.kind {
            SlotKind::Text => Some(element),
            SlotKind::ButtonLabel => element
                .query_selector(self.hooks.button_label)
                .map_err(|err| dom_error(slot.id, &err))?,
        };
        Ok(target.map_or(SlotWrite::Missing, |node| {
            node.set_text_content(Some(text));
            SlotWrite::Written
        }))
    }

    fn set_document_title(&self, title: &str) {
        self.document.set_title(title);
    }

    fn set_language_summary(&self, summary: &str) {
        if let Some(display) = self.document.get_element_by_id(self.hooks.language_display) {
            display.set_text_content(Some(summary));
        }
    }

    fn selector_locales(&self) -> Vec<LocaleTag> {
        self.selectors()
            .iter()
            .filter_map(|element| element.get_attribute(self.hooks.lang_attribute))
            .map(LocaleTag::from)
            .collect()
    }

    fn set_selector_state(&self, locale: &LocaleTag, state: SelectorState) {
        let (add, remove) = self
            .hooks
            .selector_classes(state == SelectorState::Selected);
        for element in self.selectors() {
            let matches = element
                .get_attribute(self.hooks.lang_attribute)
                .is_some_and(|tag| LocaleTag::from(tag) == *locale);
            if !matches {
                continue;
            }
            let classes = element.class_list();
            if let Err(err) = classes.remove_1(remove).and_then(|()| classes.add_1(add)) {
                warn!(locale = %locale, error = ?err, "failed to restyle language selector");
            }
        }
    }

    fn set_menu_open(&self, open: bool) {
        let Some(menu) = self.menu() else {
            return;
        };
        if let Err(err) = menu
            .class_list()
            .toggle_with_force(self.hooks.menu_open_class, open)
        {
            warn!(error = ?err, "failed to toggle language menu");
        }
    }

    fn is_menu_open(&self) -> bool {
        self.menu()
            .is_some_and(|menu| menu.class_list().contains(self.hooks.menu_open_class))
    }
}
