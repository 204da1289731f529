//! Selectors and class names tying the switcher to the site markup.

/// DOM hooks used by the browser glue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomHooks {
    /// Selector of the floating language button.
    pub fab_button: &'static str,
    /// Id of the language menu container.
    pub menu: &'static str,
    /// Class toggled on the menu while it is open.
    pub menu_open_class: &'static str,
    /// Id of the element showing the active flag and language name.
    pub language_display: &'static str,
    /// Selector matching every language entry in the menu.
    pub selector: &'static str,
    /// Attribute carrying a selector's locale tag.
    pub lang_attribute: &'static str,
    /// Attribute carrying a selector's flag glyph.
    pub flag_attribute: &'static str,
    /// Selector of the label node nested in button-style elements.
    pub button_label: &'static str,
    /// Class marking the selected language entry.
    pub selected_class: &'static str,
    /// Class marking unselected language entries.
    pub unselected_class: &'static str,
    /// Id of the optional JSON configuration script.
    pub config_script: &'static str,
}

/// Hooks matching the site's Material Components markup.
pub const SITE_HOOKS: DomHooks = DomHooks {
    fab_button: ".language-fab-button",
    menu: "language-menu",
    menu_open_class: "open",
    language_display: "current-language-display",
    selector: ".language-selector",
    lang_attribute: "data-lang",
    flag_attribute: "data-flag",
    button_label: ".mdc-button__label",
    selected_class: "mdc-button--raised",
    unselected_class: "mdc-button--outlined",
    config_script: "woc-i18n-config",
};

impl Default for DomHooks {
    fn default() -> Self {
        SITE_HOOKS
    }
}

impl DomHooks {
    /// Classes to add and remove for a selector in the given state.
    #[must_use]
    pub const fn selector_classes(&self, selected: bool) -> (&'static str, &'static str) {
        if selected {
            (self.selected_class, self.unselected_class)
        } else {
            (self.unselected_class, self.selected_class)
        }
    }
}
