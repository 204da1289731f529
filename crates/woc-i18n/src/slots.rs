//! Static table of translatable page slots.

/// How a slot's text is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// The element's own text content is replaced.
    Text,
    /// The text goes to the nested button label element.
    ButtonLabel,
}

/// Binds a DOM element id to a translation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotBinding {
    /// DOM element id.
    pub id: &'static str,
    /// Translation key rendered into the slot.
    pub key: &'static str,
    /// Write strategy.
    pub kind: SlotKind,
}

impl SlotBinding {
    /// Text slot whose key equals its id.
    #[must_use]
    pub const fn text(id: &'static str) -> Self {
        Self {
            id,
            key: id,
            kind: SlotKind::Text,
        }
    }

    /// Text slot rendering a shared key.
    #[must_use]
    pub const fn shared(id: &'static str, key: &'static str) -> Self {
        Self {
            id,
            key,
            kind: SlotKind::Text,
        }
    }

    /// Button slot whose label shows the key equal to its id.
    #[must_use]
    pub const fn button(id: &'static str) -> Self {
        Self {
            id,
            key: id,
            kind: SlotKind::ButtonLabel,
        }
    }
}

/// Translation key used for the document title.
pub const TITLE_KEY: &str = "title";

/// Every translatable slot on the site, in page order.
///
/// Pages may omit any of these (the mobile navigation only exists on small
/// layouts, for instance).
pub const SITE_SLOTS: &[SlotBinding] = &[
    SlotBinding::text("title"),
    SlotBinding::text("title_footer"),
    // hero
    SlotBinding::text("hero_title"),
    SlotBinding::text("hero_subtitle"),
    SlotBinding::button("hero_cta"),
    // navigation
    SlotBinding::text("nav_about"),
    SlotBinding::text("nav_projects"),
    SlotBinding::text("nav_impact"),
    SlotBinding::text("nav_contact"),
    SlotBinding::shared("mobile_nav_about", "nav_about"),
    SlotBinding::shared("mobile_nav_projects", "nav_projects"),
    SlotBinding::shared("mobile_nav_impact", "nav_impact"),
    SlotBinding::shared("mobile_nav_contact", "nav_contact"),
    // stats
    SlotBinding::text("stats_wells"),
    SlotBinding::text("stats_wells_label"),
    SlotBinding::text("stats_lives"),
    SlotBinding::text("stats_lives_label"),
    SlotBinding::text("stats_countries"),
    SlotBinding::text("stats_countries_label"),
    SlotBinding::text("stats_funds"),
    SlotBinding::text("stats_funds_label"),
    // about
    SlotBinding::text("about_title"),
    SlotBinding::text("about_subtitle"),
    SlotBinding::text("about_text"),
    SlotBinding::text("about_text_2"),
    // projects
    SlotBinding::text("projects_title"),
    SlotBinding::text("projects_subtitle"),
    SlotBinding::text("project_1_title"),
    SlotBinding::text("project_1_desc"),
    SlotBinding::text("project_2_title"),
    SlotBinding::text("project_2_desc"),
    SlotBinding::text("project_3_title"),
    SlotBinding::text("project_3_desc"),
    SlotBinding::shared("project_button_1", "project_button"),
    SlotBinding::shared("project_button_2", "project_button"),
    SlotBinding::shared("project_button_3", "project_button"),
    // impact
    SlotBinding::text("impact_title"),
    SlotBinding::text("impact_subtitle"),
    SlotBinding::text("impact_1_title"),
    SlotBinding::text("impact_1_text"),
    SlotBinding::text("impact_2_title"),
    SlotBinding::text("impact_2_text"),
    SlotBinding::text("impact_3_title"),
    SlotBinding::text("impact_3_text"),
    // contact
    SlotBinding::text("contact_title"),
    SlotBinding::text("contact_text"),
    SlotBinding::text("contact_description"),
    SlotBinding::button("contact_button"),
    // footer
    SlotBinding::text("footer_tagline"),
    SlotBinding::text("footer_links"),
    SlotBinding::text("footer_about"),
    SlotBinding::text("footer_projects"),
    SlotBinding::text("footer_impact"),
    SlotBinding::text("footer_contact"),
    SlotBinding::text("footer_connect"),
    SlotBinding::text("footer_copyright"),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn slot_ids_are_unique() {
        let mut seen = HashSet::new();
        for slot in SITE_SLOTS {
            assert!(seen.insert(slot.id), "duplicate slot id {}", slot.id);
        }
    }

    #[test]
    fn project_buttons_share_one_key() {
        let keys: HashSet<_> = SITE_SLOTS
            .iter()
            .filter(|slot| slot.id.starts_with("project_button_"))
            .map(|slot| slot.key)
            .collect();
        assert_eq!(keys, HashSet::from(["project_button"]));
    }

    #[test]
    fn only_call_to_action_slots_use_labels() {
        let labels: Vec<_> = SITE_SLOTS
            .iter()
            .filter(|slot| slot.kind == SlotKind::ButtonLabel)
            .map(|slot| slot.id)
            .collect();
        assert_eq!(labels, ["hero_cta", "contact_button"]);
    }
}
