//! Locale identifiers and the static display catalog shown in the language menu.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque language/region identifier (`en`, `pt-BR`).
///
/// Tags are compared exactly as written; resource paths use them verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Wrap a tag, trimming surrounding whitespace.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let raw = tag.into();
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() {
            Self(raw)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Borrow the tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`pt` for `pt-BR`), lowercased.
    #[must_use]
    pub fn language(&self) -> String {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }
}

impl Display for LocaleTag {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for LocaleTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LocaleTag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Display metadata for one selectable locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleEntry {
    /// Locale tag used for resource paths.
    pub tag: LocaleTag,
    /// Visual marker (flag glyph).
    pub flag: String,
    /// Native language name.
    pub name: String,
}

impl LocaleEntry {
    /// Build an entry from its parts.
    #[must_use]
    pub fn new(tag: impl Into<LocaleTag>, flag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            flag: flag.into(),
            name: name.into(),
        }
    }

    /// Text shown on the language button, e.g. `🇫🇷 Français`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} {}", self.flag, self.name)
    }
}

/// Ordered, immutable set of selectable locales.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCatalog {
    entries: Vec<LocaleEntry>,
}

impl LocaleCatalog {
    /// Build a catalog preserving entry order.
    #[must_use]
    pub const fn new(entries: Vec<LocaleEntry>) -> Self {
        Self { entries }
    }

    /// Locales in menu order.
    #[must_use]
    pub fn entries(&self) -> &[LocaleEntry] {
        &self.entries
    }

    /// Look up display metadata for a tag.
    #[must_use]
    pub fn get(&self, tag: &LocaleTag) -> Option<&LocaleEntry> {
        self.entries.iter().find(|entry| &entry.tag == tag)
    }

    /// Whether the tag is configured.
    #[must_use]
    pub fn contains(&self, tag: &LocaleTag) -> bool {
        self.get(tag).is_some()
    }

    /// Map a browser language tag onto a configured locale.
    ///
    /// An exact (case-insensitive) match wins; otherwise the first entry
    /// sharing the primary language subtag is used.
    #[must_use]
    pub fn match_tag(&self, tag: &str) -> Option<&LocaleEntry> {
        let wanted = LocaleTag::new(tag);
        if let Some(entry) = self
            .entries
            .iter()
            .find(|entry| entry.tag.as_str().eq_ignore_ascii_case(wanted.as_str()))
        {
            return Some(entry);
        }
        let language = wanted.language();
        self.entries
            .iter()
            .find(|entry| entry.tag.language() == language)
    }

    /// Number of configured locales.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no locale is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::new(vec![
            LocaleEntry::new("en", "🇺🇸", "English"),
            LocaleEntry::new("pt-BR", "🇧🇷", "Português"),
            LocaleEntry::new("fr", "🇫🇷", "Français"),
            LocaleEntry::new("es", "🇪🇸", "Español"),
        ])
    }
}
