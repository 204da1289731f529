//! Parsed translation resources.

use serde_json::{Map, Value};

use crate::error::{I18nError, I18nResult};
use crate::locale::LocaleTag;

/// Key to string mapping for one locale.
///
/// Resources are flat JSON objects; nested objects are also accepted and
/// resolved with dotted keys (`section.key`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: Map<String, Value>,
}

impl TranslationTable {
    /// Parse a resource body fetched for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Parse`] for invalid JSON and
    /// [`I18nError::NotAnObject`] when the document is not an object.
    pub fn parse(locale: &LocaleTag, raw: &str) -> I18nResult<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|err| I18nError::Parse {
            locale: locale.clone(),
            detail: err.to_string(),
        })?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => Err(I18nError::NotAnObject {
                locale: locale.clone(),
            }),
        }
    }

    /// Resolve a key, trying the literal key before a dotted path.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if let Some(text) = self.entries.get(key).and_then(Value::as_str) {
            return Some(text);
        }
        if !key.contains('.') {
            return None;
        }
        let mut segments = key.split('.');
        let mut node = self.entries.get(segments.next()?)?;
        for segment in segments {
            node = node.get(segment)?;
        }
        node.as_str()
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
