//! Parsed configuration: section -> key -> value

use core_model::ConfigSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Section used for keys that appear before any `[section]` header
pub const DEFAULT_SECTION: &str = "default";

/// Separator between section and key in a lookup path
const PATH_SEPARATOR: &str = "::";

/// Values of one section, by key
pub type SectionMap = BTreeMap<String, String>;

/// A parsed configuration document
///
/// Looked up by [`ConfigSource::get`] with `section::key` paths; a path
/// without a section addresses [`DEFAULT_SECTION`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    sections: BTreeMap<String, SectionMap>,
}

impl ConfigDocument {
    /// Create an empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` in `section`, replacing any previous value
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Value of `key` in `section`
    #[must_use]
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// Values of `section`
    #[must_use]
    pub fn section(&self, section: &str) -> Option<&SectionMap> {
        self.sections.get(section)
    }

    /// Section names in sorted order
    pub fn section_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sections.keys().map(String::as_str)
    }

    /// Whether the document holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(SectionMap::is_empty)
    }
}

impl From<BTreeMap<String, SectionMap>> for ConfigDocument {
    fn from(sections: BTreeMap<String, SectionMap>) -> Self {
        Self { sections }
    }
}

impl ConfigSource for ConfigDocument {
    fn get(&self, path: &str) -> Option<&str> {
        let (section, key) = path
            .split_once(PATH_SEPARATOR)
            .unwrap_or((DEFAULT_SECTION, path));
        self.value(section, key)
    }
}
