//! Configuration source abstraction
//!
//! The model never parses configuration text itself. It asks a
//! [`ConfigSource`] for values by `section_name::key` path, e.g.
//! `policy_definition::p2`, and treats a missing or empty value as "not
//! defined".

use std::collections::{BTreeMap, HashMap};

/// Anything that can answer `section_name::key` lookups
pub trait ConfigSource {
    /// Value stored at `path`, or `None` when absent
    fn get(&self, path: &str) -> Option<&str>;

    /// Value at `path`, with absence mapped to the empty string
    fn get_string(&self, path: &str) -> &str {
        self.get(path).unwrap_or("")
    }
}

impl ConfigSource for BTreeMap<String, String> {
    fn get(&self, path: &str) -> Option<&str> {
        BTreeMap::get(self, path).map(String::as_str)
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, path: &str) -> Option<&str> {
        HashMap::get(self, path).map(String::as_str)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn get(&self, path: &str) -> Option<&str> {
        (**self).get(path)
    }
}

/// Join a section name and key into a lookup path
#[must_use]
pub fn config_path(section_name: &str, key: &str) -> String {
    format!("{}::{}", section_name, key)
}
