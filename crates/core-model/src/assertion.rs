//! Assertions: one named declaration inside a model section

use crate::section::Section;
use crate::storage::{RuleStore, StorageMode};

/// A single declaration such as `p = sub, obj, act` or `m = r.sub == p.sub`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// Section-relative key (`p`, `p2`, ...)
    pub key: String,
    /// Declaration text. Kept verbatim for r/p, comment-stripped otherwise.
    pub value: String,
    /// Field names prefixed with `<key>_`; only filled for r and p
    pub tokens: Vec<String>,
    /// Rules; only present for p and g
    pub rules: Option<RuleStore>,
}

impl Assertion {
    /// Build an assertion for `section` from its raw configuration value
    #[must_use]
    pub fn new(section: Section, key: impl Into<String>, value: &str, mode: StorageMode) -> Self {
        let key = key.into();
        let (value, tokens) = if section.has_tokens() {
            let tokens = value
                .split(',')
                .map(|token| format!("{}_{}", key, token.trim()))
                .collect();
            (value.to_string(), tokens)
        } else {
            (remove_comments(value).to_string(), Vec::new())
        };
        let rules = section.is_rule_bearing().then(|| RuleStore::new(mode));

        Self {
            key,
            value,
            tokens,
            rules,
        }
    }

    /// Number of fields each rule must have, if the assertion holds rules.
    ///
    /// Policy assertions use their token count, role assertions the number
    /// of comma-separated parts of their value.
    #[must_use]
    pub fn arity(&self) -> Option<usize> {
        self.rules.as_ref()?;
        if self.tokens.is_empty() {
            Some(self.value.split(',').count())
        } else {
            Some(self.tokens.len())
        }
    }

    /// Position of a bare field name (`obj`) among the tokens
    #[must_use]
    pub fn field_index(&self, field: &str) -> Option<usize> {
        let prefix_len = self.key.len() + 1;
        self.tokens
            .iter()
            .position(|token| token.get(prefix_len..) == Some(field))
    }

    /// Current storage mode, if the assertion holds rules
    #[must_use]
    pub fn storage_mode(&self) -> Option<StorageMode> {
        self.rules.as_ref().map(RuleStore::mode)
    }
}

/// Strip a trailing `#` comment and surrounding whitespace
#[must_use]
pub fn remove_comments(value: &str) -> &str {
    match value.find('#') {
        Some(index) => value[..index].trim(),
        None => value.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_tokens_are_namespaced_and_trimmed() {
        let assertion = Assertion::new(Section::R, "r2", "sub ,  obj,act", StorageMode::Ordered);
        assert_eq!(assertion.tokens, vec!["r2_sub", "r2_obj", "r2_act"]);
        assert_eq!(assertion.value, "sub ,  obj,act");
        assert!(assertion.rules.is_none());
    }

    #[test]
    fn matcher_comments_are_stripped() {
        let assertion = Assertion::new(
            Section::M,
            "m",
            "r.sub == p.sub # only subjects",
            StorageMode::Ordered,
        );
        assert_eq!(assertion.value, "r.sub == p.sub");
        assert!(assertion.tokens.is_empty());
    }

    #[test]
    fn arity_follows_tokens_or_comma_parts() {
        let policy = Assertion::new(Section::P, "p", "sub, obj, act", StorageMode::Set);
        let role = Assertion::new(Section::G, "g", "_, _, _", StorageMode::Ordered);
        let effect = Assertion::new(Section::E, "e", "some(where (p.eft == allow))", StorageMode::Ordered);
        assert_eq!(policy.arity(), Some(3));
        assert_eq!(role.arity(), Some(3));
        assert_eq!(effect.arity(), None);
    }

    #[test]
    fn field_index_uses_bare_names() {
        let policy = Assertion::new(Section::P, "p", "sub, obj, act", StorageMode::Ordered);
        assert_eq!(policy.field_index("obj"), Some(1));
        assert_eq!(policy.field_index("p_obj"), None);
        assert_eq!(policy.field_index("dom"), None);
    }
}
