//! Policy CRUD over the rules of a model
//!
//! Every operation addresses one assertion by `(section, key)`, e.g.
//! `(Section::P, "p")` or `(Section::G, "g2")`. Contract violations such as
//! duplicates or absent rules are ordinary outcomes reported through the
//! returned `bool`; they never panic and never leave a batch half applied.
//!
//! An address that does not name a policy or role assertion behaves like an
//! empty rule set: queries come back empty and mutations return `false`.

use crate::model::Model;
use crate::section::Section;
use crate::storage::{Rule, RuleStore};
use std::collections::HashSet;
use tracing::warn;

/// Whether `rule` matches `field_values` starting at `field_index`.
///
/// Empty values are wildcards. A position past the end of the rule never
/// matches a non-empty value.
#[must_use]
pub fn matches_filter<S: AsRef<str>>(rule: &[String], field_index: usize, field_values: &[S]) -> bool {
    field_values.iter().enumerate().all(|(offset, value)| {
        let value = value.as_ref();
        value.is_empty()
            || rule
                .get(field_index + offset)
                .is_some_and(|field| field == value)
    })
}

impl Model {
    fn rules(&self, section: Section, key: &str) -> Option<&RuleStore> {
        self.assertion(section, key)?.rules.as_ref()
    }

    /// Rule store and expected arity of a rule-bearing assertion
    fn rules_mut(&mut self, section: Section, key: &str) -> Option<(&mut RuleStore, Option<usize>)> {
        let Some(assertion) = self.assertion_mut(section, key) else {
            warn!(section = %section, key, "no such assertion");
            return None;
        };
        let arity = assertion.arity();
        match assertion.rules.as_mut() {
            Some(rules) => Some((rules, arity)),
            None => {
                warn!(section = %section, key, "assertion holds no rules");
                None
            }
        }
    }

    fn check_arity<'a>(
        section: Section,
        key: &str,
        arity: Option<usize>,
        rules: impl IntoIterator<Item = &'a Rule>,
    ) -> bool {
        let Some(expected) = arity else {
            return true;
        };
        for rule in rules {
            if rule.len() != expected {
                warn!(section = %section, key, expected, actual = rule.len(), "rule arity mismatch");
                return false;
            }
        }
        true
    }

    /// All rules of an assertion, in storage iteration order
    #[must_use]
    pub fn get_policy(&self, section: Section, key: &str) -> Vec<Rule> {
        self.rules(section, key)
            .map(RuleStore::to_vec)
            .unwrap_or_default()
    }

    /// Rules matching `field_values` from `field_index` on; `""` is a wildcard
    #[must_use]
    pub fn get_filtered_policy<S: AsRef<str>>(
        &self,
        section: Section,
        key: &str,
        field_index: usize,
        field_values: &[S],
    ) -> Vec<Rule> {
        self.rules(section, key)
            .map(|rules| {
                rules
                    .iter()
                    .filter(|rule| matches_filter(rule, field_index, field_values))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether an equal rule is stored
    #[must_use]
    pub fn has_policy(&self, section: Section, key: &str, rule: &[String]) -> bool {
        self.rules(section, key)
            .is_some_and(|rules| rules.contains(rule))
    }

    /// Add a rule unless it is already stored
    pub fn add_policy(&mut self, section: Section, key: &str, rule: Rule) -> bool {
        let Some((rules, arity)) = self.rules_mut(section, key) else {
            return false;
        };
        if !Self::check_arity(section, key, arity, [&rule]) {
            return false;
        }
        rules.insert(rule)
    }

    /// Add every rule, or none when any of them is already stored
    pub fn add_policies(&mut self, section: Section, key: &str, new_rules: Vec<Rule>) -> bool {
        let Some((rules, arity)) = self.rules_mut(section, key) else {
            return false;
        };
        if !Self::check_arity(section, key, arity, &new_rules) {
            return false;
        }
        rules.insert_all(new_rules)
    }

    /// Remove the rule equal to `rule`
    pub fn remove_policy(&mut self, section: Section, key: &str, rule: &[String]) -> bool {
        self.rules_mut(section, key)
            .is_some_and(|(rules, _)| rules.remove(rule))
    }

    /// Remove every rule, or none when any of them is not stored
    pub fn remove_policies(&mut self, section: Section, key: &str, old_rules: &[Rule]) -> bool {
        self.rules_mut(section, key)
            .is_some_and(|(rules, _)| rules.remove_all(old_rules))
    }

    /// Remove every rule matching the filter.
    ///
    /// Returns whether anything matched, together with the removed rules.
    pub fn remove_filtered_policy<S: AsRef<str>>(
        &mut self,
        section: Section,
        key: &str,
        field_index: usize,
        field_values: &[S],
    ) -> (bool, Vec<Rule>) {
        let Some((rules, _)) = self.rules_mut(section, key) else {
            return (false, Vec::new());
        };
        let removed = rules.extract_matching(|rule| matches_filter(rule, field_index, field_values));
        (!removed.is_empty(), removed)
    }

    /// Replace `old_rule` with `new_rule` as one step.
    ///
    /// Nothing changes when `old_rule` is absent or `new_rule` is already
    /// stored.
    pub fn update_policy(
        &mut self,
        section: Section,
        key: &str,
        old_rule: &[String],
        new_rule: Rule,
    ) -> bool {
        let Some((rules, arity)) = self.rules_mut(section, key) else {
            return false;
        };
        if !Self::check_arity(section, key, arity, [&new_rule]) {
            return false;
        }
        rules.replace(old_rule, new_rule)
    }

    /// Replace `old_rules[i]` with `new_rules[i]` for every `i`, or nothing
    pub fn update_policies(
        &mut self,
        section: Section,
        key: &str,
        old_rules: &[Rule],
        new_rules: Vec<Rule>,
    ) -> bool {
        let Some((rules, arity)) = self.rules_mut(section, key) else {
            return false;
        };
        if !Self::check_arity(section, key, arity, &new_rules) {
            return false;
        }
        rules.replace_all(old_rules, new_rules)
    }

    /// Distinct values at `field_index`, in order of first appearance
    #[must_use]
    pub fn get_values_for_field_in_policy(
        &self,
        section: Section,
        key: &str,
        field_index: usize,
    ) -> Vec<String> {
        let mut values = Vec::new();
        if let Some(rules) = self.rules(section, key) {
            collect_distinct(&mut values, &mut HashSet::new(), rules, field_index);
        }
        values
    }

    /// Distinct values at `field_index` across every assertion of `section`
    #[must_use]
    pub fn get_values_for_field_in_policy_all_types(
        &self,
        section: Section,
        field_index: usize,
    ) -> Vec<String> {
        let mut values = Vec::new();
        let mut seen = HashSet::new();
        for assertion in self.assertions(section).into_iter().flat_map(|a| a.values()) {
            if let Some(rules) = &assertion.rules {
                collect_distinct(&mut values, &mut seen, rules, field_index);
            }
        }
        values
    }

    /// Drop every policy and role rule, keeping the definitions
    pub fn clear_policy(&mut self) {
        for section in [Section::P, Section::G] {
            for assertion in self.assertions_mut(section) {
                if let Some(rules) = assertion.rules.as_mut() {
                    rules.clear();
                }
            }
        }
    }
}

fn collect_distinct(
    values: &mut Vec<String>,
    seen: &mut HashSet<String>,
    rules: &RuleStore,
    field_index: usize,
) {
    for value in rules.iter().filter_map(|rule| rule.get(field_index)) {
        if seen.insert(value.clone()) {
            values.push(value.clone());
        }
    }
}
