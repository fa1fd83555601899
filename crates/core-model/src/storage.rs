//! Rule storage
//!
//! Rules of one assertion live either in an insertion-ordered `Vec` or in a
//! `HashSet`. Both honour the same contract: no two stored rules are equal,
//! and insert/remove/contains compare rules field by field. The only
//! observable difference is iteration order, which is insertion order for
//! [`StorageMode::Ordered`] and unspecified for [`StorageMode::Set`].

use serde::{Deserialize, Serialize};
use std::collections::{hash_set, HashSet};
use std::slice;

/// A single policy or role rule: one value per field
pub type Rule = Vec<String>;

/// Representation used by a [`RuleStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageMode {
    /// Insertion-ordered sequence
    Ordered,
    /// Deduplicating, order-agnostic set
    Set,
}

/// Rule container of a rule-bearing assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleStore {
    /// Rules kept in insertion order
    Ordered(Vec<Rule>),
    /// Rules kept in a hash set
    Set(HashSet<Rule>),
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::Ordered(Vec::new())
    }
}

impl RuleStore {
    /// Create an empty store of the given representation
    #[must_use]
    pub fn new(mode: StorageMode) -> Self {
        match mode {
            StorageMode::Ordered => Self::Ordered(Vec::new()),
            StorageMode::Set => Self::Set(HashSet::new()),
        }
    }

    /// Build a store from rules, dropping duplicates
    pub fn from_rules(mode: StorageMode, rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut store = Self::new(mode);
        for rule in rules {
            store.insert(rule);
        }
        store
    }

    /// Current representation
    #[must_use]
    pub fn mode(&self) -> StorageMode {
        match self {
            Self::Ordered(_) => StorageMode::Ordered,
            Self::Set(_) => StorageMode::Set,
        }
    }

    /// Number of stored rules
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Ordered(rules) => rules.len(),
            Self::Set(rules) => rules.len(),
        }
    }

    /// Whether no rule is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an equal rule is stored
    #[must_use]
    pub fn contains(&self, rule: &[String]) -> bool {
        match self {
            Self::Ordered(rules) => rules.iter().any(|r| r.as_slice() == rule),
            Self::Set(rules) => rules.contains(rule),
        }
    }

    /// Insert a rule unless an equal one is already stored
    pub fn insert(&mut self, rule: Rule) -> bool {
        match self {
            Self::Ordered(rules) => {
                if rules.contains(&rule) {
                    return false;
                }
                rules.push(rule);
                true
            }
            Self::Set(rules) => rules.insert(rule),
        }
    }

    /// Remove the rule equal to `rule`, if any
    pub fn remove(&mut self, rule: &[String]) -> bool {
        match self {
            Self::Ordered(rules) => match rules.iter().position(|r| r.as_slice() == rule) {
                Some(index) => {
                    rules.remove(index);
                    true
                }
                None => false,
            },
            Self::Set(rules) => rules.remove(rule),
        }
    }

    /// Replace `old` with `new` in a single step.
    ///
    /// Fails without touching the store when `old` is absent or when `new`
    /// is already stored as a different rule. Ordered stores keep `new` at
    /// the position `old` occupied.
    pub fn replace(&mut self, old: &[String], new: Rule) -> bool {
        if old != new.as_slice() && self.contains(&new) {
            return false;
        }
        match self {
            Self::Ordered(rules) => match rules.iter().position(|r| r.as_slice() == old) {
                Some(index) => {
                    rules[index] = new;
                    true
                }
                None => false,
            },
            Self::Set(rules) => {
                if !rules.remove(old) {
                    return false;
                }
                rules.insert(new);
                true
            }
        }
    }

    /// Insert every rule, or none.
    ///
    /// Refused when any rule is already stored. A rule repeated within
    /// `rules` is stored once.
    pub fn insert_all(&mut self, rules: Vec<Rule>) -> bool {
        if rules.iter().any(|rule| self.contains(rule)) {
            return false;
        }
        for rule in rules {
            self.insert(rule);
        }
        true
    }

    /// Remove every rule, or none.
    ///
    /// Refused when any rule is absent. A rule repeated within `rules` is
    /// removed once.
    pub fn remove_all(&mut self, rules: &[Rule]) -> bool {
        if !rules.iter().all(|rule| self.contains(rule)) {
            return false;
        }
        for rule in rules {
            self.remove(rule);
        }
        true
    }

    /// Replace `old[i]` with `new[i]` for every `i`, or change nothing.
    ///
    /// Refused when the batches differ in length, when an old rule is
    /// absent or repeated, or when a new rule is repeated or would collide
    /// with a stored rule that is not being replaced.
    pub fn replace_all(&mut self, old: &[Rule], new: Vec<Rule>) -> bool {
        if old.len() != new.len() {
            return false;
        }
        {
            let mut outgoing: HashSet<&[String]> = HashSet::with_capacity(old.len());
            for rule in old {
                if !outgoing.insert(rule.as_slice()) || !self.contains(rule) {
                    return false;
                }
            }
            let mut incoming: HashSet<&[String]> = HashSet::with_capacity(new.len());
            for rule in &new {
                if !incoming.insert(rule.as_slice()) {
                    return false;
                }
                if self.contains(rule) && !outgoing.contains(&rule.as_slice()) {
                    return false;
                }
            }
        }

        match self {
            Self::Ordered(rules) => {
                let positions: Vec<usize> = old
                    .iter()
                    .filter_map(|o| rules.iter().position(|r| r == o))
                    .collect();
                for (index, rule) in positions.into_iter().zip(new) {
                    rules[index] = rule;
                }
            }
            Self::Set(rules) => {
                for rule in old {
                    rules.remove(rule.as_slice());
                }
                rules.extend(new);
            }
        }
        true
    }

    /// Remove and return every rule matching `predicate`.
    ///
    /// Removed rules come back in iteration order; the rest keep theirs.
    pub fn extract_matching<F>(&mut self, mut predicate: F) -> Vec<Rule>
    where
        F: FnMut(&[String]) -> bool,
    {
        match self {
            Self::Ordered(rules) => {
                let (removed, kept): (Vec<Rule>, Vec<Rule>) = std::mem::take(rules)
                    .into_iter()
                    .partition(|r: &Rule| predicate(r.as_slice()));
                *rules = kept;
                removed
            }
            Self::Set(rules) => {
                let mut removed = Vec::new();
                let mut kept = HashSet::with_capacity(rules.len());
                for rule in rules.drain() {
                    if predicate(rule.as_slice()) {
                        removed.push(rule);
                    } else {
                        kept.insert(rule);
                    }
                }
                *rules = kept;
                removed
            }
        }
    }

    /// Drop every rule, keeping the representation
    pub fn clear(&mut self) {
        match self {
            Self::Ordered(rules) => rules.clear(),
            Self::Set(rules) => rules.clear(),
        }
    }

    /// Switch representation, keeping the stored rules.
    ///
    /// Going from set to ordered yields an arbitrary order.
    pub fn set_mode(&mut self, mode: StorageMode) {
        if self.mode() == mode {
            return;
        }
        *self = match std::mem::take(self) {
            Self::Ordered(rules) => Self::Set(rules.into_iter().collect()),
            Self::Set(rules) => Self::Ordered(rules.into_iter().collect()),
        };
    }

    /// Iterate over stored rules
    pub fn iter(&self) -> Iter<'_> {
        match self {
            Self::Ordered(rules) => Iter::Ordered(rules.iter()),
            Self::Set(rules) => Iter::Set(rules.iter()),
        }
    }

    /// Copy the stored rules out, in iteration order
    #[must_use]
    pub fn to_vec(&self) -> Vec<Rule> {
        self.iter().cloned().collect()
    }
}

/// Iterator over the rules of a [`RuleStore`]
#[derive(Debug, Clone)]
pub enum Iter<'a> {
    /// Over an ordered store
    Ordered(slice::Iter<'a, Rule>),
    /// Over a set store
    Set(hash_set::Iter<'a, Rule>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Rule;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Ordered(it) => it.next(),
            Self::Set(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Ordered(it) => it.size_hint(),
            Self::Set(it) => it.size_hint(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleStore {
    type Item = &'a Rule;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
