//! Property-based tests for policy CRUD
//!
//! Invariants checked under both storage modes:
//!
//! 1. No assertion ever holds two equal rules
//! 2. Remove-filtered followed by add-policies restores the rule set
//! 3. A rejected update leaves the rules untouched
//! 4. Ordered storage preserves insertion order

mod common;

use common::{both_models, rbac_model, sorted};
use core_model::{Rule, Section};
use proptest::prelude::*;
use std::collections::HashSet;

fn rule_strategy() -> impl Strategy<Value = Rule> {
    prop::collection::vec("[a-c]{1,2}", 3)
}

fn rules_strategy() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::vec(rule_strategy(), 0..24)
}

// ============================================================================
// PROPERTY 1: rules stay unique
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_rules_are_unique(rules in rules_strategy()) {
        for mut model in both_models() {
            for rule in &rules {
                model.add_policy(Section::P, "p", rule.clone());
            }
            // batch retries must not sneak duplicates in either
            model.add_policies(Section::P, "p", rules.clone());

            let stored = model.get_policy(Section::P, "p");
            let distinct: HashSet<&Rule> = stored.iter().collect();
            prop_assert_eq!(distinct.len(), stored.len());

            let expected: HashSet<&Rule> = rules.iter().collect();
            prop_assert_eq!(distinct, expected);
        }
    }
}

// ============================================================================
// PROPERTY 2: filtered removal round-trips
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_remove_filtered_round_trip(
        rules in rules_strategy(),
        field_index in 0usize..3,
        value in "[a-c]{1,2}",
    ) {
        for mut model in both_models() {
            for rule in &rules {
                model.add_policy(Section::P, "p", rule.clone());
            }
            let before = sorted(model.get_policy(Section::P, "p"));

            let (matched, removed) =
                model.remove_filtered_policy(Section::P, "p", field_index, &[value.as_str()]);
            prop_assert_eq!(matched, !removed.is_empty());
            prop_assert!(removed.iter().all(|r| r[field_index] == value));
            prop_assert!(model
                .get_policy(Section::P, "p")
                .iter()
                .all(|r| r[field_index] != value));

            prop_assert!(model.add_policies(Section::P, "p", removed));
            prop_assert_eq!(sorted(model.get_policy(Section::P, "p")), before);
        }
    }
}

// ============================================================================
// PROPERTY 3: failed updates change nothing
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_failed_update_is_noop(
        rules in rules_strategy(),
        old in prop::collection::vec(rule_strategy(), 1..4),
        new in prop::collection::vec(rule_strategy(), 1..4),
    ) {
        for mut model in both_models() {
            for rule in &rules {
                model.add_policy(Section::P, "p", rule.clone());
            }
            let before = sorted(model.get_policy(Section::P, "p"));

            if !model.update_policies(Section::P, "p", &old, new.clone()) {
                prop_assert_eq!(sorted(model.get_policy(Section::P, "p")), before);
            } else {
                for rule in &new {
                    prop_assert!(model.has_policy(Section::P, "p", rule));
                }
            }
        }
    }
}

// ============================================================================
// PROPERTY 4: ordered storage keeps insertion order
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_ordered_storage_keeps_first_insertion(rules in rules_strategy()) {
        let mut model = rbac_model();
        let mut expected: Vec<Rule> = Vec::new();
        for rule in &rules {
            if model.add_policy(Section::P, "p", rule.clone()) {
                expected.push(rule.clone());
            }
        }
        let mut seen = HashSet::new();
        let first_seen: Vec<Rule> = rules.iter().filter(|r| seen.insert(*r)).cloned().collect();

        prop_assert_eq!(model.get_policy(Section::P, "p"), expected.clone());
        prop_assert_eq!(expected, first_seen);
    }
}
