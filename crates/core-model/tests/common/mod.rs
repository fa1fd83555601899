//! Shared fixtures for integration tests

#![allow(dead_code)]

use core_model::{Model, ModelBuilder, Rule};

pub const EXACT_MATCHER: &str = "r.sub == p.sub && r.obj == p.obj && r.act == p.act";

/// Model whose rules are stored in a set
pub fn set_model() -> Model {
    ModelBuilder::new()
        .request_definition("sub, obj, act")
        .policy_definition("sub, obj, act")
        .policy_effect("some(where (p.eft == allow))")
        .matchers(EXACT_MATCHER)
        .build()
        .unwrap()
}

/// Model with a role section; rules are stored in order
pub fn rbac_model() -> Model {
    ModelBuilder::new()
        .request_definition("sub, obj, act")
        .policy_definition("sub, obj, act")
        .role_definition("_, _")
        .policy_effect("some(where (p.eft == allow))")
        .matchers("g(r.sub, p.sub) && r.obj == p.obj && r.act == p.act")
        .build()
        .unwrap()
}

/// Both fixtures, for tests that must hold under either representation
pub fn both_models() -> Vec<Model> {
    vec![set_model(), rbac_model()]
}

pub fn rule(fields: &[&str]) -> Rule {
    fields.iter().map(|f| f.to_string()).collect()
}

pub fn sorted(mut rules: Vec<Rule>) -> Vec<Rule> {
    rules.sort();
    rules
}
