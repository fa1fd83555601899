//! Fuzz target for policy CRUD
//!
//! Drives a short op sequence decoded from raw bytes and checks that rules
//! never repeat.

#![no_main]

use core_model::{ModelBuilder, Rule, Section};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

fn decode_rule(bytes: &[u8]) -> Rule {
    bytes.iter().map(|b| format!("v{}", b % 4)).collect()
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut model) = ModelBuilder::new()
        .request_definition("sub, obj")
        .policy_definition("sub, obj")
        .policy_effect("some(where (p.eft == allow))")
        .matchers("r.sub == p.sub && r.obj == p.obj")
        .build()
    else {
        return;
    };

    for chunk in data.chunks(5) {
        let [op, a @ ..] = chunk else { continue };
        let rule = decode_rule(&a[..a.len().min(2)]);
        let other = decode_rule(a.get(2..4).unwrap_or(&[]));
        match op % 4 {
            0 => {
                model.add_policy(Section::P, "p", rule);
            }
            1 => {
                model.remove_policy(Section::P, "p", &rule);
            }
            2 => {
                model.update_policy(Section::P, "p", &rule, other);
            }
            _ => {
                model.remove_filtered_policy(Section::P, "p", 0, &rule);
            }
        }
    }

    let rules = model.get_policy(Section::P, "p");
    let distinct: HashSet<&Rule> = rules.iter().collect();
    assert_eq!(distinct.len(), rules.len());
});
