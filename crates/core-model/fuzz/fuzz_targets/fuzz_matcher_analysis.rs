//! Fuzz target for the set-storage eligibility analysis
//!
//! Arbitrary matcher text must never panic the analyzer, and a matcher
//! judged eligible must keep the model in set storage.

#![no_main]

use core_model::{Model, Section, StorageMode};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let mut model = Model::new();
    model.add_definition(Section::R, "r", "sub, obj, act");
    if !model.add_definition(Section::M, "m", data) {
        return;
    }
    model.add_definition(Section::P, "p", "sub, obj, act");

    let eligible = model.storage_eligibility().is_ok();
    let mode = model.storage_mode(Section::P, "p");
    assert_eq!(
        mode,
        Some(if eligible { StorageMode::Set } else { StorageMode::Ordered })
    );
});
