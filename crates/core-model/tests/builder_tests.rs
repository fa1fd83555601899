//! Integration tests for ModelBuilder

use core_model::{ModelBuilder, ModelError, Section, StorageMode};

#[test]
fn test_model_builder() {
    let model = ModelBuilder::new()
        .request_definition("sub, obj, act")
        .policy_definition("sub, obj, act")
        .policy_definition("sub, act")
        .role_definition("_, _")
        .policy_effect("some(where (p.eft == allow))")
        .matchers("g(r.sub, p.sub) && r.obj == p.obj && r.act == p.act")
        .build()
        .unwrap();

    assert_eq!(model.assertions(Section::P).map(|a| a.len()), Some(2));
    assert!(model.assertion(Section::P, "p2").is_some());
    assert_eq!(model.storage_mode(Section::P, "p2"), Some(StorageMode::Ordered));
}

#[test]
fn test_model_builder_missing_sections() {
    let result = ModelBuilder::new()
        .request_definition("sub, obj, act")
        .matchers("r.sub == p.sub")
        .build();

    assert!(matches!(
        result,
        Err(ModelError::MissingRequiredSections { ref sections })
            if sections == &vec!["policy_definition".to_string(), "policy_effect".to_string()]
    ));
}

#[test]
fn test_model_builder_explicit_keys() {
    let model = ModelBuilder::new()
        .with(Section::R, "r", "sub, obj")
        .with(Section::P, "p", "sub, obj")
        .with(Section::P, "p3", "sub")
        .with(Section::E, "e", "some(where (p.eft == allow))")
        .with(Section::M, "m", "r.sub == p.sub && r.obj == p.obj")
        .build()
        .unwrap();

    // p3 follows a gap and is never read
    assert!(model.assertion(Section::P, "p3").is_none());
    assert_eq!(model.storage_mode(Section::P, "p"), Some(StorageMode::Set));
}
