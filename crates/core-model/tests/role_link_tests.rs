//! Integration tests for role-link delegation

mod common;

use common::{rbac_model, rule, set_model};
use core_model::{ModelError, PolicyOp, RoleManager, Section};

#[derive(Debug, Default)]
struct RecordingRoleManager {
    links: Vec<(String, String, Vec<String>)>,
    cleared: usize,
}

impl RoleManager for RecordingRoleManager {
    fn add_link(&mut self, name1: &str, name2: &str, domains: &[String]) {
        self.links
            .push((name1.to_string(), name2.to_string(), domains.to_vec()));
    }

    fn delete_link(&mut self, name1: &str, name2: &str, domains: &[String]) {
        self.links
            .retain(|(a, b, d)| !(a == name1 && b == name2 && d.as_slice() == domains));
    }

    fn clear(&mut self) {
        self.links.clear();
        self.cleared += 1;
    }
}

#[test]
fn test_build_role_links_feeds_every_role_rule() {
    let mut model = rbac_model();
    model.add_policy(Section::G, "g", rule(&["alice", "admin"]));
    model.add_policy(Section::G, "g", rule(&["bob", "user"]));
    // policy rules are not role links
    model.add_policy(Section::P, "p", rule(&["admin", "data1", "read"]));

    let mut rm = RecordingRoleManager::default();
    model.build_role_links(&mut rm).unwrap();

    assert_eq!(
        rm.links,
        vec![
            ("alice".to_string(), "admin".to_string(), vec![]),
            ("bob".to_string(), "user".to_string(), vec![]),
        ]
    );
    assert_eq!(rm.cleared, 0);
}

#[test]
fn test_domain_fields_are_forwarded() {
    let mut model = rbac_model();
    assert!(model.add_definition(Section::G, "g2", "_, _, _"));
    model.add_policy(Section::G, "g2", rule(&["alice", "admin", "tenant1"]));

    let mut rm = RecordingRoleManager::default();
    model.build_role_links(&mut rm).unwrap();

    assert_eq!(
        rm.links,
        vec![(
            "alice".to_string(),
            "admin".to_string(),
            vec!["tenant1".to_string()]
        )]
    );
}

#[test]
fn test_build_role_links_without_role_section() {
    let model = set_model();
    let mut rm = RecordingRoleManager::default();
    model.build_role_links(&mut rm).unwrap();
    assert!(rm.links.is_empty());
}

#[test]
fn test_rebuild_clears_first() {
    let mut model = rbac_model();
    model.add_policy(Section::G, "g", rule(&["alice", "admin"]));

    let mut rm = RecordingRoleManager::default();
    rm.add_link("stale", "link", &[]);
    model.rebuild_role_links(&mut rm).unwrap();

    assert_eq!(rm.cleared, 1);
    assert_eq!(
        rm.links,
        vec![("alice".to_string(), "admin".to_string(), vec![])]
    );
}

#[test]
fn test_incremental_links_follow_crud() {
    let mut model = rbac_model();
    let mut rm = RecordingRoleManager::default();

    let added = vec![rule(&["alice", "admin"]), rule(&["bob", "admin"])];
    assert!(model.add_policies(Section::G, "g", added.clone()));
    model
        .build_incremental_role_links(&mut rm, PolicyOp::Add, Section::G, "g", &added)
        .unwrap();
    assert_eq!(rm.links.len(), 2);

    let removed = vec![rule(&["alice", "admin"])];
    assert!(model.remove_policies(Section::G, "g", &removed));
    model
        .build_incremental_role_links(&mut rm, PolicyOp::Remove, Section::G, "g", &removed)
        .unwrap();
    assert_eq!(
        rm.links,
        vec![("bob".to_string(), "admin".to_string(), vec![])]
    );
}

#[test]
fn test_incremental_links_ignore_policy_section() {
    let model = rbac_model();
    let mut rm = RecordingRoleManager::default();
    model
        .build_incremental_role_links(
            &mut rm,
            PolicyOp::Add,
            Section::P,
            "p",
            &[rule(&["alice", "data1", "read"])],
        )
        .unwrap();
    assert!(rm.links.is_empty());
}

#[test]
fn test_short_role_rule_is_rejected_before_forwarding() {
    let model = rbac_model();
    let mut rm = RecordingRoleManager::default();
    let err = model
        .build_incremental_role_links(
            &mut rm,
            PolicyOp::Add,
            Section::G,
            "g",
            &[rule(&["alice", "admin"]), rule(&["lonely"])],
        )
        .unwrap_err();

    assert!(matches!(err, ModelError::InvalidRoleRule { .. }));
    assert!(rm.links.is_empty());
}

#[test]
fn test_role_manager_as_trait_object() {
    let mut model = rbac_model();
    model.add_policy(Section::G, "g", rule(&["alice", "admin"]));

    let mut recording = RecordingRoleManager::default();
    let rm: &mut dyn RoleManager = &mut recording;
    model.build_role_links(rm).unwrap();
    assert_eq!(recording.links.len(), 1);
}
