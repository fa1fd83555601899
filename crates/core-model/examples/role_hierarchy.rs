//! # Role Hierarchy Example
//!
//! Demonstrates how to plug a role graph into the model by implementing the
//! `RoleManager` trait, then keeping it in sync with role CRUD.
//!
//! ## Run
//!
//! ```bash
//! cargo run -p core-model --example role_hierarchy
//! ```

use core_model::{ModelBuilder, PolicyOp, RoleManager, Rule, Section};
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// ROLE MANAGER: domain-scoped inheritance graph
// ============================================================================

/// Role graph keyed by domain (`""` when the rule has none)
#[derive(Debug, Default)]
struct DomainRoleGraph {
    edges: BTreeMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl DomainRoleGraph {
    fn domain_key(domains: &[String]) -> String {
        domains.join("::")
    }

    /// Whether `name` reaches `role` through any chain of links
    fn has_role(&self, name: &str, role: &str, domain: &str) -> bool {
        let Some(graph) = self.edges.get(domain) else {
            return false;
        };
        let mut stack = vec![name.to_string()];
        let mut seen = BTreeSet::new();
        while let Some(current) = stack.pop() {
            if current == role {
                return true;
            }
            if !seen.insert(current.clone()) {
                continue;
            }
            if let Some(parents) = graph.get(&current) {
                stack.extend(parents.iter().cloned());
            }
        }
        false
    }
}

impl RoleManager for DomainRoleGraph {
    fn add_link(&mut self, name1: &str, name2: &str, domains: &[String]) {
        self.edges
            .entry(Self::domain_key(domains))
            .or_default()
            .entry(name1.to_string())
            .or_default()
            .insert(name2.to_string());
    }

    fn delete_link(&mut self, name1: &str, name2: &str, domains: &[String]) {
        if let Some(parents) = self
            .edges
            .get_mut(&Self::domain_key(domains))
            .and_then(|graph| graph.get_mut(name1))
        {
            parents.remove(name2);
        }
    }

    fn clear(&mut self) {
        self.edges.clear();
    }
}

fn rule(fields: &[&str]) -> Rule {
    fields.iter().map(|f| f.to_string()).collect()
}

fn main() -> core_model::Result<()> {
    let mut model = ModelBuilder::new()
        .request_definition("sub, dom, obj, act")
        .policy_definition("sub, dom, obj, act")
        .role_definition("_, _, _")
        .policy_effect("some(where (p.eft == allow))")
        .matchers("g(r.sub, p.sub, r.dom) && r.dom == p.dom && r.obj == p.obj && r.act == p.act")
        .build()?;

    model.add_policies(
        Section::G,
        "g",
        vec![
            rule(&["alice", "editor", "tenant1"]),
            rule(&["editor", "viewer", "tenant1"]),
            rule(&["bob", "viewer", "tenant2"]),
        ],
    );

    let mut roles = DomainRoleGraph::default();
    model.rebuild_role_links(&mut roles)?;

    println!("=== Initial links ===");
    println!(
        "alice is viewer in tenant1: {}",
        roles.has_role("alice", "viewer", "tenant1")
    );
    println!(
        "alice is viewer in tenant2: {}",
        roles.has_role("alice", "viewer", "tenant2")
    );

    // Keep the graph in sync with incremental role CRUD
    let removed = vec![rule(&["editor", "viewer", "tenant1"])];
    if model.remove_policies(Section::G, "g", &removed) {
        model.build_incremental_role_links(&mut roles, PolicyOp::Remove, Section::G, "g", &removed)?;
    }

    println!("\n=== After removing editor -> viewer ===");
    println!(
        "alice is viewer in tenant1: {}",
        roles.has_role("alice", "viewer", "tenant1")
    );
    println!(
        "alice is editor in tenant1: {}",
        roles.has_role("alice", "editor", "tenant1")
    );

    Ok(())
}
