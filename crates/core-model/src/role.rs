//! Role-link delegation
//!
//! The model does not maintain a role hierarchy itself. Role rules (`g`,
//! `g2`, ...) are handed to a caller-supplied [`RoleManager`], which builds
//! whatever graph it needs. The caller decides when to sync: after a bulk
//! load with [`Model::build_role_links`], after individual role CRUD calls
//! with [`Model::build_incremental_role_links`].
//!
//! A role rule `[name1, name2, domain...]` becomes the link
//! `name1 -> name2` within the optional domains.

use crate::error::{ModelError, Result};
use crate::model::Model;
use crate::section::Section;
use crate::storage::Rule;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Receiver of role links
pub trait RoleManager {
    /// Record that `name1` inherits `name2`
    fn add_link(&mut self, name1: &str, name2: &str, domains: &[String]);

    /// Forget the link `name1 -> name2`
    fn delete_link(&mut self, name1: &str, name2: &str, domains: &[String]);

    /// Forget every link
    fn clear(&mut self);
}

/// Direction of an incremental role update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyOp {
    /// Rules were added
    Add,
    /// Rules were removed
    Remove,
}

fn validate_role_rules<'a>(key: &str, rules: impl IntoIterator<Item = &'a Rule>) -> Result<()> {
    match rules.into_iter().find(|rule| rule.len() < 2) {
        Some(rule) => Err(ModelError::InvalidRoleRule {
            key: key.to_string(),
            rule: rule.clone(),
        }),
        None => Ok(()),
    }
}

fn apply<R: RoleManager + ?Sized>(role_manager: &mut R, op: PolicyOp, rule: &[String]) {
    let (name1, name2, domains) = (&rule[0], &rule[1], &rule[2..]);
    match op {
        PolicyOp::Add => role_manager.add_link(name1, name2, domains),
        PolicyOp::Remove => role_manager.delete_link(name1, name2, domains),
    }
}

impl Model {
    /// Feed every role rule of every `g` assertion to `role_manager`.
    ///
    /// Existing links in the role manager are kept; see
    /// [`Model::rebuild_role_links`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRoleRule`] before feeding anything when
    /// a stored role rule has fewer than two fields.
    pub fn build_role_links<R: RoleManager + ?Sized>(&self, role_manager: &mut R) -> Result<()> {
        let Some(assertions) = self.assertions(Section::G) else {
            return Ok(());
        };
        for (key, assertion) in assertions {
            if let Some(rules) = &assertion.rules {
                validate_role_rules(key, rules)?;
            }
        }
        for (key, assertion) in assertions {
            let Some(rules) = &assertion.rules else {
                continue;
            };
            debug!(key = %key, count = rules.len(), "building role links");
            for rule in rules {
                apply(role_manager, PolicyOp::Add, rule);
            }
        }
        Ok(())
    }

    /// Clear `role_manager`, then [`build_role_links`](Model::build_role_links)
    ///
    /// # Errors
    ///
    /// Same as [`Model::build_role_links`]. The role manager is only cleared
    /// once the rules have been validated.
    pub fn rebuild_role_links<R: RoleManager + ?Sized>(&self, role_manager: &mut R) -> Result<()> {
        for (key, assertion) in self.assertions(Section::G).into_iter().flatten() {
            if let Some(rules) = &assertion.rules {
                validate_role_rules(key, rules)?;
            }
        }
        role_manager.clear();
        self.build_role_links(role_manager)
    }

    /// Forward an incremental add or remove of role rules.
    ///
    /// Only role sections are forwarded; any other `section` is a no-op, as
    /// is a key that names no role assertion.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidRoleRule`] before forwarding anything
    /// when one of `rules` has fewer than two fields.
    pub fn build_incremental_role_links<R: RoleManager + ?Sized>(
        &self,
        role_manager: &mut R,
        op: PolicyOp,
        section: Section,
        key: &str,
        rules: &[Rule],
    ) -> Result<()> {
        if section != Section::G {
            return Ok(());
        }
        if self.assertion(section, key).is_none() {
            warn!(key, "no role assertion to link");
            return Ok(());
        }
        validate_role_rules(key, rules)?;
        for rule in rules {
            apply(role_manager, op, rule);
        }
        Ok(())
    }
}
