// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # core-model
//!
//! In-memory model layer of an RBAC/ABAC policy engine.
//!
//! This crate provides:
//! - Model loading from any [`ConfigSource`] (request, policy, role, effect, matcher sections)
//! - Rule storage that switches between an ordered `Vec` and a `HashSet`
//! - Static analysis deciding when set storage is safe for a matcher
//! - Policy CRUD with all-or-nothing batch semantics
//! - Role-link delegation to an external [`RoleManager`]
//!
//! Matcher evaluation and role-graph semantics are left to the enforcer.
//!
//! ## Example
//!
//! ```
//! use core_model::{ModelBuilder, Section};
//!
//! let mut model = ModelBuilder::new()
//!     .request_definition("sub, obj, act")
//!     .policy_definition("sub, obj, act")
//!     .policy_effect("some(where (p.eft == allow))")
//!     .matchers("r.sub == p.sub && r.obj == p.obj && r.act == p.act")
//!     .build()
//!     .unwrap();
//!
//! let rule = vec!["alice".to_string(), "data1".to_string(), "read".to_string()];
//! assert!(model.add_policy(Section::P, "p", rule.clone()));
//! assert!(!model.add_policy(Section::P, "p", rule));
//! ```
//!
//! ## Concurrency
//!
//! A [`Model`] has no internal locking. Mutating calls take `&mut self`;
//! share it behind a lock if several threads need to write.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assertion;
pub mod builder;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod model;
pub mod policy;
pub mod role;
pub mod section;
pub mod storage;

pub use assertion::{remove_comments, Assertion};
pub use builder::ModelBuilder;
pub use config::ConfigSource;
pub use eligibility::Ineligibility;
/// Re-export commonly used types
pub use error::{ModelError, Result};
pub use model::{AssertionMap, Model};
pub use policy::matches_filter;
pub use role::{PolicyOp, RoleManager};
pub use section::Section;
pub use storage::{Rule, RuleStore, StorageMode};
