// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # p47h-model
//!
//! Policy model and rule storage for RBAC/ABAC enforcers.
//!
//! This crate provides a unified API over the model crates:
//!
//! - **Model**: section definitions, adaptive rule storage and policy CRUD
//! - **Config**: INI, TOML and YAML model files
//!
//! ## Quick Start
//!
//! ```rust
//! use p47h_model::config::load_model_from_str;
//! use p47h_model::{Section, StorageMode};
//!
//! let model = load_model_from_str(
//!     "[request_definition]\n\
//!      r = sub, obj, act\n\
//!      [policy_definition]\n\
//!      p = sub, obj, act\n\
//!      [policy_effect]\n\
//!      e = some(where (p.eft == allow))\n\
//!      [matchers]\n\
//!      m = r.sub == p.sub && r.obj == p.obj && r.act == p.act\n",
//! )
//! .unwrap();
//!
//! assert_eq!(model.storage_mode(Section::P, "p"), Some(StorageMode::Set));
//! ```
//!
//! ## Architecture
//!
//! This facade crate re-exports the following modules:
//!
//! - [`model`] - Model, rule storage and CRUD (from `core-model`)
//! - [`config`] - Configuration parsers and loaders (from `app-utils`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/p47h-model/1.0.1")]

/// Model module.
///
/// Re-exports `core_model` for model loading, rule storage and policy CRUD.
pub mod model {
    pub use core_model::*;
}

/// Configuration module.
///
/// Re-exports `app_utils` for reading model files.
pub mod config {
    pub use app_utils::*;
}

// Convenience re-exports at root level
pub use app_utils::{load_model_from_file, load_model_from_str, ConfigError};
pub use core_model::{Model, ModelBuilder, ModelError, Rule, Section, StorageMode};
