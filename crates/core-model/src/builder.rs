//! Builder pattern for ergonomic model construction

use crate::config::config_path;
use crate::error::Result;
use crate::model::Model;
use crate::section::Section;
use std::collections::BTreeMap;

/// Builder for [`Model`] instances with a fluent API
///
/// Each call appends the next assertion of its section (`p`, then `p2`,
/// ...). [`ModelBuilder::build`] runs the regular load protocol over the
/// collected values, so the required-section check applies.
///
/// # Examples
///
/// ```
/// use core_model::{ModelBuilder, Section, StorageMode};
///
/// let model = ModelBuilder::new()
///     .request_definition("sub, obj, act")
///     .policy_definition("sub, obj, act")
///     .policy_effect("some(where (p.eft == allow))")
///     .matchers("r.sub == p.sub && r.obj == p.obj && r.act == p.act")
///     .build()
///     .unwrap();
///
/// assert_eq!(model.storage_mode(Section::P, "p"), Some(StorageMode::Set));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ModelBuilder {
    values: BTreeMap<String, String>,
    counts: BTreeMap<Section, usize>,
}

impl ModelBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, section: Section, value: impl Into<String>) -> Self {
        let count = self.counts.entry(section).or_insert(0);
        *count += 1;
        let key = format!("{}{}", section.key(), Model::key_suffix(*count));
        self.values
            .insert(config_path(section.name(), &key), value.into());
        self
    }

    /// Append a request definition (`r`, `r2`, ...)
    #[must_use]
    pub fn request_definition(self, value: impl Into<String>) -> Self {
        self.push(Section::R, value)
    }

    /// Append a policy definition (`p`, `p2`, ...)
    #[must_use]
    pub fn policy_definition(self, value: impl Into<String>) -> Self {
        self.push(Section::P, value)
    }

    /// Append a role definition (`g`, `g2`, ...)
    #[must_use]
    pub fn role_definition(self, value: impl Into<String>) -> Self {
        self.push(Section::G, value)
    }

    /// Append a policy effect (`e`, `e2`, ...)
    #[must_use]
    pub fn policy_effect(self, value: impl Into<String>) -> Self {
        self.push(Section::E, value)
    }

    /// Append a matcher (`m`, `m2`, ...)
    #[must_use]
    pub fn matchers(self, value: impl Into<String>) -> Self {
        self.push(Section::M, value)
    }

    /// Set the value of an explicit key.
    ///
    /// Keys are still read with suffix scanning, so a key after a gap
    /// (`p3` without `p2`) is never loaded.
    #[must_use]
    pub fn with(mut self, section: Section, key: &str, value: impl Into<String>) -> Self {
        self.values
            .insert(config_path(section.name(), key), value.into());
        self
    }

    /// Build the model
    ///
    /// # Errors
    ///
    /// Returns [`crate::ModelError::MissingRequiredSections`] if any of
    /// r, p, e, m was not supplied.
    pub fn build(self) -> Result<Model> {
        let mut model = Model::new();
        model.load(&self.values)?;
        Ok(model)
    }
}
