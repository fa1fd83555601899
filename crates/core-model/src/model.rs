//! Model definition store
//!
//! A [`Model`] owns every assertion, grouped by [`Section`] and keyed by
//! their section-relative key. It is built by [`Model::load`] from a
//! [`ConfigSource`], or incrementally through [`Model::add_definition`].
//!
//! Rule-bearing assertions (p and g) share one [`StorageMode`]. It is
//! recomputed after every definition change, because adding a role section
//! or changing the matcher can make set storage unsafe for rules that are
//! already stored.

use crate::assertion::Assertion;
use crate::config::{config_path, ConfigSource};
use crate::eligibility::{self, Ineligibility};
use crate::error::{ModelError, Result};
use crate::section::Section;
use crate::storage::StorageMode;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Assertions of one section, by key
pub type AssertionMap = BTreeMap<String, Assertion>;

/// Parsed model: request/policy shapes, roles, effect and matchers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    sections: BTreeMap<Section, AssertionMap>,
}

impl Model {
    /// Create an empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every section from `cfg`.
    ///
    /// Sections are read in [`Section::READING_ORDER`]. Within a section,
    /// keys `x`, `x2`, `x3`, ... are read until the first missing or empty
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::MissingRequiredSections`] naming every one of
    /// r, p, e, m that is still absent afterwards. Whatever was read stays
    /// in the model.
    pub fn load<C>(&mut self, cfg: &C) -> Result<()>
    where
        C: ConfigSource + ?Sized,
    {
        for section in Section::READING_ORDER {
            self.load_section(cfg, section);
        }

        let missing: Vec<String> = Section::REQUIRED
            .into_iter()
            .filter(|section| !self.has_section(*section))
            .map(|section| section.name().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ModelError::MissingRequiredSections { sections: missing })
        }
    }

    fn load_section<C>(&mut self, cfg: &C, section: Section)
    where
        C: ConfigSource + ?Sized,
    {
        let mut i = 1;
        loop {
            let key = format!("{}{}", section.key(), Self::key_suffix(i));
            let value = cfg.get_string(&config_path(section.name(), &key));
            if !self.add_definition(section, &key, value) {
                break;
            }
            i += 1;
        }
    }

    /// Suffix of the `i`-th assertion key of a section (1-based)
    #[must_use]
    pub fn key_suffix(i: usize) -> String {
        if i == 1 {
            String::new()
        } else {
            i.to_string()
        }
    }

    /// Add or replace the assertion `key` in `section`.
    ///
    /// Returns `false` without touching the model when `value` is empty, or
    /// when a policy definition arrives before the matcher and request
    /// sections it depends on.
    pub fn add_definition(&mut self, section: Section, key: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            return false;
        }

        if section == Section::P && !(self.has_section(Section::M) && self.has_section(Section::R))
        {
            warn!(
                key,
                "policy definition rejected: matcher and request definitions must come first"
            );
            return false;
        }

        let assertion = Assertion::new(section, key, value, StorageMode::Ordered);
        debug!(section = %section, key, value = %assertion.value, "assertion added");
        self.sections
            .entry(section)
            .or_default()
            .insert(key.to_string(), assertion);

        self.refresh_storage_modes();
        true
    }

    /// Whether set storage is currently safe for this model
    ///
    /// # Errors
    ///
    /// Returns the first [`Ineligibility`] found.
    pub fn storage_eligibility(&self) -> core::result::Result<(), Ineligibility> {
        eligibility::check(
            self.assertion(Section::R, "r").map(|a| a.tokens.as_slice()),
            self.assertion(Section::M, "m").map(|a| a.value.as_str()),
            self.has_section(Section::G),
        )
    }

    /// Storage mode every rule-bearing assertion should use right now
    #[must_use]
    pub fn preferred_storage_mode(&self) -> StorageMode {
        eligibility::select_mode(
            self.assertion(Section::R, "r").map(|a| a.tokens.as_slice()),
            self.assertion(Section::M, "m").map(|a| a.value.as_str()),
            self.has_section(Section::G),
        )
    }

    fn refresh_storage_modes(&mut self) {
        let mode = self.preferred_storage_mode();
        for section in [Section::P, Section::G] {
            let Some(assertions) = self.sections.get_mut(&section) else {
                continue;
            };
            for assertion in assertions.values_mut() {
                if let Some(rules) = assertion.rules.as_mut() {
                    if rules.mode() != mode {
                        debug!(section = %section, key = %assertion.key, ?mode, "switching rule storage");
                        rules.set_mode(mode);
                    }
                }
            }
        }
    }

    // ===== Inspection =====

    /// Whether at least one assertion of `section` is defined
    #[must_use]
    pub fn has_section(&self, section: Section) -> bool {
        self.sections
            .get(&section)
            .is_some_and(|assertions| !assertions.is_empty())
    }

    /// Assertions of `section`
    #[must_use]
    pub fn assertions(&self, section: Section) -> Option<&AssertionMap> {
        self.sections.get(&section)
    }

    /// Assertion `key` of `section`
    #[must_use]
    pub fn assertion(&self, section: Section, key: &str) -> Option<&Assertion> {
        self.sections.get(&section)?.get(key)
    }

    pub(crate) fn assertion_mut(&mut self, section: Section, key: &str) -> Option<&mut Assertion> {
        self.sections.get_mut(&section)?.get_mut(key)
    }

    pub(crate) fn assertions_mut(
        &mut self,
        section: Section,
    ) -> impl Iterator<Item = &mut Assertion> + '_ {
        self.sections
            .get_mut(&section)
            .into_iter()
            .flat_map(|assertions| assertions.values_mut())
    }

    /// Every defined section with its assertions
    pub fn sections(&self) -> impl Iterator<Item = (Section, &AssertionMap)> + '_ {
        self.sections
            .iter()
            .map(|(section, assertions)| (*section, assertions))
    }

    /// Storage mode of a rule-bearing assertion
    #[must_use]
    pub fn storage_mode(&self, section: Section, key: &str) -> Option<StorageMode> {
        self.assertion(section, key)?.storage_mode()
    }

    /// Position of the bare field name `field` in assertion `key`
    #[must_use]
    pub fn field_index(&self, section: Section, key: &str, field: &str) -> Option<usize> {
        self.assertion(section, key)?.field_index(field)
    }

    /// Log every assertion's text
    pub fn log_model(&self) {
        info!("model:");
        for (section, assertions) in &self.sections {
            for (key, assertion) in assertions {
                info!("{}.{}: {}", section, key, assertion.value);
            }
        }
    }

    /// Log the rules of every policy and role assertion
    pub fn log_policy(&self) {
        info!("policy:");
        for section in [Section::P, Section::G] {
            let Some(assertions) = self.sections.get(&section) else {
                continue;
            };
            for (key, assertion) in assertions {
                if let Some(rules) = &assertion.rules {
                    info!("{}: {}: {:?}", key, assertion.value, rules.to_vec());
                }
            }
        }
    }
}
