// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 P47H Team <https://p47h.com>

//! # app-utils
//!
//! Configuration sources for `core-model`.
//!
//! This crate provides non-core features:
//! - INI parsing for `.conf` model files
//! - TOML and YAML model files
//! - Loading a [`Model`] from text or from a file
//!
//! Every format is parsed into a [`ConfigDocument`], which the model reads
//! through its `ConfigSource` trait.

#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod ini;

use core_model::Model;
use std::path::Path;
use tracing::debug;

/// Trait for configuration parsers (extensible to other formats)
pub trait ConfigParser {
    /// Parse a configuration document from a string
    fn parse(&self, input: &str) -> Result<ConfigDocument>;
}

pub mod structured {
    //! TOML and YAML model files
    //!
    //! Both formats hold a two-level mapping, section name to key to string
    //! value:
    //!
    //! ```toml
    //! [request_definition]
    //! r = "sub, obj, act"
    //! ```
    use crate::document::{ConfigDocument, SectionMap};
    use crate::error::Result;
    use crate::ConfigParser;
    use std::collections::BTreeMap;

    /// TOML parser implementation
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TomlParser;

    impl ConfigParser for TomlParser {
        fn parse(&self, input: &str) -> Result<ConfigDocument> {
            let sections: BTreeMap<String, SectionMap> = toml::from_str(input)?;
            Ok(ConfigDocument::from(sections))
        }
    }

    /// YAML parser implementation
    #[derive(Debug, Default, Clone, Copy)]
    pub struct YamlParser;

    impl ConfigParser for YamlParser {
        fn parse(&self, input: &str) -> Result<ConfigDocument> {
            // an empty document deserializes to unit, not a map
            if input.trim().is_empty() {
                return Ok(ConfigDocument::new());
            }
            let sections: BTreeMap<String, SectionMap> = serde_yaml::from_str(input)?;
            Ok(ConfigDocument::from(sections))
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.conf` / `.ini`
    Ini,
    /// `.toml`
    Toml,
    /// `.yaml` / `.yml`
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "conf" | "ini" => Ok(Self::Ini),
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parser for this format
    #[must_use]
    pub fn parser(self) -> &'static dyn ConfigParser {
        match self {
            Self::Ini => &IniParser,
            Self::Toml => &TomlParser,
            Self::Yaml => &YamlParser,
        }
    }
}

/// Build a model from text parsed by `parser`
///
/// # Errors
///
/// Returns the parser's error, or [`ConfigError::Model`] when a required
/// section is missing.
pub fn load_model_with(parser: &dyn ConfigParser, text: &str) -> Result<Model> {
    let doc = parser.parse(text)?;
    let mut model = Model::new();
    model.load(&doc)?;
    Ok(model)
}

/// Build a model from `.conf` text
///
/// # Errors
///
/// See [`load_model_with`].
pub fn load_model_from_str(text: &str) -> Result<Model> {
    load_model_with(&IniParser, text)
}

/// Build a model from a file, choosing the parser by extension
///
/// # Errors
///
/// Returns [`ConfigError::UnsupportedFormat`] for an unknown extension,
/// [`ConfigError::Io`] when the file cannot be read, and otherwise the
/// errors of [`load_model_with`].
pub fn load_model_from_file(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "loading model");
    load_model_with(format.parser(), &text)
}

/// Re-export commonly used types
pub use document::{ConfigDocument, SectionMap, DEFAULT_SECTION};
pub use error::{ConfigError, Result};
pub use ini::IniParser;
pub use structured::{TomlParser, YamlParser};
