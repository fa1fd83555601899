//! Model sections
//!
//! A model is split into five fixed sections. Each has a one-letter tag used
//! as the assertion key prefix (`p`, `p2`, ...) and a full name used as the
//! configuration section header (`[policy_definition]`).

use crate::error::{ModelError, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// One of the five model sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Request definition (`r`)
    R,
    /// Policy definition (`p`)
    P,
    /// Role definition (`g`)
    G,
    /// Policy effect (`e`)
    E,
    /// Matchers (`m`)
    M,
}

impl Section {
    /// Every section, in declaration order
    pub const ALL: [Section; 5] = [Self::R, Self::P, Self::G, Self::E, Self::M];

    /// Order in which sections are read from configuration.
    ///
    /// Matcher and request come first: policy definitions are checked
    /// against them.
    pub const READING_ORDER: [Section; 5] = [Self::M, Self::R, Self::P, Self::G, Self::E];

    /// Sections that must be present once loading is done
    pub const REQUIRED: [Section; 4] = [Self::R, Self::P, Self::E, Self::M];

    /// One-letter tag, also the base assertion key
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::P => "p",
            Self::G => "g",
            Self::E => "e",
            Self::M => "m",
        }
    }

    /// Full section name as written in configuration
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::R => "request_definition",
            Self::P => "policy_definition",
            Self::G => "role_definition",
            Self::E => "policy_effect",
            Self::M => "matchers",
        }
    }

    /// Whether assertions of this section hold rules
    #[must_use]
    pub const fn is_rule_bearing(self) -> bool {
        matches!(self, Self::P | Self::G)
    }

    /// Whether assertion values of this section are field lists
    #[must_use]
    pub const fn has_tokens(self) -> bool {
        matches!(self, Self::R | Self::P)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = ModelError;

    /// Accepts either the tag (`p`) or the full name (`policy_definition`)
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.key() == s || section.name() == s)
            .ok_or_else(|| ModelError::UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_and_full_name() {
        assert_eq!("g".parse::<Section>().unwrap(), Section::G);
        assert_eq!("matchers".parse::<Section>().unwrap(), Section::M);
        assert!(matches!(
            "x".parse::<Section>(),
            Err(ModelError::UnknownSection(_))
        ));
    }

    #[test]
    fn reading_order_starts_with_matcher_and_request() {
        assert_eq!(&Section::READING_ORDER[..2], &[Section::M, Section::R]);
    }
}
