//! Error types for core-model

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Structural errors raised while building or wiring a model.
///
/// Rule-level contract violations (duplicates, absent rules) are not errors:
/// the CRUD methods report them through their `bool` return values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// One or more of r, p, e, m was not defined after loading
    #[error("missing required sections: {}", .sections.join(","))]
    MissingRequiredSections {
        /// Human-readable names of the missing sections
        sections: Vec<String>,
    },

    /// A section tag outside r, p, g, e, m
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// A role rule that cannot be turned into a link
    #[error("role rule {rule:?} of {key} needs at least two fields")]
    InvalidRoleRule {
        /// Assertion key the rule belongs to
        key: String,
        /// The offending rule
        rule: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_are_comma_joined() {
        let err = ModelError::MissingRequiredSections {
            sections: vec!["request_definition".into(), "policy_effect".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing required sections: request_definition,policy_effect"
        );
    }

    #[test]
    fn error_display_variants() {
        let errors = vec![
            ModelError::UnknownSection("x".to_string()),
            ModelError::InvalidRoleRule {
                key: "g".to_string(),
                rule: vec!["alice".to_string()],
            },
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
