//! Error types for extraction and replacement

use thiserror::Error;

/// Result type for region replacement
pub type ReplaceResult<T> = std::result::Result<T, ReplaceError>;

/// Result type for pattern construction
pub type PatternResult<T> = std::result::Result<T, PatternError>;

/// Errors raised while replacing the templated region of a body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The locator found no region to replace; the body was left untouched
    #[error("Template string not found in your PR description '{template}'")]
    TemplateNotFound {
        /// Human readable description of what was searched for
        template: String,
    },
}

impl ReplaceError {
    /// Create a not found error for the given template description
    pub fn template_not_found(template: impl Into<String>) -> Self {
        ReplaceError::TemplateNotFound {
            template: template.into(),
        }
    }

    /// Check if this is a not found error
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, ReplaceError::TemplateNotFound { .. })
    }
}

/// Errors raised while building patterns from configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern string is not a valid regular expression
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// Extraction patterns must carry a capture group for the code
    #[error("Pattern '{0}' has no capture group")]
    MissingCaptureGroup(String),

    /// A modifier flag that has no equivalent
    #[error("Unsupported pattern flag '{0}'")]
    UnsupportedFlag(char),

    /// Unknown short code source name
    #[error("Unknown short code source '{0}', expected one of: title, commits, both")]
    UnknownSource(String),

    /// Unknown template strategy name
    #[error("Unknown template strategy '{0}', expected one of: pattern, markers")]
    UnknownStrategy(String),

    /// Delimiter markers must not be empty
    #[error("Template marker cannot be empty")]
    EmptyMarker,

    /// Start and end markers must differ
    #[error("Start and end markers are both '{0}'")]
    IdenticalMarkers(String),
}

impl PatternError {
    pub(crate) fn invalid_regex(pattern: &str, err: regex::Error) -> Self {
        PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
