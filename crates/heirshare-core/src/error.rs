//! Error handling for the succession engine
//!
//! Errors here are hard failures: malformed input or a broken invariant.
//! An incomplete donor allocation is not an error; it is reported as a
//! [`heirshare_types::RedistributionWarning`] and the pipeline carries on.

use heirshare_calculator::CalculatorError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum SuccessionError {
    /// Exact arithmetic failed (invalid denominator, overflow, division by zero)
    #[error("Fraction error: {source}")]
    Fraction {
        #[from]
        source: CalculatorError,
    },

    /// An id that does not exist in the heir forest was referenced
    #[error("Unknown heir: {message}")]
    UnknownHeir { message: String, heir_id: Option<String>, referenced_by: Option<String> },

    /// Two heirs share one id
    #[error("Duplicate heir: {message}")]
    DuplicateHeir { message: String, heir_id: Option<String> },

    /// A donation rule is malformed on its own (self-donation, negative or undefined portion)
    #[error("Invalid donation rule: {message}")]
    InvalidRule {
        message: String,
        rule_id: Option<String>,
        donor_id: Option<String>,
        recipient_id: Option<String>,
    },

    /// The heir forest violates a structural limit or shape constraint
    #[error("Heir forest error: {message}")]
    Forest { message: String, heir_id: Option<String>, details: Option<String> },

    /// Configuration and initialization errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        setting: Option<String>,
        expected: Option<String>,
        actual: Option<String>,
    },
}

impl SuccessionError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SuccessionError::Fraction { .. } => "fraction",
            SuccessionError::UnknownHeir { .. } => "unknown_heir",
            SuccessionError::DuplicateHeir { .. } => "duplicate_heir",
            SuccessionError::InvalidRule { .. } => "invalid_rule",
            SuccessionError::Forest { .. } => "forest",
            SuccessionError::Configuration { .. } => "configuration",
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SuccessionError::Fraction { .. } => ErrorSeverity::Critical,
            SuccessionError::UnknownHeir { .. } => ErrorSeverity::Medium,
            SuccessionError::DuplicateHeir { .. } => ErrorSeverity::Medium,
            SuccessionError::InvalidRule { .. } => ErrorSeverity::Low,
            SuccessionError::Forest { .. } => ErrorSeverity::Medium,
            SuccessionError::Configuration { .. } => ErrorSeverity::High,
        }
    }

    /// Whether the caller can fix the input and retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            SuccessionError::Fraction { .. } => false, // Internal invariant violated
            SuccessionError::UnknownHeir { .. } => true,
            SuccessionError::DuplicateHeir { .. } => true,
            SuccessionError::InvalidRule { .. } => true,
            SuccessionError::Forest { .. } => true,
            SuccessionError::Configuration { .. } => false,
        }
    }

    /// Heir the error is about, when there is one
    pub fn heir_id(&self) -> Option<&str> {
        match self {
            SuccessionError::UnknownHeir { heir_id, .. }
            | SuccessionError::DuplicateHeir { heir_id, .. }
            | SuccessionError::Forest { heir_id, .. } => heir_id.as_deref(),
            SuccessionError::InvalidRule { donor_id, .. } => donor_id.as_deref(),
            _ => None,
        }
    }
}

/// Error severity levels for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Low => write!(f, "LOW"),
            ErrorSeverity::Medium => write!(f, "MEDIUM"),
            ErrorSeverity::High => write!(f, "HIGH"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Result type alias for succession operations
pub type SuccessionResult<T> = Result<T, SuccessionError>;

/// Convenience constructors for common error scenarios
impl SuccessionError {
    /// An id lookup failed
    pub fn unknown_heir(heir_id: &str, referenced_by: &str) -> Self {
        Self::UnknownHeir {
            message: format!("heir '{heir_id}' referenced by {referenced_by} does not exist"),
            heir_id: Some(heir_id.to_string()),
            referenced_by: Some(referenced_by.to_string()),
        }
    }

    pub fn duplicate_heir(heir_id: &str) -> Self {
        Self::DuplicateHeir {
            message: format!("heir id '{heir_id}' is already in use"),
            heir_id: Some(heir_id.to_string()),
        }
    }

    pub fn invalid_rule(
        rule_id: &str,
        donor_id: &str,
        recipient_id: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRule {
            message: message.into(),
            rule_id: Some(rule_id.to_string()),
            donor_id: Some(donor_id.to_string()),
            recipient_id: Some(recipient_id.to_string()),
        }
    }

    pub fn forest(message: impl Into<String>) -> Self {
        Self::Forest { message: message.into(), heir_id: None, details: None }
    }

    pub fn forest_at(heir_id: &str, message: impl Into<String>) -> Self {
        Self::Forest { message: message.into(), heir_id: Some(heir_id.to_string()), details: None }
    }

    pub fn configuration(
        setting: &str,
        expected: &str,
        actual: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            setting: Some(setting.to_string()),
            expected: Some(expected.to_string()),
            actual: Some(actual.to_string()),
        }
    }
}
