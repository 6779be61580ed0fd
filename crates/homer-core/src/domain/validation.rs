//! Validation failure type shared by every operation input.

use serde::Serialize;
use thiserror::Error;

/// An input failed a required-field, enumeration, or type check.
///
/// Raised before any document mutation is attempted, so a rejected operation
/// never leaves a partial edit behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending input field.
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Rejects empty or whitespace-only values for a required text field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}
