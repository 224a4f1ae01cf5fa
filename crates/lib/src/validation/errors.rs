//! Error types for building validation definitions.
//!
//! Validation *results* are not errors: a failing field is reported in
//! [`FieldErrors`](super::FieldErrors). These errors cover definitions that
//! cannot be built at all, such as a malformed rule set.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// A declarative rule could not be compiled.
    #[error("Invalid rule at '{path}': {reason}")]
    InvalidRule { path: String, reason: String },
}

impl ValidationError {
    pub fn is_invalid_rule(&self) -> bool {
        matches!(self, ValidationError::InvalidRule { .. })
    }

    /// Canonical path of the offending rule node.
    pub fn path(&self) -> &str {
        match self {
            ValidationError::InvalidRule { path, .. } => path,
        }
    }
}

impl From<ValidationError> for crate::Error {
    fn from(err: ValidationError) -> Self {
        crate::Error::Validation(err)
    }
}
