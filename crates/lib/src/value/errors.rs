//! Error types for model access and update.

use thiserror::Error;

/// Structured errors raised while walking or rewriting a model.
///
/// These indicate a caller or wiring bug (a path that does not match the
/// model's shape); they are never produced by user data alone.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A path segment did not exist while existence was asserted.
    #[error("Path not found: no key '{key}' at '{path}' in {container}")]
    PathNotFound {
        key: String,
        path: String,
        container: String,
    },

    /// A deep update was attempted with the root path.
    #[error("Empty path: cannot replace the root through a deep update")]
    EmptyPath,

    /// A container could not be addressed by the given segment.
    #[error("Type mismatch at '{path}': expected {expected}, found {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// A list write skipped past the end of the list.
    #[error("Index out of range at '{path}': index {index} but length is {len}")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
}

impl ModelError {
    /// Check if this error indicates a path did not resolve
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::PathNotFound { .. })
    }

    /// Check if this error was caused by an empty path
    pub fn is_empty_path(&self) -> bool {
        matches!(self, ModelError::EmptyPath)
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, ModelError::TypeMismatch { .. })
    }

    /// Check if this error was caused by a list index past the end
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, ModelError::IndexOutOfRange { .. })
    }

    /// Get the missing key if this is a not-found error
    pub fn key(&self) -> Option<&str> {
        match self {
            ModelError::PathNotFound { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Get the path at which the error was detected
    pub fn path(&self) -> Option<&str> {
        match self {
            ModelError::PathNotFound { path, .. }
            | ModelError::TypeMismatch { path, .. }
            | ModelError::IndexOutOfRange { path, .. } => Some(path),
            ModelError::EmptyPath => None,
        }
    }
}

// Conversion from ModelError to the main Error type
impl From<ModelError> for crate::Error {
    fn from(err: ModelError) -> Self {
        crate::Error::Model(err)
    }
}
