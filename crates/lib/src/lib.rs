//!
//! formstate: a form-state and validation engine that knows nothing about rendering.
//! This library tracks a nested data model, per-field dirty/touched status and
//! validation errors, and exposes a small read/write API that UI layers consume.
//!
//! ## Core Concepts
//!
//! * **Paths (`path::Path`)**: Structural, value-typed addresses of a location inside a nested model.
//! * **Values (`value::Value`)**: The JSON-like model. Containers are reference counted, so every
//!   write produces a new root that shares all untouched substructure with the old one.
//! * **Field register (`register::FieldRegister`)**: The debounced multiset of paths currently
//!   mounted by the UI, flushed to listeners in batches.
//! * **Status (`status::StatusMap`)**: Per-path dirty/touched flags reconciled against the register.
//! * **Validation (`validation::ValidationDefinition`)**: A declarative, recursive definition that
//!   is walked against the model to produce a flat path → error map.
//! * **State updater (`state::StateUpdater`)**: Coalesces the mutations of one UI event into a
//!   single externally visible state transition.
//! * **Form engine (`form::FormEngine`)**: Owns all of the above and exposes the field-level
//!   contract (value/status/error reads, mount/unmount/blur/change events, submit).

pub mod clock;
pub mod config;
pub mod constants;
pub mod form;
pub mod path;
pub mod register;
pub mod state;
pub mod status;
pub mod validation;
pub mod value;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;
pub use config::FormConfig;
pub use form::{FieldGroup, FormEngine, FormEngineBuilder};
pub use path::{Path, PathBuilder, PathError, Segment};
pub use register::{FieldRegister, ListenerId, RegisterEvent};
pub use state::{FormState, StatePatch, StateUpdater};
pub use status::{FieldStatus, StatusMap};
pub use validation::{
    ArrayValidation, FieldContext, FieldErrors, ValidationDefinition, ValidationError, Validator,
};
pub use value::{ModelError, PathMode, Update, Value};

/// Result type used throughout the formstate library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the formstate library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured path errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured model access errors from the value module
    #[error(transparent)]
    Model(value::ModelError),

    /// Structured validation definition errors from the validation module
    #[error(transparent)]
    Validation(validation::ValidationError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Path(_) => "path",
            Error::Model(_) => "value",
            Error::Validation(_) => "validation",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a path did not resolve to a value.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Model(model_err) => model_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error was caused by an empty path where one was required.
    pub fn is_empty_path(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_empty_path(),
            Error::Model(model_err) => model_err.is_empty_path(),
            _ => false,
        }
    }

    /// Check if this error is path-related.
    pub fn is_path_error(&self) -> bool {
        matches!(self, Error::Path(_))
    }

    /// Check if this error is a type mismatch while walking the model.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Model(model_err) => model_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error came from compiling a validation definition.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
