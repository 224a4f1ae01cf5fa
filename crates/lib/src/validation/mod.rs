//! Declarative validation of a model.
//!
//! A [`ValidationDefinition`] mirrors the shape of the model. Each node is
//! exactly one of:
//!
//! - a [`Validator`] function, run against the value at that node,
//! - a mapping of keys to child definitions,
//! - an [`ArrayValidation`], which separates per-item checks from a check of
//!   the whole array.
//!
//! [`validate_model`] walks the definition against the model and produces a
//! flat [`FieldErrors`] map keyed by canonical path. The map is rebuilt from
//! scratch on every call, so it can never hold an error for a value that has
//! since changed.
//!
//! # Example
//!
//! ```
//! use formstate::validation::{ValidationDefinition, validate_model, validators::min_length};
//! use formstate::Value;
//! use serde_json::json;
//!
//! let definition = ValidationDefinition::mapping([
//!     ("name", min_length(3).into()),
//!     ("address", ValidationDefinition::mapping([("street", min_length(3).into())])),
//! ]);
//! let model = Value::from(json!({"name": "Ada Lovelace", "address": {"street": ""}}));
//!
//! let errors = validate_model(&model, &definition);
//! assert_eq!(errors.get(&"name".into()), None);
//! assert!(errors.get(&"address.street".into()).is_some());
//! assert!(!errors.is_valid());
//! ```

use std::{
    any::Any,
    collections::BTreeMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use serde::Serialize;

use crate::{path::Path, value::Value};

mod engine;
pub mod errors;
mod paths;
pub mod rules;
pub mod validators;

pub use engine::{validate_field, validate_model};
pub use errors::ValidationError;
pub use paths::validation_paths;

/// What a validator sees.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Value at the validated path (`Null` if the path is absent).
    pub value: &'a Value,
    /// The whole model.
    pub form_value: &'a Value,
    /// Path being validated.
    pub path: &'a Path,
}

/// Check of a single field: `None` means valid.
pub type FieldCheck = dyn Fn(&FieldContext<'_>) -> Option<String> + Send + Sync;

/// Check that reports errors at paths relative to the validated node.
pub type EntriesCheck = dyn Fn(&FieldContext<'_>) -> Vec<(Path, String)> + Send + Sync;

/// A user-supplied validation function.
#[derive(Clone)]
pub enum Validator {
    /// Returns one optional error for the node itself.
    Field(Arc<FieldCheck>),
    /// Returns `(relative path, error)` pairs; the empty relative path is the
    /// node itself.
    Entries(Arc<EntriesCheck>),
}

impl Validator {
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Validator::Field(Arc::new(check))
    }

    /// Validator that only needs the field's own value.
    pub fn from_value<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Validator::new(move |ctx| check(ctx.value))
    }

    /// Validator that reports errors for several paths below its node.
    pub fn entries<F>(check: F) -> Self
    where
        F: Fn(&FieldContext<'_>) -> Vec<(Path, String)> + Send + Sync + 'static,
    {
        Validator::Entries(Arc::new(check))
    }

    /// The error this validator reports for its own node, if any.
    ///
    /// Panics raised by the check propagate; see [`Validator::run`].
    pub fn first_error(&self, ctx: &FieldContext<'_>) -> Option<String> {
        match self {
            Validator::Field(check) => check(ctx),
            Validator::Entries(check) => check(ctx)
                .into_iter()
                .find(|(relative, _)| relative.is_empty())
                .map(|(_, message)| message),
        }
    }

    /// Runs the check and returns errors relative to `ctx.path`.
    ///
    /// A panic inside the check is caught, logged, and reported as an error on
    /// the node instead of unwinding into the caller.
    ///
    /// The process panic hook still runs before the unwind is caught, so the
    /// default hook prints its own "panicked at" line to stderr. Embedders that
    /// rely on the `Validator panicked` event alone should install their own
    /// hook with [`std::panic::set_hook`].
    pub fn run(&self, ctx: &FieldContext<'_>) -> Vec<(Path, String)> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| match self {
            Validator::Field(check) => check(ctx)
                .map(|message| vec![(Path::root(), message)])
                .unwrap_or_default(),
            Validator::Entries(check) => check(ctx),
        }));
        match outcome {
            Ok(errors) => errors,
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                tracing::error!(
                    path = %ctx.path,
                    value = %ctx.value,
                    reason = %reason,
                    "Validator panicked"
                );
                vec![(
                    Path::root(),
                    format!(
                        "Validator failed on value {} at '{}': {reason}",
                        ctx.value, ctx.path
                    ),
                )]
            }
        }
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Field(_) => write!(f, "Validator::Field(..)"),
            Validator::Entries(_) => write!(f, "Validator::Entries(..)"),
        }
    }
}

/// Validation node over an array value.
#[derive(Debug, Clone, Default)]
pub struct ArrayValidation {
    /// Applied to every element that exists.
    pub item: Option<Box<ValidationDefinition>>,
    /// Applied to the array as a whole.
    pub array: Option<Validator>,
}

impl ArrayValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(mut self, item: impl Into<ValidationDefinition>) -> Self {
        self.item = Some(Box::new(item.into()));
        self
    }

    pub fn with_array(mut self, array: Validator) -> Self {
        self.array = Some(array);
        self
    }
}

/// A node of the validation tree.
#[derive(Debug, Clone)]
pub enum ValidationDefinition {
    Function(Validator),
    Mapping(BTreeMap<String, ValidationDefinition>),
    Array(ArrayValidation),
}

impl ValidationDefinition {
    /// A definition that validates nothing.
    pub fn empty() -> Self {
        ValidationDefinition::Mapping(BTreeMap::new())
    }

    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ValidationDefinition)>,
    {
        ValidationDefinition::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Per-item validation of an array.
    pub fn each(item: impl Into<ValidationDefinition>) -> Self {
        ValidationDefinition::Array(ArrayValidation::new().with_items(item))
    }

    /// Short name of the node's variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationDefinition::Function(_) => "function",
            ValidationDefinition::Mapping(_) => "mapping",
            ValidationDefinition::Array(_) => "array validation",
        }
    }
}

impl Default for ValidationDefinition {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Validator> for ValidationDefinition {
    fn from(validator: Validator) -> Self {
        ValidationDefinition::Function(validator)
    }
}

impl From<ArrayValidation> for ValidationDefinition {
    fn from(array: ArrayValidation) -> Self {
        ValidationDefinition::Array(array)
    }
}

/// Flat map of canonical path → error (`None` when valid).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: BTreeMap<String, Option<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Error at `path`, if it has one.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.entries
            .get(&path.to_canonical_string())
            .and_then(|error| error.as_deref())
    }

    /// True if `path` was validated, whatever the outcome.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&path.to_canonical_string())
    }

    /// True if no validated path has an error.
    pub fn is_valid(&self) -> bool {
        self.entries.values().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(path, error)| (path.as_str(), error.as_deref()))
    }

    /// Only the failing paths.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(path, error)| error.as_deref().map(|e| (path.as_str(), e)))
    }

    /// Records a result, never replacing an existing error with `None`.
    pub(crate) fn record(&mut self, path: &Path, error: Option<String>) {
        let slot = self.entries.entry(path.to_canonical_string()).or_default();
        if error.is_some() {
            *slot = error;
        }
    }
}
