//! Running a definition against a model.

use crate::{path::Path, value::Value};

use super::{FieldContext, FieldErrors, ValidationDefinition, Validator, validation_paths};

/// Where a path lands inside a definition.
enum Resolved<'d> {
    Validator(&'d Validator),
    /// The definition has nothing to say about this path.
    Unvalidated,
    /// The path ends on a mapping node, which cannot validate a value.
    Malformed(&'static str),
}

fn resolve<'d>(definition: &'d ValidationDefinition, path: &Path) -> Resolved<'d> {
    let mut node = definition;
    for segment in path.segments() {
        node = match node {
            ValidationDefinition::Mapping(children) => match children.get(&segment.to_key()) {
                Some(child) => child,
                None => return Resolved::Unvalidated,
            },
            ValidationDefinition::Array(array) => match (segment.as_index(), &array.item) {
                (Some(_), Some(item)) => item,
                _ => return Resolved::Unvalidated,
            },
            ValidationDefinition::Function(_) => return Resolved::Unvalidated,
        };
    }
    match node {
        ValidationDefinition::Function(validator) => Resolved::Validator(validator),
        ValidationDefinition::Array(array) => array
            .array
            .as_ref()
            .map_or(Resolved::Unvalidated, Resolved::Validator),
        ValidationDefinition::Mapping(_) => Resolved::Malformed(node.kind()),
    }
}

/// Errors for `path`, relative to it. The empty relative path is `path` itself.
fn evaluate(model: &Value, definition: &ValidationDefinition, path: &Path) -> Vec<(Path, String)> {
    match resolve(definition, path) {
        Resolved::Validator(validator) => {
            let value = model.get_path(path).unwrap_or(&Value::Null);
            validator.run(&FieldContext {
                value,
                form_value: model,
                path,
            })
        }
        Resolved::Unvalidated => Vec::new(),
        Resolved::Malformed(kind) => {
            tracing::error!(path = %path, kind, "Validation definition does not end in a validator");
            vec![(
                Path::root(),
                format!("Invalid validation definition at '{path}': expected a validator, found a {kind}"),
            )]
        }
    }
}

/// Validates a single path.
///
/// A path the definition does not cover is valid. A path that is missing
/// from the model is validated as `Null`.
pub fn validate_field(model: &Value, definition: &ValidationDefinition, path: &Path) -> Option<String> {
    evaluate(model, definition, path)
        .into_iter()
        .find(|(relative, _)| relative.is_empty())
        .map(|(_, message)| message)
}

/// Validates every path the definition covers in `model`.
///
/// Each covered path gets an entry (`None` when valid). Validators built with
/// [`Validator::entries`] may add entries for paths below their own node.
pub fn validate_model(model: &Value, definition: &ValidationDefinition) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let paths = validation_paths(model, definition);
    for path in &paths {
        let mut own = None;
        for (relative, message) in evaluate(model, definition, path) {
            if relative.is_empty() {
                if own.is_none() {
                    own = Some(message);
                }
            } else {
                errors.record(&path.concat(&relative), Some(message));
            }
        }
        errors.record(path, own);
    }
    tracing::debug!(
        paths = paths.len(),
        failing = errors.errors().count(),
        "Validated model"
    );
    errors
}
