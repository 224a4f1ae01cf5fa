//! Built-in validators.
//!
//! Each returns a [`Validator`] whose error message is phrased for end users.
//! Checks that do not apply to a value's type pass; combine with
//! [`required`] to reject absent values.

use crate::value::Value;

use super::Validator;

/// Rejects `Null`, blank text and empty containers.
pub fn required() -> Validator {
    Validator::from_value(|value| {
        let missing = match value {
            Value::Null => true,
            Value::Text(text) => text.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            _ => false,
        };
        missing.then(|| "This field is required".to_string())
    })
}

/// Minimum character count for text, or item count for lists.
pub fn min_length(min: usize) -> Validator {
    Validator::from_value(move |value| match value {
        Value::Text(text) if text.chars().count() < min => {
            Some(format!("Must be at least {min} characters"))
        }
        Value::List(items) if items.len() < min => Some(format!("Must contain at least {min} items")),
        _ => None,
    })
}

/// Maximum character count for text, or item count for lists.
pub fn max_length(max: usize) -> Validator {
    Validator::from_value(move |value| match value {
        Value::Text(text) if text.chars().count() > max => {
            Some(format!("Must be at most {max} characters"))
        }
        Value::List(items) if items.len() > max => Some(format!("Must contain at most {max} items")),
        _ => None,
    })
}

/// Minimum item count for lists. Anything that is not a list fails.
pub fn min_items(min: usize) -> Validator {
    Validator::from_value(move |value| match value.as_list() {
        Some(items) if items.len() >= min => None,
        _ => Some(format!("Must contain at least {min} items")),
    })
}

/// Lower bound for numbers.
pub fn min(min: f64) -> Validator {
    Validator::from_value(move |value| match value.as_number() {
        Some(number) if number < min => Some(format!("Must be at least {min}")),
        _ => None,
    })
}

/// Upper bound for numbers.
pub fn max(max: f64) -> Validator {
    Validator::from_value(move |value| match value.as_number() {
        Some(number) if number > max => Some(format!("Must be at most {max}")),
        _ => None,
    })
}

/// Accepts only the listed values. `Null` passes.
pub fn one_of(allowed: Vec<Value>) -> Validator {
    Validator::from_value(move |value| {
        if value.is_null() || allowed.contains(value) {
            return None;
        }
        let choices: Vec<String> = allowed.iter().map(Value::to_string).collect();
        Some(format!("Must be one of {}", choices.join(", ")))
    })
}

/// Runs `validators` in order and reports the first error.
pub fn all(validators: Vec<Validator>) -> Validator {
    Validator::new(move |ctx| validators.iter().find_map(|validator| validator.first_error(ctx)))
}
