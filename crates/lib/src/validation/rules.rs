//! Declarative rule sets.
//!
//! A rule set is JSON shaped like the model it validates:
//!
//! - a list of [`Rule`]s (or a single rule) validates the value at that node,
//! - an object containing `$each` and/or `$array` validates an array: `$each`
//!   is the rule set for every element, `$array` the rules for the array itself,
//! - any other object maps keys to nested rule sets.
//!
//! ```
//! use formstate::validation::{rules, validate_model};
//! use formstate::Value;
//! use serde_json::json;
//!
//! let definition = rules::compile(&json!({
//!     "name": ["required", {"min_length": 2}],
//!     "tags": {"$each": ["required"], "$array": [{"min_items": 1}]}
//! }))
//! .unwrap();
//!
//! let model = Value::from(json!({"name": "A", "tags": []}));
//! let errors = validate_model(&model, &definition);
//! assert_eq!(errors.get(&"name".into()), Some("Must be at least 2 characters"));
//! assert_eq!(errors.get(&"tags".into()), Some("Must contain at least 1 items"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{RULES_ARRAY_KEY, RULES_EACH_KEY},
    path::Path,
    value::Value,
};

use super::{ArrayValidation, ValidationDefinition, ValidationError, Validator, validators};

/// A single built-in check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    MinItems(usize),
    Min(f64),
    Max(f64),
    OneOf(Vec<Value>),
}

impl Rule {
    pub fn to_validator(&self) -> Validator {
        match self {
            Rule::Required => validators::required(),
            Rule::MinLength(n) => validators::min_length(*n),
            Rule::MaxLength(n) => validators::max_length(*n),
            Rule::MinItems(n) => validators::min_items(*n),
            Rule::Min(bound) => validators::min(*bound),
            Rule::Max(bound) => validators::max(*bound),
            Rule::OneOf(allowed) => validators::one_of(allowed.clone()),
        }
    }
}

/// Compiles a JSON rule set into a definition.
///
/// # Errors
///
/// `ValidationError::InvalidRule` naming the first node that is not a rule,
/// a rule list, an array rule object or a mapping.
pub fn compile(rules: &serde_json::Value) -> Result<ValidationDefinition, ValidationError> {
    compile_node(rules, &Path::root())
}

/// Parses and compiles a rule set from JSON text.
pub fn compile_str(text: &str) -> crate::Result<ValidationDefinition> {
    let rules: serde_json::Value = serde_json::from_str(text)?;
    Ok(compile(&rules)?)
}

fn compile_node(node: &serde_json::Value, path: &Path) -> Result<ValidationDefinition, ValidationError> {
    match node {
        serde_json::Value::Array(_) | serde_json::Value::String(_) => {
            Ok(ValidationDefinition::Function(compile_rules(node, path)?))
        }
        serde_json::Value::Object(object)
            if object.contains_key(RULES_EACH_KEY) || object.contains_key(RULES_ARRAY_KEY) =>
        {
            if let Some(extra) = object
                .keys()
                .find(|key| *key != RULES_EACH_KEY && *key != RULES_ARRAY_KEY)
            {
                return Err(invalid(
                    path,
                    format!("unexpected key '{extra}' next to {RULES_EACH_KEY}/{RULES_ARRAY_KEY}"),
                ));
            }
            let mut array = ArrayValidation::new();
            if let Some(each) = object.get(RULES_EACH_KEY) {
                array = array.with_items(compile_node(each, &path.join(RULES_EACH_KEY))?);
            }
            if let Some(whole) = object.get(RULES_ARRAY_KEY) {
                array = array.with_array(compile_rules(whole, &path.join(RULES_ARRAY_KEY))?);
            }
            Ok(ValidationDefinition::Array(array))
        }
        serde_json::Value::Object(object) => {
            let children = object
                .iter()
                .map(|(key, child)| Ok((key.clone(), compile_node(child, &path.join(key.as_str()))?)))
                .collect::<Result<BTreeMap<_, _>, ValidationError>>()?;
            Ok(ValidationDefinition::Mapping(children))
        }
        other => Err(invalid(
            path,
            format!("expected a rule list or a mapping, found {other}"),
        )),
    }
}

/// A rule or list of rules, combined into one validator.
fn compile_rules(node: &serde_json::Value, path: &Path) -> Result<Validator, ValidationError> {
    let entries = match node {
        serde_json::Value::Array(entries) => entries.as_slice(),
        single => std::slice::from_ref(single),
    };
    let mut compiled = Vec::with_capacity(entries.len());
    for entry in entries {
        let rule: Rule = serde_json::from_value(entry.clone())
            .map_err(|err| invalid(path, format!("{entry} is not a rule: {err}")))?;
        compiled.push(rule.to_validator());
    }
    Ok(match compiled.len() {
        1 => compiled.remove(0),
        _ => validators::all(compiled),
    })
}

fn invalid(path: &Path, reason: String) -> ValidationError {
    ValidationError::InvalidRule {
        path: path.to_canonical_string(),
        reason,
    }
}
