//! Tests for validation path enumeration, field resolution and rule sets.

use formstate::{
    ArrayValidation, Path, ValidationDefinition, Validator,
    validation::{
        rules, validate_field, validate_model, validation_paths,
        validators::{min_length, required},
    },
};
use serde_json::json;

use super::helpers::*;

/// Fails when the value is a number greater than one.
fn at_most_one() -> Validator {
    Validator::from_value(|value| match value.as_int() {
        Some(n) if n > 1 => Some("Too large".to_string()),
        _ => None,
    })
}

#[test]
fn test_enumeration_over_array_items() {
    let definition = ValidationDefinition::mapping([(
        "array",
        ValidationDefinition::each(ValidationDefinition::mapping([("a", at_most_one().into())])),
    )]);

    let populated = model(json!({"array": [{"a": 1, "b": "hello"}]}));
    assert_eq!(canonical(&validation_paths(&populated, &definition)), vec!["array.0.a"]);

    let empty = model(json!({"array": []}));
    assert!(validation_paths(&empty, &definition).is_empty());
}

#[test]
fn test_enumeration_of_empty_array_with_array_validator() {
    let definition = ValidationDefinition::mapping([(
        "array",
        ArrayValidation::new()
            .with_items(ValidationDefinition::mapping([("a", at_most_one().into())]))
            .with_array(min_length(1))
            .into(),
    )]);
    let empty = model(json!({"array": []}));
    assert_eq!(canonical(&validation_paths(&empty, &definition)), vec!["array"]);

    let errors = validate_model(&empty, &definition);
    assert_eq!(errors.len(), 1);
    assert!(errors.get(&Path::parse("array")).is_some());
}

#[test]
fn test_item_validator_never_sees_missing_indices() {
    let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = calls.clone();
    let definition = ValidationDefinition::mapping([(
        "rows",
        ValidationDefinition::each(Validator::from_value(move |_| {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            None
        })),
    )]);

    validate_model(&model(json!({"rows": ["x", "y"]})), &definition);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_result_map_holds_exactly_the_enumerated_paths() {
    let definition = ValidationDefinition::mapping([
        ("name", min_length(3).into()),
        ("address", ValidationDefinition::mapping([("street", min_length(3).into())])),
        ("missing", required().into()),
    ]);
    let value = model(json!({"name": "Ada", "address": {"street": ""}}));

    let errors = validate_model(&value, &definition);
    let keys: Vec<&str> = errors.iter().map(|(path, _)| path).collect();
    assert_eq!(keys, vec!["address.street", "name"]);
    assert_eq!(errors.get(&Path::parse("name")), None);
    assert!(errors.get(&Path::parse("address.street")).is_some());
}

#[test]
fn test_throwing_validator_degrades_to_field_error() {
    let definition = ValidationDefinition::mapping([(
        "age",
        Validator::from_value(|value| {
            let n = value.as_int().expect("age must be an integer");
            (n < 0).then(|| "Negative".to_string())
        })
        .into(),
    )]);
    let value = model(json!({"age": "old"}));

    let errors = validate_model(&value, &definition);
    let message = errors.get(&Path::parse("age")).unwrap();
    assert!(message.contains("age must be an integer"));
    assert!(message.contains("\"old\""));
}

#[test]
fn test_validate_field_for_array_level_and_item_paths() {
    let definition = ValidationDefinition::mapping([(
        "tags",
        ArrayValidation::new()
            .with_items(required())
            .with_array(min_length(3))
            .into(),
    )]);
    let value = model(json!({"tags": ["", "b"]}));

    assert_eq!(
        validate_field(&value, &definition, &Path::parse("tags")).as_deref(),
        Some("Must contain at least 3 items")
    );
    assert_eq!(
        validate_field(&value, &definition, &Path::parse("tags[0]")).as_deref(),
        Some("This field is required")
    );
    assert_eq!(validate_field(&value, &definition, &Path::parse("tags.1")), None);
}

#[test]
fn test_rules_compile_to_equivalent_definition() -> formstate::Result<()> {
    let definition = rules::compile_str(
        r#"{
            "name": [{"min_length": 3}],
            "address": {"street": [{"min_length": 3}]},
            "items": {"$each": {"qty": [{"min": 1}]}, "$array": ["required"]}
        }"#,
    )?;
    let value = model(json!({
        "name": "",
        "address": {"street": "Main"},
        "items": [{"qty": 0}, {"qty": 2}]
    }));

    let errors = validate_model(&value, &definition);
    let failing: Vec<(&str, &str)> = errors.errors().collect();
    assert_eq!(
        failing,
        vec![
            ("items.0.qty", "Must be at least 1"),
            ("name", "Must be at least 3 characters"),
        ]
    );
    Ok(())
}

#[test]
fn test_rules_errors_are_structured() {
    let err = rules::compile_str(r#"{"items": {"$each": {"qty": [{"between": [1, 2]}]}}}"#).unwrap_err();
    assert!(err.is_validation_error());
    assert!(err.to_string().contains("items.$each.qty"));
}
