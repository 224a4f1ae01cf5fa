//! Shared helpers for benchmarks

use formstate::{
    ArrayValidation, ValidationDefinition, Value,
    validation::validators::{min_length, required},
};

/// Builds a model with `rows` entries under `rows`, each a small record.
///
/// Each row has format `{"title": "row N", "tags": ["a", "b"], "meta": {"n": N}}`.
pub fn model_with_rows(rows: usize) -> Value {
    let rows = (0..rows).map(|i| {
        Value::map([
            ("title", Value::from(format!("row {i}"))),
            ("tags", Value::list(["a", "b"])),
            ("meta", Value::map([("n", Value::from(i as i64))])),
        ])
    });
    Value::map([("name", Value::from("")), ("rows", Value::list(rows))])
}

/// Definition validating `name` and every row title.
pub fn row_definition() -> ValidationDefinition {
    ValidationDefinition::mapping([
        ("name", min_length(3).into()),
        (
            "rows",
            ArrayValidation::new()
                .with_items(ValidationDefinition::mapping([("title", required().into())]))
                .with_array(min_length(1))
                .into(),
        ),
    ])
}
