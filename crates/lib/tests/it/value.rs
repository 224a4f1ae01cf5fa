//! Tests for deep reads and copy-on-path updates of the model.

use formstate::{
    Path, PathMode, Update, Value,
    value::{get_by_path, set_by_path},
};
use serde_json::json;

use super::helpers::*;

fn sample() -> Value {
    model(json!({
        "name": "Ada",
        "address": {"street": "Main", "geo": {"lat": 1, "lng": 2}},
        "tags": ["a", "b", "c", "d"],
        "orders": [{"id": 1}, {"id": 2}]
    }))
}

#[test]
fn test_round_trip_for_existing_paths() -> formstate::Result<()> {
    let root = sample();
    for (path, value) in [
        ("name", Value::from("Grace")),
        ("address.geo.lat", Value::from(59.9)),
        ("tags.2", Value::from("z")),
        ("orders.1", model(json!({"id": 3}))),
    ] {
        let path = Path::parse(path);
        let next = root.update(&path, Update::Set(value.clone()), PathMode::Strict)?;
        assert_eq!(next.select(&path)?, &value);
    }
    Ok(())
}

#[test]
fn test_update_never_mutates_the_original() -> formstate::Result<()> {
    let root = sample();
    let before = root.to_json_string();

    root.update(&Path::parse("address.geo.lat"), Update::set(0), PathMode::Strict)?;
    root.update(&Path::parse("tags.0"), Update::Delete, PathMode::Strict)?;
    root.update(&Path::parse("new.branch"), Update::set(true), PathMode::Lenient)?;

    assert_eq!(root.to_json_string(), before);
    Ok(())
}

#[test]
fn test_siblings_outside_the_path_are_shared() -> formstate::Result<()> {
    let root = sample();
    let next = root.update(&Path::parse("address.geo.lat"), Update::set(0), PathMode::Strict)?;

    for shared in ["tags", "orders", "orders.0", "address.street"] {
        let path = Path::parse(shared);
        let old = root.select(&path)?;
        let new = next.select(&path)?;
        assert_eq!(old, new);
        if old.is_container() {
            assert!(old.ptr_eq(new), "{shared} should be shared");
        }
    }
    for copied in ["address", "address.geo"] {
        let path = Path::parse(copied);
        assert!(!root.select(&path)?.ptr_eq(next.select(&path)?), "{copied} should be copied");
    }
    Ok(())
}

#[test]
fn test_delete_array_index_shifts_down() -> formstate::Result<()> {
    let root = sample();
    let next = root.update(&Path::parse("tags.1"), Update::Delete, PathMode::Strict)?;
    assert_eq!(next.select(&Path::parse("tags"))?, &model(json!(["a", "c", "d"])));
    Ok(())
}

#[test]
fn test_delete_object_key_leaves_others() -> formstate::Result<()> {
    let root = sample();
    let next = root.update(&Path::parse("address.geo.lng"), Update::Delete, PathMode::Strict)?;
    assert_eq!(next.select(&Path::parse("address.geo"))?, &model(json!({"lat": 1})));
    assert_eq!(next.select(&Path::parse("address.street"))?, "Main");
    Ok(())
}

#[test]
fn test_strict_errors_convert_into_crate_error() {
    let root = sample();
    let err: formstate::Error = root
        .update(&Path::parse("address.zip"), Update::set("0150"), PathMode::Strict)
        .unwrap_err()
        .into();
    assert!(err.is_not_found());
    assert_eq!(err.module(), "value");

    let err: formstate::Error = root
        .update(&Path::root(), Update::set(1), PathMode::Strict)
        .unwrap_err()
        .into();
    assert!(err.is_empty_path());
}

#[test]
fn test_lenient_list_writes_append_but_never_skip() -> formstate::Result<()> {
    let root = sample();
    let next = root.update(&Path::parse("tags.4"), Update::set("e"), PathMode::Lenient)?;
    assert_eq!(next.select(&Path::parse("tags"))?, &model(json!(["a", "b", "c", "d", "e"])));

    for index in ["5", "10000000000", "18446744073709551615"] {
        let path = Path::parse(&format!("tags.{index}"));
        let err = root.update(&path, Update::set("x"), PathMode::Lenient).unwrap_err();
        assert!(err.is_index_out_of_range());
        assert_eq!(err.path(), Some("tags"));
    }

    // A vivified intermediate list row is bounded the same way
    let err = root
        .update(&Path::parse("orders.7.id"), Update::set(8), PathMode::Lenient)
        .unwrap_err();
    assert!(err.is_index_out_of_range());
    Ok(())
}

#[test]
fn test_select_reports_missing_key_with_snapshot() {
    let root = sample();
    let err = root.select(&Path::parse("address.geo.alt")).unwrap_err();
    assert_eq!(err.key(), Some("alt"));
    assert_eq!(err.path(), Some("address.geo"));
    assert!(err.to_string().contains("\"lat\":1"));
}

#[test]
fn test_textual_helpers() -> formstate::Result<()> {
    let root = sample();
    assert_eq!(get_by_path(&root, "orders[1].id"), Some(&Value::Int(2)));
    assert_eq!(get_by_path(&root, "orders[5].id"), None);

    let next = set_by_path(&root, "profile.links[0]", "https://example.com")?;
    assert_eq!(
        get_by_path(&next, "profile.links.0"),
        Some(&Value::from("https://example.com"))
    );
    Ok(())
}

#[test]
fn test_value_serde_matches_json() {
    let json = json!({"a": [1, 2.5, null, true, "x"], "b": {}});
    let value: Value = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(serde_json::to_value(&value).unwrap(), json);
}
