//! Tests for the batching state updater.

use std::sync::{Arc, Mutex};

use formstate::{FormState, Path, StatePatch, StateUpdater, StatusMap, Update, Value};
use serde_json::json;

use super::helpers::*;

#[test]
fn test_one_callback_per_flush() -> formstate::Result<()> {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let mut updater = StateUpdater::new().with_callback(move |state: &FormState| {
        sink.lock().unwrap().push(state.model.clone())
    });
    let state = FormState::new(json!({"rows": ["a", "b", "c"]}));

    updater.write(Path::parse("rows.0"), Update::Delete);
    updater.write(Path::parse("rows.0"), Update::Delete);
    let next = updater.flush(&state)?.unwrap();

    assert_eq!(next.model, model(json!({"rows": ["c"]})));
    assert_eq!(*calls.lock().unwrap(), vec![next.model.clone()]);
    Ok(())
}

#[test]
fn test_patch_is_shallow_merge() -> formstate::Result<()> {
    let mut updater = StateUpdater::new();
    let original = FormState::new(json!({"a": 1}));
    let status = StatusMap::new().add_if_missing(&Path::parse("a"));

    updater.patch(StatePatch::status(status.clone()));
    let next = updater.flush(&original)?.unwrap();

    assert!(next.model.ptr_eq(&original.model));
    assert!(next.status.ptr_eq(&status));
    Ok(())
}

#[test]
fn test_remount_accepts_writes_again() -> formstate::Result<()> {
    let mut updater = StateUpdater::new();
    let state = FormState::new(json!({}));

    updater.set_mounted(false);
    updater.write(Path::parse("x"), Update::set(1));
    assert!(updater.is_empty());

    updater.set_mounted(true);
    updater.write(Path::parse("x"), Update::set(2));
    let next = updater.flush(&state)?.unwrap();
    assert_eq!(next.model, model(json!({"x": 2})));
    Ok(())
}

#[test]
fn test_form_state_round_trips_through_json() {
    let state = FormState {
        model: Value::from(json!({"name": "Ada"})),
        status: StatusMap::new().add_if_missing(&Path::parse("name")),
    };
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(
        json,
        json!({
            "model": {"name": "Ada"},
            "status": {"name": {"dirty": false, "pristine": true, "touched": false, "untouched": true}}
        })
    );
    let back: FormState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
}
