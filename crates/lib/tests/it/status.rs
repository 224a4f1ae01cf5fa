//! Tests for status map reconciliation against the field register.

use formstate::{FieldStatus, Path, StatusMap};

use super::helpers::*;

#[test]
fn test_register_batches_drive_status_entries() {
    let (clock, mut register) = test_register();
    let mut status = StatusMap::new();

    for path in paths(&["array", "array.a", "array.b"]) {
        register.register(path);
    }
    clock.advance(10);
    let batch = register.poll().unwrap();
    status = status.apply_register_event(&batch, &register);
    assert_eq!(status.len(), 3);
    assert!(status.iter().all(|(_, s)| *s == FieldStatus::default()));

    register.unregister(&Path::parse("array.a"));
    clock.advance(10);
    let batch = register.poll().unwrap();
    let next = status.apply_register_event(&batch, &register);

    let keys: Vec<&str> = next.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["array", "array.b"]);
    assert_eq!(next.get(&Path::parse("array")), status.get(&Path::parse("array")));
}

#[test]
fn test_duplicate_field_keeps_status_until_last_instance_leaves() {
    let (clock, mut register) = test_register();
    let name = Path::parse("name");
    register.register(name.clone());
    register.register(name.clone());
    clock.advance(10);
    let status = StatusMap::new().apply_register_event(&register.poll().unwrap(), &register);
    let status = status.mark_dirty(&register, &name);

    register.unregister(&name);
    clock.advance(10);
    let status = status.apply_register_event(&register.poll().unwrap(), &register);
    assert!(status.get(&name).dirty());

    register.unregister(&name);
    clock.advance(10);
    let status = status.apply_register_event(&register.poll().unwrap(), &register);
    assert!(!status.contains(&name));
}

#[test]
fn test_remount_keeps_history() {
    let (clock, mut register) = test_register();
    let name = Path::parse("name");
    register.register(name.clone());
    clock.advance(10);
    let status = StatusMap::new().apply_register_event(&register.poll().unwrap(), &register);
    let status = status.mark_touched(&register, &name);

    // Unmount and remount within one window: the entry is never removed
    register.unregister(&name);
    register.register(name.clone());
    clock.advance(10);
    let status = status.apply_register_event(&register.poll().unwrap(), &register);
    assert!(status.get(&name).touched());
}

#[test]
fn test_status_for_unknown_path_is_default() {
    let status = StatusMap::new();
    let unknown = status.get(&Path::parse("nowhere"));
    assert!(unknown.pristine());
    assert!(unknown.untouched());
}

#[test]
fn test_remove_if_present_is_idempotent() {
    let path = Path::parse("a");
    let status = StatusMap::new().add_if_missing(&path).add_if_missing(&Path::parse("b"));
    let once = status.remove_if_present(&path);
    let twice = once.remove_if_present(&path);
    assert_eq!(once, twice);
    assert!(twice.ptr_eq(&once));
}
