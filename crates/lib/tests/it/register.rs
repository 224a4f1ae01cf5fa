//! Tests for the debounced field register.

use std::time::Duration;

use formstate::{Path, PathBuilder, RegisterEvent, register::FlushSchedule};

use super::helpers::*;

#[test]
fn test_burst_records_events_without_cancelling() {
    let (clock, mut register) = test_register();
    let (seen, listener) = event_recorder();
    register.add_listener(listener);

    register.register(Path::parse("a"));
    register.register(Path::parse("b"));
    register.unregister(&Path::parse("a"));
    clock.advance(10);
    register.poll();

    let seen = seen.lock().unwrap();
    assert_eq!(
        *seen,
        vec![RegisterEvent {
            registered: paths(&["a", "b"]),
            unregistered: paths(&["a"]),
        }]
    );
}

#[test]
fn test_separate_bursts_flush_separately() {
    let (clock, mut register) = test_register();
    let (seen, listener) = event_recorder();
    register.add_listener(listener);

    register.register(Path::parse("a"));
    clock.advance(10);
    register.poll();
    register.register(Path::parse("b"));
    clock.advance(10);
    register.poll();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].registered, paths(&["b"]));
}

#[test]
fn test_late_subscriber_catch_up_is_synchronous() {
    let (_clock, mut register) = test_register();
    register.register(Path::parse("x"));
    register.register(Path::parse("y"));

    let (seen, listener) = event_recorder();
    register.add_listener(listener);

    // Nothing has elapsed, yet the listener already saw the live set
    assert!(register.is_pending());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(canonical(&seen[0].registered), vec!["x", "y"]);
    assert!(seen[0].unregistered.is_empty());
}

#[test]
fn test_each_listener_called_once_per_flush() {
    let (clock, mut register) = test_register();
    let (first, listener) = event_recorder();
    register.add_listener(listener);
    let (second, listener) = event_recorder();
    register.add_listener(listener);

    register.register(Path::parse("a"));
    clock.advance(10);
    register.poll();

    assert_eq!(first.lock().unwrap().len(), 1);
    assert_eq!(second.lock().unwrap().len(), 1);
}

#[test]
fn test_custom_window_and_schedule() {
    let (clock, register) = test_register();
    let mut register = register.with_window(Duration::from_millis(50));
    assert_eq!(register.schedule(), FlushSchedule::Idle);

    register.register(Path::parse("a"));
    assert_eq!(register.schedule(), FlushSchedule::Pending { deadline_ms: 50 });
    clock.advance(49);
    assert!(register.poll().is_none());
    clock.advance(1);
    assert!(register.poll().is_some());
    assert_eq!(register.time_until_flush(), None);
}

#[test]
fn test_unregister_of_unknown_path_is_still_reported() {
    let (clock, mut register) = test_register();
    register.unregister(&Path::parse("ghost"));
    clock.advance(10);
    let batch = register.poll().unwrap();
    assert_eq!(batch.unregistered, paths(&["ghost"]));
    assert!(register.is_empty());
}

#[test]
fn test_builder_paths_match_parsed_paths() {
    let (clock, mut register) = test_register();
    register.register(PathBuilder::new().field("address.street").build());
    register.register(PathBuilder::new().field("rows").index(0).build());
    clock.advance(10);
    register.poll();

    assert!(register.includes_path(&Path::parse("address.street")));
    assert!(register.includes_path(&Path::parse("rows[0]")));

    register.unregister(&Path::parse("address.street"));
    assert!(!register.includes_path(&PathBuilder::new().field("address").field("street").build()));
}
