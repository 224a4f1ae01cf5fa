use std::sync::{Arc, Mutex};

use formstate::{
    FieldRegister, FixedClock, FormEngine, Path, RegisterEvent, ValidationDefinition, Value,
};

// ==========================
// CORE TEST FACTORIES
// ==========================

/// Builds a model from a JSON literal.
pub fn model(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Parses each string into a path.
pub fn paths(list: &[&str]) -> Vec<Path> {
    list.iter().map(|p| Path::parse(p)).collect()
}

/// Canonical strings of `paths`, for readable assertions.
pub fn canonical(paths: &[Path]) -> Vec<String> {
    paths.iter().map(Path::to_canonical_string).collect()
}

/// A register on a manual clock starting at zero.
pub fn test_register() -> (Arc<FixedClock>, FieldRegister) {
    let clock = Arc::new(FixedClock::new(0));
    let register = FieldRegister::with_clock(clock.clone());
    (clock, register)
}

/// An engine on a manual clock.
pub fn test_engine(json: serde_json::Value, validation: ValidationDefinition) -> (Arc<FixedClock>, FormEngine) {
    let clock = Arc::new(FixedClock::new(0));
    let engine = FormEngine::builder()
        .model(json)
        .validation(validation)
        .clock(clock.clone())
        .build();
    (clock, engine)
}

/// Mounts `list` on the engine and lets the debounce window elapse.
pub fn mount_all(engine: &mut FormEngine, clock: &FixedClock, list: &[&str]) {
    for path in paths(list) {
        engine.on_field_mount(&path);
    }
    clock.advance(engine.config().debounce_window_ms);
    engine.poll().expect("Mount burst should flush");
}

// ==========================
// RECORDERS
// ==========================

pub type Recorded<T> = Arc<Mutex<Vec<T>>>;

/// Listener that stores every batch it receives.
pub fn event_recorder() -> (Recorded<RegisterEvent>, impl FnMut(&RegisterEvent) + Send + 'static) {
    let seen: Recorded<RegisterEvent> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |event: &RegisterEvent| {
        sink.lock().unwrap().push(event.clone())
    })
}
