//! The form engine: the field-level contract a rendering layer consumes.
//!
//! [`FormEngine`] owns the model, the status map, the field register, the
//! batching [`StateUpdater`] and the validation definition. The rendering
//! layer reads values, statuses and errors by path and reports
//! mount/unmount/blur/change events. The only call back out is the change
//! callback, invoked once per consolidated state transition.
//!
//! ```
//! use std::sync::Arc;
//! use formstate::{FixedClock, FormEngine, Path, Update, ValidationDefinition};
//! use formstate::validation::validators::min_length;
//! use serde_json::json;
//!
//! let clock = Arc::new(FixedClock::new(0));
//! let mut form = FormEngine::builder()
//!     .model(json!({"name": ""}))
//!     .validation(ValidationDefinition::mapping([("name", min_length(3).into())]))
//!     .clock(clock.clone())
//!     .build();
//!
//! let name = Path::parse("name");
//! form.on_field_mount(&name);
//! clock.advance(10);
//! form.poll();
//!
//! form.on_field_change(&name, Update::set("Ada")).unwrap();
//! assert!(form.get_field_status(&name).dirty());
//! assert!(form.submit());
//! ```

use std::fmt;

use crate::{
    config::FormConfig,
    path::Path,
    register::{FieldRegister, ListenerId, RegisterEvent},
    state::{FormState, StatePatch, StateUpdater},
    status::{FieldStatus, StatusMap},
    validation::{FieldErrors, ValidationDefinition, validate_model},
    value::{ModelError, Update, Value},
};

mod builder;
mod group;

pub use builder::FormEngineBuilder;
pub use group::FieldGroup;

/// Form-state engine for one form instance.
pub struct FormEngine {
    state: FormState,
    errors: FieldErrors,
    validation: ValidationDefinition,
    register: FieldRegister,
    updater: StateUpdater,
    config: FormConfig,
}

impl FormEngine {
    pub fn builder() -> FormEngineBuilder {
        FormEngineBuilder::new()
    }

    /// Engine over `model` with no validation and default configuration.
    pub fn new(model: impl Into<Value>) -> Self {
        Self::builder().model(model).build()
    }

    pub(crate) fn from_parts(
        state: FormState,
        validation: ValidationDefinition,
        register: FieldRegister,
        updater: StateUpdater,
        config: FormConfig,
    ) -> Self {
        let mut engine = Self {
            state,
            errors: FieldErrors::new(),
            validation,
            register,
            updater,
            config,
        };
        engine.revalidate();
        engine
    }

    // ---- Reads ----

    /// Value at `path`.
    ///
    /// # Errors
    ///
    /// `ModelError::PathNotFound` if any segment is missing.
    pub fn get_field_value(&self, path: &Path) -> Result<&Value, ModelError> {
        self.state.model.select(path)
    }

    /// Value at `path`, or `None` if it is absent.
    pub fn find_field_value(&self, path: &Path) -> Option<&Value> {
        self.state.model.get_path(path)
    }

    /// Status of `path`; the default status for paths without an entry.
    pub fn get_field_status(&self, path: &Path) -> FieldStatus {
        self.state.status.get(path)
    }

    pub fn get_field_error(&self, path: &Path) -> Option<&str> {
        self.errors.get(path)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn model(&self) -> &Value {
        &self.state.model
    }

    pub fn status(&self) -> &StatusMap {
        &self.state.status
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// True if no field currently has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn register(&self) -> &FieldRegister {
        &self.register
    }

    pub fn validation(&self) -> &ValidationDefinition {
        &self.validation
    }

    // ---- Field events ----

    /// Records that a field for `path` mounted.
    ///
    /// Its status entry appears once the register flushes.
    pub fn on_field_mount(&mut self, path: &Path) {
        self.register.register(path.clone());
    }

    /// Records that a field for `path` unmounted.
    pub fn on_field_unmount(&mut self, path: &Path) {
        self.register.unregister(path);
    }

    /// Marks a live field touched.
    pub fn on_field_blur(&mut self, path: &Path) {
        let status = self.state.status.mark_touched(&self.register, path);
        self.commit_status(status);
    }

    /// Writes `update` at `path` and marks the field dirty.
    ///
    /// Missing intermediate containers are created. Both changes reach the
    /// owner as one transition, and errors are recomputed when the model
    /// changed.
    ///
    /// # Errors
    ///
    /// `ModelError::EmptyPath` for the root path, `ModelError::TypeMismatch`
    /// when a list is addressed with a non-index key, and
    /// `ModelError::IndexOutOfRange` when a list index skips past the end.
    /// The state is unchanged on error.
    pub fn on_field_change(&mut self, path: &Path, update: Update) -> Result<(), ModelError> {
        if path.is_empty() {
            return Err(ModelError::EmptyPath);
        }
        self.updater.write(path.clone(), update);
        let status = self.state.status.mark_dirty(&self.register, path);
        if !status.ptr_eq(&self.state.status) {
            self.updater.patch(StatePatch::status(status));
        }
        self.commit()
    }

    /// Marks every field touched and reports whether the model is valid.
    ///
    /// Pending mounts are flushed first so fields mounted in the same burst
    /// are touched too.
    pub fn submit(&mut self) -> bool {
        self.flush_register();
        let status = self.state.status.mark_all_touched(&self.register);
        self.commit_status(status);
        self.revalidate();
        let valid = self.errors.is_valid();
        tracing::info!(valid, failing = self.errors.errors().count(), "Form submitted");
        valid
    }

    // ---- Register driving ----

    /// Flushes the register if its debounce window has elapsed and
    /// reconciles the status map with the batch.
    pub fn poll(&mut self) -> Option<RegisterEvent> {
        let batch = self.register.poll()?;
        self.apply_register_event(&batch);
        Some(batch)
    }

    /// Flushes the register immediately.
    pub fn flush_register(&mut self) -> Option<RegisterEvent> {
        let batch = self.register.flush()?;
        self.apply_register_event(&batch);
        Some(batch)
    }

    /// Waits out the debounce window, then flushes the register.
    ///
    /// Returns immediately with `None` when nothing is pending.
    pub async fn settle(&mut self) -> Option<RegisterEvent> {
        let wait = self.register.time_until_flush()?;
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
        self.flush_register()
    }

    /// Subscribes to register batches. See [`FieldRegister::add_listener`].
    pub fn add_register_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RegisterEvent) + Send + 'static,
    {
        self.register.add_listener(listener)
    }

    pub fn remove_register_listener(&mut self, id: ListenerId) -> bool {
        self.register.remove_listener(id)
    }

    fn apply_register_event(&mut self, batch: &RegisterEvent) {
        let status = self.state.status.apply_register_event(batch, &self.register);
        self.commit_status(status);
    }

    // ---- Lifecycle ----

    /// Replaces the validation definition and recomputes errors.
    pub fn set_validation(&mut self, validation: ValidationDefinition) {
        self.validation = validation;
        self.revalidate();
    }

    /// Recomputes the error map from the current model.
    pub fn validate(&mut self) -> &FieldErrors {
        self.revalidate();
        &self.errors
    }

    /// Replaces the model and resets every status entry to the default.
    pub fn reset(&mut self, model: impl Into<Value>) {
        self.updater.patch(StatePatch {
            model: Some(model.into()),
            status: Some(self.state.status.reset()),
        });
        self.commit_or_log();
        self.revalidate();
    }

    /// Reports whether the owner is mounted. Writes made while unmounted are
    /// dropped without error.
    pub fn set_mounted(&mut self, mounted: bool) {
        self.updater.set_mounted(mounted);
    }

    pub fn is_mounted(&self) -> bool {
        self.updater.is_mounted()
    }

    /// A view of this engine with every path prefixed by `prefix`.
    pub fn group(&mut self, prefix: impl Into<Path>) -> FieldGroup<'_> {
        FieldGroup::new(self, prefix.into())
    }

    // ---- Internals ----

    fn commit(&mut self) -> Result<(), ModelError> {
        if let Some(next) = self.updater.flush(&self.state)? {
            let model_changed = !next.model.ptr_eq(&self.state.model);
            self.state = next;
            if model_changed && self.config.validate_on_change {
                self.revalidate();
            }
        }
        Ok(())
    }

    fn commit_status(&mut self, status: StatusMap) {
        if status.ptr_eq(&self.state.status) {
            return;
        }
        self.updater.patch(StatePatch::status(status));
        self.commit_or_log();
    }

    /// Commits a queue holding only patches, which cannot fail.
    fn commit_or_log(&mut self) {
        if let Err(err) = self.commit() {
            tracing::error!(error = %err, "State patch was rejected");
        }
    }

    fn revalidate(&mut self) {
        self.errors = validate_model(&self.state.model, &self.validation);
    }
}

impl fmt::Debug for FormEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormEngine")
            .field("state", &self.state)
            .field("errors", &self.errors)
            .field("register", &self.register)
            .field("updater", &self.updater)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
