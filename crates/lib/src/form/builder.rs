//! Builder for [`FormEngine`].

use std::sync::Arc;

use crate::{
    clock::{Clock, SystemClock},
    config::FormConfig,
    register::FieldRegister,
    state::{FormState, StateUpdater},
    validation::ValidationDefinition,
    value::Value,
};

use super::FormEngine;

/// Collects the parts of a [`FormEngine`] before construction.
///
/// Every part is optional: the model defaults to `Null`, the definition
/// validates nothing, the clock is the system clock.
#[derive(Default)]
pub struct FormEngineBuilder {
    model: Value,
    validation: ValidationDefinition,
    config: FormConfig,
    clock: Option<Arc<dyn Clock>>,
    updater: StateUpdater,
}

impl FormEngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(mut self, model: impl Into<Value>) -> Self {
        self.model = model.into();
        self
    }

    pub fn validation(mut self, validation: ValidationDefinition) -> Self {
        self.validation = validation;
        self
    }

    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    /// Time source for the register's debounce window.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Called once per consolidated state transition.
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&FormState) + Send + 'static,
    {
        self.updater.set_callback(callback);
        self
    }

    pub fn build(self) -> FormEngine {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let register = FieldRegister::with_clock(clock).with_window(self.config.debounce_window());
        tracing::debug!(
            debounce_window_ms = self.config.debounce_window_ms,
            validate_on_change = self.config.validate_on_change,
            "Building form engine"
        );
        FormEngine::from_parts(
            FormState::new(self.model),
            self.validation,
            register,
            self.updater,
            self.config,
        )
    }
}
