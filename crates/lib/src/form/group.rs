//! Field groups: a prefixed view of a [`FormEngine`].
//!
//! A group forwards every call to its engine with the path prefixed by the
//! group's own path, so a sub-form can be written against relative paths.
//! Groups nest, and an empty prefix is the engine itself.

use crate::{
    path::Path,
    status::FieldStatus,
    value::{ModelError, Update, Value},
};

use super::FormEngine;

/// Borrowed view of an engine under a path prefix.
#[derive(Debug)]
pub struct FieldGroup<'a> {
    engine: &'a mut FormEngine,
    prefix: Path,
}

impl<'a> FieldGroup<'a> {
    pub(super) fn new(engine: &'a mut FormEngine, prefix: Path) -> Self {
        Self { engine, prefix }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Absolute path of `relative` within the engine.
    pub fn resolve(&self, relative: &Path) -> Path {
        self.prefix.concat(relative)
    }

    /// A nested group below this one.
    pub fn group(&mut self, prefix: impl Into<Path>) -> FieldGroup<'_> {
        let prefix = self.prefix.concat(&prefix.into());
        FieldGroup::new(&mut *self.engine, prefix)
    }

    pub fn get_field_value(&self, path: &Path) -> Result<&Value, ModelError> {
        self.engine.get_field_value(&self.resolve(path))
    }

    pub fn find_field_value(&self, path: &Path) -> Option<&Value> {
        self.engine.find_field_value(&self.resolve(path))
    }

    pub fn get_field_status(&self, path: &Path) -> FieldStatus {
        self.engine.get_field_status(&self.resolve(path))
    }

    pub fn get_field_error(&self, path: &Path) -> Option<&str> {
        self.engine.get_field_error(&self.resolve(path))
    }

    pub fn on_field_mount(&mut self, path: &Path) {
        let path = self.resolve(path);
        self.engine.on_field_mount(&path);
    }

    pub fn on_field_unmount(&mut self, path: &Path) {
        let path = self.resolve(path);
        self.engine.on_field_unmount(&path);
    }

    pub fn on_field_blur(&mut self, path: &Path) {
        let path = self.resolve(path);
        self.engine.on_field_blur(&path);
    }

    pub fn on_field_change(&mut self, path: &Path, update: Update) -> Result<(), ModelError> {
        let path = self.resolve(path);
        self.engine.on_field_change(&path, update)
    }
}
