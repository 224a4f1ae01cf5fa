//! The externally visible form state and the batching layer that updates it.
//!
//! One UI event often produces several mutations: a value change writes the
//! model *and* marks the field dirty. The [`StateUpdater`] queues them and
//! applies them together on [`StateUpdater::flush`], so the owner observes a
//! single transition per event.
//!
//! This is an in-memory queue with no scheduling of its own. The owner decides
//! when an event is complete and flushes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    path::Path,
    status::StatusMap,
    value::{ModelError, PathMode, Update, Value},
};

/// Everything the owner persists or transmits.
///
/// Validation errors are deliberately absent: they are always recomputed from
/// the model and the validation definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub model: Value,
    #[serde(default)]
    pub status: StatusMap,
}

impl FormState {
    pub fn new(model: impl Into<Value>) -> Self {
        Self {
            model: model.into(),
            status: StatusMap::new(),
        }
    }

    /// True if both states share their model and status allocations.
    pub fn ptr_eq(&self, other: &FormState) -> bool {
        self.model.ptr_eq(&other.model) && self.status.ptr_eq(&other.status)
    }
}

/// Shallow top-level merge: each present field replaces the state's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub model: Option<Value>,
    pub status: Option<StatusMap>,
}

impl StatePatch {
    pub fn model(model: Value) -> Self {
        Self {
            model: Some(model),
            status: None,
        }
    }

    pub fn status(status: StatusMap) -> Self {
        Self {
            model: None,
            status: Some(status),
        }
    }

    pub fn apply(&self, state: &FormState) -> FormState {
        FormState {
            model: self.model.clone().unwrap_or_else(|| state.model.clone()),
            status: self.status.clone().unwrap_or_else(|| state.status.clone()),
        }
    }
}

/// A queued mutation.
#[derive(Debug, Clone, PartialEq)]
enum StateOp {
    /// Lenient deep write into the model.
    Write { path: Path, update: Update },
    Patch(StatePatch),
}

/// Callback receiving each consolidated state.
pub type ChangeCallback = Box<dyn FnMut(&FormState) + Send>;

/// Coalesces the mutations of one event into one state transition.
pub struct StateUpdater {
    queue: Vec<StateOp>,
    mounted: bool,
    on_change: Option<ChangeCallback>,
}

impl Default for StateUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl StateUpdater {
    /// Creates a mounted updater with no callback.
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            mounted: true,
            on_change: None,
        }
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&FormState) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&FormState) + Send + 'static,
    {
        self.on_change = Some(Box::new(callback));
    }

    /// Queues a deep write into the model.
    pub fn write(&mut self, path: Path, update: Update) {
        self.enqueue(StateOp::Write { path, update });
    }

    /// Queues a shallow patch of the state.
    pub fn patch(&mut self, patch: StatePatch) {
        self.enqueue(StateOp::Patch(patch));
    }

    fn enqueue(&mut self, op: StateOp) {
        if !self.mounted {
            tracing::warn!(?op, "Dropping state update issued after unmount");
            return;
        }
        self.queue.push(op);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Marks the owner mounted or unmounted. Unmounting discards queued work.
    pub fn set_mounted(&mut self, mounted: bool) {
        if !mounted && !self.queue.is_empty() {
            tracing::warn!(dropped = self.queue.len(), "Discarding queued updates on unmount");
            self.queue.clear();
        }
        self.mounted = mounted;
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Applies queued operations in order against `state`.
    ///
    /// Returns `Ok(None)` when nothing was queued. Otherwise the change
    /// callback is invoked exactly once with the final state, which is also
    /// returned. The queue is empty afterwards in every case.
    ///
    /// # Errors
    ///
    /// A write that the deep updater rejects aborts the whole batch; no
    /// callback is made.
    pub fn flush(&mut self, state: &FormState) -> Result<Option<FormState>, ModelError> {
        if self.queue.is_empty() {
            return Ok(None);
        }
        let ops = std::mem::take(&mut self.queue);
        let count = ops.len();
        let next = ops.into_iter().try_fold(state.clone(), |current, op| match op {
            StateOp::Write { path, update } => Ok(FormState {
                model: current.model.update(&path, update, PathMode::Lenient)?,
                status: current.status,
            }),
            StateOp::Patch(patch) => Ok(patch.apply(&current)),
        })?;
        tracing::debug!(operations = count, "Flushed state transition");
        if let Some(callback) = self.on_change.as_mut() {
            callback(&next);
        }
        Ok(Some(next))
    }
}

impl fmt::Debug for StateUpdater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateUpdater")
            .field("queue", &self.queue)
            .field("mounted", &self.mounted)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}
