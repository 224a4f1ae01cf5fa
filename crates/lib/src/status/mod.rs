//! Per-field dirty/touched flags.
//!
//! A [`StatusMap`] only holds entries for paths the UI has mounted; a missing
//! entry reads as [`FieldStatus::default`]. Every operation returns a map, and
//! returns the very same allocation when nothing changed, so callers can skip
//! work with [`StatusMap::ptr_eq`].

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    path::Path,
    register::{FieldRegister, RegisterEvent},
};

/// Dirty/touched flags of one field.
///
/// `pristine` and `untouched` are derived, never stored, so they cannot
/// disagree with `dirty` and `touched`. All four appear when serialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "StatusRecord", from = "StatusRecord")]
pub struct FieldStatus {
    dirty: bool,
    touched: bool,
}

impl FieldStatus {
    pub fn new(dirty: bool, touched: bool) -> Self {
        Self { dirty, touched }
    }

    /// The value was changed by the user since mount.
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn pristine(&self) -> bool {
        !self.dirty
    }

    /// The field lost focus, or was force-touched on submit, at least once.
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn untouched(&self) -> bool {
        !self.touched
    }

    pub fn with_dirty(self) -> Self {
        Self {
            dirty: true,
            ..self
        }
    }

    pub fn with_touched(self) -> Self {
        Self {
            touched: true,
            ..self
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StatusRecord {
    dirty: bool,
    #[serde(default)]
    pristine: bool,
    touched: bool,
    #[serde(default)]
    untouched: bool,
}

impl From<FieldStatus> for StatusRecord {
    fn from(status: FieldStatus) -> Self {
        Self {
            dirty: status.dirty,
            pristine: status.pristine(),
            touched: status.touched,
            untouched: status.untouched(),
        }
    }
}

impl From<StatusRecord> for FieldStatus {
    fn from(record: StatusRecord) -> Self {
        FieldStatus::new(record.dirty, record.touched)
    }
}

/// Canonical path string → [`FieldStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusMap {
    entries: Arc<BTreeMap<String, FieldStatus>>,
}

impl StatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status of `path`, or the default status if it has no entry.
    pub fn get(&self, path: &Path) -> FieldStatus {
        self.entries
            .get(&path.to_canonical_string())
            .copied()
            .unwrap_or_default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(&path.to_canonical_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldStatus)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True if both maps are the same allocation.
    pub fn ptr_eq(&self, other: &StatusMap) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Sets `dirty` on a live field. Unregistered paths are ignored.
    pub fn mark_dirty(&self, register: &FieldRegister, path: &Path) -> StatusMap {
        self.patch_live(register, path, FieldStatus::with_dirty)
    }

    /// Sets `touched` on a live field. Unregistered paths are ignored.
    pub fn mark_touched(&self, register: &FieldRegister, path: &Path) -> StatusMap {
        self.patch_live(register, path, FieldStatus::with_touched)
    }

    /// Applies [`mark_touched`](Self::mark_touched) to every existing entry.
    pub fn mark_all_touched(&self, register: &FieldRegister) -> StatusMap {
        let keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.iter().fold(self.clone(), |status, key| {
            status.mark_touched(register, &Path::parse(key))
        })
    }

    /// Inserts the default status for `path` unless it already has one.
    pub fn add_if_missing(&self, path: &Path) -> StatusMap {
        let key = path.to_canonical_string();
        if self.entries.contains_key(&key) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.insert(key, FieldStatus::default());
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Removes the entry for `path` if there is one.
    pub fn remove_if_present(&self, path: &Path) -> StatusMap {
        let key = path.to_canonical_string();
        if !self.entries.contains_key(&key) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.remove(&key);
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Reconciles the map with a flushed register batch.
    ///
    /// Registered paths get a default entry; unregistered paths lose theirs
    /// unless another instance of the same path is still live.
    pub fn apply_register_event(&self, event: &RegisterEvent, register: &FieldRegister) -> StatusMap {
        let added = event
            .registered
            .iter()
            .fold(self.clone(), |status, path| status.add_if_missing(path));
        event
            .unregistered
            .iter()
            .filter(|path| !register.includes_path(path))
            .fold(added, |status, path| status.remove_if_present(path))
    }

    /// Resets every entry to the default status, keeping the keys.
    pub fn reset(&self) -> StatusMap {
        if self.entries.values().all(|status| *status == FieldStatus::default()) {
            return self.clone();
        }
        Self {
            entries: Arc::new(
                self.entries
                    .keys()
                    .map(|key| (key.clone(), FieldStatus::default()))
                    .collect(),
            ),
        }
    }

    fn patch_live(
        &self,
        register: &FieldRegister,
        path: &Path,
        patch: impl FnOnce(FieldStatus) -> FieldStatus,
    ) -> StatusMap {
        if !register.includes_path(path) {
            tracing::trace!(path = %path, "Ignoring status update for unregistered field");
            return self.clone();
        }
        let current = self.get(path);
        let next = patch(current);
        if next == current && self.contains(path) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.insert(path.to_canonical_string(), next);
        Self {
            entries: Arc::new(entries),
        }
    }
}
