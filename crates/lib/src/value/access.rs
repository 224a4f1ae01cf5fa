//! Read access to nested values by path.

use crate::{
    constants::SNAPSHOT_LIMIT,
    path::{Path, Segment},
};

use super::{ModelError, Value};

impl Value {
    /// Returns the value at `path`, failing if any segment is missing.
    ///
    /// The empty path returns `self`.
    ///
    /// # Errors
    ///
    /// `ModelError::PathNotFound` names the first missing key, the path walked
    /// so far and a snapshot of the container that lacked the key.
    pub fn select(&self, path: &Path) -> Result<&Value, ModelError> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = match current.child(segment) {
                Some(next) => next,
                None => return Err(not_found(current, path, depth, segment)),
            };
        }
        Ok(current)
    }

    /// Returns the value at `path`, or `None` as soon as a segment is missing.
    pub fn get_path(&self, path: &Path) -> Option<&Value> {
        path.segments()
            .iter()
            .try_fold(self, |current, segment| current.child(segment))
    }
}

/// Non-asserting lookup by textual path.
///
/// ```
/// # use formstate::value::{Value, get_by_path};
/// # use serde_json::json;
/// let model = Value::from(json!({"a": [{"b": 1}]}));
/// assert_eq!(get_by_path(&model, "a[0].b"), Some(&Value::Int(1)));
/// assert_eq!(get_by_path(&model, "a.1.b"), None);
/// ```
pub fn get_by_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    root.get_path(&Path::parse(path))
}

pub(super) fn not_found(container: &Value, path: &Path, depth: usize, key: &Segment) -> ModelError {
    ModelError::PathNotFound {
        key: key.to_string(),
        path: Path::from(path.segments()[..depth].to_vec()).to_canonical_string(),
        container: snapshot(container),
    }
}

/// Stringified container for diagnostics, truncated on a char boundary.
pub(super) fn snapshot(container: &Value) -> String {
    let mut text = container.to_string();
    if text.len() > SNAPSHOT_LIMIT {
        let mut cut = SNAPSHOT_LIMIT;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
