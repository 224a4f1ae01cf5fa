//! Persistent (copy-on-path) updates of nested values.
//!
//! An update walks the path, copies each container on the way (a shallow copy:
//! the children are reference-counted, so only the spine is duplicated) and
//! replaces or removes the terminal entry. The original root is never touched.

use std::sync::Arc;

use crate::path::Path;

use super::{
    ModelError, Value,
    access::{not_found, snapshot},
};

/// What to write at the end of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Assign a value.
    Set(Value),
    /// Remove the entry: a map key is deleted, a list element is spliced out
    /// and later elements shift down by one.
    Delete,
}

impl Update {
    pub fn set(value: impl Into<Value>) -> Self {
        Update::Set(value.into())
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Update::Delete)
    }
}

impl From<Value> for Update {
    fn from(value: Value) -> Self {
        Update::Set(value)
    }
}

/// How to treat path segments that do not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMode {
    /// Every segment, including the last, must already exist.
    #[default]
    Strict,
    /// Missing intermediate containers are created as empty maps.
    Lenient,
}

impl Value {
    /// Returns a new root with `path` replaced or removed.
    ///
    /// # Errors
    ///
    /// * `ModelError::EmptyPath` if `path` has no segments.
    /// * `ModelError::PathNotFound` in strict mode when any segment is missing.
    /// * `ModelError::TypeMismatch` when a list is addressed with a non-index key.
    /// * `ModelError::IndexOutOfRange` when a list index is past the end. Writing
    ///   at exactly the length appends.
    pub fn update(&self, path: &Path, update: Update, mode: PathMode) -> Result<Value, ModelError> {
        if path.is_empty() {
            return Err(ModelError::EmptyPath);
        }
        write(self, path, 0, update, mode)
    }
}

/// Lenient deep write by textual path.
///
/// ```
/// # use formstate::value::{Value, set_by_path};
/// let model = Value::empty_map();
/// let next = set_by_path(&model, "user.emails[0]", "ada@example.com").unwrap();
/// assert_eq!(next.to_string(), r#"{"user":{"emails":{"0":"ada@example.com"}}}"#);
/// ```
pub fn set_by_path(root: &Value, path: &str, value: impl Into<Value>) -> Result<Value, ModelError> {
    root.update(&Path::parse(path), Update::Set(value.into()), PathMode::Lenient)
}

fn write(
    node: &Value,
    path: &Path,
    depth: usize,
    update: Update,
    mode: PathMode,
) -> Result<Value, ModelError> {
    let segment = &path.segments()[depth];
    if depth + 1 == path.len() {
        return write_terminal(node, path, depth, update, mode);
    }

    let child = match node.child(segment) {
        Some(child) => write(child, path, depth + 1, update, mode)?,
        None if mode == PathMode::Strict => return Err(not_found(node, path, depth, segment)),
        // Nothing below a missing container to delete
        None if update.is_delete() => return Ok(node.clone()),
        None => write(&Value::empty_map(), path, depth + 1, update, mode)?,
    };
    replace_child(node, path, depth, child)
}

fn write_terminal(
    node: &Value,
    path: &Path,
    depth: usize,
    update: Update,
    mode: PathMode,
) -> Result<Value, ModelError> {
    let segment = &path.segments()[depth];
    if mode == PathMode::Strict && node.child(segment).is_none() {
        return Err(not_found(node, path, depth, segment));
    }
    match update {
        Update::Set(value) => replace_child(node, path, depth, value),
        Update::Delete => Ok(remove_child(node, path, depth)),
    }
}

fn replace_child(
    container: &Value,
    path: &Path,
    depth: usize,
    child: Value,
) -> Result<Value, ModelError> {
    let segment = &path.segments()[depth];
    match container {
        Value::Map(entries) => {
            let mut entries = (**entries).clone();
            entries.insert(segment.to_key(), child);
            Ok(Value::Map(Arc::new(entries)))
        }
        Value::List(items) => {
            let index = segment.as_index().ok_or_else(|| ModelError::TypeMismatch {
                path: prefix(path, depth),
                expected: "list index".to_string(),
                actual: format!("key '{segment}' into {}", snapshot(container)),
            })?;
            if index > items.len() {
                return Err(ModelError::IndexOutOfRange {
                    path: prefix(path, depth),
                    index,
                    len: items.len(),
                });
            }
            let mut items = (**items).clone();
            if index < items.len() {
                items[index] = child;
            } else {
                items.push(child);
            }
            Ok(Value::List(Arc::new(items)))
        }
        // Only reachable in lenient mode: scalars are replaced by a new map
        _ => Ok(Value::map([(segment.to_key(), child)])),
    }
}

fn remove_child(container: &Value, path: &Path, depth: usize) -> Value {
    let segment = &path.segments()[depth];
    match container {
        Value::Map(entries) if entries.contains_key(&segment.to_key()) => {
            let mut entries = (**entries).clone();
            entries.remove(&segment.to_key());
            Value::Map(Arc::new(entries))
        }
        Value::List(items) => match segment.as_index() {
            Some(index) if index < items.len() => {
                let mut items = (**items).clone();
                items.remove(index);
                Value::List(Arc::new(items))
            }
            _ => container.clone(),
        },
        _ => container.clone(),
    }
}

fn prefix(path: &Path, depth: usize) -> String {
    Path::from(path.segments()[..depth].to_vec()).to_canonical_string()
}
