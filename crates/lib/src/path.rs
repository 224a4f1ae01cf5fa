//! Path types for addressing locations inside a nested model.
//!
//! A [`Path`] is an ordered sequence of [`Segment`]s (property names or array
//! indices). Paths are plain values: two paths with the same canonical string
//! are the same field, whatever way they were built.
//!
//! # Usage
//!
//! ```rust
//! use formstate::{Path, PathBuilder, path};
//!
//! // Parse from text; bracket indices are accepted as input
//! let parsed: Path = "items[0].name".parse().unwrap();
//! assert_eq!(parsed.to_canonical_string(), "items.0.name");
//!
//! // Build explicitly
//! let built = PathBuilder::new().field("items").index(0).field("name").build();
//! assert_eq!(parsed, built);
//!
//! // Or with the macro
//! assert_eq!(path!("items", 0, "name"), built);
//! ```

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::constants::PATH_SEPARATOR;

/// Error type for path operations.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path has no parent (it is the root).
    #[error("Invalid path '{path}': the root has no parent")]
    InvalidPath { path: String },

    /// An operation needed at least one segment.
    #[error("Empty path: operation requires at least one segment")]
    EmptyPath,

    /// A segment was expected to be an array index.
    #[error("Segment '{segment}' is not a number")]
    NotANumber { segment: String },

    /// A segment cannot be represented in canonical form.
    #[error("Invalid segment '{segment}': {reason}")]
    InvalidSegment { segment: String, reason: String },
}

impl PathError {
    /// Check if this error was caused by an empty path
    pub fn is_empty_path(&self) -> bool {
        matches!(self, PathError::EmptyPath)
    }

    /// Check if this error was caused by a non-numeric index segment
    pub fn is_not_a_number(&self) -> bool {
        matches!(self, PathError::NotANumber { .. })
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// One step of a [`Path`]: a property name or an array index.
///
/// Equality follows the canonical text, so `Key("0")` and `Index(0)` are the
/// same segment.
#[derive(Debug, Clone)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    /// Creates a key segment, rejecting names that contain the separator.
    pub fn key(name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        if name.contains(PATH_SEPARATOR) {
            return Err(PathError::InvalidSegment {
                segment: name,
                reason: "segments cannot contain dots".to_string(),
            });
        }
        Ok(Segment::Key(name))
    }

    /// Parses one segment of text. Digit-only text becomes an index.
    pub fn parse(text: &str) -> Self {
        match canonical_index(text) {
            Some(index) => Segment::Index(index),
            None => Segment::Key(text.to_string()),
        }
    }

    /// Returns the segment as an array index, if it is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Key(key) => canonical_index(key),
        }
    }

    /// Returns the segment as a map key.
    pub fn to_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Segment::Key(a), Segment::Key(b)) => a == b,
            (Segment::Index(a), Segment::Index(b)) => a == b,
            (Segment::Key(key), Segment::Index(index))
            | (Segment::Index(index), Segment::Key(key)) => *key == index.to_string(),
        }
    }
}

impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Segment::Key(key) => key.hash(state),
            Segment::Index(index) => index.to_string().hash(state),
        }
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Segment::parse(text)
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Segment::parse(&text)
    }
}

/// Parses digit-only text without leading zeros.
fn canonical_index(text: &str) -> Option<usize> {
    let digits = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
    if !digits || (text.len() > 1 && text.starts_with('0')) {
        return None;
    }
    text.parse().ok()
}

/// Normalizes textual path input into canonical form.
///
/// - Bracket indices become plain segments: `a[0].b` → `a.0.b`
/// - Leading, trailing and repeated dots are dropped: `.a..b.` → `a.b`
/// - Empty input is the root path
///
/// ```rust
/// # use formstate::path::normalize_path;
/// assert_eq!(normalize_path(""), "");
/// assert_eq!(normalize_path("field[0]"), "field.0");
/// assert_eq!(normalize_path("grid[1][2].cell"), "grid.1.2.cell");
/// assert_eq!(normalize_path("..user..name."), "user.name");
/// ```
pub fn normalize_path(input: &str) -> String {
    split_components(input).collect::<Vec<_>>().join(".")
}

fn split_components(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(['.', '[', ']'])
        .filter(|component| !component.is_empty())
}

/// An owned, immutable location inside a nested value.
///
/// The empty path addresses the root value itself. Equality and hashing
/// follow the canonical string, so a key segment that contains the separator
/// equals the same text split into several segments.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses textual input. Never fails: see [`normalize_path`].
    pub fn parse(input: &str) -> Self {
        Self {
            segments: split_components(input).map(Segment::parse).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn to_segments(&self) -> Vec<Segment> {
        self.segments.clone()
    }

    /// Returns the `.`-joined form used as a map key.
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends `child` to this path. Either side may be empty.
    pub fn concat(&self, child: &Path) -> Path {
        if self.is_empty() {
            return child.clone();
        }
        if child.is_empty() {
            return self.clone();
        }
        let mut segments = Vec::with_capacity(self.len() + child.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&child.segments);
        Path { segments }
    }

    /// Returns a new path with one more segment.
    pub fn join(&self, segment: impl Into<Segment>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Path { segments }
    }

    /// Returns the path minus its last segment.
    pub fn parent(&self) -> Result<Path, PathError> {
        match self.segments.split_last() {
            Some((_, rest)) => Ok(Path {
                segments: rest.to_vec(),
            }),
            None => Err(PathError::InvalidPath {
                path: self.to_canonical_string(),
            }),
        }
    }

    /// Returns the last segment.
    pub fn head(&self) -> Result<&Segment, PathError> {
        self.segments.last().ok_or(PathError::EmptyPath)
    }

    /// Returns the last segment as an array index.
    pub fn head_as_index(&self) -> Result<usize, PathError> {
        let head = self.head()?;
        head.as_index().ok_or_else(|| PathError::NotANumber {
            segment: head.to_string(),
        })
    }

    /// Returns true if `prefix` is a leading run of this path's segments,
    /// compared in canonical form.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        if prefix.is_empty() || self.segments.starts_with(&prefix.segments) {
            return true;
        }
        let own = self.to_canonical_string();
        let prefix = prefix.to_canonical_string();
        own.strip_prefix(&prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(PATH_SEPARATOR))
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
            || self.to_canonical_string() == other.to_canonical_string()
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_canonical_string().hash(state);
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Path::parse(&text))
    }
}

/// Immutable builder that records segments explicitly.
///
/// Every call returns a new builder, so a common prefix can be reused:
///
/// ```rust
/// # use formstate::PathBuilder;
/// let address = PathBuilder::new().field("address");
/// let street = address.field("street").build();
/// let city = address.field("city").build();
/// assert_eq!(street.to_string(), "address.street");
/// assert_eq!(city.to_string(), "address.city");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing path.
    pub fn from_path(path: Path) -> Self {
        Self { path }
    }

    /// Descends into a named property. A name containing the separator
    /// descends once per component, as [`Path::parse`] would.
    pub fn field(&self, name: impl AsRef<str>) -> Self {
        Self {
            path: self.path.concat(&Path::parse(name.as_ref())),
        }
    }

    /// Descends into an array element.
    pub fn index(&self, index: usize) -> Self {
        Self {
            path: self.path.join(Segment::Index(index)),
        }
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl From<PathBuilder> for Path {
    fn from(builder: PathBuilder) -> Self {
        builder.build()
    }
}

/// Constructs a [`Path`] from any mix of literals and runtime values.
///
/// Each argument is formatted and parsed, so `"a.b"` contributes two segments
/// and integers become indices.
///
/// ```rust
/// # use formstate::path;
/// let base = "user";
/// let p = path!(base, "emails", 2);
/// assert_eq!(p.to_string(), "user.emails.2");
/// assert!(path!().is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::path::Path::root()
    };

    ($($part:expr),+ $(,)?) => {{
        let mut path = $crate::path::Path::root();
        $(
            path = path.concat(&$crate::path::Path::parse(&$part.to_string()));
        )+
        path
    }};
}
