//! Typed paths for hierarchical document access.
//!
//! A path is an ordered list of [`Segment`]s supplied by the caller; there
//! is no string syntax to parse. Each segment is either a scalar [`Key`]
//! (string or integer) or the append sentinel [`Segment::Append`], which
//! addresses the next free integer key of the container being written.
//!
//! # Core Types
//!
//! - [`Key`] - A scalar map key (integer or text)
//! - [`Segment`] - One path step (a key or the append sentinel)
//! - [`Path`] - An owned list of segments
//! - [`IntoPath`] - Conversion trait making the [`Document`](super::Document)
//!   operations generic over path-like arguments
//!
//! # Usage
//!
//! ```rust
//! use keytree::{Path, Segment, path};
//!
//! // Build incrementally
//! let path = Path::new().push("user").push("profile").push("name");
//! assert_eq!(path.len(), 3);
//!
//! // Or with the macro
//! let path = path!["user", "profile", "name"];
//! assert_eq!(path.len(), 3);
//!
//! // Append positions are ordinary segments
//! let path = path!["tags", Segment::Append];
//! assert!(path.leaf().is_some_and(Segment::is_append));
//! ```

use std::fmt;

use super::value::Value;
use crate::errors::DocError;

/// A scalar map key: an integer or a text string.
///
/// Containers accept both key types side by side; a container whose keys
/// are exactly the integers `0..n-1` in order classifies as a sequence
/// (see [`Document::is_sequence`](super::Document::is_sequence)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key
    Int(i64),
    /// Text key
    Text(String),
}

impl Key {
    /// Returns the integer form of this key, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Text(_) => None,
        }
    }

    /// Returns the text form of this key, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}

/// One step of a path: a scalar key or the append sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A scalar key addressing an existing or to-be-created entry
    Key(Key),
    /// The append sentinel: addresses the next free integer key of the
    /// container being written. Appends never match on reads, so a path
    /// containing one resolves to nothing outside of a write.
    Append,
}

impl Segment {
    /// Returns the key of this segment, if it is not the append sentinel.
    pub fn as_key(&self) -> Option<&Key> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Append => None,
        }
    }

    /// Returns true if this segment is the append sentinel.
    pub fn is_append(&self) -> bool {
        matches!(self, Segment::Append)
    }

    /// Converts an untyped value into a path segment.
    ///
    /// Null is the append sentinel; integers and text become keys. Any
    /// other value shape is rejected: path keys must be scalars.
    pub fn from_value(value: &Value) -> Result<Self, DocError> {
        match value {
            Value::Null => Ok(Segment::Append),
            Value::Int(n) => Ok(Segment::Key(Key::Int(*n))),
            Value::Text(s) => Ok(Segment::Key(Key::Text(s.clone()))),
            other => Err(DocError::InvalidKey {
                reason: format!(
                    "path keys must be strings or integers, found {}",
                    other.type_name()
                ),
            }),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{key}"),
            Segment::Append => write!(f, "[]"),
        }
    }
}

impl From<Key> for Segment {
    fn from(key: Key) -> Self {
        Segment::Key(key)
    }
}

impl From<i64> for Segment {
    fn from(value: i64) -> Self {
        Segment::Key(Key::Int(value))
    }
}

impl From<i32> for Segment {
    fn from(value: i32) -> Self {
        Segment::Key(Key::Int(value as i64))
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Key(Key::Text(value.to_string()))
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Key(Key::Text(value))
    }
}

/// An owned, ordered list of path segments.
///
/// The empty path addresses nothing: reads on it miss, writes and deletes
/// on it are no-ops. A single-segment path addresses the top level of a
/// container.
///
/// # Examples
///
/// ```rust
/// # use keytree::{Path, Segment};
/// let path = Path::new().push("user").push(0).push("name");
///
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.leaf(), Some(&Segment::from("name")));
/// assert_eq!(path.parent(), Some(Path::new().push("user").push(0)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Creates the empty path addressing the container root.
    pub fn root() -> Self {
        Self::new()
    }

    /// Creates a single-key path addressing a top-level entry.
    pub fn key(key: impl Into<Key>) -> Self {
        Self {
            segments: vec![Segment::Key(key.into())],
        }
    }

    /// Creates a single-segment path addressing the top-level append
    /// position.
    pub fn append() -> Self {
        Self {
            segments: vec![Segment::Append],
        }
    }

    /// Adds a segment to the end of this path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use keytree::{Path, Segment};
    /// let path = Path::new().push("list").push(Segment::Append);
    /// assert_eq!(path.len(), 2);
    /// ```
    pub fn push(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Creates a path from a sequence of segments.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Self {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Creates a path from untyped values, validating each one.
    ///
    /// Null values become the append sentinel; integers and text become
    /// keys. A non-scalar element is rejected with
    /// [`DocError::InvalidKey`].
    pub fn from_values(values: &[Value]) -> Result<Self, DocError> {
        let segments = values
            .iter()
            .map(Segment::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments in the path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the last segment of the path, or `None` if empty.
    pub fn leaf(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Returns the path without its last segment, or `None` if empty.
    pub fn parent(&self) -> Option<Path> {
        let (_, parent) = self.segments.split_last()?;
        Some(Path {
            segments: parent.to_vec(),
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Path::from_segments(iter)
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Path { segments }
    }
}

/// Conversion into a typed [`Path`].
///
/// Document operations are generic over this trait so that plain keys,
/// built paths, and untyped value lists can all be used as the path
/// argument. Conversions from untyped values are fallible: a non-scalar
/// key is rejected with [`DocError::InvalidKey`] before any traversal
/// happens.
pub trait IntoPath {
    /// Converts self into an owned path, rejecting malformed keys.
    fn into_path(self) -> Result<Path, DocError>;
}

impl IntoPath for Path {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(self)
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(self.clone())
    }
}

impl IntoPath for Segment {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(Path::from_segments([self]))
    }
}

impl IntoPath for Key {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(Path::key(self))
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(Path::key(self))
    }
}

impl IntoPath for String {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(Path::key(self))
    }
}

impl IntoPath for i64 {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(Path::key(self))
    }
}

impl IntoPath for &[Segment] {
    fn into_path(self) -> Result<Path, DocError> {
        Ok(Path::from_segments(self.iter().cloned()))
    }
}

impl IntoPath for &[Value] {
    fn into_path(self) -> Result<Path, DocError> {
        Path::from_values(self)
    }
}

impl IntoPath for &Vec<Value> {
    fn into_path(self) -> Result<Path, DocError> {
        Path::from_values(self)
    }
}

impl IntoPath for Vec<Value> {
    fn into_path(self) -> Result<Path, DocError> {
        Path::from_values(&self)
    }
}

impl<const N: usize> IntoPath for &[Value; N] {
    fn into_path(self) -> Result<Path, DocError> {
        Path::from_values(self.as_slice())
    }
}

/// Builds a [`Path`] from a comma-separated list of segment expressions.
///
/// Anything convertible into a [`Segment`] works: string and integer
/// keys, [`Key`] values, and `Segment::Append` for append positions.
///
/// # Examples
///
/// ```rust
/// use keytree::{Segment, path};
///
/// let nested = path!["user", "profile", "name"];
/// assert_eq!(nested.len(), 3);
///
/// let append = path!["tags", Segment::Append];
/// assert!(append.leaf().is_some_and(Segment::is_append));
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::doc::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::doc::Path::from_segments([$($crate::doc::Segment::from($segment)),+])
    };
}
