//! Document containers with path-addressed access.
//!
//! This module provides the main public interface for nested key/value
//! data. The [`Document`] type is the container: an insertion-ordered
//! collection of scalar-keyed entries whose values may themselves be
//! containers, addressed to arbitrary depth by typed [`Path`]s.
//!
//! # Design
//!
//! - **One container type**: maps and sequences are the same structure;
//!   "sequence" is a classification recomputed from key shape, never a
//!   stored tag (see [`Document::is_sequence`]).
//! - **Misses are not errors**: reading or deleting a path that does not
//!   resolve is a normal `None`/no-op outcome. Only malformed input
//!   (non-scalar keys, non-structural sources, appends into scalars)
//!   surfaces as a typed error.
//! - **Writes create structure**: setting through missing intermediate
//!   segments creates empty containers on the way down, and deleting a
//!   leaf prunes ancestors that become empty on the way back up.
//!
//! # Usage
//!
//! ```
//! use keytree::{Document, path};
//!
//! let mut doc = Document::new();
//! doc.set("name", "Alice")?;
//! doc.set(path!["user", "profile", "bio"], "Software developer")?;
//!
//! assert_eq!(doc.get_as::<&str>("name"), Some("Alice"));
//! assert!(doc.exists(path!["user", "profile", "bio"])?);
//!
//! doc.delete(path!["user", "profile", "bio"])?;
//! assert!(!doc.exists("user")?); // emptied ancestors are pruned
//! # Ok::<(), keytree::Error>(())
//! ```

use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::errors::DocError;

pub mod path;
mod plain;
mod resolve;
mod schema;
pub mod value;

// Convenience re-exports for core document types
pub use path::{IntoPath, Key, Path, Segment};
pub use value::Value;

// Re-export the macro from crate root
pub use crate::path;

/// A recursively-nested, insertion-ordered key/value container with
/// path-addressed access.
///
/// `Document` is the only container type: entries are keyed by scalar
/// [`Key`]s (integer or text) in insertion order, and values may be
/// scalars, opaque records, or nested documents. Every operation takes a
/// path (an ordered list of segments), so values buried at arbitrary
/// depth are read, written, tested, and deleted with a single call.
///
/// # Core Operations
///
/// - **Data access**: [`get`](Self::get), [`get_as`](Self::get_as),
///   [`exists`](Self::exists)
/// - **Data modification**: [`set`](Self::set), [`delete`](Self::delete),
///   [`push`](Self::push)
/// - **Introspection**: [`schema`](Self::schema),
///   [`is_sequence`](Self::is_sequence)
/// - **Export**: [`to_plain`](Self::to_plain),
///   [`shallow_copy`](Self::shallow_copy)
///
/// # Examples
///
/// ## Basic Operations
/// ```
/// # use keytree::Document;
/// let mut doc = Document::new();
/// doc.set("name", "Alice")?;
/// doc.set("age", 30)?;
///
/// assert_eq!(doc.get_as::<&str>("name"), Some("Alice"));
/// assert_eq!(doc.get_as::<i64>("age"), Some(30));
/// # Ok::<(), keytree::Error>(())
/// ```
///
/// ## Path Operations
/// ```
/// # use keytree::{Document, Segment, path};
/// let mut doc = Document::new();
///
/// // Writing through missing segments creates the intermediate maps.
/// doc.set(path!["x", "y", "z"], 1)?;
/// assert_eq!(doc.get_as::<i64>(path!["x", "y", "z"]), Some(1));
///
/// // Appends address the next free integer key.
/// doc.set(path!["tags", Segment::Append], "fast")?;
/// assert_eq!(doc.get_as::<&str>(path!["tags", 0]), Some("fast"));
/// # Ok::<(), keytree::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Entries in insertion order, keyed by scalar keys
    entries: IndexMap<Key, Value>,
}

impl Document {
    /// Creates a new empty document
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns the number of top-level entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Classifies this container as array-like.
    ///
    /// A document is a sequence when its keys are exactly the integers
    /// `0..n-1` in ascending order; the empty document qualifies
    /// vacuously. The classification is recomputed on every call rather
    /// than stored, since any mutation can change it: deleting from the
    /// middle of a sequence leaves a keyed map with a hole.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::Document;
    /// let mut doc = Document::new();
    /// doc.push("a");
    /// doc.push("b");
    /// assert!(doc.is_sequence());
    ///
    /// doc.delete(0)?;
    /// assert!(!doc.is_sequence()); // keys are now {1}
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn is_sequence(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(position, key)| matches!(key, Key::Int(n) if *n == position as i64))
    }

    /// Returns true if the top level contains the given key
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Returns true if the path resolves to a stored value.
    ///
    /// The empty path and paths containing append segments never match.
    /// A miss is a normal `false`; only a malformed key errors.
    pub fn exists(&self, path: impl IntoPath) -> crate::Result<bool> {
        let path = path.into_path()?;
        Ok(self.node_at(path.segments()).is_some())
    }

    /// Gets the value at a path, or `None` if the path does not resolve.
    ///
    /// Getting a non-existent path never signals an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::{Document, Value, path};
    /// let mut doc = Document::new();
    /// doc.set(path!["a", "b"], 7)?;
    ///
    /// assert_eq!(doc.get(path!["a", "b"])?, Some(&Value::Int(7)));
    /// assert_eq!(doc.get(path!["a", "missing"])?, None);
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn get(&self, path: impl IntoPath) -> crate::Result<Option<&Value>> {
        let path = path.into_path()?;
        Ok(self.node_at(path.segments()))
    }

    /// Gets a mutable reference to the value at a path.
    ///
    /// The reference is tied to the borrow of this document, so it cannot
    /// outlive the operation or survive a later mutating call.
    pub fn get_mut(&mut self, path: impl IntoPath) -> crate::Result<Option<&mut Value>> {
        let path = path.into_path()?;
        Ok(self.node_at_mut(path.segments()))
    }

    /// Gets a value by path with automatic type conversion using TryFrom.
    ///
    /// Returns `Some(T)` if the path resolves and the value converts to
    /// `T`; `None` on a miss, a malformed path, or a type mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::Document;
    /// let mut doc = Document::new();
    /// doc.set("name", "Alice")?;
    /// doc.set("age", 30)?;
    ///
    /// assert_eq!(doc.get_as::<&str>("name"), Some("Alice"));
    /// assert_eq!(doc.get_as::<i64>("age"), Some(30));
    /// assert_eq!(doc.get_as::<i64>("name"), None); // type mismatch
    /// assert_eq!(doc.get_as::<i64>("missing"), None);
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn get_as<'a, T>(&'a self, path: impl IntoPath) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = DocError>,
    {
        let value = self.get(path).ok().flatten()?;
        T::try_from(value).ok()
    }

    /// Gets a reference to a nested document at a path
    pub fn get_doc(&self, path: impl IntoPath) -> crate::Result<Option<&Document>> {
        Ok(self.get(path)?.and_then(|value| value.as_doc()))
    }

    /// Gets a mutable reference to a nested document at a path
    pub fn get_doc_mut(&mut self, path: impl IntoPath) -> crate::Result<Option<&mut Document>> {
        Ok(self.get_mut(path)?.and_then(|value| value.as_doc_mut()))
    }

    /// Sets the value at a path, returning the displaced value if any.
    ///
    /// Missing intermediate segments are created as empty documents on
    /// the way down; a non-container value found at an intermediate
    /// position is silently replaced by an empty document (the original
    /// value is lost; a `debug` event records it). Writing
    /// [`Value::Null`] deletes the path instead of storing anything, and
    /// the empty path is a no-op.
    ///
    /// Append segments create a fresh element at the next free integer
    /// key. A final append into a value that is not a container fails
    /// with [`DocError::AppendTargetNotStructure`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::{Document, Segment, path};
    /// let mut doc = Document::new();
    ///
    /// // Auto-vivification
    /// doc.set(path!["x", "y", "z"], 1)?;
    ///
    /// // Append a fresh map element and set a field on it in one call
    /// doc.set(path!["items", Segment::Append, "kind"], "widget")?;
    /// assert_eq!(doc.get_as::<&str>(path!["items", 0, "kind"]), Some("widget"));
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn set(&mut self, path: impl IntoPath, value: impl Into<Value>) -> crate::Result<Option<Value>> {
        let path = path.into_path()?;
        let value = value.into();
        if value.is_null() {
            // Null is never stored: writing it deletes the path.
            return self.delete(path);
        }
        let segments = path.segments();
        match segments {
            [] => Ok(None),
            [Segment::Key(key)] => Ok(self.entries.insert(key.clone(), value)),
            [Segment::Append] => {
                self.push_raw(value);
                Ok(None)
            }
            _ => self.set_nested(segments, value),
        }
    }

    /// Appends a value at the next free integer key, returning the key.
    ///
    /// The next free key is one past the largest non-negative integer key
    /// present, or `0` for a document without integer keys. Null values
    /// are not stored and return `None`.
    pub fn push(&mut self, value: impl Into<Value>) -> Option<Key> {
        match value.into() {
            Value::Null => None,
            value => Some(self.push_raw(value)),
        }
    }

    /// Deletes the value at a path, returning it if it was present.
    ///
    /// A path that does not fully resolve is a silent no-op. After the
    /// leaf is removed, ancestors that became empty are removed in turn,
    /// walking up until the first non-empty one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::{Document, path};
    /// let mut doc = Document::new();
    /// doc.set(path!["a", "b", "c"], "v")?;
    ///
    /// doc.delete(path!["a", "b", "c"])?;
    /// assert!(doc.is_empty()); // "b" and then "a" were pruned
    ///
    /// // Deleting again is a no-op
    /// assert_eq!(doc.delete(path!["a", "b", "c"])?, None);
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn delete(&mut self, path: impl IntoPath) -> crate::Result<Option<Value>> {
        let path = path.into_path()?;
        let segments = path.segments();
        Ok(match segments {
            [] => None,
            [Segment::Key(key)] => self.entries.shift_remove(key),
            [Segment::Append] => None,
            _ => self.delete_nested(segments),
        })
    }

    /// Returns an iterator over the top-level entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over the top-level entries
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over the top-level keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Returns an iterator over the top-level values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Returns a mutable iterator over the top-level values
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.values_mut()
    }

    /// Removes all entries from this document
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Gets or inserts a value at a path, returning a mutable reference.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::Document;
    /// let mut doc = Document::new();
    ///
    /// doc.get_or_insert("counter", 0)?;
    /// assert_eq!(doc.get_as::<i64>("counter"), Some(0));
    ///
    /// doc.set("counter", 5)?;
    /// doc.get_or_insert("counter", 100)?;
    /// assert_eq!(doc.get_as::<i64>("counter"), Some(5));
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn get_or_insert(
        &mut self,
        path: impl IntoPath,
        default: impl Into<Value>,
    ) -> crate::Result<&mut Value> {
        let path = path.into_path()?;
        if !self.exists(&path)? {
            self.set(&path, default)?;
        }
        match self.get_mut(&path)? {
            Some(value) => Ok(value),
            None => Err(DocError::ElementNotFound {
                key: path.to_string(),
            }
            .into()),
        }
    }

    /// Modifies a typed value in place using a closure.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve
    /// (`DocError::ElementNotFound`) or the value cannot be converted to
    /// `T` (`DocError::TypeMismatch`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::Document;
    /// let mut doc = Document::new();
    /// doc.set("count", 5)?;
    ///
    /// doc.modify::<i64, _>("count", |count| {
    ///     *count += 10;
    /// })?;
    /// assert_eq!(doc.get_as::<i64>("count"), Some(15));
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn modify<T, F>(&mut self, path: impl IntoPath, f: F) -> crate::Result<()>
    where
        T: for<'a> TryFrom<&'a Value, Error = DocError> + Into<Value>,
        F: FnOnce(&mut T),
    {
        let path = path.into_path()?;
        let Some(value) = self.node_at(path.segments()) else {
            return Err(DocError::ElementNotFound {
                key: path.to_string(),
            }
            .into());
        };
        let mut typed = T::try_from(value)?;
        f(&mut typed);
        self.set(path, typed)?;
        Ok(())
    }

    /// Stores any serializable value as JSON text at a path
    pub fn set_json<T>(&mut self, path: impl IntoPath, value: &T) -> crate::Result<Option<Value>>
    where
        T: serde::Serialize + ?Sized,
    {
        let json = serde_json::to_string(value).map_err(|e| DocError::SerializationFailed {
            reason: e.to_string(),
        })?;
        self.set(path, Value::Text(json))
    }

    /// Retrieves JSON text stored at a path, deserialized into `T`
    pub fn get_json<T>(&self, path: impl IntoPath) -> crate::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let path = path.into_path()?;
        let value = self
            .node_at(path.segments())
            .ok_or_else(|| DocError::ElementNotFound {
                key: path.to_string(),
            })?;
        match value {
            Value::Text(json) => serde_json::from_str(json).map_err(|e| {
                DocError::DeserializationFailed {
                    reason: format!("failed to deserialize JSON at '{path}': {e}"),
                }
                .into()
            }),
            other => Err(DocError::TypeMismatch {
                expected: "text (JSON string)".to_string(),
                actual: other.type_name().to_string(),
            }
            .into()),
        }
    }
}

// Path machinery shared by the facade operations
impl Document {
    /// Resolves a segment list to the exact node it addresses, if any.
    fn node_at(&self, segments: &[Segment]) -> Option<&Value> {
        if segments.is_empty() {
            return None;
        }
        let (node, remainder) = resolve::resolve(self, segments);
        if remainder.is_empty() { node } else { None }
    }

    fn node_at_mut(&mut self, segments: &[Segment]) -> Option<&mut Value> {
        if segments.is_empty() {
            return None;
        }
        let (node, remainder) = resolve::resolve_mut(self, segments);
        if remainder.is_empty() { node } else { None }
    }

    /// Next free integer key: one past the largest non-negative one.
    fn next_index(&self) -> i64 {
        self.entries
            .keys()
            .filter_map(Key::as_int)
            .filter(|n| *n >= 0)
            .max()
            .map_or(0, |n| n + 1)
    }

    fn push_raw(&mut self, value: Value) -> Key {
        let key = Key::Int(self.next_index());
        self.entries.insert(key.clone(), value);
        key
    }

    fn set_nested(&mut self, segments: &[Segment], value: Value) -> crate::Result<Option<Value>> {
        let (node, remainder) = resolve::resolve_mut(self, segments);
        match node {
            Some(node) if remainder.is_empty() => {
                // The whole path already resolves: overwrite in place.
                Ok(Some(std::mem::replace(node, value)))
            }
            Some(node) => vivify_and_write(node, remainder, value).map_err(Into::into),
            None => {
                // Nothing matched: enter (or create) the top-level slot
                // and continue from there.
                let (first, rest) = match segments.split_first() {
                    Some(split) => split,
                    None => unreachable!("nested set with an empty path"),
                };
                let cursor = match first {
                    Segment::Key(key) => self
                        .entries
                        .entry(key.clone())
                        .or_insert_with(|| Value::Doc(Document::new())),
                    Segment::Append => {
                        let key = Key::Int(self.next_index());
                        self.entries
                            .entry(key)
                            .or_insert_with(|| Value::Doc(Document::new()))
                    }
                };
                vivify_and_write(cursor, rest, value).map_err(Into::into)
            }
        }
    }

    fn delete_nested(&mut self, segments: &[Segment]) -> Option<Value> {
        let leaf = match segments.last() {
            Some(segment) => segment,
            None => unreachable!("nested delete with an empty path"),
        };
        // Append leaves address nothing: nothing to delete.
        let Segment::Key(leaf_key) = leaf else {
            return None;
        };
        let removed = {
            let (parent, remainder) = resolve::resolve_parent_mut(self, segments);
            let parent = parent?;
            if remainder.len() != 1 {
                // Not all keys matched: leave the structure untouched.
                return None;
            }
            let Value::Doc(parent_doc) = parent else {
                return None;
            };
            parent_doc.entries.shift_remove(leaf_key)?
        };
        self.prune_empty_ancestors(&segments[..segments.len() - 1]);
        Some(removed)
    }

    /// Walks back up a just-deleted leaf's ancestor chain, removing each
    /// container that the deletion left empty, stopping at the first
    /// non-empty (or non-container) ancestor.
    fn prune_empty_ancestors(&mut self, chain: &[Segment]) {
        for depth in (1..=chain.len()).rev() {
            let emptied = match self.node_at(&chain[..depth]) {
                Some(Value::Doc(doc)) => doc.is_empty(),
                Some(_) => false,
                None => unreachable!("ancestor vanished during prune walk"),
            };
            if !emptied {
                break;
            }
            let child_key = match &chain[depth - 1] {
                Segment::Key(key) => key,
                Segment::Append => unreachable!("append segment survived delete resolution"),
            };
            trace!(key = %child_key, "pruning emptied container");
            if depth == 1 {
                self.entries.shift_remove(child_key);
            } else {
                match self.node_at_mut(&chain[..depth - 1]) {
                    Some(Value::Doc(parent_doc)) => {
                        parent_doc.entries.shift_remove(child_key);
                    }
                    _ => unreachable!("ancestor vanished during prune walk"),
                }
            }
        }
    }
}

/// Continues a partially-resolved write: creates an empty document for
/// every unmatched non-final segment, then writes the value at the final
/// one. Returns the displaced value, if any.
fn vivify_and_write(
    mut cursor: &mut Value,
    remainder: &[Segment],
    value: Value,
) -> Result<Option<Value>, DocError> {
    let (last, inner) = match remainder.split_last() {
        Some(split) => split,
        None => unreachable!("vivify called with an empty remainder"),
    };
    for segment in inner {
        let doc = coerce_to_doc(cursor);
        cursor = match segment {
            Segment::Key(key) => {
                let entry = doc
                    .entries
                    .entry(key.clone())
                    .or_insert_with(|| Value::Doc(Document::new()));
                if !matches!(entry, Value::Doc(_)) {
                    debug!(key = %key, found = entry.type_name(), "replacing non-container value on write path");
                    *entry = Value::Doc(Document::new());
                }
                entry
            }
            Segment::Append => {
                let key = Key::Int(doc.next_index());
                doc.entries
                    .entry(key)
                    .or_insert_with(|| Value::Doc(Document::new()))
            }
        };
    }
    match last {
        Segment::Key(key) => {
            let doc = coerce_to_doc(cursor);
            Ok(doc.entries.insert(key.clone(), value))
        }
        Segment::Append => match cursor {
            Value::Doc(doc) => {
                doc.push_raw(value);
                Ok(None)
            }
            other => Err(DocError::AppendTargetNotStructure {
                actual: other.type_name().to_string(),
            }),
        },
    }
}

/// Makes the cursor a container, replacing whatever non-container value
/// sat there. The replaced value is lost; a debug event records it.
fn coerce_to_doc(value: &mut Value) -> &mut Document {
    if !matches!(value, Value::Doc(_)) {
        debug!(found = value.type_name(), "replacing non-container value on write path");
        *value = Value::Doc(Document::new());
    }
    match value {
        Value::Doc(doc) => doc,
        _ => unreachable!(),
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(Key, Value)> for Document {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut doc = Document::new();
        for (key, value) in iter {
            doc = doc.with(key, value);
        }
        doc
    }
}

// Builder pattern methods
impl Document {
    /// Builder method to set a top-level value and return self.
    ///
    /// Null values follow the write rule: they remove the key instead of
    /// being stored.
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        let key = key.into();
        match value.into() {
            Value::Null => {
                self.entries.shift_remove(&key);
            }
            value => {
                self.entries.insert(key, value);
            }
        }
        self
    }

    /// Builder method to set a boolean value
    pub fn with_bool(self, key: impl Into<Key>, value: bool) -> Self {
        self.with(key, Value::Bool(value))
    }

    /// Builder method to set an integer value
    pub fn with_int(self, key: impl Into<Key>, value: i64) -> Self {
        self.with(key, Value::Int(value))
    }

    /// Builder method to set a text value
    pub fn with_text(self, key: impl Into<Key>, value: impl Into<String>) -> Self {
        self.with(key, Value::Text(value.into()))
    }

    /// Builder method to set a nested document
    pub fn with_doc(self, key: impl Into<Key>, value: impl Into<Document>) -> Self {
        self.with(key, Value::Doc(value.into()))
    }
}
