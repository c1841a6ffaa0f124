//! Flattening to and construction from plain value trees.
//!
//! The "plain" shape of a document is a [`serde_json::Value`] tree:
//! fully materialized, acyclic, and sharing no structure with the
//! container it came from. It is the crate's serialization boundary;
//! collaborators that need JSON, BSON, or any other wire form encode the
//! plain tree, never the container itself.
//!
//! Construction runs the same conversion in reverse. The deep form
//! ([`Document::from_plain`]) converts every nested collection into a
//! container; the shallow form ([`Document::from_opaque`]) converts only
//! the top level and stores nested collections as [`Value::Opaque`]
//! pass-through records.

use serde_json::Value as Json;

use super::Document;
use super::path::Key;
use super::value::Value;
use crate::errors::DocError;

impl Document {
    /// Builds a document from a plain tree, converting every nested
    /// collection into a container.
    ///
    /// Null entries are skipped: containers never store null. Sources
    /// that are not a map or sequence are rejected with
    /// [`DocError::InvalidContainerSource`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::{Document, path};
    /// let source = serde_json::json!({"user": {"name": "Alice"}, "tags": ["a", "b"]});
    /// let doc = Document::from_plain(&source)?;
    ///
    /// assert_eq!(doc.get_as::<&str>(path!["user", "name"]), Some("Alice"));
    /// assert_eq!(doc.get_as::<&str>(path!["tags", 1]), Some("b"));
    /// # Ok::<(), keytree::errors::DocError>(())
    /// ```
    pub fn from_plain(source: &Json) -> Result<Self, DocError> {
        if !matches!(source, Json::Object(_) | Json::Array(_)) {
            return Err(DocError::InvalidContainerSource {
                reason: format!("expected a map or sequence, found {}", json_type_name(source)),
            });
        }
        match Value::from_plain(source) {
            Value::Doc(doc) => Ok(doc),
            _ => unreachable!("structural source converted to a non-container"),
        }
    }

    /// Builds a document from a plain tree, converting only the top
    /// level; nested collections are stored as opaque pass-through
    /// records that path resolution will not descend into.
    pub fn from_opaque(source: &Json) -> Result<Self, DocError> {
        match source {
            Json::Object(map) => {
                let mut doc = Document::new();
                for (key, item) in map {
                    if item.is_null() {
                        continue;
                    }
                    doc.entries
                        .insert(Key::Text(key.clone()), Value::from_plain_shallow(item));
                }
                Ok(doc)
            }
            Json::Array(items) => {
                let mut doc = Document::new();
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    doc.push_raw(Value::from_plain_shallow(item));
                }
                Ok(doc)
            }
            other => Err(DocError::InvalidContainerSource {
                reason: format!("expected a map or sequence, found {}", json_type_name(other)),
            }),
        }
    }

    /// Produces the fully-materialized plain tree of this document.
    ///
    /// Sequence-classified documents render as arrays; everything else
    /// renders as an object with stringified keys. Opaque records pass
    /// through unchanged. The result shares no structure with the
    /// document.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::{Document, path};
    /// let mut doc = Document::new();
    /// doc.set(path!["list", 0], 1)?;
    /// doc.set(path!["list", 1], 2)?;
    ///
    /// assert_eq!(doc.to_plain(), serde_json::json!({"list": [1, 2]}));
    /// # Ok::<(), keytree::Error>(())
    /// ```
    pub fn to_plain(&self) -> Json {
        if self.is_sequence() {
            Json::Array(self.entries.values().map(Value::to_plain).collect())
        } else {
            Json::Object(
                self.entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_plain()))
                    .collect(),
            )
        }
    }

    /// Copies the top level of this document.
    ///
    /// Nested values stay container instances rather than being converted
    /// to the plain shape; use [`to_plain`](Self::to_plain) for the deep
    /// conversion.
    pub fn shallow_copy(&self) -> Document {
        Document {
            entries: self.entries.clone(),
        }
    }

    /// Renders this document as a compact JSON string.
    pub fn to_json_string(&self) -> String {
        self.to_plain().to_string()
    }
}

impl TryFrom<&Json> for Document {
    type Error = DocError;

    fn try_from(source: &Json) -> Result<Self, Self::Error> {
        Document::from_plain(source)
    }
}

impl TryFrom<Json> for Document {
    type Error = DocError;

    fn try_from(source: Json) -> Result<Self, Self::Error> {
        Document::from_plain(&source)
    }
}

impl Value {
    /// Converts a plain tree node into a value, deeply.
    pub(super) fn from_plain(source: &Json) -> Value {
        match source {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => number_to_value(n),
            Json::String(s) => Value::Text(s.clone()),
            Json::Object(map) => {
                let mut doc = Document::new();
                for (key, item) in map {
                    if item.is_null() {
                        continue;
                    }
                    doc.entries
                        .insert(Key::Text(key.clone()), Value::from_plain(item));
                }
                Value::Doc(doc)
            }
            Json::Array(items) => {
                let mut doc = Document::new();
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    doc.push_raw(Value::from_plain(item));
                }
                Value::Doc(doc)
            }
        }
    }

    /// Converts a plain tree node into a value, leaving collections
    /// opaque.
    fn from_plain_shallow(source: &Json) -> Value {
        match source {
            Json::Object(_) | Json::Array(_) => Value::Opaque(source.clone()),
            scalar => Value::from_plain(scalar),
        }
    }

    /// Produces the plain form of this value.
    ///
    /// A non-finite float has no plain representation and renders as
    /// null.
    pub fn to_plain(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::from(*n),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Text(s) => Json::String(s.clone()),
            Value::Doc(doc) => doc.to_plain(),
            Value::Opaque(record) => record.clone(),
        }
    }

    /// Renders this value as a compact JSON string.
    pub fn to_json_string(&self) -> String {
        self.to_plain().to_string()
    }
}

fn number_to_value(n: &serde_json::Number) -> Value {
    if let Some(int) = n.as_i64() {
        Value::Int(int)
    } else if let Some(float) = n.as_f64() {
        Value::Float(float)
    } else {
        Value::Null
    }
}

fn json_type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
