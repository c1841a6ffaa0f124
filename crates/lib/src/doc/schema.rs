//! Schema discovery over document trees.
//!
//! The indexer walks a document depth-first and records, for every leaf
//! key name, the distinct paths that reach a leaf with that name. Paths
//! are built from map keys only: a container classified as a sequence
//! contributes no key to the path, so the two elements of
//! `{"a": [{"leaf": 1}, {"leaf": 2}]}` collapse to the single path
//! `["a", "leaf"]`.

use std::collections::BTreeMap;

use super::Document;
use super::value::Value;

impl Document {
    /// Discovers every leaf key name and the distinct paths reaching it.
    ///
    /// Leaf names are sorted lexicographically; each name's paths are
    /// sorted shortest first, with discovery order breaking ties.
    ///
    /// # Examples
    ///
    /// ```
    /// # use keytree::Document;
    /// let source = serde_json::json!({
    ///     "a": [{"leaf": 1}, {"leaf": 2}],
    ///     "b": {"leaf": 3},
    /// });
    /// let doc = Document::from_plain(&source)?;
    ///
    /// let schema = doc.schema();
    /// assert_eq!(
    ///     schema["leaf"],
    ///     vec![vec!["a".to_string(), "leaf".to_string()],
    ///          vec!["b".to_string(), "leaf".to_string()]],
    /// );
    /// # Ok::<(), keytree::errors::DocError>(())
    /// ```
    pub fn schema(&self) -> BTreeMap<String, Vec<Vec<String>>> {
        let mut index = SchemaIndex::default();
        index.walk(self, &[]);
        index.finish()
    }

    /// Like [`schema`](Self::schema), with each path rendered as a single
    /// separator-joined string.
    pub fn schema_with_separator(&self, separator: &str) -> BTreeMap<String, Vec<String>> {
        self.schema()
            .into_iter()
            .map(|(name, paths)| {
                let joined = paths.into_iter().map(|path| path.join(separator)).collect();
                (name, joined)
            })
            .collect()
    }
}

#[derive(Default)]
struct SchemaIndex {
    /// Leaf name -> paths in discovery order
    paths: BTreeMap<String, Vec<Vec<String>>>,
}

impl SchemaIndex {
    fn walk(&mut self, doc: &Document, prefix: &[String]) {
        let sequence = doc.is_sequence();
        for (key, value) in doc.iter() {
            let mut here = prefix.to_vec();
            // Sequence indices are never part of a schema path.
            if !sequence {
                here.push(key.to_string());
            }
            match value {
                Value::Doc(child) => self.walk(child, &here),
                _ => self.record(key.to_string(), here),
            }
        }
    }

    fn record(&mut self, name: String, path: Vec<String>) {
        let paths = self.paths.entry(name).or_default();
        if !paths.contains(&path) {
            paths.push(path);
        }
    }

    fn finish(mut self) -> BTreeMap<String, Vec<Vec<String>>> {
        for paths in self.paths.values_mut() {
            // Stable sort keeps discovery order among equal lengths.
            paths.sort_by_key(Vec::len);
        }
        self.paths
    }
}
