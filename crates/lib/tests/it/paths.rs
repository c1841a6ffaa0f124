//! Path-addressed write tests
//!
//! Covers auto-vivification, overwrite-in-place, append semantics, and
//! the destructive coercion of non-container values on write paths.

use keytree::{Document, Path, Segment, Value, path};

// ===== AUTO-VIVIFICATION =====

#[test]
fn test_set_creates_missing_intermediates() {
    let mut doc = Document::new();
    doc.set(path!["x", "y", "z"], 1).unwrap();

    assert_eq!(
        doc.to_plain(),
        serde_json::json!({"x": {"y": {"z": 1}}}),
    );
}

#[test]
fn test_set_reuses_existing_intermediates() {
    let mut doc = Document::new();
    doc.set(path!["user", "name"], "Alice").unwrap();
    doc.set(path!["user", "age"], 30).unwrap();

    assert_eq!(doc.len(), 1);
    assert_eq!(
        doc.to_plain(),
        serde_json::json!({"user": {"name": "Alice", "age": 30}}),
    );
}

#[test]
fn test_full_match_overwrites_leaf_in_place() {
    let mut doc = Document::new();
    doc.set(path!["a", "b"], 1).unwrap();

    let old = doc.set(path!["a", "b"], 2).unwrap();
    assert_eq!(old, Some(Value::Int(1)));
    assert_eq!(doc.get_as::<i64>(path!["a", "b"]), Some(2));
}

#[test]
fn test_overwriting_a_container_with_a_scalar() {
    let mut doc = Document::new();
    doc.set(path!["a", "b"], 1).unwrap();

    let old = doc.set("a", "flattened").unwrap();
    assert!(old.is_some_and(|v| v.is_branch()));
    assert_eq!(doc.get_as::<&str>("a"), Some("flattened"));
    assert!(!doc.exists(path!["a", "b"]).unwrap());
}

// ===== DESTRUCTIVE COERCION =====

#[test]
fn test_writing_through_a_scalar_replaces_it() {
    let mut doc = Document::new();
    doc.set("a", "scalar").unwrap();

    // "a" holds a scalar; writing a.b silently replaces it with a map.
    doc.set(path!["a", "b"], 1).unwrap();
    assert_eq!(doc.to_plain(), serde_json::json!({"a": {"b": 1}}));
}

#[test]
fn test_writing_through_a_deep_scalar_replaces_it() {
    let mut doc = Document::new();
    doc.set(path!["a", "b"], "scalar").unwrap();

    doc.set(path!["a", "b", "c", "d"], 1).unwrap();
    assert_eq!(doc.to_plain(), serde_json::json!({"a": {"b": {"c": {"d": 1}}}}));
}

// ===== APPEND SEMANTICS =====

#[test]
fn test_append_to_existing_sequence() {
    let source = serde_json::json!({"list": [1, 2]});
    let mut doc = Document::from_plain(&source).unwrap();

    doc.set(path!["list", Segment::Append], 3).unwrap();
    assert_eq!(doc.to_plain(), serde_json::json!({"list": [1, 2, 3]}));
}

#[test]
fn test_append_then_set_field_in_one_call() {
    let source = serde_json::json!({"list": [1, 2]});
    let mut doc = Document::from_plain(&source).unwrap();

    doc.set(path!["list", Segment::Append, "k"], "v").unwrap();
    assert_eq!(
        doc.to_plain(),
        serde_json::json!({"list": [1, 2, {"k": "v"}]}),
    );
}

#[test]
fn test_top_level_append() {
    let mut doc = Document::new();
    doc.set(Path::append(), "first").unwrap();
    doc.set(Path::append(), "second").unwrap();

    assert!(doc.is_sequence());
    assert_eq!(doc.to_plain(), serde_json::json!(["first", "second"]));
}

#[test]
fn test_append_creates_the_container_when_missing() {
    let mut doc = Document::new();
    doc.set(path!["tags", Segment::Append], "fast").unwrap();
    doc.set(path!["tags", Segment::Append], "safe").unwrap();

    assert_eq!(doc.to_plain(), serde_json::json!({"tags": ["fast", "safe"]}));
}

#[test]
fn test_consecutive_appends_nest() {
    let mut doc = Document::new();
    doc.set(path!["grid", Segment::Append, Segment::Append], 1)
        .unwrap();

    assert_eq!(doc.to_plain(), serde_json::json!({"grid": [[1]]}));
}

#[test]
fn test_append_after_delete_does_not_refill_holes() {
    let mut doc = Document::new();
    doc.push("a");
    doc.push("b");
    doc.push("c");
    doc.delete(1).unwrap();

    // Keys are {0, 2}; the next append lands at 3.
    assert_eq!(doc.push("d"), Some(keytree::Key::Int(3)));
}

// ===== NULL WRITES =====

#[test]
fn test_null_write_is_never_stored() {
    let mut doc = Document::new();
    doc.set("a", 1).unwrap();
    doc.set("a", Value::Null).unwrap();

    assert!(!doc.exists("a").unwrap());
    assert!(doc.is_empty());
}

#[test]
fn test_null_write_equals_never_having_set() {
    let mut doc = Document::new();
    doc.set(path!["a", "b", "c"], "v").unwrap();
    doc.set(path!["a", "b", "c"], Value::Null).unwrap();

    assert_eq!(doc, Document::new());
}
