//! Path-addressed delete tests
//!
//! Covers leaf removal, cascade pruning of emptied ancestors, and the
//! silent no-op behavior for paths that do not fully resolve.

use keytree::{Document, Path, Segment, Value, path};

// ===== TOP-LEVEL DELETES =====

#[test]
fn test_delete_returns_the_removed_value() {
    let mut doc = Document::new();
    doc.set("name", "Alice").unwrap();

    let removed = doc.delete("name").unwrap();
    assert_eq!(removed, Some(Value::Text("Alice".into())));
    assert!(!doc.contains_key("name"));
}

#[test]
fn test_delete_missing_key_is_a_no_op() {
    let mut doc = Document::new();
    doc.set("keep", 1).unwrap();

    assert_eq!(doc.delete("missing").unwrap(), None);
    assert_eq!(doc.len(), 1);
}

// ===== CASCADE PRUNING =====

#[test]
fn test_cascading_prune_empties_the_container() {
    let mut doc = Document::new();
    doc.set(path!["a", "b", "c"], "v").unwrap();

    doc.delete(path!["a", "b", "c"]).unwrap();

    // "b" emptied, so it was removed; then "a" emptied and followed.
    assert!(doc.is_empty());
}

#[test]
fn test_prune_stops_at_the_first_non_empty_ancestor() {
    let mut doc = Document::new();
    doc.set(path!["a", "b", "c"], 1).unwrap();
    doc.set(path!["a", "keep"], 2).unwrap();

    doc.delete(path!["a", "b", "c"]).unwrap();

    assert_eq!(doc.to_plain(), serde_json::json!({"a": {"keep": 2}}));
}

#[test]
fn test_prune_removes_emptied_sequence_elements() {
    let source = serde_json::json!({"list": [{"only": 1}]});
    let mut doc = Document::from_plain(&source).unwrap();

    doc.delete(path!["list", 0, "only"]).unwrap();

    // The element emptied and was pruned, then the list followed.
    assert!(doc.is_empty());
}

#[test]
fn test_deleting_a_subtree_removes_it_whole() {
    let mut doc = Document::new();
    doc.set(path!["a", "b", "c"], 1).unwrap();
    doc.set(path!["a", "b", "d"], 2).unwrap();

    let removed = doc.delete(path!["a", "b"]).unwrap();
    assert!(removed.is_some_and(|v| v.is_branch()));
    assert!(doc.is_empty());
}

// ===== IDEMPOTENT UNSET =====

#[test]
fn test_delete_is_idempotent() {
    let mut doc = Document::new();
    doc.set(path!["a", "b"], 1).unwrap();
    doc.set("keep", 2).unwrap();

    doc.delete(path!["a", "b"]).unwrap();
    let after_first = doc.clone();

    for _ in 0..3 {
        assert_eq!(doc.delete(path!["a", "b"]).unwrap(), None);
        assert_eq!(doc, after_first);
    }
}

#[test]
fn test_partial_match_leaves_structure_untouched() {
    let mut doc = Document::new();
    doc.set(path!["a", "b"], 1).unwrap();
    let before = doc.clone();

    assert_eq!(doc.delete(path!["a", "missing", "c"]).unwrap(), None);
    assert_eq!(doc.delete(path!["nope", "b"]).unwrap(), None);
    assert_eq!(doc, before);
}

#[test]
fn test_delete_through_a_scalar_is_a_no_op() {
    let mut doc = Document::new();
    doc.set("a", "scalar").unwrap();
    let before = doc.clone();

    assert_eq!(doc.delete(path!["a", "b"]).unwrap(), None);
    assert_eq!(doc, before);
}

#[test]
fn test_delete_with_append_segment_is_a_no_op() {
    let mut doc = Document::new();
    doc.push("first");
    let before = doc.clone();

    assert_eq!(doc.delete(Path::append()).unwrap(), None);
    assert_eq!(doc.delete(path![0, Segment::Append]).unwrap(), None);
    assert_eq!(doc, before);
}

// ===== NULL WRITES DELETE =====

#[test]
fn test_null_write_cascades_like_delete() {
    let mut doc = Document::new();
    doc.set(path!["a", "b", "c"], "v").unwrap();

    doc.set(path!["a", "b", "c"], Value::Null).unwrap();
    assert!(doc.is_empty());
}
