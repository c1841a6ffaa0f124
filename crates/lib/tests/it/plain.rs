//! Plain-tree construction and flattening tests

use keytree::{Document, Value, path};

// ===== CONSTRUCTION =====

#[test]
fn test_from_plain_deep_conversion() {
    let source = serde_json::json!({
        "name": "Alice",
        "stats": {"wins": 3, "ratio": 0.75},
        "tags": ["a", "b"],
    });
    let doc = Document::from_plain(&source).unwrap();

    assert_eq!(doc.get_as::<&str>("name"), Some("Alice"));
    assert_eq!(doc.get_as::<i64>(path!["stats", "wins"]), Some(3));
    assert_eq!(doc.get_as::<f64>(path!["stats", "ratio"]), Some(0.75));
    assert_eq!(doc.get_as::<&str>(path!["tags", 1]), Some("b"));

    // Every nested collection became a container.
    assert!(doc.get("stats").unwrap().is_some_and(Value::is_branch));
    assert!(doc.get("tags").unwrap().is_some_and(Value::is_branch));
}

#[test]
fn test_from_plain_skips_null_entries() {
    let source = serde_json::json!({"a": 1, "gone": null});
    let doc = Document::from_plain(&source).unwrap();

    assert_eq!(doc.len(), 1);
    assert!(!doc.exists("gone").unwrap());
}

#[test]
fn test_from_plain_rejects_scalars() {
    for source in [
        serde_json::json!(42),
        serde_json::json!("text"),
        serde_json::json!(true),
        serde_json::json!(null),
    ] {
        let err = Document::from_plain(&source).unwrap_err();
        assert!(err.is_invalid_source());
    }
}

#[test]
fn test_try_from_json_value() {
    let doc = Document::try_from(serde_json::json!({"a": 1})).unwrap();
    assert_eq!(doc.get_as::<i64>("a"), Some(1));
}

#[test]
fn test_from_container_is_construction_too() {
    let original = Document::new().with("a", 1);
    let copy = Document::from_iter(original.iter().map(|(k, v)| (k.clone(), v.clone())));
    assert_eq!(copy, original);
}

// ===== OPAQUE CONSTRUCTION =====

#[test]
fn test_from_opaque_does_not_interpret_nested_collections() {
    let source = serde_json::json!({"name": "Alice", "raw": {"deep": {"x": 1}}});
    let doc = Document::from_opaque(&source).unwrap();

    assert_eq!(doc.get_as::<&str>("name"), Some("Alice"));

    // The nested record is stored opaquely: resolution will not descend.
    assert!(doc.get("raw").unwrap().is_some_and(|v| v.as_opaque().is_some()));
    assert!(!doc.exists(path!["raw", "deep"]).unwrap());
    assert!(!doc.exists(path!["raw", "deep", "x"]).unwrap());
}

#[test]
fn test_opaque_records_pass_through_flattening() {
    let source = serde_json::json!({"raw": {"deep": [1, 2]}});
    let doc = Document::from_opaque(&source).unwrap();

    assert_eq!(doc.to_plain(), source);
}

#[test]
fn test_deep_flatten_flag_is_the_difference() {
    let source = serde_json::json!({"raw": {"x": 1}});

    let deep = Document::from_plain(&source).unwrap();
    let shallow = Document::from_opaque(&source).unwrap();

    assert!(deep.exists(path!["raw", "x"]).unwrap());
    assert!(!shallow.exists(path!["raw", "x"]).unwrap());
    // Both flatten back to the same plain tree.
    assert_eq!(deep.to_plain(), shallow.to_plain());
}

// ===== FLATTENING =====

#[test]
fn test_to_plain_renders_sequences_as_arrays() {
    let mut doc = Document::new();
    doc.push(1);
    doc.push(2);

    assert_eq!(doc.to_plain(), serde_json::json!([1, 2]));
}

#[test]
fn test_to_plain_renders_keyed_maps_as_objects() {
    let mut doc = Document::new();
    doc.set("a", 1).unwrap();
    doc.set(5, 2).unwrap();

    // Integer keys stringify in object form.
    assert_eq!(doc.to_plain(), serde_json::json!({"a": 1, "5": 2}));
}

#[test]
fn test_to_plain_of_a_holey_sequence_is_an_object() {
    let mut doc = Document::new();
    doc.push("a");
    doc.push("b");
    doc.push("c");
    doc.delete(1).unwrap();

    assert_eq!(doc.to_plain(), serde_json::json!({"0": "a", "2": "c"}));
}

#[test]
fn test_empty_document_flattens_to_an_array() {
    // An empty container is vacuously dense, so it classifies as a
    // sequence.
    assert_eq!(Document::new().to_plain(), serde_json::json!([]));
}

#[test]
fn test_to_plain_shares_no_structure() {
    let mut doc = Document::new();
    doc.set(path!["a", "b"], 1).unwrap();

    let plain = doc.to_plain();
    doc.set(path!["a", "b"], 2).unwrap();

    assert_eq!(plain, serde_json::json!({"a": {"b": 1}}));
}

#[test]
fn test_plain_round_trip() {
    let source = serde_json::json!({
        "user": {"name": "Alice", "tags": ["x", "y"]},
        "count": 3,
    });
    let doc = Document::from_plain(&source).unwrap();
    assert_eq!(doc.to_plain(), source);
}

#[test]
fn test_to_json_string() {
    let mut doc = Document::new();
    doc.set("name", "Alice").unwrap();

    assert_eq!(doc.to_json_string(), r#"{"name":"Alice"}"#);
    assert_eq!(Value::Text("a\"b".into()).to_json_string(), r#""a\"b""#);
}

#[test]
fn test_shallow_copy_is_top_level() {
    let mut doc = Document::new();
    doc.set(path!["nested", "x"], 1).unwrap();

    let copy = doc.shallow_copy();
    assert_eq!(copy, doc);
    assert!(copy.get("nested").unwrap().is_some_and(Value::is_branch));
}

#[test]
fn test_non_finite_floats_flatten_to_null() {
    let mut doc = Document::new();
    doc.set("x", f64::NAN).unwrap();

    assert_eq!(doc.to_plain(), serde_json::json!({"x": null}));
}
