//! Path resolution over document trees.
//!
//! The resolver walks a segment list key by key: at each step, if the
//! current node is a container and the key exists, it descends; otherwise
//! it stops. It returns the deepest matched node together with the
//! unconsumed suffix of the path, so callers can distinguish a full match
//! (empty remainder) from a partial one and continue with auto-creation
//! where writes need it.
//!
//! Append segments never match: they address a position that does not
//! exist yet, so resolution treats them like a missing key.
//!
//! Returned handles are plain reborrows into the owning tree. The borrow
//! checker ties them to the duration of the operation, so no handle can
//! survive a later mutating call.

use super::Document;
use super::path::Segment;
use super::value::Value;

/// Resolves `segments` against `root`, immutably.
///
/// Returns the deepest matched node and the unconsumed remainder. When
/// the very first segment fails to match, the node is `None` (the root
/// container itself is the deepest match) and the remainder is the whole
/// path.
pub(super) fn resolve<'t, 'p>(
    root: &'t Document,
    segments: &'p [Segment],
) -> (Option<&'t Value>, &'p [Segment]) {
    let Some(first) = segments.first() else {
        return (None, segments);
    };
    let Some(mut current) = child_of_doc(root, first) else {
        return (None, segments);
    };
    let mut consumed = 1;
    while consumed < segments.len() {
        match step(current, &segments[consumed]) {
            Some(next) => {
                current = next;
                consumed += 1;
            }
            None => break,
        }
    }
    (Some(current), &segments[consumed..])
}

/// Resolves `segments` against `root`, mutably.
pub(super) fn resolve_mut<'t, 'p>(
    root: &'t mut Document,
    segments: &'p [Segment],
) -> (Option<&'t mut Value>, &'p [Segment]) {
    walk_limit_mut(root, segments, segments.len())
}

/// Resolves all but the final segment, mutably.
///
/// On a full parent match the returned remainder is exactly the final
/// segment, so the caller holds the leaf's parent and knows where to
/// excise the leaf. Paths shorter than two segments have no parent to
/// resolve and return no match.
pub(super) fn resolve_parent_mut<'t, 'p>(
    root: &'t mut Document,
    segments: &'p [Segment],
) -> (Option<&'t mut Value>, &'p [Segment]) {
    if segments.len() < 2 {
        return (None, segments);
    }
    walk_limit_mut(root, segments, segments.len() - 1)
}

fn walk_limit_mut<'t, 'p>(
    root: &'t mut Document,
    segments: &'p [Segment],
    limit: usize,
) -> (Option<&'t mut Value>, &'p [Segment]) {
    let Some(first) = segments[..limit].first() else {
        return (None, segments);
    };
    let Some(mut current) = child_of_doc_mut(root, first) else {
        return (None, segments);
    };
    let mut consumed = 1;
    while consumed < limit {
        let segment = &segments[consumed];
        // Check before descending: the mutable borrow has to move into
        // the child unconditionally once taken.
        if !has_child(current, segment) {
            break;
        }
        current = match step_mut(current, segment) {
            Some(next) => next,
            None => unreachable!("matched child vanished during descent"),
        };
        consumed += 1;
    }
    (Some(current), &segments[consumed..])
}

fn child_of_doc<'a>(doc: &'a Document, segment: &Segment) -> Option<&'a Value> {
    match segment {
        Segment::Key(key) => doc.entries.get(key),
        Segment::Append => None,
    }
}

fn child_of_doc_mut<'a>(doc: &'a mut Document, segment: &Segment) -> Option<&'a mut Value> {
    match segment {
        Segment::Key(key) => doc.entries.get_mut(key),
        Segment::Append => None,
    }
}

fn has_child(value: &Value, segment: &Segment) -> bool {
    match (value, segment) {
        (Value::Doc(doc), Segment::Key(key)) => doc.entries.contains_key(key),
        _ => false,
    }
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match value {
        Value::Doc(doc) => child_of_doc(doc, segment),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match value {
        Value::Doc(doc) => child_of_doc_mut(doc, segment),
        _ => None,
    }
}
