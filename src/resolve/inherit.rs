use super::merge::fill_missing;
use crate::ast::{Document, Value, INHERIT_KEY};

/// Expand `key(parent, other)` annotations. Parents are sibling keys of the
/// same mapping; the child keeps its own entries and only fills holes from
/// each parent in declaration order. A name with no matching sibling is
/// skipped.
pub fn resolve_inheritance(doc: &mut Document) {
    let keys: Vec<String> = doc.keys().cloned().collect();
    for key in keys {
        let parents = match doc.get(&key).and_then(Value::as_object) {
            Some(child) => parent_names(child),
            None => continue,
        };
        if !parents.is_empty() {
            let mut merged = Document::new();
            for parent in &parents {
                let mut seen = vec![key.clone()];
                match expanded_parent(doc, parent, &mut seen) {
                    Some(expanded) => fill_missing(&mut merged, &expanded),
                    None => tracing::warn!(parent = %parent, child = %key, "inherit target not found"),
                }
            }
            if let Some(child) = doc.get_mut(&key).and_then(Value::as_object_mut) {
                child.shift_remove(INHERIT_KEY);
                fill_missing(child, &merged);
            }
        }
        if let Some(child) = doc.get_mut(&key).and_then(Value::as_object_mut) {
            resolve_inheritance(child);
        }
    }
}

fn parent_names(child: &Document) -> Vec<String> {
    match child.get(INHERIT_KEY) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// A parent's fully expanded body. The parent's own chain is applied first,
/// on a scratch copy, so the reserved marker never leaks into a child that
/// inherits from a not-yet-visited sibling. `seen` breaks cycles.
fn expanded_parent(doc: &Document, name: &str, seen: &mut Vec<String>) -> Option<Document> {
    if seen.iter().any(|s| s == name) {
        return None;
    }
    seen.push(name.to_string());
    let mut copy = doc.get(name)?.as_object()?.clone();
    let parents = parent_names(&copy);
    copy.shift_remove(INHERIT_KEY);
    for parent in parents {
        if let Some(expanded) = expanded_parent(doc, &parent, seen) {
            fill_missing(&mut copy, &expanded);
        }
    }
    Some(copy)
}
