// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;

use crate::ast::{Document, Value};

fn doc(src: &str) -> Document {
    match Value::from_json(serde_json::from_str(src).unwrap()) {
        Value::Object(map) => map,
        other => panic!("expected object, got {:?}", other),
    }
}

#[test]
fn test_fill_missing_keeps_existing_scalars() {
    let mut dest = doc(r#"{"a": 1, "b": "keep"}"#);
    let src = doc(r#"{"a": 9, "b": "drop", "c": true}"#);
    merge::fill_missing(&mut dest, &src);
    assert_eq!(dest, doc(r#"{"a": 1, "b": "keep", "c": true}"#));
}

#[test]
fn test_fill_missing_recurses_into_mappings() {
    let mut dest = doc(r#"{"env": {"a": 1}}"#);
    let src = doc(r#"{"env": {"a": 9, "b": 2}}"#);
    merge::fill_missing(&mut dest, &src);
    assert_eq!(dest, doc(r#"{"env": {"a": 1, "b": 2}}"#));
}

#[test]
fn test_fill_missing_never_replaces_scalar_with_mapping() {
    let mut dest = doc(r#"{"a": 1}"#);
    let src = doc(r#"{"a": {"b": 2}}"#);
    merge::fill_missing(&mut dest, &src);
    assert_eq!(dest, doc(r#"{"a": 1}"#));
}

#[test]
fn test_inherit_fills_holes_child_wins() {
    let mut tree = doc(
        r#"{
            "base": {"x": 1, "y": 2},
            "child": {"sigil_inherit": ["base"], "y": 9}
        }"#,
    );
    inherit::resolve_inheritance(&mut tree);
    assert_eq!(
        tree,
        doc(r#"{"base": {"x": 1, "y": 2}, "child": {"y": 9, "x": 1}}"#)
    );
}

#[test]
fn test_inherit_first_parent_wins_between_parents() {
    let mut tree = doc(
        r#"{
            "a": {"v": "from_a"},
            "b": {"v": "from_b", "w": 1},
            "child": {"sigil_inherit": ["a", "b"]}
        }"#,
    );
    inherit::resolve_inheritance(&mut tree);
    let child = tree.get("child").and_then(Value::as_object).unwrap();
    assert_eq!(child.get("v"), Some(&Value::String("from_a".into())));
    assert_eq!(child.get("w"), Some(&Value::Integer(1)));
}

#[test]
fn test_inherit_from_later_sibling_leaves_no_marker() {
    let mut tree = doc(
        r#"{
            "child": {"sigil_inherit": ["base"]},
            "base": {"sigil_inherit": ["root"], "x": 1},
            "root": {"y": 2}
        }"#,
    );
    inherit::resolve_inheritance(&mut tree);
    let child = tree.get("child").and_then(Value::as_object).unwrap();
    assert_eq!(child.get("x"), Some(&Value::Integer(1)));
    assert_eq!(child.get("y"), Some(&Value::Integer(2)));
    assert!(child.get("sigil_inherit").is_none());
}

#[test]
fn test_inherit_unknown_parent_is_skipped() {
    let mut tree = doc(r#"{"child": {"sigil_inherit": ["ghost"], "x": 1}}"#);
    inherit::resolve_inheritance(&mut tree);
    assert_eq!(tree, doc(r#"{"child": {"x": 1}}"#));
}

#[test]
fn test_inherit_cycle_terminates() {
    let mut tree = doc(
        r#"{
            "a": {"sigil_inherit": ["b"], "x": 1},
            "b": {"sigil_inherit": ["a"], "y": 2}
        }"#,
    );
    inherit::resolve_inheritance(&mut tree);
    let a = tree.get("a").and_then(Value::as_object).unwrap();
    assert_eq!(a.get("y"), Some(&Value::Integer(2)));
    assert!(a.get("sigil_inherit").is_none());
}

#[test]
fn test_platform_match_overrides_base() {
    let mut tree = doc(r#"{"path": "a", "path<linux>": "b"}"#);
    platform::resolve_platform(&mut tree, "linux");
    assert_eq!(tree, doc(r#"{"path": "b"}"#));
}

#[test]
fn test_platform_mismatch_keeps_base() {
    let mut tree = doc(r#"{"path": "a", "path<linux>": "b"}"#);
    platform::resolve_platform(&mut tree, "windows");
    assert_eq!(tree, doc(r#"{"path": "a"}"#));
}

#[test]
fn test_platform_mapping_merge_base_fills_holes() {
    let mut tree = doc(
        r#"{
            "build": {"opt": 0, "debug": true},
            "build<mac>": {"opt": 2}
        }"#,
    );
    platform::resolve_platform(&mut tree, "mac");
    assert_eq!(tree, doc(r#"{"build": {"opt": 2, "debug": true}}"#));
}

#[test]
fn test_platform_annotation_without_base_key() {
    let mut tree = doc(r#"{"tools<windows>": {"cl": "msvc"}}"#);
    platform::resolve_platform(&mut tree, "windows");
    assert_eq!(tree, doc(r#"{"tools": {"cl": "msvc"}}"#));
}

#[test]
fn test_platform_resolves_nested_mappings() {
    let mut tree = doc(r#"{"outer": {"path": "a", "path<linux>": "b"}}"#);
    platform::resolve_platform(&mut tree, "linux");
    assert_eq!(tree, doc(r#"{"outer": {"path": "b"}}"#));
}

#[test]
fn test_vars_textual_substitution() {
    let mut tree = doc(r#"{"sigil_vars": {"name": "x"}, "key": "val_${name}"}"#);
    vars::resolve_vars(&mut tree).unwrap();
    assert_eq!(tree, doc(r#"{"key": "val_x"}"#));
}

#[test]
fn test_vars_typed_substitution_for_whole_reference() {
    let mut tree = doc(r#"{"sigil_vars": {"n": 5}, "key": "${n}"}"#);
    vars::resolve_vars(&mut tree).unwrap();
    assert_eq!(tree.get("key"), Some(&Value::Integer(5)));
}

#[test]
fn test_vars_multiple_references_in_one_string() {
    let mut tree = doc(
        r#"{"sigil_vars": {"a": "1", "b": "2"}, "key": "${a}-${b}"}"#,
    );
    vars::resolve_vars(&mut tree).unwrap();
    assert_eq!(tree.get("key"), Some(&Value::String("1-2".into())));
}

#[test]
fn test_vars_inner_scope_shadows_outer() {
    let mut tree = doc(
        r#"{
            "sigil_vars": {"v": "outer"},
            "top": "${v}",
            "nested": {"sigil_vars": {"v": "inner"}, "key": "${v}"}
        }"#,
    );
    vars::resolve_vars(&mut tree).unwrap();
    assert_eq!(tree.get("top"), Some(&Value::String("outer".into())));
    let nested = tree.get("nested").and_then(Value::as_object).unwrap();
    assert_eq!(nested.get("key"), Some(&Value::String("inner".into())));
}

#[test]
fn test_vars_resolve_inside_arrays() {
    let mut tree = doc(
        r#"{"sigil_vars": {"d": "out"}, "dirs": ["${d}/a", "${d}/b"]}"#,
    );
    vars::resolve_vars(&mut tree).unwrap();
    assert_eq!(
        tree.get("dirs"),
        Some(&Value::Array(vec![
            Value::String("out/a".into()),
            Value::String("out/b".into()),
        ]))
    );
}

#[test]
fn test_vars_undefined_reference_is_fatal() {
    let mut tree = doc(r#"{"key": "${missing}"}"#);
    let err = vars::resolve_vars(&mut tree).unwrap_err();
    match err {
        crate::SigilError::UndefinedVariable { name, .. } => assert_eq!(name, "missing"),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_split_imports_head_only() {
    let src = "import base.sigil\nimport \"tools.sigil\"\n{\n    imports: 1\n}\n";
    let (targets, body) = imports::split_imports(src);
    assert_eq!(targets, vec!["base.sigil", "tools.sigil"]);
    assert!(body.starts_with('{'));
    assert!(body.contains("imports: 1"));
}

#[test]
fn test_split_imports_stops_at_body() {
    let src = "{\n    key: \"import nothing\"\n}\n";
    let (targets, body) = imports::split_imports(src);
    assert!(targets.is_empty());
    assert_eq!(body.lines().count(), 3);
}
