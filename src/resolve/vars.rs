// Author: Dustin Pilgrim
// License: MIT

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Document, Value, VARS_KEY};
use crate::error::SigilError;

static VAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Expand every `${name}` reference in the document. Bindings come from the
/// reserved variable key of each mapping; inner declarations shadow outer
/// ones, and the declarations themselves are removed from the output. An
/// unresolved reference aborts the whole compilation.
pub fn resolve_vars(doc: &mut Document) -> Result<(), SigilError> {
    let mut scopes: Vec<Document> = Vec::new();
    walk(doc, &mut scopes)
}

fn walk(doc: &mut Document, scopes: &mut Vec<Document>) -> Result<(), SigilError> {
    let pushed = match doc.shift_remove(VARS_KEY) {
        Some(Value::Object(mut frame)) => {
            // a binding may reference the outer scope
            for value in frame.values_mut() {
                resolve_value(value, scopes)?;
            }
            scopes.push(frame);
            true
        }
        Some(_) | None => false,
    };
    let keys: Vec<String> = doc.keys().cloned().collect();
    for key in keys {
        if let Some(value) = doc.get_mut(&key) {
            resolve_value(value, scopes)?;
        }
    }
    if pushed {
        scopes.pop();
    }
    Ok(())
}

fn resolve_value(value: &mut Value, scopes: &mut Vec<Document>) -> Result<(), SigilError> {
    match value {
        Value::String(text) => {
            if let Some(replacement) = substitute(text, scopes)? {
                *value = replacement;
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                resolve_value(item, scopes)?;
            }
            Ok(())
        }
        Value::Object(child) => walk(child, scopes),
        _ => Ok(()),
    }
}

/// Substitute references in one string. When the whole string is exactly one
/// reference the bound value replaces it with its type intact; otherwise each
/// reference is pasted in textually, left to right.
fn substitute(text: &str, scopes: &[Document]) -> Result<Option<Value>, SigilError> {
    if !text.contains("${") {
        return Ok(None);
    }
    if let Some(caps) = VAR_RE.captures(text) {
        let whole = &caps[0];
        if whole.len() == text.len() {
            let name = &caps[1];
            let bound = lookup(scopes, name).ok_or_else(|| undefined(name, text, scopes))?;
            return Ok(Some(bound.clone()));
        }
    }
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in VAR_RE.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let name = &caps[1];
        let bound = lookup(scopes, name).ok_or_else(|| undefined(name, text, scopes))?;
        out.push_str(&text[last..whole.start()]);
        out.push_str(&bound.display_string());
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(Some(Value::String(out)))
}

fn lookup<'a>(scopes: &'a [Document], name: &str) -> Option<&'a Value> {
    scopes.iter().rev().find_map(|frame| frame.get(name))
}

fn undefined(name: &str, value: &str, scopes: &[Document]) -> SigilError {
    let mut bindings = String::new();
    for frame in scopes {
        for (key, bound) in frame {
            bindings.push_str(&format!("    {} = {}\n", key, bound.display_string()));
        }
    }
    SigilError::UndefinedVariable {
        name: name.to_string(),
        value: value.to_string(),
        bindings,
        code: None,
    }
}
