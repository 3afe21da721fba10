use super::merge::fill_missing;
use crate::ast::{Document, Value};

/// Tag that matches no annotation. Used when the host OS is not in the
/// name table so unannotated keys still resolve normally.
pub const UNKNOWN_PLATFORM: &str = "unknown";

/// Map the host OS identifier to its platform tag.
pub fn host_platform() -> String {
    match std::env::consts::OS {
        "linux" => "linux".to_string(),
        "macos" => "mac".to_string(),
        "windows" => "windows".to_string(),
        other => {
            tracing::warn!(os = other, "unrecognized host platform");
            UNKNOWN_PLATFORM.to_string()
        }
    }
}

/// Split `base<tag>` into its parts. A key without a well-formed trailing
/// annotation is a plain key.
fn split_annotation(key: &str) -> Option<(&str, &str)> {
    let bp = key.find('<')?;
    let ep = key.rfind('>')?;
    if bp == 0 || bp >= ep || ep != key.len() - 1 {
        return None;
    }
    Some((&key[..bp], &key[bp + 1..ep]))
}

/// Remove every `base<tag>` key; a key whose tag equals `platform` lands on
/// its base key and wins there. When both sides are mappings the annotated
/// one wins key by key, with the base filling the holes. Nested mappings
/// resolve first so staged values are already final.
pub fn resolve_platform(doc: &mut Document, platform: &str) {
    for value in doc.values_mut() {
        if let Value::Object(child) = value {
            resolve_platform(child, platform);
        }
    }
    let annotated: Vec<String> = doc
        .keys()
        .filter(|key| split_annotation(key).is_some())
        .cloned()
        .collect();
    for key in annotated {
        let value = match doc.shift_remove(&key) {
            Some(value) => value,
            None => continue,
        };
        let (base, tag) = match split_annotation(&key) {
            Some(parts) => parts,
            None => continue,
        };
        if tag != platform {
            continue;
        }
        match (doc.get_mut(base), value) {
            (Some(Value::Object(existing)), Value::Object(mut incoming)) => {
                fill_missing(&mut incoming, existing);
                *existing = incoming;
            }
            (Some(existing), incoming) => *existing = incoming,
            (None, incoming) => {
                doc.insert(base.to_string(), incoming);
            }
        }
    }
}
