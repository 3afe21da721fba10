use crate::ast::{Document, Value};

/// Fill-only merge: copy entries of `src` that `dest` lacks. An existing
/// `dest` entry is never overwritten, whatever its type; when both sides
/// hold a mapping under the same key the rule applies key by key inside it.
pub fn fill_missing(dest: &mut Document, src: &Document) {
    for (key, value) in src {
        match dest.get_mut(key) {
            None => {
                dest.insert(key.clone(), value.clone());
            }
            Some(Value::Object(existing)) => {
                if let Value::Object(incoming) = value {
                    fill_missing(existing, incoming);
                }
            }
            Some(_) => {}
        }
    }
}
