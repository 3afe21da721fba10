use indexmap::IndexMap;
use serde::Serialize;

/// Marker key the structural quoter writes in place of a `key(parent, ...)`
/// annotation. Consumed by the inheritance merger.
pub const INHERIT_KEY: &str = "sigil_inherit";

/// Reserved key holding scope-local variable bindings. Consumed by the
/// variable resolver.
pub const VARS_KEY: &str = "sigil_vars";

/// A fully canonicalized value. Once the text pipeline has run there is no
/// residual raw text; every node is exactly one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Array(Vec<Value>),
    Object(Document),
}

/// The root of a compiled document: an insertion-ordered string map.
pub type Document = IndexMap<String, Value>;

impl Value {
    pub fn as_object(&self) -> Option<&Document> {
        if let Value::Object(map) = self {
            Some(map)
        } else {
            None
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Document> {
        if let Value::Object(map) = self {
            Some(map)
        } else {
            None
        }
    }

    /// Textual form used when a reference is pasted into a larger string.
    pub fn display_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    pub(crate) fn from_json(json: serde_json::Value) -> Value {
        match json {
            // a bare `null` in source is quoted into the string "null" by the
            // classifier, so this only guards totality
            serde_json::Value::Null => Value::String("null".into()),
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// Serialize a document as indented JSON, 4-space convention.
pub fn to_json_pretty(doc: &Document) -> String {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match doc.serialize(&mut ser) {
        Ok(()) => String::from_utf8(buf).unwrap_or_default(),
        Err(_) => String::new(),
    }
}
