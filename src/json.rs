use serde::{Serialize, Serializer};
use serde::ser::{SerializeMap, SerializeSeq};
use crate::context::Context;
use crate::error::Result;
pub use serde_json::Value as JsonValue;


impl From<&JsonValue> for Context {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Context::Null,
            JsonValue::Bool(b) => Context::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Context::Integer(i),
                None => Context::Float(n.as_f64().unwrap_or_default())
            },
            JsonValue::String(s) => Context::Text(s.clone()),
            JsonValue::Array(seq) => Context::Sequence(
                seq.iter().map(Context::from).collect()
            ),
            JsonValue::Object(obj) => obj.iter()
                .map(|(k, v)| (k.clone(), Context::from(v)))
                .collect(),
        }
    }
}

impl From<JsonValue> for Context {
    fn from(value: JsonValue) -> Self {
        Context::from(&value)
    }
}

impl Context {
    /// Builds a context from any serializable value.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Context> {
        let value = serde_json::to_value(value)?;
        Ok(Context::from(value))
    }
}

// Lambdas have no data form and serialize as null.
impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Context::Null | Context::Lambda(_) => serializer.serialize_unit(),
            Context::Bool(b) => serializer.serialize_bool(*b),
            Context::Integer(n) => serializer.serialize_i64(*n),
            Context::Float(x) => serializer.serialize_f64(*x),
            Context::Text(text) => serializer.serialize_str(text),
            Context::Sequence(seq) => {
                let mut out = serializer.serialize_seq(Some(seq.len()))?;
                for item in seq {
                    out.serialize_element(item)?;
                }
                out.end()
            },
            Context::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}
