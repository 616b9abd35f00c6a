use crate::context::Context;
pub use serde_yaml::Value as YamlValue;


impl From<&YamlValue> for Context {
    fn from(value: &YamlValue) -> Self {
        match value {
            YamlValue::Null => Context::Null,
            YamlValue::Bool(b) => Context::Bool(*b),
            YamlValue::Number(n) => match n.as_i64() {
                Some(i) => Context::Integer(i),
                None => Context::Float(n.as_f64().unwrap_or_default())
            },
            YamlValue::String(s) => Context::Text(s.clone()),
            YamlValue::Sequence(seq) => Context::Sequence(
                seq.iter().map(Context::from).collect()
            ),
            YamlValue::Mapping(obj) => obj.iter()
                .filter_map(|(k, v)| key(k).map(|k| (k, Context::from(v))))
                .collect(),
            YamlValue::Tagged(tagged) => Context::from(&tagged.value),
        }
    }
}

impl From<YamlValue> for Context {
    fn from(value: YamlValue) -> Self {
        Context::from(&value)
    }
}

// only scalar keys can be addressed by a path segment
fn key(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None
    }
}
