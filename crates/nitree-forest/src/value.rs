use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::errors::ForestError;
use crate::path::NodePath;

/// Data that can be named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// UTF-8 text leaf.
    Text(String),
    /// Sequence whose element order is part of its name.
    Ordered(Vec<Value>),
    /// Sequence named independently of element order.
    Unordered(Vec<Value>),
    /// Key/value pairs, named as an unordered sequence of `(key, value)` pairs.
    Mapping(Vec<(Value, Value)>),
}

/// How JSON arrays are interpreted during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMode {
    /// Arrays become unordered sequences.
    #[default]
    Unordered,
    /// Arrays become ordered sequences.
    Ordered,
}

impl Value {
    /// Kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Ordered(_) => "ordered",
            Value::Unordered(_) => "unordered",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Rewrites a mapping as the unordered sequence of pairs it is named as.
    ///
    /// Other kinds are returned unchanged.
    pub fn into_entry_pairs(self) -> Value {
        match self {
            Value::Mapping(entries) => Value::Unordered(
                entries
                    .into_iter()
                    .map(|(k, v)| Value::Ordered(vec![k, v]))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Converts parsed JSON.
    ///
    /// Strings become text, arrays become sequences according to `mode`, and
    /// objects become mappings with text keys.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::InvalidInput`] for numbers, booleans and null.
    pub fn from_json(json: &JsonValue, mode: ArrayMode) -> Result<Self, ForestError> {
        from_json_at(json, mode, &NodePath::root())
    }
}

fn from_json_at(json: &JsonValue, mode: ArrayMode, path: &NodePath) -> Result<Value, ForestError> {
    match json {
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Array(items) => {
            let children = items
                .iter()
                .enumerate()
                .map(|(idx, item)| from_json_at(item, mode, &path.push_index(idx)))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(match mode {
                ArrayMode::Unordered => Value::Unordered(children),
                ArrayMode::Ordered => Value::Ordered(children),
            })
        }
        JsonValue::Object(map) => {
            let entries = map
                .iter()
                .map(|(key, child)| {
                    let value = from_json_at(child, mode, &path.push_field(key))?;
                    Ok((Value::Text(key.clone()), value))
                })
                .collect::<Result<Vec<_>, ForestError>>()?;
            Ok(Value::Mapping(entries))
        }
        JsonValue::Number(_) => Err(invalid("number", path)),
        JsonValue::Bool(_) => Err(invalid("boolean", path)),
        JsonValue::Null => Err(invalid("null", path)),
    }
}

fn invalid(kind: &str, path: &NodePath) -> ForestError {
    ForestError::InvalidInput {
        kind: kind.to_string(),
        path: path.to_string(),
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
