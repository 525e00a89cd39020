//! The flat, loosely-typed configuration representation.
//!
//! A [`ConfigMap`] is what the host tool hands us: an ordered mapping from
//! field name to a [`ConfigValue`]. Absence is modelled by the key being
//! missing, never by a placeholder value, so "not supplied" and "supplied as
//! zero" stay distinguishable all the way through decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Ordered field map. Insertion order is preserved on encode.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// Undeclared entries of nested blocks, keyed by the block's dotted path
/// (e.g. `item_data.modifier_list_info[0]`).
pub type NestedFields = IndexMap<String, ConfigMap>;

/// A single configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<ConfigValue>),
    Map(ConfigMap),
}

impl ConfigValue {
    /// Human-readable name of the value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Map(map)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        ConfigValue::List(items.into_iter().map(ConfigValue::String).collect())
    }
}

// ── JSON bridge ─────────────────────────────────────────────────────

/// Convert a JSON object into a [`ConfigMap`].
///
/// `null` map entries are treated as absent and dropped. Floating point
/// numbers are rejected: the configuration representation is integer-only.
pub fn from_json(value: &serde_json::Value) -> Result<ConfigMap, CodecError> {
    match value {
        serde_json::Value::Object(obj) => json_object(obj, ""),
        other => Err(CodecError::TypeMismatch {
            field: "<root>".to_string(),
            expected: "map",
            found: json_kind(other),
        }),
    }
}

/// Render a [`ConfigMap`] as a JSON object, preserving key order.
pub fn to_json(map: &ConfigMap) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(value: &ConfigValue) -> serde_json::Value {
    match value {
        ConfigValue::Bool(b) => serde_json::Value::Bool(*b),
        ConfigValue::Int(n) => serde_json::Value::from(*n),
        ConfigValue::String(s) => serde_json::Value::String(s.clone()),
        ConfigValue::List(items) => {
            serde_json::Value::Array(items.iter().map(value_to_json).collect())
        }
        ConfigValue::Map(map) => to_json(map),
    }
}

fn json_object(
    obj: &serde_json::Map<String, serde_json::Value>,
    path: &str,
) -> Result<ConfigMap, CodecError> {
    let mut map = ConfigMap::with_capacity(obj.len());
    for (key, value) in obj {
        if value.is_null() {
            continue;
        }
        let field = join_path(path, key);
        map.insert(key.clone(), json_value(value, &field)?);
    }
    Ok(map)
}

fn json_value(value: &serde_json::Value, field: &str) -> Result<ConfigValue, CodecError> {
    match value {
        serde_json::Value::Bool(b) => Ok(ConfigValue::Bool(*b)),
        serde_json::Value::Number(n) => {
            n.as_i64()
                .map(ConfigValue::Int)
                .ok_or_else(|| CodecError::TypeMismatch {
                    field: field.to_string(),
                    expected: "int",
                    found: "float",
                })
        }
        serde_json::Value::String(s) => Ok(ConfigValue::String(s.clone())),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| json_value(item, &format!("{}[{}]", field, i)))
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::List),
        serde_json::Value::Object(obj) => json_object(obj, field).map(ConfigValue::Map),
        serde_json::Value::Null => Err(CodecError::TypeMismatch {
            field: field.to_string(),
            expected: "value",
            found: "null",
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "map",
    }
}

pub(crate) fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}
