//! Free-form attribute values
//!
//! POI attributes are heterogeneous: strings, numbers, booleans and nested
//! structures all appear in real configurations. [`AttributeValue`] is the
//! dynamic value type used for them, and also the tree the configuration
//! loader walks after parsing YAML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically typed attribute value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Absent value
    #[default]
    Null,
    /// Boolean flag
    Bool(bool),
    /// Whole number
    Integer(i64),
    /// Real number
    Float(f64),
    /// Text
    Text(String),
    /// Ordered list of values
    List(Vec<AttributeValue>),
    /// Nested mapping
    Map(BTreeMap<String, AttributeValue>),
}

/// The kind of an [`AttributeValue`], used by type guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Absent value
    Null,
    /// Boolean
    Bool,
    /// Whole number only
    Integer,
    /// Real number only
    Float,
    /// Whole or real number
    Number,
    /// Text
    Text,
    /// List
    List,
    /// Mapping
    Map,
}

impl ValueKind {
    /// Check whether `value` is of this kind
    pub fn matches(self, value: &AttributeValue) -> bool {
        match self {
            ValueKind::Number => value.kind() == ValueKind::Integer || value.kind() == ValueKind::Float,
            kind => value.kind() == kind,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::Number => write!(f, "number"),
            ValueKind::Text => write!(f, "string"),
            ValueKind::List => write!(f, "list"),
            ValueKind::Map => write!(f, "mapping"),
        }
    }
}

impl AttributeValue {
    /// The concrete kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::Null => ValueKind::Null,
            AttributeValue::Bool(_) => ValueKind::Bool,
            AttributeValue::Integer(_) => ValueKind::Integer,
            AttributeValue::Float(_) => ValueKind::Float,
            AttributeValue::Text(_) => ValueKind::Text,
            AttributeValue::List(_) => ValueKind::List,
            AttributeValue::Map(_) => ValueKind::Map,
        }
    }

    /// Check if this is the absent value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Borrow the text content, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is a whole number
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric content as `f64`, for whole and real numbers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(n) => Some(*n as f64),
            AttributeValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean content, if this is a flag
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the list content
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the mapping content
    pub fn as_map(&self) -> Option<&BTreeMap<String, AttributeValue>> {
        match self {
            AttributeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key, if this is a mapping
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(n) => write!(f, "{}", n),
            AttributeValue::Float(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            AttributeValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(i64::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(value: Vec<AttributeValue>) -> Self {
        AttributeValue::List(value)
    }
}

impl From<BTreeMap<String, AttributeValue>> for AttributeValue {
    fn from(value: BTreeMap<String, AttributeValue>) -> Self {
        AttributeValue::Map(value)
    }
}

impl From<serde_yaml::Value> for AttributeValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Integer(i),
                None => n.as_f64().map(AttributeValue::Float).unwrap_or(AttributeValue::Null),
            },
            Value::String(s) => AttributeValue::Text(s),
            Value::Sequence(items) => {
                AttributeValue::List(items.into_iter().map(AttributeValue::from).collect())
            }
            Value::Mapping(mapping) => AttributeValue::Map(
                mapping
                    .into_iter()
                    .map(|(key, value)| (yaml_key_to_string(key), AttributeValue::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => AttributeValue::from(tagged.value),
        }
    }
}

/// Mapping keys are strings in the catalog; scalar keys keep their YAML spelling
fn yaml_key_to_string(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}
