//! Values documents.
//!
//! A [`SheetValue`] is a JSON-shaped value whose containers sit behind an
//! [`Arc`]. Cloning a document is therefore cheap, and the path store can
//! rebuild only the containers along an edited path while every sibling
//! subtree stays shared with the previous version.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered key/value container used for objects and flat path maps.
pub type ValueMap = IndexMap<String, SheetValue>;

/// A node of a values document, serialized as plain JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetValue {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Arc<Vec<SheetValue>>),
    Object(Arc<ValueMap>),
}

impl SheetValue {
    /// The uniform default stored in every freshly initialized leaf.
    pub fn empty_string() -> Self {
        SheetValue::String(String::new())
    }

    pub fn empty_object() -> Self {
        SheetValue::Object(Arc::new(ValueMap::new()))
    }

    pub fn empty_list() -> Self {
        SheetValue::List(Arc::new(Vec::new()))
    }

    pub fn object(entries: ValueMap) -> Self {
        SheetValue::Object(Arc::new(entries))
    }

    pub fn list(items: Vec<SheetValue>) -> Self {
        SheetValue::List(Arc::new(items))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SheetValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, SheetValue::Object(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, SheetValue::List(_))
    }

    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            SheetValue::Object(entries) => Some(entries.as_ref()),
            _ => None,
        }
    }

    /// Mutable access to an object's entries, unsharing them first if needed.
    pub fn as_object_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            SheetValue::Object(entries) => Some(Arc::make_mut(entries)),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SheetValue]> {
        match self {
            SheetValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SheetValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SheetValue::Integer(value) => Some(*value),
            SheetValue::Float(value) => Some(*value as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SheetValue::Integer(value) => Some(*value as f64),
            SheetValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SheetValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Converts to a `serde_json::Value`. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            SheetValue::Null => Value::Null,
            SheetValue::Boolean(value) => Value::Bool(*value),
            SheetValue::Integer(value) => Value::from(*value),
            SheetValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SheetValue::String(value) => Value::String(value.clone()),
            SheetValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            SheetValue::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for SheetValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => SheetValue::Null,
            Value::Bool(value) => SheetValue::Boolean(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => SheetValue::Integer(value),
                None => SheetValue::Float(number.as_f64().unwrap_or_default()),
            },
            Value::String(value) => SheetValue::String(value),
            Value::Array(items) => SheetValue::list(items.into_iter().map(Self::from).collect()),
            Value::Object(entries) => SheetValue::object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&SheetValue> for serde_json::Value {
    fn from(value: &SheetValue) -> Self {
        value.to_json()
    }
}

impl From<&str> for SheetValue {
    fn from(value: &str) -> Self {
        SheetValue::String(value.to_string())
    }
}

impl From<String> for SheetValue {
    fn from(value: String) -> Self {
        SheetValue::String(value)
    }
}

impl From<bool> for SheetValue {
    fn from(value: bool) -> Self {
        SheetValue::Boolean(value)
    }
}

impl From<i64> for SheetValue {
    fn from(value: i64) -> Self {
        SheetValue::Integer(value)
    }
}

impl From<i32> for SheetValue {
    fn from(value: i32) -> Self {
        SheetValue::Integer(value.into())
    }
}

impl From<f64> for SheetValue {
    fn from(value: f64) -> Self {
        SheetValue::Float(value)
    }
}

impl From<ValueMap> for SheetValue {
    fn from(entries: ValueMap) -> Self {
        SheetValue::object(entries)
    }
}

impl From<Vec<SheetValue>> for SheetValue {
    fn from(items: Vec<SheetValue>) -> Self {
        SheetValue::list(items)
    }
}
