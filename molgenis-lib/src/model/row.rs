//! Untyped entity rows

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A row of an entity type that has no Rust struct.
///
/// Use with [`MolgenisClient::query_as`](crate::MolgenisClient::query_as) and
/// [`MolgenisClient::get_as`](crate::MolgenisClient::get_as) when the entity
/// type is only known at runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Returns the raw value of an attribute.
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    /// Returns an attribute as a string slice, if it is a JSON string.
    pub fn get_str(&self, attribute: &str) -> Option<&str> {
        self.0.get(attribute).and_then(Value::as_str)
    }

    /// Returns an attribute as an integer, if it is a JSON integer.
    pub fn get_i64(&self, attribute: &str) -> Option<i64> {
        self.0.get(attribute).and_then(Value::as_i64)
    }

    /// Returns an attribute as a bool, if it is a JSON bool.
    pub fn get_bool(&self, attribute: &str) -> Option<bool> {
        self.0.get(attribute).and_then(Value::as_bool)
    }

    /// Returns the `_href` of the row, which the v2 API adds to every row.
    pub fn href(&self) -> Option<&str> {
        self.get_str("_href")
    }

    /// Iterates over attribute names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the number of attributes in the row.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the row has no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the row and returns the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
