//! Typed request records.
//!
//! A [`RequestRecord`] is the output of binding: an ordered mapping from
//! field name to a typed [`FieldValue`]. Records are created fresh per
//! request and discarded once the response is produced.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type a bound field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 text.
    Str,
    /// Signed 64-bit integer.
    Int,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "string"),
            Self::Int => write!(f, "integer"),
        }
    }
}

/// A single bound value.
///
/// Serializes untagged, so a record round-trips through JSON as a plain
/// object: strings stay strings, integers stay numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A text value.
    Str(String),
    /// An integer value.
    Int(i64),
}

impl FieldValue {
    /// Returns the type of this value.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Str(_) => FieldType::Str,
            Self::Int(_) => FieldType::Int,
        }
    }

    /// Returns the text content if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Returns the integer content if this is an integer value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(_) => None,
        }
    }

    /// Converts this value into a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Str(s) => serde_json::Value::String(s.clone()),
            Self::Int(n) => serde_json::Value::Number((*n).into()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// An ordered mapping from field name to typed value.
///
/// Field names are case-sensitive and looked up by exact match. Iteration
/// order is insertion order, which for bound records is the schema's
/// declaration order, so a re-encoded record is byte-stable.
///
/// # Example
///
/// ```rust
/// use ligature_core::{FieldValue, RequestRecord};
///
/// let mut record = RequestRecord::new();
/// record.insert("username", FieldValue::Str("amy".into()));
/// record.insert("age", FieldValue::Int(20));
///
/// assert_eq!(record.get_str("username"), Some("amy"));
/// assert_eq!(record.get_int("age"), Some(20));
/// assert_eq!(record.get("Username"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestRecord {
    fields: IndexMap<String, FieldValue>,
}

impl RequestRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Returns the value for a field by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns the text content of a string field.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    /// Returns the content of an integer field.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(FieldValue::as_int)
    }

    /// Returns true if a field with this exact name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Converts the record into a JSON object, preserving field order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

impl FromIterator<(String, FieldValue)> for RequestRecord {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for RequestRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut record = RequestRecord::new();
        record.insert("username", FieldValue::Str("amy".into()));
        record.insert("age", FieldValue::Int(20));

        assert_eq!(record.len(), 2);
        assert_eq!(record.get_str("username"), Some("amy"));
        assert_eq!(record.get_int("age"), Some(20));
    }

    #[test]
    fn test_case_sensitive_lookup() {
        let mut record = RequestRecord::new();
        record.insert("username", FieldValue::Str("amy".into()));

        assert!(record.contains("username"));
        assert!(!record.contains("Username"));
        assert!(!record.contains("USERNAME"));
    }

    #[test]
    fn test_typed_accessors_reject_wrong_type() {
        let mut record = RequestRecord::new();
        record.insert("age", FieldValue::Int(20));

        assert_eq!(record.get_str("age"), None);
        assert_eq!(record.get_int("age"), Some(20));
    }

    #[test]
    fn test_insert_replaces() {
        let mut record = RequestRecord::new();
        record.insert("age", FieldValue::Int(20));
        record.insert("age", FieldValue::Int(21));

        assert_eq!(record.len(), 1);
        assert_eq!(record.get_int("age"), Some(21));
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let mut record = RequestRecord::new();
        record.insert("username", FieldValue::Str("amy".into()));
        record.insert("age", FieldValue::Int(20));

        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["username", "age"]);
    }

    #[test]
    fn test_to_json_preserves_order() {
        let mut record = RequestRecord::new();
        record.insert("username", FieldValue::Str("amy".into()));
        record.insert("age", FieldValue::Int(20));

        let json = serde_json::to_string(&record.to_json()).unwrap();
        assert_eq!(json, r#"{"username":"amy","age":20}"#);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut record = RequestRecord::new();
        record.insert("username", FieldValue::Str("amy".into()));
        record.insert("age", FieldValue::Int(20));

        let text = serde_json::to_string(&record).unwrap();
        let back: RequestRecord = serde_json::from_str(&text).unwrap();

        assert_eq!(back, record);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Str("amy".into()).to_string(), "amy");
        assert_eq!(FieldValue::Int(-1).to_string(), "-1");
    }

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Str.to_string(), "string");
        assert_eq!(FieldType::Int.to_string(), "integer");
    }
}
