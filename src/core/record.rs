//! Log records and caller metadata
//!
//! Both types are insertion-ordered string-keyed maps of JSON values.
//! Inserting a key that already exists replaces the value in place, so the
//! field keeps the position of its first insertion (last write wins).

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const SEVERITY_KEY: &str = "severity";
pub const TIMESTAMP_KEY: &str = "timestamp";
pub const NAMESPACE_KEY: &str = "namespace";
pub const DEFAULT_MESSAGE_KEY: &str = "msg";

/// Extra key-value fields attached to a log call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: Map<String, Value>,
}

impl Metadata {
    /// Create a new empty metadata set
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Build metadata from any serializable struct or map
    ///
    /// The value must serialize to a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(LoggerError::other(format!(
                "metadata must serialize to an object, got {}",
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl IntoIterator for Metadata {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

/// A log record on its way to a sink
///
/// Records handed to sinks carry `severity`, `timestamp` and `namespace`
/// first, then the message field, then metadata in call order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Set a field, replacing any previous value at its original position
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    /// Spread metadata into the record, later keys overwriting earlier ones
    pub fn extend(&mut self, metadata: Metadata) {
        for (key, value) in metadata {
            self.fields.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `severity` field, if present
    pub fn severity(&self) -> Option<&Value> {
        self.fields.get(SEVERITY_KEY)
    }

    /// The `timestamp` field rendered as a string, if present
    pub fn timestamp(&self) -> Option<&str> {
        self.fields.get(TIMESTAMP_KEY).and_then(Value::as_str)
    }

    /// The `namespace` field rendered as a string, if present
    pub fn namespace(&self) -> Option<&str> {
        self.fields.get(NAMESPACE_KEY).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields)?)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_keeps_call_order() {
        let meta = Metadata::new()
            .with_field("zeta", 1)
            .with_field("alpha", "a")
            .with_field("mid", true);

        let keys: Vec<&String> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_record_overwrite_keeps_position() {
        let mut record = Record::new();
        record.insert("severity", "INFO");
        record.insert("timestamp", "t0");
        record.insert("namespace", "svc");
        record.extend(Metadata::new().with_field("timestamp", "t1").with_field("n", 1));

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["severity", "timestamp", "namespace", "n"]);
        assert_eq!(record.timestamp(), Some("t1"));
    }

    #[test]
    fn test_record_to_json_preserves_order() {
        let mut record = Record::new();
        record.insert("severity", "DEBUG");
        record.insert("timestamp", "2025-01-08 10:30:45");
        record.insert("namespace", "X");
        record.insert("msg", "hi");
        record.insert("n", 1);

        assert_eq!(
            record.to_json().unwrap(),
            r#"{"severity":"DEBUG","timestamp":"2025-01-08 10:30:45","namespace":"X","msg":"hi","n":1}"#
        );
    }

    #[test]
    fn test_metadata_from_serialize() {
        #[derive(Serialize)]
        struct Request {
            id: u32,
            path: &'static str,
        }

        let meta = Metadata::from_serialize(&Request { id: 7, path: "/health" }).unwrap();
        assert_eq!(meta.get("id"), Some(&json!(7)));
        assert_eq!(meta.get("path"), Some(&json!("/health")));

        assert!(Metadata::from_serialize(&42).is_err());
    }

    #[test]
    fn test_format_fields() {
        let meta = Metadata::new().with_field("user", "alice").with_field("count", 5);
        assert_eq!(meta.format_fields(), "user=alice count=5");
    }
}
