//! Inbound event records for request logging
//!
//! An `EventRecord` is an open mapping of call metadata. Only the keys in
//! [`keys`] are read by [`crate::RequestLogger`]; anything else is carried but
//! never forwarded. Missing keys are not an error.

use crate::core::{FieldValue, LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys an `EventRecord` is expected to carry (case-sensitive)
pub mod keys {
    pub const TAG: &str = "tag";
    pub const MESSAGE: &str = "message";
    pub const DURATION: &str = "duration";
    pub const REQUEST_IP: &str = "request_ip";
    pub const REQUEST_REMOTE_ADDR: &str = "request_remote_addr";
    pub const REQUEST_URI: &str = "request_uri";
    pub const REQUEST_PATTERN: &str = "request_pattern";
    pub const REQUEST_USER_AGENT: &str = "request_user_agent";
    pub const RESPONSE_CODE: &str = "response_code";
    pub const RESPONSE_BYTES: &str = "response_bytes";
    pub const USER_ID: &str = "user_id";

    pub const ALL: [&str; 11] = [
        TAG,
        MESSAGE,
        DURATION,
        REQUEST_IP,
        REQUEST_REMOTE_ADDR,
        REQUEST_URI,
        REQUEST_PATTERN,
        REQUEST_USER_AGENT,
        RESPONSE_CODE,
        RESPONSE_BYTES,
        USER_ID,
    ];
}

/// Open mapping of HTTP/call metadata handed to a request logger per call
///
/// # Example
///
/// ```
/// use rust_context_logger::EventRecord;
///
/// let event = EventRecord::new()
///     .with_field("tag", "t1")
///     .with_field("message", "oops")
///     .with_field("response_code", 500);
///
/// assert_eq!(event.message_text(), "oops");
/// assert!(event.get("user_id").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl EventRecord {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Value under `key`, or `Null` when absent
    pub fn value_or_null(&self, key: &str) -> FieldValue {
        self.fields.get(key).cloned().unwrap_or(FieldValue::Null)
    }

    /// The `message` entry as text
    ///
    /// Strings are used verbatim, other values by their display form; an
    /// absent or null message is empty.
    pub fn message_text(&self) -> String {
        match self.fields.get(keys::MESSAGE) {
            None | Some(FieldValue::Null) => String::new(),
            Some(FieldValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Parse a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }
}

impl TryFrom<serde_json::Value> for EventRecord {
    type Error = LoggerError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(LoggerError::other(format!(
                "event record must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl<K, V> FromIterator<(K, V)> for EventRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for EventRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.fields.insert(k.into(), v.into());
        }
    }
}
