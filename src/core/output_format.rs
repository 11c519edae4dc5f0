//! Output format configuration for log entries
//!
//! Provides the two line formats a backend can write:
//! - Json: one JSON object per line (default)
//! - Text: logfmt-style `key=value` pairs for terminals

use super::log_context::FieldValue;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key holding the entry timestamp
pub const TIME_KEY: &str = "time";
/// Key holding the level name
pub const LEVEL_KEY: &str = "level";
/// Key holding the rendered message
pub const MESSAGE_KEY: &str = "msg";

/// Prefix applied to a field whose name collides with a reserved key
const CLASH_PREFIX: &str = "fields.";

/// Output format for log entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format for machine processing
    ///
    /// Example: `{"level":"info","msg":"Request processed","request_id":"abc","time":"2025-01-08T10:30:45Z"}`
    #[default]
    Json,

    /// Logfmt-style text
    ///
    /// Example: `time="2025-01-08T10:30:45Z" level=info msg="Request processed" request_id=abc`
    Text,
}

impl OutputFormat {
    /// Format a log entry according to this output format
    pub fn format(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Json => self.format_json(entry, timestamp_format),
            OutputFormat::Text => self.format_text(entry, timestamp_format),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "logfmt" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}

impl OutputFormat {
    /// Field key as written, moved aside when it would overwrite a reserved key
    fn field_key(key: &str) -> String {
        match key {
            TIME_KEY | LEVEL_KEY | MESSAGE_KEY => format!("{}{}", CLASH_PREFIX, key),
            _ => key.to_string(),
        }
    }

    /// Format as JSON
    ///
    /// Keys come out sorted so identical calls produce identical lines.
    fn format_json(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut json_obj = BTreeMap::new();

        for (key, value) in entry.context.fields() {
            json_obj.insert(Self::field_key(key), value.to_json_value());
        }

        json_obj.insert(
            TIME_KEY.to_string(),
            timestamp_format.to_json_value(&entry.timestamp),
        );
        json_obj.insert(
            LEVEL_KEY.to_string(),
            serde_json::Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(
            MESSAGE_KEY.to_string(),
            serde_json::Value::String(entry.message.clone()),
        );

        serde_json::to_string(&json_obj).unwrap_or_default()
    }

    /// Format as logfmt (key=value pairs)
    fn format_text(&self, entry: &LogEntry, timestamp_format: &TimestampFormat) -> String {
        let mut parts = Vec::with_capacity(entry.context.len() + 3);

        let time = timestamp_format.format(&entry.timestamp);
        let time = if timestamp_format.is_numeric() {
            time
        } else {
            self.quote_logfmt_value(&time)
        };
        parts.push(format!("{}={}", TIME_KEY, time));
        parts.push(format!("{}={}", LEVEL_KEY, entry.level.to_str()));
        parts.push(format!(
            "{}={}",
            MESSAGE_KEY,
            self.quote_logfmt_value(&entry.message)
        ));

        for (key, value) in entry.context.fields() {
            let formatted_value = match value {
                FieldValue::String(s) => self.escape_logfmt_value(s),
                other => self.escape_logfmt_value(&other.to_string()),
            };
            parts.push(format!(
                "{}={}",
                self.escape_logfmt_key(&Self::field_key(key)),
                formatted_value
            ));
        }

        parts.join(" ")
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
            .collect()
    }

    /// Escape a logfmt value (quote if empty or contains spaces, quotes, '='
    /// or control characters)
    fn escape_logfmt_value(&self, value: &str) -> String {
        let needs_quotes = value.is_empty()
            || value
                .chars()
                .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control());

        if needs_quotes {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    /// Quote a logfmt value
    ///
    /// Line breaks and tabs are written as `\n`, `\r` and `\t` so a value can
    /// never start a new line.
    fn quote_logfmt_value(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('"');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c => out.push(c),
            }
        }
        out.push('"');
        out
    }
}
