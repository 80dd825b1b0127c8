//! Output format configuration for sink lines
//!
//! Provides different renderings of a [`LogRecord`]:
//! - Text: Human-readable format (default)
//! - Json: One JSON object per line
//! - Logfmt: Key-value format compatible with log aggregation tools
//!
//! Every rendering ends with a newline.

use super::log_record::LogRecord;
use serde::{Deserialize, Serialize};

/// Output format for sink lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `[Info] http: Request processed` followed by one
    /// `\tkey: value` line per property
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"Info","category":"http","message":"Request processed"}`
    Json,

    /// Logfmt format (key=value pairs)
    ///
    /// Example: `level=Info category=http message="Request processed"`
    Logfmt,
}

impl OutputFormat {
    /// Format a record according to this output format
    pub fn format(&self, record: &LogRecord) -> String {
        match self {
            OutputFormat::Text => self.format_text(record),
            OutputFormat::Json => self.format_json(record),
            OutputFormat::Logfmt => self.format_logfmt(record),
        }
    }

    /// Format as human-readable text
    fn format_text(&self, record: &LogRecord) -> String {
        let mut out = format!("[{}] {}: {}\n", record.level, record.category, record.message);
        for (key, value) in record.properties.iter() {
            out.push('\t');
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Format as JSON
    fn format_json(&self, record: &LogRecord) -> String {
        let mut json_obj = serde_json::Map::new();

        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::String(
                record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            ),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert(
            "category".to_string(),
            serde_json::Value::String(record.category.clone()),
        );
        json_obj.insert(
            "message".to_string(),
            serde_json::Value::String(record.message.clone()),
        );

        if !record.properties.is_empty() {
            let props = record
                .properties
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect();
            json_obj.insert("properties".to_string(), serde_json::Value::Object(props));
        }

        let mut line =
            serde_json::to_string(&serde_json::Value::Object(json_obj)).unwrap_or_default();
        line.push('\n');
        line
    }

    /// Format as logfmt (key=value pairs)
    fn format_logfmt(&self, record: &LogRecord) -> String {
        let mut parts = Vec::with_capacity(3 + record.properties.len());

        parts.push(format!("level={}", record.level.to_str()));
        parts.push(format!(
            "category={}",
            self.escape_logfmt_value(&record.category)
        ));
        // Message is always quoted
        parts.push(format!("message={}", self.quote_logfmt_value(&record.message)));

        for (key, value) in record.properties.iter() {
            parts.push(format!(
                "{}={}",
                self.escape_logfmt_key(key),
                self.escape_logfmt_value(value)
            ));
        }

        let mut line = parts.join(" ");
        line.push('\n');
        line
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_logfmt_key(&self, key: &str) -> String {
        key.chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
            .collect()
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_logfmt_value(&self, value: &str) -> String {
        if value.is_empty() || value.contains(' ') || value.contains('"') || value.contains('=') {
            self.quote_logfmt_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_logfmt_value(&self, value: &str) -> String {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, Properties};

    #[test]
    fn test_text_format() {
        let record = LogRecord::new(LogLevel::Info, "test", "Hello, World!");
        let result = OutputFormat::Text.format(&record);
        assert_eq!(result, "[Info] test: Hello, World!\n");
    }

    #[test]
    fn test_text_format_with_properties() {
        let props = Properties::new().with("user_id", 123).with("action", "login");
        let record =
            LogRecord::new(LogLevel::Warning, "auth", "User logged in").with_properties(&props);

        let result = OutputFormat::Text.format(&record);
        assert_eq!(
            result,
            "[Warning] auth: User logged in\n\taction: login\n\tuser_id: 123\n"
        );
    }

    #[test]
    fn test_json_format() {
        let props = Properties::new().with("request_id", "abc-123");
        let record =
            LogRecord::new(LogLevel::Error, "http", "Error occurred").with_properties(&props);
        let result = OutputFormat::Json.format(&record);

        assert!(result.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(result.trim_end()).unwrap();
        assert_eq!(parsed["level"], "Error");
        assert_eq!(parsed["category"], "http");
        assert_eq!(parsed["message"], "Error occurred");
        assert_eq!(parsed["properties"]["request_id"], "abc-123");
        assert!(parsed["timestamp"].is_string());
    }

    #[test]
    fn test_logfmt_format() {
        let props = Properties::new().with("query", "SELECT * FROM users WHERE id=1");
        let record =
            LogRecord::new(LogLevel::Debug, "db", "Query executed").with_properties(&props);
        let result = OutputFormat::Logfmt.format(&record);

        assert!(result.starts_with("level=Debug category=db message=\"Query executed\""));
        // Value with = should be quoted
        assert!(result.contains("query=\"SELECT * FROM users WHERE id=1\""));
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
