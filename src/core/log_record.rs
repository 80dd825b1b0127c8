//! Log record handed to sink formatters

use super::log_level::LogLevel;
use super::properties::Properties;
use chrono::{DateTime, Utc};

/// A single message as seen by a sink for its category.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub category: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub properties: Properties,
}

impl LogRecord {
    /// Sanitize text to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a single log call can never forge additional lines.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, category: &str, message: &str) -> Self {
        Self {
            level,
            category: category.to_string(),
            message: Self::sanitize(message),
            timestamp: Utc::now(),
            properties: Properties::new(),
        }
    }

    pub fn with_properties(mut self, properties: &Properties) -> Self {
        self.properties = properties
            .iter()
            .map(|(k, v)| (Self::sanitize(k), Self::sanitize(v)))
            .collect();
        self
    }
}
