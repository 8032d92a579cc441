//! Structured logging with request and store context.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use theme_core::RequestId;

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Upper-case label used in human-readable lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// One log line before formatting.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Request ID for correlation.
    pub request_id: String,
    /// Store code the request was served for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Component that wrote the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Extra fields, flattened into the JSON object.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
    /// Wall-clock time, RFC 3339.
    pub timestamp: String,
}

impl LogEntry {
    /// One JSON line. Falls back to the bare message if encoding fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// `[LEVEL] message store=.. | key=value ...`, fields in key order.
    pub fn to_human(&self) -> String {
        let mut line = format!("[{}] {}", self.level.label(), self.message);

        if let Some(store) = &self.store {
            line.push_str(" store=");
            line.push_str(store);
        }

        let pairs: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(text) => format!("{}={}", key, text),
                other => format!("{}={}", key, other),
            })
            .collect();
        if !pairs.is_empty() {
            line.push_str(" | ");
            line.push_str(&pairs.join(" "));
        }

        line
    }
}

/// Line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON lines, for log aggregation.
    #[default]
    Json,
    /// Human-readable lines, for terminals.
    Human,
}

/// Where formatted log lines go.
#[derive(Debug, Clone, Default)]
pub enum LogSink {
    #[default]
    Stderr,
    /// Lines are kept in memory, e.g. for tests or to attach to a report.
    Memory(Arc<Mutex<Vec<String>>>),
}

impl LogSink {
    /// A fresh in-memory sink.
    pub fn memory() -> Self {
        Self::Memory(Arc::new(Mutex::new(Vec::new())))
    }

    /// Lines written so far. Always empty for stderr.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Stderr => Vec::new(),
            Self::Memory(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
        }
    }

    fn write(&self, line: String) {
        match self {
            Self::Stderr => eprintln!("{}", line),
            Self::Memory(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(line);
                }
            }
        }
    }
}

/// Structured logger with request and store context.
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    request_id: RequestId,
    store: Option<String>,
    component: Option<String>,
    min_level: LogLevel,
    format: LogFormat,
    sink: LogSink,
}

impl StructuredLogger {
    /// Create a logger for a request.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            store: None,
            component: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: LogSink::Stderr,
        }
    }

    /// Set the store code.
    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_sink(mut self, sink: LogSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Whether entries at `level` are written.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Build the entry for a message without writing it.
    pub fn entry(
        &self,
        level: LogLevel,
        message: &str,
        fields: BTreeMap<String, serde_json::Value>,
    ) -> LogEntry {
        self.entry_at(level, message, fields, Utc::now())
    }

    fn entry_at(
        &self,
        level: LogLevel,
        message: &str,
        fields: BTreeMap<String, serde_json::Value>,
        at: DateTime<Utc>,
    ) -> LogEntry {
        LogEntry {
            level,
            message: message.to_string(),
            request_id: self.request_id.to_string(),
            store: self.store.clone(),
            component: self.component.clone(),
            fields,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if !self.enabled(level) {
            return;
        }

        let entry = self.entry(level, message, fields);
        let output = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };

        self.sink.write(output);
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Start building an entry at `level`.
    pub fn builder(&self, level: LogLevel, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, level, message)
    }

    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }
}

/// Collects fields for one entry, then writes it with [`LogBuilder::emit`].
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add a string field when `value` is present.
    pub fn field_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Write the entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn logger() -> StructuredLogger {
        StructuredLogger::new(RequestId::from_string("req-1"))
            .with_store("en")
            .with_sink(LogSink::memory())
    }

    #[test]
    fn test_json_line() {
        let logger = logger();
        logger.info_builder("rendered").field("page", "category").emit();

        let lines = logger.sink().lines();
        assert_eq!(lines.len(), 1);

        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["level"], "info");
        assert_eq!(value["request_id"], "req-1");
        assert_eq!(value["store"], "en");
        assert_eq!(value["page"], "category");
        assert!(value.get("component").is_none());
    }

    #[test]
    fn test_min_level_filters() {
        let logger = logger();
        logger.debug("hidden");
        logger.warn("shown");
        assert_eq!(logger.sink().lines().len(), 1);

        let verbose = logger.clone().with_min_level(LogLevel::Debug);
        verbose.debug("now shown");
        assert_eq!(verbose.sink().lines().len(), 2);
    }

    #[test]
    fn test_human_format() {
        let logger = logger().with_format(LogFormat::Human);
        logger
            .warn_builder("malformed setting")
            .field("key", "detect_js")
            .field_bool("default_used", true)
            .emit();

        assert_eq!(
            logger.sink().lines(),
            vec!["[WARN] malformed setting store=en | default_used=true key=detect_js"]
        );
    }

    #[test]
    fn test_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let entry = logger().entry_at(LogLevel::Info, "x", BTreeMap::new(), at);
        assert_eq!(entry.timestamp, "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
