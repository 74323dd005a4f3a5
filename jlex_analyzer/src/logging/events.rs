//! Log events

use super::codes::{self, Code};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: message.to_string(),
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    /// Warning without a specific code
    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, warning_code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    /// Single-line human readable form
    pub fn format(&self) -> String {
        let mut output = format!(
            "[{}] {} - {}",
            self.level.as_str(),
            self.code.as_str(),
            self.message
        );

        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            output.push_str(&format!(" ({})", pairs.join(", ")));
        }

        output
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let timestamp = self
            .timestamp
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let mut json = serde_json::json!({
            "timestamp": timestamp,
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "recoverable": codes::is_recoverable(self.code.as_str()),
                "requires_halt": self.requires_halt(),
                "description": codes::get_description(self.code.as_str()),
                "recommended_action": codes::get_action(self.code.as_str()),
            });
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::to_value(&self.context)?;
        }

        serde_json::to_string(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_event_creation() {
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "File not found");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E005");
        assert_eq!(event.category(), "FileProcessing");
        assert!(event.requires_halt());
    }

    #[test]
    fn test_event_formatting_includes_context() {
        let event = LogEvent::warning_with_code(
            codes::token_table::DUPLICATE_LITERAL,
            "Duplicate literal",
        )
        .with_context("literal", "=")
        .with_context("entry", "3");

        let formatted = event.format();
        assert!(formatted.starts_with("[WARN] W036 - Duplicate literal"));
        assert!(formatted.contains("entry=3, literal=="));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::token_table::TABLE_INVALID_JSON, "Bad table")
            .with_context("path", "tokens.json");

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "ERROR");
        assert_eq!(json["code"], "E031");
        assert_eq!(json["context"]["path"], "tokens.json");
        assert_eq!(json["error_metadata"]["requires_halt"], true);
    }

    #[test]
    fn test_generic_codes() {
        assert_eq!(LogEvent::warning("w").code.as_str(), "W000");
        assert_eq!(LogEvent::info("i").code.as_str(), "I000");
        assert_eq!(LogEvent::debug("d").level, LogLevel::Debug);
    }
}
