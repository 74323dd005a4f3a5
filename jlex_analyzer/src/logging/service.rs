//! Logger implementations and the service that filters events by level

use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex};

/// Sink for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level-filtering front for a [`Logger`]
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Service configured from the runtime logging preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger)
        } else {
            Arc::new(ConsoleLogger)
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Plain text logger; errors go to stderr
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        let line = truncate_message(event.format());
        match event.level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}

/// One JSON object per line on stderr
pub struct StructuredLogger;

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        match event.format_json() {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", truncate_message(event.format())),
        }
    }
}

/// Collects events in memory; used by tests and by callers that render
/// diagnostics themselves
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn has_event_with_code(&self, code: super::Code) -> bool {
        self.get_events().iter().any(|e| e.code == code)
    }

    pub fn get_warnings(&self) -> Vec<LogEvent> {
        self.get_events()
            .into_iter()
            .filter(|e| e.is_warning())
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() < config::get_error_buffer_size() {
                events.push(event.clone());
            }
        }
    }
}

fn truncate_message(mut line: String) -> String {
    let limit = config::get_max_log_message_length();
    if line.len() > limit {
        let mut cut = limit;
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
        line.push_str("...");
    }
    line
}

/// Service built from the current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_event(LogEvent::error(codes::system::INTERNAL_ERROR, "boom"));
        service.log_event(LogEvent::warning("careful"));
        service.log_event(LogEvent::info("chatty"));
        service.log_event(LogEvent::debug("noisy"));

        assert_eq!(memory.event_count(), 2);
        assert!(memory.has_event_with_code(codes::system::INTERNAL_ERROR));
        assert_eq!(memory.get_warnings().len(), 1);
    }

    #[test]
    fn test_memory_logger_clear() {
        let memory = MemoryLogger::new();
        memory.log(&LogEvent::info("one"));
        assert_eq!(memory.event_count(), 1);
        memory.clear();
        assert_eq!(memory.event_count(), 0);
    }

    #[test]
    fn test_truncate_message_respects_char_boundaries() {
        let limit = config::get_max_log_message_length();
        let long = "é".repeat(limit);
        let truncated = truncate_message(long);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= limit + 3);
    }
}
