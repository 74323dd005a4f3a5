//! Logging configuration: compile-time buffer limits plus runtime preferences

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install runtime preferences; only the first call wins
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Minimum level, never stricter than the compile-time floor
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_security_log_level())
}

/// Most restrictive level the build allows
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

pub fn include_file_context() -> bool {
    get_runtime_preferences().include_file_context
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

pub fn get_max_log_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Check compile-time logging limits
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE == 0 {
        return Err("log_buffer_size must be positive".to_string());
    }
    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "max_log_message_length {} is too small (min 64)",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();
    format!(
        "Logging configuration:\n  min level: {}\n  structured: {}\n  console: {}\n  buffer: {}\n",
        get_min_log_level().as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        LOG_BUFFER_SIZE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_time_config_is_valid() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_min_level_respects_floor() {
        assert!(get_min_log_level() >= get_security_log_level());
    }

    #[test]
    fn test_summary_mentions_level() {
        assert!(get_config_summary().contains("min level"));
    }
}
