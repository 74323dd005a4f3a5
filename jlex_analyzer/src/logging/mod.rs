//! Global logging for the analyzer
//!
//! Provides a process-wide [`LoggingService`], a per-thread file context so
//! batch workers tag their events with the file they are analyzing, and the
//! `log_*!` macros.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

/// File currently being analyzed on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
    pub file_id: usize,
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the runtime configuration
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a caller-supplied service (used by tests and embedders)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// FILE CONTEXT
// ============================================================================

pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(FileContext { file_path, file_id });
    });
}

pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with the file context set, clearing it afterwards
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT
// ============================================================================

/// Attach context pairs and the current file, then hand the event to the
/// global logger. Silently dropped before initialization.
pub fn log_with_context(mut event: LogEvent, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }

    for (key, value) in &context {
        event = event.with_context(key, value);
    }

    if config::include_file_context() {
        if let Some(file_ctx) = get_current_file_context() {
            event = event.with_context("file", &file_ctx.file_path.display().to_string());
            event = event.with_context("file_id", &file_ctx.file_id.to_string());
        }
    }

    logger.log_event(event);
}

/// Error logging that falls back to stderr before initialization
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}
