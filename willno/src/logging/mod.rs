//! Global logging for willno
//!
//! Library code logs through the macros; nothing is emitted until a binary (or test)
//! installs a global service. Events raised while a file is being scanned are tagged
//! with that file's path.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, FileLogger, Logger, LoggingService, MemoryLogger, MultiLogger,
    StructuredLogger,
};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Codes the binary relies on; init refuses to run with a broken registry
const REQUIRED_CODES: [Code; 4] = [
    codes::system::INTERNAL_ERROR,
    codes::file_processing::FILE_NOT_FOUND,
    codes::lexical::MALFORMED_LITERAL,
    codes::profile::INVALID_PROFILE,
];

/// Initialize global logging from the environment-driven preferences
pub fn init_global_logging() -> Result<(), String> {
    init_global_logging_with_service(Arc::new(service::create_configured_service()))
}

/// Initialize with a caller-built service (CLI log files, tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    for code in REQUIRED_CODES {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Set file context for current thread
pub fn set_file_context(file_path: PathBuf) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(file_path);
    });
}

/// Clear file context for current thread
pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context, restoring whatever context was set before
pub fn with_file_context<F, R>(file_path: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_file_context();
    set_file_context(file_path.to_path_buf());
    let result = f();
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

/// Get current file context (used by macros)
pub fn get_current_file_context() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn attach_file_context(event: LogEvent) -> LogEvent {
    if !config::include_file_context() {
        return event;
    }

    match get_current_file_context() {
        Some(path) => event.with_context("file", &path.display().to_string()),
        None => event,
    }
}

/// Tag with the current file and hand to the global logger (used by macros)
pub fn log_event_with_file_context(event: LogEvent) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_file_context(event));
    }
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);

    if let Some(s) = span {
        event = event.with_span(s);
    }

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    log_event_with_file_context(event);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::success(code, message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    log_event_with_file_context(event);
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    let mut event = LogEvent::info(message);

    for (key, value) in context {
        event = event.with_context(key, value);
    }

    log_event_with_file_context(event);
}

/// Critical errors always reach stderr, logged or not
pub fn safe_log_critical(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_error(code, message);
    }
    eprintln!("CRITICAL ERROR [{}]: {}", code.as_str(), message);
}
