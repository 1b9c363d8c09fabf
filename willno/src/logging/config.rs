//! Logging configuration: compile-time limits plus runtime preferences
//!
//! The compile-time floor (`SECURITY_MIN_LOG_LEVEL`) cannot be lowered at runtime; a user
//! asking for `error` only still sees warnings when the floor is `1`.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences. Only the first call wins.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Level below which nothing may be filtered
pub fn get_floor_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        _ => EventsLogLevel::Info,
    }
}

/// Minimum log level: the user preference, raised to the compile-time floor
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_floor_log_level())
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

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if !(100..=100_000).contains(&LOG_BUFFER_SIZE) {
        return Err(format!(
            "Log buffer size out of range: {}",
            LOG_BUFFER_SIZE
        ));
    }

    if MAX_LOG_MESSAGE_LENGTH == 0 {
        return Err("Max log message length must be positive".to_string());
    }

    if SECURITY_MIN_LOG_LEVEL > 2 {
        return Err(format!(
            "Security minimum log level too permissive: {}",
            SECURITY_MIN_LOG_LEVEL
        ));
    }

    Ok(())
}

/// Get configuration summary for diagnostics
pub fn get_config_summary() -> String {
    let preferences = get_runtime_preferences();

    format!(
        "Logging Configuration ({}):\n\
         - Log buffer size: {}\n\
         - Max message length: {}\n\
         - Floor level: {}\n\
         - Min log level: {}\n\
         - Structured logging: {}\n\
         - Console logging: {}\n\
         - Include file context: {}",
        crate::config::build_info::source_info(),
        LOG_BUFFER_SIZE,
        MAX_LOG_MESSAGE_LENGTH,
        get_floor_log_level().as_str(),
        preferences.min_log_level.as_str(),
        preferences.use_structured_logging,
        preferences.enable_console_logging,
        preferences.include_file_context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_min_level_never_below_floor() {
        assert!(get_min_log_level() >= get_floor_log_level());
    }

    #[test]
    fn test_summary_mentions_limits() {
        let summary = get_config_summary();
        assert!(summary.contains(&LOG_BUFFER_SIZE.to_string()));
        assert!(summary.contains("Floor level"));
    }
}
