// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanPreferences {
    /// Whether to track per-kind counts and comment lengths during a scan
    pub collect_detailed_metrics: bool,

    /// Whether to show position information in error messages
    pub include_position_in_errors: bool,

    /// Whether role keywords bind the following identifier in the token store
    pub bind_keyword_roles: bool,
}

impl Default for ScanPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var("WILLNO_SCAN_DETAILED_METRICS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_position_in_errors: env::var("WILLNO_SCAN_INCLUDE_POSITIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            bind_keyword_roles: env::var("WILLNO_SCAN_BIND_ROLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Extension every input file must carry, e.g. `toml` (none by default)
    pub required_extension: Option<String>,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            required_extension: env::var("WILLNO_REQUIRE_EXTENSION")
                .ok()
                .map(|v| v.trim().trim_start_matches('.').to_string())
                .filter(|v| !v.is_empty()),
            enable_performance_logging: env::var("WILLNO_ENABLE_PERFORMANCE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum log level (within security constraints)
    pub min_log_level: LogLevel,

    /// Whether to tag events with the file being scanned
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var("WILLNO_LOGGING_USE_STRUCTURED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var("WILLNO_LOGGING_ENABLE_CONSOLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var("WILLNO_LOGGING_MIN_LEVEL")
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env::var("WILLNO_LOGGING_INCLUDE_FILE_CONTEXT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
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

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub scan: ScanPreferences,
    pub file_processor: FileProcessorPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // Build
    pub const BUILD_PROFILE: &str = "WILLNO_BUILD_PROFILE";
    pub const CONFIG_DIR: &str = "WILLNO_CONFIG_DIR";

    // Scanning
    pub const SCAN_DETAILED_METRICS: &str = "WILLNO_SCAN_DETAILED_METRICS";
    pub const SCAN_INCLUDE_POSITIONS: &str = "WILLNO_SCAN_INCLUDE_POSITIONS";
    pub const SCAN_BIND_ROLES: &str = "WILLNO_SCAN_BIND_ROLES";

    // File Processor
    pub const REQUIRE_EXTENSION: &str = "WILLNO_REQUIRE_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "WILLNO_ENABLE_PERFORMANCE_LOGGING";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "WILLNO_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "WILLNO_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "WILLNO_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "WILLNO_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level(" info "), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_level_ordering_matches_verbosity() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(
            LogLevel::Debug.to_events_log_level(),
            crate::logging::events::LogLevel::Debug
        );
    }

    #[test]
    fn test_env_var_names_are_prefixed() {
        for name in [
            env_vars::SCAN_BIND_ROLES,
            env_vars::REQUIRE_EXTENSION,
            env_vars::LOGGING_MIN_LEVEL,
            env_vars::BUILD_PROFILE,
        ] {
            assert!(name.starts_with("WILLNO_"));
        }
    }
}
