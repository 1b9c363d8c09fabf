//! Configuration module for willno
//! Compile-time limits are generated from TOML by build.rs; runtime preferences come from
//! the environment.

// Generated by build.rs from <config_dir>/<profile>.toml
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod constants;
pub mod runtime;

pub use runtime::{
    FileProcessorPreferences, LogLevel, LoggingPreferences, RuntimeConfig, ScanPreferences,
};

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("WILLNO_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("WILLNO_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_are_sane() {
        assert!(compile_time::file_processing::MAX_FILE_SIZE > 0);
        assert!(
            compile_time::file_processing::LARGE_FILE_THRESHOLD
                <= compile_time::file_processing::MAX_FILE_SIZE
        );
        assert!(compile_time::lexical::MAX_IDENTIFIER_LENGTH > 0);
        assert!(compile_time::logging::SECURITY_MIN_LOG_LEVEL <= 2);
    }

    #[test]
    fn test_source_info_names_profile() {
        let info = build_info::source_info();
        assert!(info.contains(build_info::profile()));
        assert!(info.ends_with(".toml"));
    }
}
