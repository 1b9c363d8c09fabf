//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const MALFORMED_LITERAL: Code = Code::new("E021");
}

/// Profile construction error codes
pub mod profile {
    use super::Code;

    pub const INVALID_PROFILE: Code = Code::new("E060");
    pub const DEFINITION_UNREADABLE: Code = Code::new("E061");
    pub const DEFINITION_INVALID: Code = Code::new("E062");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const PROFILE_BUILT: Code = Code::new("I010");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "File a bug report with the input that triggered it",
            ),
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check logging configuration and environment variables",
            ),
            // File processing
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Input file not found",
                "Verify the file path exists and is spelled correctly",
            ),
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                true,
                "Input file does not carry the required extension",
                "Rename the file or unset WILLNO_REQUIRE_EXTENSION",
            ),
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Input file exceeds the compile-time size or line limit",
                "Split the input or rebuild with a larger limit",
            ),
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Low,
                true,
                true,
                "Input file is empty",
                "Provide a file with content",
            ),
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "Permission denied reading input file",
                "Check file permissions",
            ),
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Input file is not valid UTF-8",
                "Re-encode the file as UTF-8",
            ),
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                true,
                "I/O error reading input file",
                "Check disk health and retry",
            ),
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid input path",
                "Provide a path to a regular file",
            ),
            // Lexical
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::High,
                false,
                true,
                "Literal opened but never closed before end of input",
                "Close the literal or disable its category in the profile",
            ),
            // Profile
            ErrorMetadata::new(
                "E060",
                "Profile",
                Severity::High,
                false,
                true,
                "Language profile could not be built",
                "Construct the profile from a non-empty identifier",
            ),
            ErrorMetadata::new(
                "E061",
                "Profile",
                Severity::Medium,
                false,
                true,
                "Profile definition file could not be read",
                "Check the definition path and permissions",
            ),
            ErrorMetadata::new(
                "E062",
                "Profile",
                Severity::Medium,
                false,
                true,
                "Profile definition file is not valid TOML for a profile",
                "Fix the reported key or syntax error",
            ),
            // Success
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "Logging system initialized",
                "None required",
            ),
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "Input file read and validated",
                "None required",
            ),
            ErrorMetadata::new(
                "I010",
                "Profile",
                Severity::Low,
                true,
                false,
                "Language profile built",
                "None required",
            ),
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed",
                "None required",
            ),
        ];

        entries.into_iter().map(|meta| (meta.code, meta)).collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_declared_code_has_metadata() {
        let declared = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            file_processing::FILE_NOT_FOUND,
            file_processing::INVALID_EXTENSION,
            file_processing::FILE_TOO_LARGE,
            file_processing::EMPTY_FILE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            lexical::MALFORMED_LITERAL,
            profile::INVALID_PROFILE,
            profile::DEFINITION_UNREADABLE,
            profile::DEFINITION_INVALID,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::PROFILE_BUILT,
            success::TOKENIZATION_COMPLETE,
        ];

        for code in declared {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_severity("E999"), Severity::Medium);
        assert!(is_recoverable("E999"));
        assert!(!requires_halt("E999"));
    }

    #[test]
    fn test_malformed_literal_classification() {
        let code = lexical::MALFORMED_LITERAL.as_str();
        assert_eq!(get_category(code), "Lexical");
        assert_eq!(get_severity(code), Severity::High);
        assert!(requires_halt(code));
        assert!(!is_recoverable(code));
    }
}
