//! Reading input files and splitting identifiers into name and extension

mod naming;
mod processor;

use crate::config::runtime::FileProcessorPreferences;
pub use naming::split_identifier;
pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("script");
        fs::write(&file_path, "let answer = 42\n").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.metadata.name, "script");
        assert!(result.metadata.extension.is_empty());
    }

    #[test]
    fn test_processor_from_default_preferences() {
        let prefs = FileProcessorPreferences {
            required_extension: None,
            enable_performance_logging: true,
        };
        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.required_extension.is_none());
    }
}
