//! File processor: validated UTF-8 reads bounded by compile-time limits

use super::naming::split_identifier;
use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// File processor specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .{expected}, found {found:?}")]
    InvalidExtension { expected: String, found: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty")]
    EmptyFile,

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } | FileProcessorError::TooManyLines { .. } => {
                codes::file_processing::FILE_TOO_LARGE
            }
            FileProcessorError::EmptyFile => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// File name before the first separator
    pub name: String,
    /// Everything after the first separator, empty when there is none
    pub extension: String,
    pub line_count: usize,
    pub modified: Option<DateTime<Utc>>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        human_readable_size(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// The full file name, suitable as a profile identifier
    pub fn identifier(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }

    /// Whether the extension is `required`, or ends in `.required` (`config.json` has `json`)
    pub fn has_extension(&self, required: &str) -> bool {
        let extension = self.extension.to_lowercase();
        let required = required.trim_start_matches('.').to_lowercase();
        extension == required || extension.ends_with(&format!(".{}", required))
    }
}

fn human_readable_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut scaled = size as f64;
    let mut unit_index = 0;

    while scaled >= 1024.0 && unit_index < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size, UNITS[0])
    } else {
        format!("{:.2} {}", scaled, UNITS[unit_index])
    }
}

/// File processing result containing source and metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    /// File contents as UTF-8 string
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

/// Reads input files within the compile-time limits
pub struct FileProcessor {
    /// Extension every input must carry (runtime preference)
    pub required_extension: Option<String>,
    /// Whether to log size and throughput details (runtime preference)
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            required_extension: None,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            required_extension: prefs.required_extension.clone(),
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_required_extension(mut self, extension: Option<&str>) -> Self {
        self.required_extension = extension
            .map(|ext| ext.trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty());
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Process a file and return contents with metadata
    pub fn process_file(
        &self,
        file_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();

        log_debug!("Starting file processing", "file" => file_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata, file_path)?;
        let source = self.read_file(&path, file_path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => file_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result, file_path);

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, file_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => file_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "chars_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => file_path,
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms
            );
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, FileProcessorError> {
        if file_path.trim().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);

        if !path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", file_path, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = match e.kind() {
                ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path.display().to_string(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read metadata for '{}': {}", path.display(), e),
                },
            };
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (name, extension) = split_identifier(&file_name);

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            size: metadata.len(),
            name: name.to_string(),
            extension: extension.to_string(),
            line_count: 0,
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "size_human" => file_metadata.human_readable_size(),
            "name" => name,
            "extension" => if extension.is_empty() { "none" } else { extension },
            "is_large_file" => file_metadata.is_large_file());

        Ok(file_metadata)
    }

    fn validate_file(
        &self,
        metadata: &FileMetadata,
        file_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable_size(MAX_FILE_SIZE));
            return Err(error);
        }

        if metadata.size == 0 {
            let error = FileProcessorError::EmptyFile;
            log_error!(error.error_code(), "File is empty", "file" => file_path);
            return Err(error);
        }

        if let Some(required) = &self.required_extension {
            if !metadata.has_extension(required) {
                let error = FileProcessorError::InvalidExtension {
                    expected: required.clone(),
                    found: metadata.extension.clone(),
                };
                log_error!(error.error_code(), "File does not have the required extension",
                    "file" => file_path,
                    "extension" => &metadata.extension,
                    "required" => required);
                return Err(error);
            }
        }

        Ok(())
    }

    fn read_file(&self, path: &Path, file_path: &str) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let error = match e.kind() {
                ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                    path: path.display().to_string(),
                },
                ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                    path: path.display().to_string(),
                },
                _ => FileProcessorError::IoError {
                    message: format!("Failed to read file '{}': {}", path.display(), e),
                },
            };
            log_error!(error.error_code(), "Failed to read file",
                "file" => file_path,
                "io_error" => e);
            error
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("main.go");
        let content = "// entry\nlet x = 1\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.source, content);
        assert_eq!(result.metadata.line_count, 2);
        assert_eq!(result.metadata.name, "main");
        assert_eq!(result.metadata.extension, "go");
        assert_eq!(result.metadata.identifier(), "main.go");
        assert!(result.metadata.modified.is_some());
    }

    #[test]
    fn test_metadata_splits_on_first_separator() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.config.json");
        fs::write(&file_path, "{}").unwrap();

        let result = FileProcessor::new()
            .process_file(file_path.to_str().unwrap())
            .unwrap();

        assert_eq!(result.metadata.name, "test");
        assert_eq!(result.metadata.extension, "config.json");
        assert!(result.metadata.has_extension("json"));
        assert!(result.metadata.has_extension(".config.json"));
        assert!(!result.metadata.has_extension("son"));
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().process_file("definitely-missing.lang");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path().to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_empty_path() {
        let result = FileProcessor::new().process_file("  ");
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.lang");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());
        assert_matches!(result, Err(FileProcessorError::EmptyFile));
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("script");
        fs::write(&file_path, "let x = 1").unwrap();

        let processor = FileProcessor::new().with_required_extension(Some(".lang"));
        let result = processor.process_file(file_path.to_str().unwrap());

        assert_matches!(
            result,
            Err(FileProcessorError::InvalidExtension { ref expected, ref found })
                if expected == "lang" && found.is_empty()
        );
    }

    #[test]
    fn test_compile_time_file_size_limit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("large.lang");
        fs::write(&file_path, "a".repeat((MAX_FILE_SIZE + 1) as usize)).unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());

        assert_matches!(
            result,
            Err(FileProcessorError::FileTooLarge { size, max_size })
                if size > MAX_FILE_SIZE && max_size == MAX_FILE_SIZE
        );
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("many_lines.lang");
        fs::write(&file_path, "\n".repeat(MAX_LINE_COUNT + 1)).unwrap();

        let result = FileProcessor::new().process_file(file_path.to_str().unwrap());

        assert_matches!(
            result,
            Err(FileProcessorError::TooManyLines { max_lines, .. }) if max_lines == MAX_LINE_COUNT
        );
    }

    #[test]
    fn test_error_classification() {
        let error = FileProcessorError::FileNotFound {
            path: "main.go".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), "Medium");
        assert!(error.requires_halt());
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            required_extension: Some("toml".to_string()),
            enable_performance_logging: false,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert_eq!(processor.required_extension.as_deref(), Some("toml"));
        assert!(!processor.enable_performance_logging);
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_size(512), "512 B");
        assert_eq!(human_readable_size(2048), "2.00 KB");
    }
}
