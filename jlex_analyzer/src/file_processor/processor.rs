//! Reads a Java source file into memory with metadata and size limits

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

pub const JAVA_EXTENSION: &str = "java";

/// Why a source file could not be made available to the analyzer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .java, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: '{path}'")]
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
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    fn from_io(error: &io::Error, path: &Path, action: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("Failed to {} '{}': {}", action, path.display(), error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    pub is_java_file: bool,
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        human_readable_bytes(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }

    /// File name for display headers, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

pub(crate) fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Source text plus what we learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_java_extension: bool,
    pub enable_performance_logging: bool,
    pub log_non_java_processing: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_java_extension: false,
            enable_performance_logging: true,
            log_non_java_processing: false,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_java_extension: prefs.require_java_extension,
            enable_performance_logging: prefs.enable_performance_logging,
            log_non_java_processing: prefs.log_non_java_processing,
        }
    }

    pub fn with_java_extension_required(mut self, required: bool) -> Self {
        self.require_java_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn with_non_java_logging(mut self, enabled: bool) -> Self {
        self.log_non_java_processing = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read `file_path` completely. Empty files are valid sources.
    pub fn process_file(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = file_path.as_ref();

        log_debug!("Starting file processing", "file" => file_path.display());

        let path = self.validate_path(file_path)?;
        let mut metadata = self.collect_metadata(&path)?;
        self.validate_file(&metadata)?;

        let source = fs::read_to_string(&path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, &path, "read");
            log_error!(error.error_code(), "Failed to read source file",
                "file" => path.display(),
                "io_error" => e
            );
            error
        })?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => path.display(),
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS
            );
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        self.log_processing_success(&result);

        if !result.metadata.is_java_file && self.log_non_java_processing {
            log_warning!("Analyzing a file without a .java extension",
                "file" => result.metadata.path.display(),
                "extension" => result.metadata.extension.as_deref().unwrap_or("none")
            );
        }

        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS,
                "Source file read",
                "file" => result.metadata.path.display(),
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "is_large_file" => result.metadata.is_large_file(),
                "duration_ms" => duration_ms
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS,
                "Source file read",
                "file" => result.metadata.path.display(),
                "lines" => result.metadata.line_count
            );
        }
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath {
                path: String::new(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path.display());
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: file_path.display().to_string(),
            };
            log_error!(error.error_code(), "Path is not a regular file",
                "path" => file_path.display()
            );
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::from_io(&e, file_path, "resolve");
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path.display(),
                "io_error" => e
            );
            error
        })
    }

    fn collect_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let fs_metadata = fs::metadata(path).map_err(|e| {
            let error = FileProcessorError::from_io(&e, path, "read metadata for");
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e
            );
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let is_java_file = extension.as_deref() == Some(JAVA_EXTENSION);

        let metadata = FileMetadata {
            path: path.to_path_buf(),
            size: fs_metadata.len(),
            extension,
            line_count: 0,
            is_java_file,
            modified: fs_metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_human" => metadata.human_readable_size(),
            "extension" => metadata.extension.as_deref().unwrap_or("none"),
            "is_java" => metadata.is_java_file
        );

        Ok(metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size",
                "file" => metadata.path.display(),
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable_bytes(MAX_FILE_SIZE)
            );
            return Err(error);
        }

        if self.require_java_extension && !metadata.is_java_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have the required .java extension",
                "file" => metadata.path.display(),
                "extension" => metadata.extension.as_deref().unwrap_or("none")
            );
            return Err(error);
        }

        Ok(())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}
