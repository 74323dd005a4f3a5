//! File processor: the source-text collaborator of the analyzer
//!
//! Size and line limits are compile-time constants; whether a `.java`
//! extension is required is a runtime preference.

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use std::path::Path;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, JAVA_EXTENSION,
};

/// Read a file with default settings
pub fn process_file(
    file_path: impl AsRef<Path>,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

pub fn get_max_line_count() -> usize {
    MAX_LINE_COUNT_FOR_ANALYSIS
}

/// Startup check that every file-processing code is registered
pub fn validate_file_processor_codes() -> Result<(), String> {
    let file_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
        codes::success::FILE_PROCESSING_SUCCESS,
    ];

    for code in &file_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("File processor limits loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Hello.java");
        fs::write(&file_path, "class Hello {}\n").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_java_extension: true,
            enable_performance_logging: false,
            log_non_java_processing: true,
        };
        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.require_java_extension);
        assert!(!processor.enable_performance_logging);
        assert!(processor.log_non_java_processing);
    }

    #[test]
    fn test_limits_and_codes() {
        assert_eq!(get_max_file_size(), FileProcessor::max_file_size());
        assert!(get_large_file_threshold() <= get_max_file_size());
        assert!(get_max_line_count() > 0);
        assert!(validate_file_processor_codes().is_ok());
    }
}
