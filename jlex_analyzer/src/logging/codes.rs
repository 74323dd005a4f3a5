//! Error, warning and success codes with their classification metadata
//!
//! Every code emitted by the analyzer is declared here together with the
//! category, severity and recommended action used by the loggers.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
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
// CLASSIFICATION TYPES
// ============================================================================

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

/// Complete metadata for a code
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

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// Source file access
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Token-kind table loading
pub mod token_table {
    use super::Code;

    pub const TABLE_UNREADABLE: Code = Code::new("E030");
    pub const TABLE_INVALID_JSON: Code = Code::new("E031");
    pub const TABLE_INVALID_SHAPE: Code = Code::new("E032");
    pub const UNKNOWN_DISPLAY_POLICY: Code = Code::new("E033");
    pub const EMPTY_KIND: Code = Code::new("E034");
    pub const TABLE_TOO_LARGE: Code = Code::new("E035");
    pub const DUPLICATE_LITERAL: Code = Code::new("W036");
}

/// Splitting and classification
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_COMMENT: Code = Code::new("W040");
    pub const UNTERMINATED_LITERAL: Code = Code::new("W041");
    pub const LEXEME_COUNT_EXCEEDED: Code = Code::new("W042");
}

pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("E050");
    pub const NO_FILES_FOUND: Code = Code::new("E051");
    pub const TOO_MANY_FILES: Code = Code::new("E052");
    pub const WORKER_FAILURE: Code = Code::new("E053");
    pub const FILE_FAILED: Code = Code::new("E054");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I002");
    pub const TABLE_LOAD_COMPLETE: Code = Code::new("I003");
    pub const SPLIT_COMPLETE: Code = Code::new("I004");
    pub const CLASSIFICATION_COMPLETE: Code = Code::new("I005");
    pub const PIPELINE_COMPLETE: Code = Code::new("I006");
    pub const BATCH_COMPLETE: Code = Code::new("I007");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

type Row = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// (code, category, severity, recoverable, requires_halt, description, action)
#[rustfmt::skip]
const METADATA_ROWS: &[Row] = &[
    ("ERR001", "System", Severity::Critical, false, true,
        "Critical internal error", "File a bug report with the input that triggered it"),
    ("ERR002", "System", Severity::Critical, false, true,
        "Logging or runtime initialization failed", "Check environment configuration"),
    ("ERR003", "System", Severity::High, false, true,
        "Runtime configuration could not be loaded", "Fix the configuration file or remove it"),
    ("E005", "FileProcessing", Severity::High, false, true,
        "Source file not found", "Check the file path"),
    ("E006", "FileProcessing", Severity::Medium, true, false,
        "Source file does not have a .java extension", "Rename the file or disable the extension check"),
    ("E007", "FileProcessing", Severity::High, false, true,
        "Source file exceeds the maximum size", "Split the file or raise max_file_size in the build profile"),
    ("E009", "FileProcessing", Severity::High, false, true,
        "Permission denied reading the source file", "Check file permissions"),
    ("E010", "FileProcessing", Severity::High, false, true,
        "Source file is not valid UTF-8", "Convert the file to UTF-8"),
    ("E011", "FileProcessing", Severity::High, false, true,
        "I/O error while reading the source file", "Retry or check the storage device"),
    ("E012", "FileProcessing", Severity::High, false, true,
        "Invalid source path", "Provide a path to a regular file"),
    ("E013", "FileProcessing", Severity::High, false, true,
        "Source file has too many lines", "Split the file or raise max_line_count_for_analysis"),
    ("E030", "TokenTable", Severity::Critical, false, true,
        "Token-kind table could not be read", "Check the --tokens path"),
    ("E031", "TokenTable", Severity::Critical, false, true,
        "Token-kind table is not valid JSON", "Fix the JSON syntax of the table"),
    ("E032", "TokenTable", Severity::Critical, false, true,
        "Token-kind table is not an array of records", "Wrap the records in a top-level array"),
    ("E033", "TokenTable", Severity::Medium, true, false,
        "Table entry declares an unknown display policy", "Use ShowValue, ShowKind or Suppress"),
    ("E034", "TokenTable", Severity::Medium, true, false,
        "Table entry is malformed", "Give every entry a non-empty kind and a values list"),
    ("E035", "TokenTable", Severity::High, false, true,
        "Token-kind table exceeds configured limits", "Reduce the table or raise the build limits"),
    ("W036", "TokenTable", Severity::Low, true, false,
        "Literal declared by more than one table entry", "Remove the duplicate; the first entry wins"),
    ("W040", "Lexical", Severity::Low, true, false,
        "Scan ended inside a block comment", "Close the comment with */"),
    ("W041", "Lexical", Severity::Low, true, false,
        "Scan ended inside a literal", "Close the literal with a matching quote"),
    ("W042", "Lexical", Severity::Low, true, false,
        "Lexeme count exceeds the configured soft limit", "Consider splitting the source"),
    ("E050", "Batch", Severity::High, false, true,
        "Batch directory not found", "Check the directory path"),
    ("E051", "Batch", Severity::Medium, true, false,
        "No .java files found", "Check the directory contents or recursion setting"),
    ("E052", "Batch", Severity::High, false, true,
        "Too many files for one batch", "Use --max-files or split the directory"),
    ("E053", "Batch", Severity::Critical, false, true,
        "Batch worker thread failed", "Retry with fewer threads"),
    ("E054", "Batch", Severity::Medium, true, false,
        "A file in the batch failed to analyze", "See the per-file error"),
    ("I001", "Success", Severity::Low, true, false,
        "Logging system initialized", "None"),
    ("I002", "Success", Severity::Low, true, false,
        "Source file read", "Continue to lexical analysis"),
    ("I003", "Success", Severity::Low, true, false,
        "Token-kind table loaded", "Continue to lexical analysis"),
    ("I004", "Success", Severity::Low, true, false,
        "Source text split into lexemes", "Continue to classification"),
    ("I005", "Success", Severity::Low, true, false,
        "Lexemes classified into tokens", "Render or consume the token stream"),
    ("I006", "Success", Severity::Low, true, false,
        "File analysis completed", "None"),
    ("I007", "Success", Severity::Low, true, false,
        "Batch analysis completed", "None"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        METADATA_ROWS
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
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
            system::CONFIGURATION_ERROR,
            file_processing::FILE_NOT_FOUND,
            file_processing::INVALID_EXTENSION,
            file_processing::FILE_TOO_LARGE,
            file_processing::PERMISSION_DENIED,
            file_processing::INVALID_ENCODING,
            file_processing::IO_ERROR,
            file_processing::INVALID_PATH,
            file_processing::TOO_MANY_LINES,
            token_table::TABLE_UNREADABLE,
            token_table::TABLE_INVALID_JSON,
            token_table::TABLE_INVALID_SHAPE,
            token_table::UNKNOWN_DISPLAY_POLICY,
            token_table::EMPTY_KIND,
            token_table::TABLE_TOO_LARGE,
            token_table::DUPLICATE_LITERAL,
            lexical::UNTERMINATED_COMMENT,
            lexical::UNTERMINATED_LITERAL,
            lexical::LEXEME_COUNT_EXCEEDED,
            batch::DIRECTORY_NOT_FOUND,
            batch::NO_FILES_FOUND,
            batch::TOO_MANY_FILES,
            batch::WORKER_FAILURE,
            batch::FILE_FAILED,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::FILE_PROCESSING_SUCCESS,
            success::TABLE_LOAD_COMPLETE,
            success::SPLIT_COMPLETE,
            success::CLASSIFICATION_COMPLETE,
            success::PIPELINE_COMPLETE,
            success::BATCH_COMPLETE,
        ];

        for code in declared {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
        assert_eq!(declared.len(), METADATA_ROWS.len());
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E033"), "TokenTable");
        assert!(is_recoverable("E033"));
        assert!(!requires_halt("E033"));

        assert_eq!(get_severity("E031"), Severity::Critical);
        assert!(requires_halt("E031"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
    }
}
