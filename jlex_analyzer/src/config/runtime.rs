// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Read and parse an environment variable, falling back to `default`.
fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require a .java extension on input files
    pub require_java_extension: bool,

    /// Whether to log read timings and sizes
    pub enable_performance_logging: bool,

    /// Whether to log a warning when a non-.java file is analyzed
    pub log_non_java_processing: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_java_extension: env_parse(env_vars::REQUIRE_JAVA_EXTENSION, false),
            enable_performance_logging: env_parse(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
            log_non_java_processing: env_parse(env_vars::LOG_NON_JAVA_PROCESSING, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Kind whose tokens carry whitespace and line structure
    pub formatting_kind: String,

    /// Kind whose lexemes toggle block-comment mode
    pub comment_kind: String,

    /// Kind whose lexemes toggle literal mode
    pub quote_kind: String,

    /// Kind assigned to the placeholder token emitted for a closed literal
    pub literal_kind: String,

    /// Whether to collect per-kind token counts
    pub collect_detailed_metrics: bool,

    /// Whether to warn when a scan ends inside a comment or literal
    pub warn_on_unterminated_context: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            formatting_kind: env_string(
                env_vars::LEXICAL_FORMATTING_KIND,
                defaults::FORMATTING_KIND,
            ),
            comment_kind: env_string(env_vars::LEXICAL_COMMENT_KIND, defaults::COMMENT_KIND),
            quote_kind: env_string(env_vars::LEXICAL_QUOTE_KIND, defaults::QUOTE_KIND),
            literal_kind: env_string(env_vars::LEXICAL_LITERAL_KIND, defaults::LITERAL_KIND),
            collect_detailed_metrics: env_parse(env_vars::LEXICAL_DETAILED_METRICS, true),
            warn_on_unterminated_context: env_parse(env_vars::LEXICAL_WARN_UNTERMINATED, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePreferences {
    /// Token-kind table to load instead of the built-in Java table
    pub table_path: Option<PathBuf>,

    /// Whether to warn about literal text declared by more than one entry
    pub warn_on_duplicates: bool,
}

impl Default for TablePreferences {
    fn default() -> Self {
        Self {
            table_path: env::var(env_vars::TABLE_PATH)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            warn_on_duplicates: env_parse(env_vars::TABLE_WARN_DUPLICATES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to attach the current file to every event
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_parse(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_parse(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            include_file_context: env_parse(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
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

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.trim().to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Cannot read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub table: TablePreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Load overrides from a TOML file; missing sections keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, RuntimeConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuntimeConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| RuntimeConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Built-in names of the kinds the classifier treats specially
pub mod defaults {
    pub const FORMATTING_KIND: &str = "textFormattingCharacters";
    pub const COMMENT_KIND: &str = "commentBlock";
    pub const QUOTE_KIND: &str = "doubleQuotes";
    pub const LITERAL_KIND: &str = "literal";
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_JAVA_EXTENSION: &str = "JLEX_REQUIRE_JAVA_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "JLEX_ENABLE_PERFORMANCE_LOGGING";
    pub const LOG_NON_JAVA_PROCESSING: &str = "JLEX_LOG_NON_JAVA_PROCESSING";

    // Lexical
    pub const LEXICAL_FORMATTING_KIND: &str = "JLEX_LEXICAL_FORMATTING_KIND";
    pub const LEXICAL_COMMENT_KIND: &str = "JLEX_LEXICAL_COMMENT_KIND";
    pub const LEXICAL_QUOTE_KIND: &str = "JLEX_LEXICAL_QUOTE_KIND";
    pub const LEXICAL_LITERAL_KIND: &str = "JLEX_LEXICAL_LITERAL_KIND";
    pub const LEXICAL_DETAILED_METRICS: &str = "JLEX_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_WARN_UNTERMINATED: &str = "JLEX_LEXICAL_WARN_UNTERMINATED";

    // Token table
    pub const TABLE_PATH: &str = "JLEX_TABLE_PATH";
    pub const TABLE_WARN_DUPLICATES: &str = "JLEX_TABLE_WARN_DUPLICATES";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "JLEX_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "JLEX_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "JLEX_LOGGING_MIN_LEVEL";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "JLEX_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level(" warning "), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_partial_toml_keeps_other_sections() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [lexical]
            quote_kind = "quote"

            [logging]
            min_log_level = "Debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.lexical.quote_kind, "quote");
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
        assert!(!config.lexical.literal_kind.is_empty());
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[table]\ntable_path = \"custom.json\"").unwrap();

        let config = RuntimeConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.table.table_path, Some(PathBuf::from("custom.json")));
    }

    #[test]
    fn test_from_toml_file_errors() {
        let missing = RuntimeConfig::from_toml_file(Path::new("/nonexistent/jlex.toml"));
        assert_matches!(missing, Err(RuntimeConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lexical\nbroken").unwrap();
        let invalid = RuntimeConfig::from_toml_file(file.path());
        assert_matches!(invalid, Err(RuntimeConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::TABLE_PATH.starts_with("JLEX_"));
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("JLEX_"));
        assert!(env_vars::LEXICAL_QUOTE_KIND.starts_with("JLEX_"));
    }
}
