// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    token_table: TokenTableLimits,
    batch_processing: BatchProcessingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count_for_analysis: usize,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_lexeme_count: usize,
    max_literal_text_length: usize,
}

#[derive(serde::Deserialize)]
struct TokenTableLimits {
    max_table_entries: usize,
    max_table_file_size: u64,
}

#[derive(serde::Deserialize)]
struct BatchProcessingLimits {
    max_worker_threads: usize,
    max_files_per_batch: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=tokens.json");
    println!("cargo:rerun-if-env-changed=JLEX_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=JLEX_CONFIG_DIR");

    let profile = env::var("JLEX_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("JLEX_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Config lives at the workspace root, one level above this crate
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_WORKERS: usize = 256;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("LIMITS: max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("LIMITS: large_file_threshold must not exceed max_file_size");
    }

    if config.batch_processing.max_worker_threads == 0
        || config.batch_processing.max_worker_threads > ABSOLUTE_MAX_WORKERS
    {
        panic!("LIMITS: max_worker_threads must be between 1 and {ABSOLUTE_MAX_WORKERS}");
    }

    if config.token_table.max_table_entries == 0 {
        panic!("LIMITS: max_table_entries must be positive");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("LIMITS: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = {};
    }}

    pub mod lexical {{
        pub const MAX_LEXEME_COUNT: usize = {};
        pub const MAX_LITERAL_TEXT_LENGTH: usize = {};
    }}

    pub mod token_table {{
        pub const MAX_TABLE_ENTRIES: usize = {};
        pub const MAX_TABLE_FILE_SIZE: u64 = {};
    }}

    pub mod batch_processing {{
        pub const MAX_WORKER_THREADS: usize = {};
        pub const MAX_FILES_PER_BATCH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count_for_analysis,
        // Lexical
        config.lexical.max_lexeme_count,
        config.lexical.max_literal_text_length,
        // Token table
        config.token_table.max_table_entries,
        config.token_table.max_table_file_size,
        // Batch Processing
        config.batch_processing.max_worker_threads,
        config.batch_processing.max_files_per_batch,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
