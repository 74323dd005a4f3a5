//! Single-file pipeline: read source, split, classify
//!
//! The token-kind table is loaded once by the caller and passed in behind an
//! `Arc`, so batch workers share it without copying.

mod error;
mod result;
mod validation;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::{FileProcessorPreferences, LexicalPreferences, RuntimeConfig};
use crate::file_processor::{FileProcessingResult, FileProcessor};
use crate::lexical::{split, LexicalAnalyzer};
use crate::logging;
use crate::token_table::TokenKindTable;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    /// Keep the split lexemes in the result for debug dumps
    pub retain_lexemes: bool,
}

impl PipelineOptions {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            file_processor: config.file_processor.clone(),
            lexical: config.lexical.clone(),
            retain_lexemes: false,
        }
    }

    pub fn with_lexemes(mut self, retain: bool) -> Self {
        self.retain_lexemes = retain;
        self
    }
}

/// Analyze one file with default options
pub fn process_file(
    file_path: impl AsRef<Path>,
    table: Arc<TokenKindTable>,
) -> Result<PipelineResult, PipelineError> {
    process_file_with_options(file_path, table, &PipelineOptions::default())
}

pub fn process_file_with_options(
    file_path: impl AsRef<Path>,
    table: Arc<TokenKindTable>,
    options: &PipelineOptions,
) -> Result<PipelineResult, PipelineError> {
    process_file_with_id(file_path.as_ref(), 0, table, options)
}

/// Same as [`process_file_with_options`], tagging log events with `file_id`
pub fn process_file_with_id(
    file_path: &Path,
    file_id: usize,
    table: Arc<TokenKindTable>,
    options: &PipelineOptions,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        crate::log_info!("Starting Java lexical analysis", "file" => file_path.display());

        // The scan never starts when the source is unavailable
        let file_result = FileProcessor::from_preferences(&options.file_processor)
            .process_file(file_path)?;

        let result = analyze_file_result(
            file_path.display().to_string(),
            file_result,
            table,
            options,
            start_time,
        );
        result.log_success();

        Ok(result)
    })
}

fn analyze_file_result(
    display_name: String,
    file_result: FileProcessingResult,
    table: Arc<TokenKindTable>,
    options: &PipelineOptions,
    start_time: Instant,
) -> PipelineResult {
    let mut analyzer = LexicalAnalyzer::with_preferences(table, options.lexical.clone());

    let (lexemes, summary) = if options.retain_lexemes {
        let lexemes = split(&file_result.source);
        let summary = analyzer.analyze_lexemes(lexemes.clone());
        (Some(lexemes), summary)
    } else {
        (None, analyzer.analyze_file_result(&file_result))
    };

    PipelineResult {
        display_name,
        file_metadata: file_result.metadata,
        source: file_result.source,
        lexemes,
        stream: summary.stream,
        final_state: summary.final_state,
        lexical_metrics: summary.metrics,
        processing_duration: start_time.elapsed(),
    }
}
