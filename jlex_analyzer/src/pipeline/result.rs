use crate::file_processor::FileMetadata;
use crate::lexical::{LexicalMetrics, ScanState};
use crate::logging::codes;
use crate::tokens::{Lexeme, TokenStream};
use std::time::Duration;

/// Everything one file run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Name as the caller gave it; used in output headers
    pub display_name: String,
    pub file_metadata: FileMetadata,
    pub source: String,
    /// Only kept when lexeme retention was requested
    pub lexemes: Option<Vec<Lexeme>>,
    pub stream: TokenStream,
    pub final_state: ScanState,
    pub lexical_metrics: LexicalMetrics,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn token_count(&self) -> usize {
        self.stream.len()
    }

    pub fn ended_cleanly(&self) -> bool {
        self.final_state.is_normal()
    }

    pub fn log_success(&self) {
        let seconds = self.processing_duration.as_secs_f64();
        crate::log_success!(codes::success::PIPELINE_COMPLETE,
            "File analysis completed",
            "file" => &self.display_name,
            "tokens" => self.token_count(),
            "significant_tokens" => self.stream.significant_len(),
            "final_state" => &self.final_state,
            "duration_ms" => format!("{:.2}", seconds * 1000.0),
            "tokens_per_sec" => format!("{:.0}", if seconds > 0.0 {
                self.token_count() as f64 / seconds
            } else {
                0.0
            })
        );
    }
}
