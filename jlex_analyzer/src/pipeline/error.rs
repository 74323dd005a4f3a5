use crate::file_processor::FileProcessorError;
use crate::logging::{codes, Code};
use crate::token_table::TableLoadError;

/// Failure of a whole pipeline run. Classification itself never fails, so
/// every variant means the scan never started.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Token table loading failed: {0}")]
    TableLoad(#[from] TableLoadError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::TableLoad(e) => e.error_code(),
            PipelineError::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// True when the source itself could not be read
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, PipelineError::FileProcessing(_))
    }
}
