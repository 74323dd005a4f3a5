use crate::logging::{codes, Code};
use std::path::PathBuf;

/// Fatal table loading failures
#[derive(Debug, thiserror::Error)]
pub enum TableLoadError {
    #[error("Cannot read token table '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token table '{origin}' is not valid JSON: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Token table '{origin}' must be a JSON array of records, found {found}")]
    InvalidShape { origin: String, found: &'static str },

    #[error("Token table '{origin}' too large: {actual} {what} (max: {limit})")]
    TooLarge {
        origin: String,
        what: &'static str,
        actual: u64,
        limit: u64,
    },
}

impl TableLoadError {
    pub fn error_code(&self) -> Code {
        match self {
            TableLoadError::Unreadable { .. } => codes::token_table::TABLE_UNREADABLE,
            TableLoadError::InvalidJson { .. } => codes::token_table::TABLE_INVALID_JSON,
            TableLoadError::InvalidShape { .. } => codes::token_table::TABLE_INVALID_SHAPE,
            TableLoadError::TooLarge { .. } => codes::token_table::TABLE_TOO_LARGE,
        }
    }
}

/// A single rejected table entry. Loading continues past these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("entry {index} ('{kind}'): unknown display policy '{policy}'")]
    UnknownDisplayPolicy {
        index: usize,
        kind: String,
        policy: String,
    },

    #[error("entry {index}: kind must not be empty")]
    EmptyKind { index: usize },

    #[error("entry {index}: {reason}")]
    MalformedEntry { index: usize, reason: String },
}

impl ConfigurationError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigurationError::UnknownDisplayPolicy { .. } => {
                codes::token_table::UNKNOWN_DISPLAY_POLICY
            }
            ConfigurationError::EmptyKind { .. } | ConfigurationError::MalformedEntry { .. } => {
                codes::token_table::EMPTY_KIND
            }
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ConfigurationError::UnknownDisplayPolicy { index, .. }
            | ConfigurationError::EmptyKind { index }
            | ConfigurationError::MalformedEntry { index, .. } => *index,
        }
    }
}
