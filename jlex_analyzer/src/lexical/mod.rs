//! Lexical analysis: splitting, scan state and classification
//!
//! [`splitter::split`] cuts the source into lexemes, [`TokenClassifier`]
//! walks them once while tracking [`ScanState`], and [`LexicalAnalyzer`]
//! ties both together with logging and metrics.

pub mod analyzer;
pub mod classifier;
pub mod fallback;
pub mod scan_state;
pub mod splitter;

use crate::config::compile_time::lexical::{MAX_LEXEME_COUNT, MAX_LITERAL_TEXT_LENGTH};
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::token_table::TokenKindTable;
use std::sync::Arc;

pub use analyzer::LexicalAnalyzer;
pub use classifier::{LexicalMetrics, ScanSummary, SpecialKinds, TokenClassifier};
pub use fallback::{classify_unmatched, FallbackKind};
pub use scan_state::{transition, Action, LexemeClass, ScanState};
pub use splitter::{split, split_texts};

/// Split and classify `source` against `table` with default preferences
pub fn tokenize(source: &str, table: Arc<TokenKindTable>) -> ScanSummary {
    LexicalAnalyzer::new(table).analyze(source)
}

pub fn create_analyzer(table: Arc<TokenKindTable>) -> LexicalAnalyzer {
    LexicalAnalyzer::new(table)
}

pub fn create_analyzer_with_preferences(
    table: Arc<TokenKindTable>,
    preferences: LexicalPreferences,
) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(table, preferences)
}

/// Check that lexical codes are registered and limits are usable
pub fn validate_lexical_setup() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::UNTERMINATED_COMMENT,
        codes::lexical::UNTERMINATED_LITERAL,
        codes::lexical::LEXEME_COUNT_EXCEEDED,
        codes::success::SPLIT_COMPLETE,
        codes::success::CLASSIFICATION_COMPLETE,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_LEXEME_COUNT == 0 {
        return Err("MAX_LEXEME_COUNT cannot be zero".to_string());
    }
    if MAX_LITERAL_TEXT_LENGTH == 0 {
        return Err("MAX_LITERAL_TEXT_LENGTH cannot be zero".to_string());
    }

    crate::log_debug!("Lexical limits validated",
        "max_lexeme_count" => MAX_LEXEME_COUNT,
        "max_literal_text_length" => MAX_LITERAL_TEXT_LENGTH
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_table::default_java_table;

    #[test]
    fn test_validate_lexical_setup() {
        assert!(validate_lexical_setup().is_ok());
    }

    #[test]
    fn test_tokenize_line_comment_is_not_special() {
        let table = Arc::new(default_java_table().expect("built-in table loads"));
        let summary = tokenize("int x = 5; // set x", table);
        let texts: Vec<&str> = summary
            .stream
            .significant_tokens()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, vec!["int", "x", "=", "5", ";", "//", "set", "x"]);

        let slashes = summary
            .stream
            .significant_tokens()
            .find(|t| t.text == "//")
            .map(|t| t.kind.clone());
        assert_eq!(slashes.as_deref(), Some("var"));
    }

    #[test]
    fn test_create_analyzer_with_preferences() {
        let table = Arc::new(TokenKindTable::default());
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            ..Default::default()
        };
        let analyzer = create_analyzer_with_preferences(table, preferences);
        assert!(!analyzer.preferences().collect_detailed_metrics);
    }
}
