//! Lexical analyzer: splitter plus classifier with logging and metrics
//!
//! The analyzer owns a shared handle on the token-kind table, so one table
//! can serve any number of analyzers (batch workers hold one each).

use super::classifier::{LexicalMetrics, ScanSummary, SpecialKinds, TokenClassifier};
use super::scan_state::ScanState;
use super::splitter::split;
use crate::config::compile_time::lexical::MAX_LEXEME_COUNT;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::token_table::TokenKindTable;
use crate::tokens::Lexeme;
use crate::{log_debug, log_success, log_warning};
use std::sync::Arc;
use std::time::Instant;

pub struct LexicalAnalyzer {
    table: Arc<TokenKindTable>,
    preferences: LexicalPreferences,
    metrics: LexicalMetrics,
}

impl LexicalAnalyzer {
    pub fn new(table: Arc<TokenKindTable>) -> Self {
        Self::with_preferences(table, LexicalPreferences::default())
    }

    pub fn with_preferences(table: Arc<TokenKindTable>, preferences: LexicalPreferences) -> Self {
        Self {
            table,
            preferences,
            metrics: LexicalMetrics::default(),
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn table(&self) -> &TokenKindTable {
        &self.table
    }

    /// Metrics of the most recent scan
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Split and classify `source`
    pub fn analyze(&mut self, source: &str) -> ScanSummary {
        let start = Instant::now();
        let lexemes = split(source);

        log_success!(codes::success::SPLIT_COMPLETE, "Source split into lexemes",
            "lexemes" => lexemes.len(),
            "bytes" => source.len(),
            "duration_ms" => format!("{:.3}", start.elapsed().as_secs_f64() * 1000.0)
        );

        self.analyze_lexemes(lexemes)
    }

    /// Classify an already split lexeme sequence
    pub fn analyze_lexemes(&mut self, lexemes: Vec<Lexeme>) -> ScanSummary {
        let start = Instant::now();

        if lexemes.len() > MAX_LEXEME_COUNT {
            log_warning!(code = codes::lexical::LEXEME_COUNT_EXCEEDED,
                "Lexeme count exceeds the configured analysis limit",
                "lexemes" => lexemes.len(),
                "limit" => MAX_LEXEME_COUNT
            );
        }

        let classifier = TokenClassifier::new(&self.table, SpecialKinds::from(&self.preferences))
            .with_detailed_metrics(self.preferences.collect_detailed_metrics);
        let mut summary = classifier.classify(lexemes);
        summary.metrics.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        if self.preferences.warn_on_unterminated_context {
            report_unterminated(&summary);
        }

        log_success!(codes::success::CLASSIFICATION_COMPLETE, "Lexemes classified",
            "tokens" => summary.metrics.token_count,
            "significant" => summary.stream.significant_len(),
            "dropped" => summary.metrics.dropped_lexemes,
            "final_state" => &summary.final_state,
            "duration_ms" => format!("{:.3}", summary.metrics.processing_time_ms)
        );

        self.metrics = summary.metrics.clone();
        summary
    }

    pub fn analyze_file_result(&mut self, file_result: &FileProcessingResult) -> ScanSummary {
        log_debug!("Starting lexical analysis",
            "file" => file_result.metadata.path.display(),
            "bytes" => file_result.metadata.size,
            "lines" => file_result.metadata.line_count
        );
        self.analyze(&file_result.source)
    }
}

fn report_unterminated(summary: &ScanSummary) {
    match &summary.final_state {
        ScanState::Normal => {}
        ScanState::InComment => {
            log_warning!(code = codes::lexical::UNTERMINATED_COMMENT,
                "Input ended inside a block comment",
                "dropped_lexemes" => summary.metrics.dropped_lexemes
            );
        }
        ScanState::InLiteral => {
            log_warning!(code = codes::lexical::UNTERMINATED_LITERAL,
                "Input ended inside a literal",
                "dropped_lexemes" => summary.metrics.dropped_lexemes
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_table::default_java_table;

    fn analyzer() -> LexicalAnalyzer {
        let table = default_java_table().expect("built-in table loads");
        LexicalAnalyzer::with_preferences(Arc::new(table), LexicalPreferences::default())
    }

    #[test]
    fn test_analyze_records_metrics() {
        let mut analyzer = analyzer();
        let summary = analyzer.analyze("public int x = 5;\n");

        assert!(summary.ended_cleanly());
        assert_eq!(analyzer.metrics().token_count, summary.stream.len());
        assert!(analyzer.metrics().processing_time_ms >= 0.0);
        assert_eq!(analyzer.metrics().kind_counts.get("keyword"), Some(&2));
    }

    #[test]
    fn test_metrics_reset_between_scans() {
        let mut analyzer = analyzer();
        analyzer.analyze("int a; int b; int c;");
        let first = analyzer.metrics().token_count;
        analyzer.analyze("x");
        assert!(analyzer.metrics().token_count < first);
        assert_eq!(analyzer.metrics().identifiers, 1);
    }

    #[test]
    fn test_analyze_lexemes_matches_analyze() {
        let mut analyzer = analyzer();
        let source = "if (a >= 3.5) { b++; }";
        let direct = analyzer.analyze(source);
        let split_first = analyzer.analyze_lexemes(split(source));
        assert_eq!(direct.stream.all_tokens(), split_first.stream.all_tokens());
    }

    #[test]
    fn test_unterminated_literal_is_reported_in_state() {
        let mut analyzer = analyzer();
        let summary = analyzer.analyze("String s = \"open;\n");
        assert_eq!(summary.final_state.name(), "InLiteral");
    }

    #[test]
    fn test_shared_table() {
        let table = Arc::new(default_java_table().expect("built-in table loads"));
        let mut a = LexicalAnalyzer::new(Arc::clone(&table));
        let mut b = LexicalAnalyzer::new(Arc::clone(&table));
        assert_eq!(
            a.analyze("return 1;").stream.all_tokens(),
            b.analyze("return 1;").stream.all_tokens()
        );
        assert_eq!(Arc::strong_count(&table), 3);
    }
}
