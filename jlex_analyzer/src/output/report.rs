//! JSON reports

use crate::lexical::{LexicalMetrics, ScanState};
use crate::pipeline::PipelineResult;
use crate::tokens::{Lexeme, Token};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub file: String,
    pub generated_at: DateTime<Utc>,
    pub build_profile: &'static str,
    pub size_bytes: u64,
    pub line_count: usize,
    pub final_state: ScanState,
    pub metrics: LexicalMetrics,
    /// Analyzed view as one string
    pub analyzed: String,
    /// Tokens-only view, without the `w = ` prefix
    pub significant: Vec<String>,
    pub tokens: Vec<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexemes: Option<Vec<Lexeme>>,
}

impl AnalysisReport {
    pub fn from_result(result: &PipelineResult) -> Self {
        let analyzed = result.stream.all_tokens().iter().map(Token::rendered).collect();
        let significant = result
            .stream
            .significant_tokens()
            .map(Token::rendered)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            file: result.display_name.clone(),
            generated_at: Utc::now(),
            build_profile: crate::config::build_info::profile(),
            size_bytes: result.file_metadata.size,
            line_count: result.file_metadata.line_count,
            final_state: result.final_state.clone(),
            metrics: result.lexical_metrics.clone(),
            analyzed,
            significant,
            tokens: result.stream.all_tokens().to_vec(),
            lexemes: result.lexemes.clone(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub file: String,
    pub code: &'static str,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub files_analyzed: usize,
    pub files_failed: usize,
    pub total_tokens: usize,
    pub duration_ms: f64,
    pub reports: Vec<AnalysisReport>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{process_file_with_options, PipelineOptions};
    use crate::token_table::default_java_table;
    use std::fs;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_report_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("R.java");
        fs::write(&path, "return x;").unwrap();

        let table = Arc::new(default_java_table().unwrap());
        let options = PipelineOptions::default().with_lexemes(true);
        let result = process_file_with_options(&path, table, &options).unwrap();

        let report = AnalysisReport::from_result(&result);
        assert_eq!(report.significant, vec!["return", "var", ";"]);
        assert_eq!(report.analyzed, "return var;");

        let json: serde_json::Value =
            serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["final_state"]["state"], "normal");
        assert_eq!(json["metrics"]["identifiers"], 1);
        assert!(json["generated_at"].is_string());
        assert!(json["lexemes"].is_array());
        assert_eq!(json["tokens"][0]["kind"], "keyword");
        assert_eq!(json["tokens"][0]["policy"], "ShowValue");
    }

    #[test]
    fn test_lexemes_omitted_when_not_retained() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("S.java");
        fs::write(&path, "int y;").unwrap();

        let table = Arc::new(default_java_table().unwrap());
        let result = crate::pipeline::process_file(&path, table).unwrap();
        let json: serde_json::Value =
            serde_json::to_value(AnalysisReport::from_result(&result)).unwrap();
        assert!(json.get("lexemes").is_none());
    }
}
