use assert_matches::assert_matches;
use jlex_analyzer::batch::{self, BatchConfig};
use jlex_analyzer::file_processor::FileProcessorError;
use jlex_analyzer::lexical::{split_texts, tokenize};
use jlex_analyzer::output::{render_analyzed, render_tokens_only};
use jlex_analyzer::pipeline::{self, PipelineError, PipelineOptions};
use jlex_analyzer::token_table::{default_java_table, load_table_from_path};
use jlex_analyzer::{DisplayPolicy, ScanState, TokenKindTable};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn java_table() -> Arc<TokenKindTable> {
    Arc::new(default_java_table().unwrap())
}

fn significant(source: &str) -> Vec<(String, String)> {
    tokenize(source, java_table())
        .stream
        .significant_tokens()
        .map(|t| (t.text.clone(), t.kind.clone()))
        .collect()
}

fn kinds(source: &str) -> Vec<String> {
    significant(source).into_iter().map(|(_, kind)| kind).collect()
}

#[test]
fn analyzed_view_keeps_line_structure() {
    let source = "public class A {\n\tint x = 5;\n}\n";
    let summary = tokenize(source, java_table());

    let analyzed = render_analyzed("A.java", &summary.stream);
    assert_eq!(
        analyzed,
        "Analysis of A.java:\npublic class var {\n\tint var = intVal;\n}\n\n"
    );
}

#[test]
fn block_comment_span_produces_no_tokens() {
    let summary = tokenize("int a; /* int b = 7; \"x\" */ int c;", java_table());
    let texts: Vec<&str> = summary
        .stream
        .significant_tokens()
        .map(|t| t.text.as_str())
        .collect();

    assert_eq!(texts, vec!["int", "a", ";", "int", "c", ";"]);
    assert_eq!(summary.final_state, ScanState::Normal);
    assert_eq!(summary.metrics.comment_blocks, 1);
}

#[test]
fn multi_line_comment_hides_its_newlines() {
    let summary = tokenize("a\n/* one\n two\n*/\nb", java_table());
    let analyzed = render_analyzed("C.java", &summary.stream);
    assert_eq!(analyzed, "Analysis of C.java:\nvar\n\nvar\n");
}

#[test]
fn quoted_text_is_one_literal_token() {
    let summary = tokenize("s = \"abc\";", java_table());
    let literals: Vec<_> = summary
        .stream
        .all_tokens()
        .iter()
        .filter(|t| t.kind == "literal")
        .collect();

    assert_eq!(literals.len(), 1);
    assert_eq!(literals[0].policy, DisplayPolicy::ShowKind);
    assert_eq!(kinds("s = \"abc\";"), vec!["var", "operator", "literal", "separator"]);
}

#[test]
fn unterminated_literal_swallows_the_rest() {
    let summary = tokenize("s = \"abc;\nint y = 2;\n", java_table());

    assert_eq!(summary.final_state, ScanState::InLiteral);
    assert!(!summary.ended_cleanly());
    assert_eq!(
        render_tokens_only("U.java", &summary.stream),
        "\nTokens of U.java:\nw = s = \n"
    );
}

#[test]
fn numbers_and_identifiers_fall_back() {
    assert_eq!(kinds("42"), vec!["intVal"]);
    assert_eq!(kinds("3.14"), vec!["doubleVal"]);
    assert_eq!(kinds("x"), vec!["var"]);
    assert_eq!(kinds("-7"), vec!["operator", "intVal"]);
}

#[test]
fn member_access_splits_on_the_dot() {
    assert_eq!(split_texts("x.y"), vec!["x", ".", "y"]);
    assert_eq!(
        significant("x.y"),
        vec![
            ("x".to_string(), "var".to_string()),
            (".".to_string(), "separator".to_string()),
            ("y".to_string(), "var".to_string()),
        ]
    );
}

#[test]
fn line_comments_are_analyzed_as_code() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    fs::write(
        &path,
        r#"[
            {"kind": "textFormattingCharacters", "display": "ShowValue", "values": [" ", "\n"]},
            {"kind": "keyword", "display": "ShowKind", "values": ["int"]},
            {"kind": "operator", "display": "ShowKind", "values": ["="]},
            {"kind": "separator", "display": "ShowKind", "values": [";"]}
        ]"#,
    )
    .unwrap();
    let table = Arc::new(load_table_from_path(&path).unwrap().table);

    let summary = tokenize("int x = 5; // set x", table);
    let tail: Vec<&str> = summary
        .stream
        .significant_tokens()
        .skip(5)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(tail, vec!["//", "set", "x"]);
    assert_eq!(
        render_tokens_only("Test3.java", &summary.stream),
        "\nTokens of Test3.java:\nw = keyword var operator intVal separator var var var \n"
    );
    assert_eq!(
        render_analyzed("Test3.java", &summary.stream),
        "Analysis of Test3.java:\nkeyword var operator intValseparator var var var\n"
    );
}

#[test]
fn any_quote_closes_an_open_literal() {
    let summary = tokenize("s = \"you'd like\";", java_table());

    assert_eq!(
        significant("s = \"you'd like\";"),
        vec![
            ("s".to_string(), "var".to_string()),
            ("=".to_string(), "operator".to_string()),
            ("'".to_string(), "literal".to_string()),
            ("d".to_string(), "var".to_string()),
            ("like".to_string(), "var".to_string()),
        ]
    );
    assert_eq!(summary.final_state, ScanState::InLiteral);
    assert!(!summary.ended_cleanly());
}

#[test]
fn overflowing_float_is_still_a_double() {
    assert_eq!(kinds("1e400"), vec!["doubleVal"]);
    assert_eq!(kinds("inf"), vec!["var"]);
}

#[test]
fn splitting_is_deterministic() {
    let source = "for (int i = 0; i <= 10; i++) { total += i * 2.5; }\n";
    assert_eq!(split_texts(source), split_texts(source));

    let first = tokenize(source, java_table());
    let second = tokenize(source, java_table());
    assert_eq!(first.stream.all_tokens(), second.stream.all_tokens());
}

#[test]
fn legacy_table_shape_drives_display() {
    let dir = tempdir().unwrap();
    let table_path = dir.path().join("legacy.json");
    fs::write(
        &table_path,
        r#"[
            {"type": "textFormattingCharacters", "printType": true, "printTypeValues": true, "values": [" "]},
            {"type": "keyword", "printType": true, "printTypeValues": false, "values": ["int"]},
            {"type": "operator", "printType": false, "printTypeValues": false, "values": ["="]}
        ]"#,
    )
    .unwrap();
    let report = load_table_from_path(&table_path).unwrap();
    assert!(report.is_clean());

    let summary = tokenize("int x = 1", Arc::new(report.table));
    assert_eq!(
        render_tokens_only("L.java", &summary.stream),
        "\nTokens of L.java:\nw = keyword var intVal \n"
    );
}

#[test]
fn pipeline_reads_and_analyzes_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Test3.java");
    fs::write(&path, "int x = 5;\n").unwrap();

    let options = PipelineOptions::default().with_lexemes(true);
    let result = pipeline::process_file_with_options(&path, java_table(), &options).unwrap();

    assert!(result.ended_cleanly());
    assert_eq!(result.stream.significant_len(), 5);
    assert_eq!(result.file_metadata.line_count, 1);
    assert!(result.lexemes.is_some());
}

#[test]
fn missing_source_never_starts_a_scan() {
    let error = pipeline::process_file("/no/such/dir/Missing.java", java_table()).unwrap_err();
    assert_matches!(
        error,
        PipelineError::FileProcessing(FileProcessorError::FileNotFound { .. })
    );
}

#[test]
fn directory_batch_sees_every_java_file() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("A.java"), "int a = 1;").unwrap();
    fs::write(dir.path().join("nested").join("B.java"), "return b;").unwrap();
    fs::write(dir.path().join("notes.txt"), "not java").unwrap();

    let config = BatchConfig {
        max_threads: 2,
        progress_reporting: false,
        ..BatchConfig::default()
    };
    let results = batch::process_directory(dir.path(), java_table(), &config).unwrap();

    assert_eq!(results.success_count(), 2);
    assert_eq!(results.failure_count(), 0);
    let significant: usize = results
        .successful_files
        .iter()
        .map(|(_, result)| result.stream.significant_len())
        .sum();
    assert_eq!(significant, 5 + 3);
    assert!(results.total_tokens() >= significant);
}
