//! Plain-text renderers. Each returns the full text including its header.

use crate::config::compile_time::lexical::MAX_LITERAL_TEXT_LENGTH;
use crate::token_table::TokenKindTable;
use crate::tokens::{DisplayPolicy, Lexeme, TokenStream};
use std::fmt::Write;

/// Raw source under a "File Contents of" header
pub fn render_source(name: &str, source: &str) -> String {
    format!("File Contents of {}:\n{}\n", name, source)
}

/// Every token rendered by its policy and concatenated, so formatting
/// tokens rebuild the line structure of the source
pub fn render_analyzed(name: &str, stream: &TokenStream) -> String {
    let mut out = format!("Analysis of {}:\n", name);
    for token in stream {
        out.push_str(token.rendered());
    }
    out.push('\n');
    out
}

/// Significant tokens on one line after `w = `, each followed by a space
pub fn render_tokens_only(name: &str, stream: &TokenStream) -> String {
    let mut out = format!("\nTokens of {}:\nw = ", name);
    for token in stream
        .significant_tokens()
        .filter(|t| t.policy != DisplayPolicy::Suppress)
    {
        out.push_str(token.rendered());
        out.push(' ');
    }
    out.push('\n');
    out
}

pub fn render_lexeme_dump(lexemes: &[Lexeme]) -> String {
    let mut out = String::from("Extracted Lexemes:\n");
    for lexeme in lexemes {
        let _ = writeln!(out, "{{text: {:?}}}", clip(lexeme.text()));
    }
    out
}

pub fn render_token_dump(stream: &TokenStream) -> String {
    let mut out = String::from("Extracted Tokens:\n");
    for token in stream {
        let _ = writeln!(
            out,
            "{{text: {:?}, kind: {}, policy: {}}}",
            clip(&token.text),
            token.kind,
            token.policy
        );
    }
    out
}

/// One JSON line per table entry, in table order
pub fn render_table_dump(table: &TokenKindTable) -> String {
    let mut out = String::from("Token-Kind Table:\n");
    for entry in table.entries() {
        match serde_json::to_string(entry) {
            Ok(line) => out.push_str(&line),
            Err(_) => {
                let _ = write!(out, "{:?}", entry);
            }
        }
        out.push('\n');
    }
    out
}

/// Cut long texts in debug dumps at a char boundary
fn clip(text: &str) -> String {
    match text.char_indices().nth(MAX_LITERAL_TEXT_LENGTH) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_table::TokenKindEntry;
    use crate::tokens::Token;

    fn stream() -> TokenStream {
        TokenStream::new(
            vec![
                Token::new("int", "keyword", DisplayPolicy::ShowValue),
                Token::new(" ", "textFormattingCharacters", DisplayPolicy::ShowValue),
                Token::new("x", "var", DisplayPolicy::ShowKind),
                Token::new("@Hidden", "annotation", DisplayPolicy::Suppress),
                Token::new(";", "separator", DisplayPolicy::ShowValue),
                Token::new("\n", "textFormattingCharacters", DisplayPolicy::ShowValue),
                Token::new("", "textFormattingCharacters", DisplayPolicy::ShowValue),
            ],
            "textFormattingCharacters",
        )
    }

    #[test]
    fn test_render_source() {
        assert_eq!(
            render_source("A.java", "class A {}"),
            "File Contents of A.java:\nclass A {}\n"
        );
    }

    #[test]
    fn test_render_analyzed_keeps_layout() {
        assert_eq!(
            render_analyzed("A.java", &stream()),
            "Analysis of A.java:\nint var;\n\n"
        );
    }

    #[test]
    fn test_render_tokens_only() {
        assert_eq!(
            render_tokens_only("A.java", &stream()),
            "\nTokens of A.java:\nw = int var ; \n"
        );
    }

    #[test]
    fn test_token_dump() {
        let dump = render_token_dump(&stream());
        assert!(dump.starts_with("Extracted Tokens:\n"));
        assert!(dump.contains("{text: \"x\", kind: var, policy: ShowKind}"));
        assert!(dump.contains("{text: \"\\n\", kind: textFormattingCharacters, policy: ShowValue}"));
    }

    #[test]
    fn test_lexeme_dump_clips_long_text() {
        let long = "a".repeat(MAX_LITERAL_TEXT_LENGTH + 10);
        let dump = render_lexeme_dump(&[Lexeme::new(long), Lexeme::new("")]);
        assert!(dump.contains("...\"}"));
        assert!(dump.ends_with("{text: \"\"}\n"));
    }

    #[test]
    fn test_table_dump() {
        let table = TokenKindTable::from_entries(vec![TokenKindEntry::new(
            "bracket",
            DisplayPolicy::ShowValue,
            ["(", ")"],
        )]);
        let dump = render_table_dump(&table);
        assert!(dump.contains("\"kind\":\"bracket\""));
        assert!(dump.contains("\"values\":[\"(\",\")\"]"));
    }
}
