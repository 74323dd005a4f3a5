//! Token classifier: one pass over the lexemes, threading [`ScanState`]

use super::fallback::{classify_unmatched, FallbackKind};
use super::scan_state::{transition, Action, LexemeClass, ScanState};
use crate::config::runtime::{defaults, LexicalPreferences};
use crate::token_table::{TokenKindEntry, TokenKindTable};
use crate::tokens::{DisplayPolicy, Lexeme, Token, TokenStream};
use serde::Serialize;
use std::collections::BTreeMap;

/// Kinds the classifier gives special meaning to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialKinds {
    pub formatting: String,
    pub comment: String,
    pub quote: String,
    pub literal: String,
}

impl Default for SpecialKinds {
    fn default() -> Self {
        Self {
            formatting: defaults::FORMATTING_KIND.to_string(),
            comment: defaults::COMMENT_KIND.to_string(),
            quote: defaults::QUOTE_KIND.to_string(),
            literal: defaults::LITERAL_KIND.to_string(),
        }
    }
}

impl From<&LexicalPreferences> for SpecialKinds {
    fn from(prefs: &LexicalPreferences) -> Self {
        Self {
            formatting: prefs.formatting_kind.clone(),
            comment: prefs.comment_kind.clone(),
            quote: prefs.quote_kind.clone(),
            literal: prefs.literal_kind.clone(),
        }
    }
}

/// Counters for one classification pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LexicalMetrics {
    pub lexeme_count: usize,
    pub empty_lexeme_count: usize,
    pub token_count: usize,
    pub formatting_tokens: usize,
    pub dropped_lexemes: usize,
    pub delimiter_lexemes: usize,
    pub comment_blocks: usize,
    pub literal_count: usize,
    pub int_values: usize,
    pub double_values: usize,
    pub identifiers: usize,
    /// Empty unless detailed metrics are enabled
    pub kind_counts: BTreeMap<String, usize>,
    pub processing_time_ms: f64,
}

/// Result of one pass
#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub stream: TokenStream,
    /// `Normal` unless the input ended inside a comment or literal
    pub final_state: ScanState,
    pub metrics: LexicalMetrics,
}

impl ScanSummary {
    pub fn ended_cleanly(&self) -> bool {
        self.final_state.is_normal()
    }
}

pub struct TokenClassifier<'t> {
    table: &'t TokenKindTable,
    kinds: SpecialKinds,
    detailed_metrics: bool,
}

impl<'t> TokenClassifier<'t> {
    pub fn new(table: &'t TokenKindTable, kinds: SpecialKinds) -> Self {
        Self {
            table,
            kinds,
            detailed_metrics: true,
        }
    }

    pub fn with_detailed_metrics(mut self, enabled: bool) -> Self {
        self.detailed_metrics = enabled;
        self
    }

    pub fn kinds(&self) -> &SpecialKinds {
        &self.kinds
    }

    fn class_of(&self, text: &str, entry: Option<&TokenKindEntry>) -> LexemeClass {
        if text.is_empty() {
            return LexemeClass::Formatting;
        }
        match entry.map(|e| e.kind.as_str()) {
            Some(kind) if kind == self.kinds.formatting => LexemeClass::Formatting,
            Some(kind) if kind == self.kinds.comment => LexemeClass::CommentDelimiter,
            Some(kind) if kind == self.kinds.quote => LexemeClass::QuoteDelimiter,
            _ => LexemeClass::Other,
        }
    }

    /// Consume `lexemes` and produce the token stream. Never fails.
    pub fn classify<I>(&self, lexemes: I) -> ScanSummary
    where
        I: IntoIterator<Item = Lexeme>,
    {
        let mut state = ScanState::Normal;
        let mut tokens = Vec::new();
        let mut metrics = LexicalMetrics::default();

        for lexeme in lexemes {
            metrics.lexeme_count += 1;
            if lexeme.is_empty() {
                metrics.empty_lexeme_count += 1;
            }

            let entry = self.table.lookup(lexeme.text());
            let class = self.class_of(lexeme.text(), entry);
            let is_comment_delimiter = class == LexemeClass::CommentDelimiter;
            let (next, action) = transition(&state, class);

            match action {
                Action::EmitFormatting => {
                    metrics.formatting_tokens += 1;
                    tokens.push(Token::new(
                        lexeme.into_text(),
                        self.kinds.formatting.as_str(),
                        DisplayPolicy::ShowValue,
                    ));
                }
                Action::EmitLiteral => {
                    metrics.literal_count += 1;
                    metrics.delimiter_lexemes += 1;
                    tokens.push(Token::new(
                        lexeme.into_text(),
                        self.kinds.literal.as_str(),
                        DisplayPolicy::ShowKind,
                    ));
                }
                Action::Classify => {
                    let token = match entry {
                        Some(entry) if !entry.kind.is_empty() => {
                            Token::new(lexeme.into_text(), entry.kind.as_str(), entry.policy)
                        }
                        _ => {
                            let kind = classify_unmatched(lexeme.text());
                            match kind {
                                FallbackKind::IntVal => metrics.int_values += 1,
                                FallbackKind::DoubleVal => metrics.double_values += 1,
                                FallbackKind::Var => metrics.identifiers += 1,
                            }
                            Token::new(lexeme.into_text(), kind.as_str(), DisplayPolicy::ShowKind)
                        }
                    };
                    tokens.push(token);
                }
                Action::Toggle => {
                    metrics.delimiter_lexemes += 1;
                    if is_comment_delimiter && next.is_normal() {
                        metrics.comment_blocks += 1;
                    }
                }
                Action::Drop => metrics.dropped_lexemes += 1,
            }

            state = next;
        }

        let stream = TokenStream::new(tokens, &self.kinds.formatting);
        metrics.token_count = stream.len();
        if self.detailed_metrics {
            metrics.kind_counts = stream.kind_counts();
        }

        ScanSummary {
            stream,
            final_state: state,
            metrics,
        }
    }
}
