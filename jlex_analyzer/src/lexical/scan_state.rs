//! Comment and literal context as an explicit state machine

use serde::Serialize;
use std::fmt;

/// Context threaded through one classification pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScanState {
    #[default]
    Normal,
    /// Between `/*` and `*/`
    InComment,
    /// Between two quote delimiters
    InLiteral,
}

impl ScanState {
    pub fn is_normal(&self) -> bool {
        matches!(self, ScanState::Normal)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScanState::Normal => "Normal",
            ScanState::InComment => "InComment",
            ScanState::InLiteral => "InLiteral",
        }
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the table lookup says about a lexeme, as far as the state machine
/// is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeClass {
    /// Empty text or the formatting kind
    Formatting,
    CommentDelimiter,
    /// Any literal of the quote kind; `"` and `'` are interchangeable
    QuoteDelimiter,
    Other,
}

/// What the classifier does with the lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit a formatting token carrying the lexeme text
    EmitFormatting,
    /// Emit the placeholder token for a closed literal
    EmitLiteral,
    /// Classify through the table or the numeric/identifier fallback
    Classify,
    /// Delimiter consumed by a state change; nothing emitted
    Toggle,
    /// Opaque content of a comment or literal
    Drop,
}

/// Pure transition function.
///
/// Comment and literal contexts are mutually exclusive: quote delimiters
/// inside a comment and comment delimiters inside a literal are content.
/// Any quote delimiter closes an open literal, whichever one opened it.
pub fn transition(state: &ScanState, class: LexemeClass) -> (ScanState, Action) {
    match (state, class) {
        (ScanState::Normal, LexemeClass::Formatting) => (ScanState::Normal, Action::EmitFormatting),
        (ScanState::Normal, LexemeClass::CommentDelimiter) => {
            (ScanState::InComment, Action::Toggle)
        }
        (ScanState::Normal, LexemeClass::QuoteDelimiter) => {
            (ScanState::InLiteral, Action::Toggle)
        }
        (ScanState::Normal, LexemeClass::Other) => (ScanState::Normal, Action::Classify),

        (ScanState::InComment, LexemeClass::CommentDelimiter) => {
            (ScanState::Normal, Action::Toggle)
        }
        (ScanState::InComment, _) => (ScanState::InComment, Action::Drop),

        (ScanState::InLiteral, LexemeClass::QuoteDelimiter) => {
            (ScanState::Normal, Action::EmitLiteral)
        }
        (ScanState::InLiteral, _) => (ScanState::InLiteral, Action::Drop),
    }
}
