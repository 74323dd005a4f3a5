//! Lexemes, tokens and display policies

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a token renders in the analyzed view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayPolicy {
    /// Render the literal text
    ShowValue,
    /// Render the kind label
    ShowKind,
    /// Render nothing
    Suppress,
}

impl DisplayPolicy {
    /// Parse a table spelling. `Value`, `Token` and `None` are the short
    /// forms used by older tables.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "ShowValue" | "Value" => Some(DisplayPolicy::ShowValue),
            "ShowKind" | "Token" => Some(DisplayPolicy::ShowKind),
            "Suppress" | "None" => Some(DisplayPolicy::Suppress),
            _ => None,
        }
    }

    /// Policy for legacy `printType` / `printTypeValues` flag pairs
    pub fn from_legacy_flags(print_type: bool, print_type_values: bool) -> Self {
        match (print_type, print_type_values) {
            (true, true) => DisplayPolicy::ShowValue,
            (true, false) => DisplayPolicy::ShowKind,
            (false, _) => DisplayPolicy::Suppress,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayPolicy::ShowValue => "ShowValue",
            DisplayPolicy::ShowKind => "ShowKind",
            DisplayPolicy::Suppress => "Suppress",
        }
    }
}

impl fmt::Display for DisplayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw unit produced by the splitter. May be empty between two adjacent
/// delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lexeme {
    text: String,
}

impl Lexeme {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl From<&str> for Lexeme {
    fn from(text: &str) -> Self {
        Lexeme::new(text)
    }
}

/// A classified lexeme
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub kind: String,
    pub policy: DisplayPolicy,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: impl Into<String>, policy: DisplayPolicy) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
            policy,
        }
    }

    /// Text shown for this token in the analyzed view
    pub fn rendered(&self) -> &str {
        match self.policy {
            DisplayPolicy::ShowValue => &self.text,
            DisplayPolicy::ShowKind => &self.kind,
            DisplayPolicy::Suppress => "",
        }
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rendered())
    }
}
