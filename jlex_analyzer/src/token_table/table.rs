use crate::tokens::DisplayPolicy;
use serde::Serialize;
use std::collections::HashMap;

/// One table record: every literal in `values` shares `kind` and `policy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenKindEntry {
    pub kind: String,
    pub policy: DisplayPolicy,
    pub values: Vec<String>,
}

impl TokenKindEntry {
    pub fn new<I, S>(kind: impl Into<String>, policy: DisplayPolicy, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            policy,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A literal declared by more than one entry. The first entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateLiteral {
    pub literal: String,
    pub kept_entry: usize,
    pub ignored_entry: usize,
}

/// Exact-match lookup from literal text to its entry. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct TokenKindTable {
    entries: Vec<TokenKindEntry>,
    index: HashMap<String, usize>,
}

impl TokenKindTable {
    /// Build a table, returning it with every shadowed literal
    pub fn build(entries: Vec<TokenKindEntry>) -> (Self, Vec<DuplicateLiteral>) {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for (entry_index, entry) in entries.iter().enumerate() {
            for value in &entry.values {
                match index.get(value) {
                    Some(&kept_entry) => duplicates.push(DuplicateLiteral {
                        literal: value.clone(),
                        kept_entry,
                        ignored_entry: entry_index,
                    }),
                    None => {
                        index.insert(value.clone(), entry_index);
                    }
                }
            }
        }

        (Self { entries, index }, duplicates)
    }

    pub fn from_entries(entries: Vec<TokenKindEntry>) -> Self {
        Self::build(entries).0
    }

    pub fn lookup(&self, text: &str) -> Option<&TokenKindEntry> {
        self.index.get(text).and_then(|&i| self.entries.get(i))
    }

    pub fn kind_of(&self, text: &str) -> Option<&str> {
        self.lookup(text).map(|entry| entry.kind.as_str())
    }

    pub fn entries(&self) -> &[TokenKindEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct literals
    pub fn literal_count(&self) -> usize {
        self.index.len()
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }
}
