//! Ordered token output with a precomputed "significant tokens" view

use crate::tokens::token::Token;
use std::collections::BTreeMap;

/// Classifier output. Formatting tokens stay in the stream so line and word
/// boundaries survive; `significant_indices` skips them.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    all_tokens: Vec<Token>,
    significant_indices: Vec<usize>,
}

impl TokenStream {
    /// Build a stream, treating tokens of `formatting_kind` as insignificant
    pub fn new(tokens: Vec<Token>, formatting_kind: &str) -> Self {
        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| !token.is_kind(formatting_kind))
            .map(|(i, _)| i)
            .collect();

        Self {
            all_tokens: tokens,
            significant_indices,
        }
    }

    pub fn len(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tokens.is_empty()
    }

    pub fn significant_len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }

    pub fn significant_tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.significant_indices
            .iter()
            .filter_map(|&i| self.all_tokens.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.all_tokens.get(index)
    }

    /// Number of tokens per kind, formatting included
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for token in &self.all_tokens {
            *counts.entry(token.kind.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.all_tokens
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.all_tokens.iter()
    }
}
