//! Lexeme splitter
//!
//! Partitions source text into lexemes. At every position the delimiter
//! rules are tried in this order and the first one that matches wins:
//!
//! 1. `/*` or `*/`
//! 2. a maximal run of `= + - * / % ! > <`
//! 3. a single space
//! 4. `"` or `'`
//! 5. `(` `)` `{` `}` `[` `]`
//! 6. `,` `;` `:`
//! 7. `.` directly after an ASCII letter
//! 8. `\n` or `\t`
//!
//! The text between two matches is emitted as its own lexeme, even when it
//! is empty, so output always alternates run, delimiter, run, ... and ends
//! with a run.

use crate::tokens::Lexeme;

const OPERATOR_CHARS: &[u8] = b"=+-*/%!><";

fn is_operator_byte(byte: u8) -> bool {
    OPERATOR_CHARS.contains(&byte)
}

/// Byte length of the delimiter starting at `pos`, if any.
///
/// All delimiters are ASCII, so `pos + len` is always a char boundary.
fn delimiter_len(source: &str, pos: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let first = *bytes.get(pos)?;

    if matches!(&bytes[pos..], [b'/', b'*', ..] | [b'*', b'/', ..]) {
        return Some(2);
    }

    if is_operator_byte(first) {
        let run = bytes[pos..]
            .iter()
            .take_while(|&&b| is_operator_byte(b))
            .count();
        return Some(run);
    }

    match first {
        b' ' | b'"' | b'\'' => Some(1),
        b'(' | b')' | b'{' | b'}' | b'[' | b']' => Some(1),
        b',' | b';' | b':' => Some(1),
        b'.' if pos > 0 && bytes[pos - 1].is_ascii_alphabetic() => Some(1),
        b'\n' | b'\t' => Some(1),
        _ => None,
    }
}

/// Split `source` into lexemes. Pure and deterministic.
pub fn split(source: &str) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    let mut run_start = 0;
    let mut pos = 0;

    while pos < source.len() {
        match delimiter_len(source, pos) {
            Some(len) => {
                lexemes.push(Lexeme::new(&source[run_start..pos]));
                lexemes.push(Lexeme::new(&source[pos..pos + len]));
                pos += len;
                run_start = pos;
            }
            None => {
                // Step over a whole UTF-8 character
                pos += source[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    lexemes.push(Lexeme::new(&source[run_start..]));
    lexemes
}

/// Texts of the lexemes, mainly for assertions and debug output
pub fn split_texts(source: &str) -> Vec<String> {
    split(source).into_iter().map(Lexeme::into_text).collect()
}
