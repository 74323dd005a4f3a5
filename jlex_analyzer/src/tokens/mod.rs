//! Lexical units
//!
//! - [`Lexeme`]: raw text produced by the splitter, no kind yet
//! - [`Token`]: a lexeme decorated with its kind and [`DisplayPolicy`]
//! - [`TokenStream`]: the ordered classifier output, with a view that skips
//!   formatting tokens

pub mod token;
pub mod token_stream;

pub use token::{DisplayPolicy, Lexeme, Token};
pub use token_stream::TokenStream;
