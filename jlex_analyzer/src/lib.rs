//! Table-driven lexical analyzer for Java source text
//!
//! A source file is split into lexemes by fixed delimiter rules, then each
//! lexeme is classified against a token-kind table loaded from JSON, with
//! block comments and quoted literals tracked by an explicit scan state.

pub mod batch;
pub mod config;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod token_table;
pub mod tokens;

pub use batch::{BatchConfig, BatchError, BatchResults};
pub use lexical::{LexicalAnalyzer, ScanState, ScanSummary};
pub use pipeline::{PipelineError, PipelineOptions, PipelineResult};
pub use token_table::{TableLoadError, TokenKindTable};
pub use tokens::{DisplayPolicy, Lexeme, Token, TokenStream};
