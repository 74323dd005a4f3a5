//! Text and JSON views of an analysis

mod render;
mod report;

pub use render::{
    render_analyzed, render_lexeme_dump, render_source, render_table_dump, render_token_dump,
    render_tokens_only,
};
pub use report::{AnalysisReport, BatchFailure, BatchReport};
