//! Token-kind table: literal text to kind and display policy
//!
//! Built once from a JSON side file (or the built-in Java table) and treated
//! as read-only afterwards, so a single table can be shared across scans.

mod error;
mod loader;
mod table;

pub use error::{ConfigurationError, TableLoadError};
pub use loader::{
    default_java_table, load_table_from_path, load_table_from_str, TableLoadReport, TableLoader,
};
pub use table::{DuplicateLiteral, TokenKindEntry, TokenKindTable};

use crate::config::compile_time::token_table::{MAX_TABLE_ENTRIES, MAX_TABLE_FILE_SIZE};
use crate::logging::codes;

/// Startup check that every table code is registered
pub fn validate_table_codes() -> Result<(), String> {
    let table_codes = [
        codes::token_table::TABLE_UNREADABLE,
        codes::token_table::TABLE_INVALID_JSON,
        codes::token_table::TABLE_INVALID_SHAPE,
        codes::token_table::UNKNOWN_DISPLAY_POLICY,
        codes::token_table::EMPTY_KIND,
        codes::token_table::TABLE_TOO_LARGE,
        codes::token_table::DUPLICATE_LITERAL,
        codes::success::TABLE_LOAD_COMPLETE,
    ];

    for code in &table_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Token table code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Token table limits loaded",
        "max_entries" => MAX_TABLE_ENTRIES,
        "max_file_size" => MAX_TABLE_FILE_SIZE
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_validate_table_codes() {
        assert!(super::validate_table_codes().is_ok());
    }
}
