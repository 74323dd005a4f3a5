//! Token-kind table loading from JSON
//!
//! Two record shapes are accepted:
//!
//! ```json
//! { "kind": "keyword", "display": "ShowValue", "values": ["int", "class"] }
//! { "type": "keyword", "printType": true, "printTypeValues": true, "values": ["int"] }
//! ```

use super::error::{ConfigurationError, TableLoadError};
use super::table::{DuplicateLiteral, TokenKindEntry, TokenKindTable};
use crate::config::compile_time::token_table::{MAX_TABLE_ENTRIES, MAX_TABLE_FILE_SIZE};
use crate::config::runtime::TablePreferences;
use crate::logging::codes;
use crate::tokens::DisplayPolicy;
use crate::{log_debug, log_error, log_success, log_warning};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const BUILTIN_JAVA_TABLE: &str = include_str!("../../tokens.json");
const BUILTIN_ORIGIN: &str = "<built-in java table>";

/// A loaded table plus everything that was rejected or shadowed on the way
#[derive(Debug, Clone)]
pub struct TableLoadReport {
    pub table: TokenKindTable,
    pub rejected: Vec<ConfigurationError>,
    pub duplicates: Vec<DuplicateLiteral>,
    pub origin: String,
}

impl TableLoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.duplicates.is_empty()
    }
}

pub struct TableLoader {
    pub warn_on_duplicates: bool,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader {
    pub fn new() -> Self {
        Self {
            warn_on_duplicates: true,
        }
    }

    pub fn from_preferences(prefs: &TablePreferences) -> Self {
        Self {
            warn_on_duplicates: prefs.warn_on_duplicates,
        }
    }

    pub fn with_duplicate_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_duplicates = enabled;
        self
    }

    /// Load the file named by the preferences, or the built-in table
    pub fn load_configured(
        &self,
        prefs: &TablePreferences,
    ) -> Result<TableLoadReport, TableLoadError> {
        match &prefs.table_path {
            Some(path) => self.load_path(path),
            None => self.load_builtin(),
        }
    }

    pub fn load_builtin(&self) -> Result<TableLoadReport, TableLoadError> {
        self.load_str(BUILTIN_JAVA_TABLE, BUILTIN_ORIGIN)
    }

    pub fn load_path(&self, path: &Path) -> Result<TableLoadReport, TableLoadError> {
        let origin = path.display().to_string();

        let size = fs::metadata(path)
            .map_err(|source| self.unreadable(path, source))?
            .len();
        if size > MAX_TABLE_FILE_SIZE {
            let error = TableLoadError::TooLarge {
                origin,
                what: "bytes",
                actual: size,
                limit: MAX_TABLE_FILE_SIZE,
            };
            log_error!(error.error_code(), "Token table file exceeds size limit",
                "size" => size,
                "limit" => MAX_TABLE_FILE_SIZE
            );
            return Err(error);
        }

        let content = fs::read_to_string(path).map_err(|source| self.unreadable(path, source))?;
        self.load_str(&content, &origin)
    }

    pub fn load_str(&self, json: &str, origin: &str) -> Result<TableLoadReport, TableLoadError> {
        let document: Value = serde_json::from_str(json).map_err(|source| {
            let error = TableLoadError::InvalidJson {
                origin: origin.to_string(),
                source,
            };
            log_error!(error.error_code(), "Token table is not valid JSON",
                "origin" => origin,
                "detail" => &error
            );
            error
        })?;

        let records = match document {
            Value::Array(records) => records,
            other => {
                let error = TableLoadError::InvalidShape {
                    origin: origin.to_string(),
                    found: json_type_name(&other),
                };
                log_error!(error.error_code(), "Token table must be an array of records",
                    "origin" => origin
                );
                return Err(error);
            }
        };

        if records.len() > MAX_TABLE_ENTRIES {
            let error = TableLoadError::TooLarge {
                origin: origin.to_string(),
                what: "entries",
                actual: records.len() as u64,
                limit: MAX_TABLE_ENTRIES as u64,
            };
            log_error!(error.error_code(), "Token table has too many entries",
                "entries" => records.len()
            );
            return Err(error);
        }

        let mut entries = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match parse_entry(index, record) {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    log_error!(error.error_code(), "Rejected token table entry",
                        "origin" => origin,
                        "detail" => &error
                    );
                    rejected.push(error);
                }
            }
        }

        let (table, duplicates) = TokenKindTable::build(entries);

        if self.warn_on_duplicates {
            for duplicate in &duplicates {
                log_warning!(code = codes::token_table::DUPLICATE_LITERAL,
                    "Literal declared more than once; first entry wins",
                    "literal" => format!("{:?}", duplicate.literal),
                    "kept_entry" => duplicate.kept_entry,
                    "ignored_entry" => duplicate.ignored_entry
                );
            }
        }

        log_success!(codes::success::TABLE_LOAD_COMPLETE, "Token table loaded",
            "origin" => origin,
            "entries" => table.len(),
            "literals" => table.literal_count(),
            "rejected" => rejected.len(),
            "duplicates" => duplicates.len()
        );

        Ok(TableLoadReport {
            table,
            rejected,
            duplicates,
            origin: origin.to_string(),
        })
    }

    fn unreadable(&self, path: &Path, source: std::io::Error) -> TableLoadError {
        let error = TableLoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        log_error!(error.error_code(), "Cannot read token table",
            "path" => path.display(),
            "detail" => &error
        );
        error
    }
}

fn parse_entry(index: usize, record: &Value) -> Result<TokenKindEntry, ConfigurationError> {
    let malformed = |reason: &str| ConfigurationError::MalformedEntry {
        index,
        reason: reason.to_string(),
    };

    let object = record
        .as_object()
        .ok_or_else(|| malformed("expected an object"))?;

    let kind = object
        .get("kind")
        .or_else(|| object.get("type"))
        .ok_or_else(|| malformed("missing 'kind'"))?
        .as_str()
        .ok_or_else(|| malformed("'kind' must be a string"))?;

    if kind.trim().is_empty() {
        return Err(ConfigurationError::EmptyKind { index });
    }

    let policy = parse_policy(index, kind, object)?;

    let values = object
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing array 'values'"))?
        .iter()
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| malformed("'values' must contain only strings"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log_debug!("Parsed token table entry",
        "index" => index,
        "kind" => kind,
        "policy" => policy,
        "values" => values.len()
    );

    Ok(TokenKindEntry::new(kind, policy, values))
}

fn parse_policy(
    index: usize,
    kind: &str,
    object: &Map<String, Value>,
) -> Result<DisplayPolicy, ConfigurationError> {
    let malformed = |reason: &str| ConfigurationError::MalformedEntry {
        index,
        reason: reason.to_string(),
    };

    if let Some(display) = object.get("display") {
        let spelling = display
            .as_str()
            .ok_or_else(|| malformed("'display' must be a string"))?;
        return DisplayPolicy::parse(spelling).ok_or_else(|| {
            ConfigurationError::UnknownDisplayPolicy {
                index,
                kind: kind.to_string(),
                policy: spelling.to_string(),
            }
        });
    }

    let flag = |name: &str| -> Result<bool, ConfigurationError> {
        match object.get(name) {
            None => Ok(false),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| malformed(&format!("'{}' must be a boolean", name))),
        }
    };

    if object.contains_key("printType") {
        return Ok(DisplayPolicy::from_legacy_flags(
            flag("printType")?,
            flag("printTypeValues")?,
        ));
    }

    Err(malformed("missing 'display'"))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Load a table file with default loader settings
pub fn load_table_from_path(path: &Path) -> Result<TableLoadReport, TableLoadError> {
    TableLoader::new().load_path(path)
}

pub fn load_table_from_str(json: &str, origin: &str) -> Result<TableLoadReport, TableLoadError> {
    TableLoader::new().load_str(json, origin)
}

/// The Java table shipped with the crate
pub fn default_java_table() -> Result<TokenKindTable, TableLoadError> {
    TableLoader::new().load_builtin().map(|report| report.table)
}
