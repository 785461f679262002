//! Error types for table construction.

use thiserror::Error;

use crate::value::ColumnKind;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while assembling a [`Table`](crate::Table).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A column does not have the table's row count.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A cell value does not match the declared column kind.
    #[error("column '{column}' row {row}: expected {expected} value, found {found}")]
    KindMismatch {
        column: String,
        row: usize,
        expected: ColumnKind,
        found: &'static str,
    },

    /// Two columns share a name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    /// The index does not label every row.
    #[error("index has {actual} labels, expected {expected}")]
    IndexLength { expected: usize, actual: usize },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Json(err.to_string())
    }
}
