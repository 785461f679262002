//! Error types for styling and rendering.

use thiserror::Error;
use ts_table::{ColumnKind, TableError};

/// Result type for styling operations.
pub type Result<T> = std::result::Result<T, StyleError>;

/// Errors that can occur while styling or rendering a table.
#[derive(Error, Debug)]
pub enum StyleError {
    /// The table failed validation.
    #[error("invalid table: {0}")]
    TableError(#[from] TableError),

    /// A format template could not be applied to a column.
    #[error("column '{column}': {source}")]
    TemplateError {
        column: String,
        #[source]
        source: TemplateError,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors in a `"{:<spec>}"` format template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// The template contains no replacement field.
    #[error("template '{0}' has no replacement field")]
    MissingField(String),

    /// The template contains more than one replacement field.
    #[error("template '{0}' has more than one replacement field")]
    MultipleFields(String),

    /// A single `{` or `}` outside a replacement field.
    #[error("template '{0}' has an unbalanced brace")]
    UnbalancedBrace(String),

    /// The format spec inside the field is not understood.
    #[error("invalid format spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },

    /// The spec cannot format values of this kind.
    #[error("format spec '{spec}' cannot format {kind} values")]
    IncompatibleType { spec: String, kind: ColumnKind },
}

impl TemplateError {
    pub(crate) fn invalid(spec: &str, reason: impl Into<String>) -> Self {
        TemplateError::InvalidSpec {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}
