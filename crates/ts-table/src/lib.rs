//! In-memory table model used by the table styler.
//!
//! A [`Table`] is an ordered set of named, typed [`Column`]s sharing one
//! row count, plus an [`Index`] of row labels. Every column declares a
//! [`ColumnKind`]; each cell is a [`CellValue`] of that kind or
//! [`CellValue::Null`].
//!
//! The model is read-only for consumers: styling and rendering derive
//! metadata from it and never mutate values.
//!
//! # Example
//!
//! ```
//! use ts_table::{Column, Table};
//!
//! let table = Table::builder()
//!     .column(Column::text("Text column", ["long enough", "short"]))
//!     .column(Column::integer("Number column", [91, 1243]))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.row_count(), 2);
//! assert_eq!(table.columns().len(), 2);
//! ```

pub mod column;
pub mod error;
pub mod table;
pub mod value;

pub use column::{Column, Index};
pub use error::{Result, TableError};
pub use table::{Table, TableBuilder};
pub use value::{CellValue, ColumnKind};
