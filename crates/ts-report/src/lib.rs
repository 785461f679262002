//! Column-aware styling and HTML rendering for tables.
//!
//! Takes a [`ts_table::Table`] and renders it as an HTML fragment
//! (`<style>` + `<table>`) for a browser or notebook cell.
//!
//! # Rules
//!
//! - Text, date and datetime columns align left; integer, float and boolean
//!   columns align right.
//! - `numerical_format` applies to integer and float columns,
//!   `date_format` to date and datetime columns.
//! - Headings are left aligned, uppercase and shaded; even rows share the
//!   heading background; numbers use tabular figures.
//! - The index can be hidden.
//!
//! Output is deterministic: the table id is derived from a hash of the
//! table and the configuration.
//!
//! # Example
//!
//! ```
//! use ts_report::{style_table, StyleConfig};
//! use ts_table::{Column, Table};
//!
//! let table = Table::builder()
//!     .column(Column::text("Text column", ["This is long enough", "This is short"]))
//!     .column(Column::integer("Number column", [91, 1243]))
//!     .build()
//!     .unwrap();
//!
//! let config = StyleConfig::new().with_numerical_format("{:,}");
//! let styled = style_table(&table, &config).unwrap();
//!
//! assert!(styled.html().contains(">1,243</td>"));
//! let scrollable = styled.embed_in_scrollable_div();
//! assert!(scrollable.starts_with("<div"));
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod rules;
pub mod styler;
pub mod template;

pub use config::{HeaderStyle, Palette, StyleConfig};
pub use error::{Result, StyleError, TemplateError};
pub use render::{Renderer, StyledTable};
pub use rules::{Alignment, ColumnFormatter, ColumnRule, StyleRule, TemplateSlot};
pub use styler::{style_table, TableStyler};
pub use template::{DateTemplate, NumberTemplate};
