//! Entry points: the stateless [`style_table`] function and the fluent
//! [`TableStyler`] builder.

use tracing::debug;
use ts_table::Table;

use crate::config::StyleConfig;
use crate::error::Result;
use crate::render::{Renderer, StyledTable};
use crate::rules::{default_styles, ColumnFormatter};

/// Style and render `table` in one pass.
///
/// Derives one rule per column, appends the per-column alignment styles to
/// the table-wide defaults and hands everything to the [`Renderer`].
/// Identical inputs always produce identical output.
pub fn style_table(table: &Table, config: &StyleConfig) -> Result<StyledTable> {
    let rules = ColumnFormatter::rules(table, config);

    let mut styles = default_styles(&config.palette, &config.header);
    styles.extend(ColumnFormatter::column_styles(&rules));
    debug!(
        styles = styles.len(),
        hide_index = config.hide_index,
        "Styling directives assembled"
    );

    Renderer::new(config).render(table, rules, styles)
}

/// Fluent front-end over [`style_table`].
///
/// ```
/// use ts_report::TableStyler;
/// use ts_table::{Column, Table};
///
/// let table = Table::builder()
///     .column(Column::text("Text column", ["This is long enough", "This is short"]))
///     .column(Column::integer("Number column", [91, 1243]))
///     .build()
///     .unwrap();
///
/// let html = TableStyler::new(&table)
///     .numerical_format("{:,}")
///     .hide_index()
///     .to_html()
///     .unwrap();
/// assert!(html.contains(">1,243</td>"));
/// ```
pub struct TableStyler<'a> {
    table: &'a Table,
    config: StyleConfig,
}

impl<'a> TableStyler<'a> {
    /// Styler with the default configuration.
    pub fn new(table: &'a Table) -> Self {
        Self::with_config(table, StyleConfig::default())
    }

    pub fn with_config(table: &'a Table, config: StyleConfig) -> Self {
        Self { table, config }
    }

    /// Template for integer and float columns.
    pub fn numerical_format(mut self, template: impl Into<String>) -> Self {
        self.config.numerical_format = Some(template.into());
        self
    }

    /// Template for date and datetime columns.
    pub fn date_format(mut self, template: impl Into<String>) -> Self {
        self.config.date_format = Some(template.into());
        self
    }

    /// Omit the index from the output.
    pub fn hide_index(mut self) -> Self {
        self.config.hide_index = true;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.config.caption = Some(caption.into());
        self
    }

    /// Heading and even-row colours.
    pub fn palette(
        mut self,
        background: impl Into<String>,
        foreground: impl Into<String>,
    ) -> Self {
        self.config = self.config.with_palette(background, foreground);
        self
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn render(&self) -> Result<StyledTable> {
        style_table(self.table, &self.config)
    }

    pub fn to_html(&self) -> Result<String> {
        self.render().map(StyledTable::into_html)
    }
}
