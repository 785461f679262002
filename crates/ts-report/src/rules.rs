//! Column classification and styling directives.
//!
//! [`ColumnFormatter`] turns a table's declared column kinds into one
//! [`ColumnRule`] per column and into the CSS [`StyleRule`]s the renderer
//! consumes. It never looks at cell values and never emits markup.
//!
//! Text and temporal columns align left; every other kind aligns right.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_table::{ColumnKind, Table};

use crate::config::{HeaderStyle, Palette, StyleConfig};

/// Horizontal alignment of a column's data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn css_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
        }
    }

    fn prop(&self) -> (String, String) {
        ("text-align".to_string(), self.css_value().to_string())
    }
}

/// Which configured template a column uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSlot {
    /// `numerical_format`.
    Numeric,
    /// `date_format`.
    Date,
}

/// Display rule for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRule {
    /// Column name.
    pub column: String,
    /// Zero-based position, used for the `col{n}` CSS class.
    pub position: usize,
    /// Declared kind.
    pub kind: ColumnKind,
    /// Data cell alignment.
    pub alignment: Alignment,
    /// Template slot the column draws from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<TemplateSlot>,
    /// The template text, when the slot is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// A CSS rule scoped to one rendered table.
///
/// An empty selector targets the table element itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    pub props: Vec<(String, String)>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            props: Vec::new(),
        }
    }

    /// Append a property.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.push((name.into(), value.into()));
        self
    }

    /// Append several properties.
    pub fn extend(mut self, props: impl IntoIterator<Item = (String, String)>) -> Self {
        self.props.extend(props);
        self
    }
}

/// Derives per-column display rules from column kinds.
pub struct ColumnFormatter;

impl ColumnFormatter {
    /// Alignment for a column kind.
    pub fn classify(kind: ColumnKind) -> Alignment {
        match kind {
            ColumnKind::Text | ColumnKind::Date | ColumnKind::DateTime => Alignment::Left,
            ColumnKind::Integer | ColumnKind::Float | ColumnKind::Boolean => Alignment::Right,
        }
    }

    /// Template slot for a column kind.
    pub fn slot(kind: ColumnKind) -> Option<TemplateSlot> {
        if kind.is_numeric() {
            Some(TemplateSlot::Numeric)
        } else if kind.is_temporal() {
            Some(TemplateSlot::Date)
        } else {
            None
        }
    }

    /// One rule per column, in column order.
    pub fn rules(table: &Table, config: &StyleConfig) -> Vec<ColumnRule> {
        let rules: Vec<ColumnRule> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(position, column)| {
                let slot = Self::slot(column.kind());
                let template = match slot {
                    Some(TemplateSlot::Numeric) => config.numerical_format.clone(),
                    Some(TemplateSlot::Date) => config.date_format.clone(),
                    None => None,
                };
                ColumnRule {
                    column: column.name().to_string(),
                    position,
                    kind: column.kind(),
                    alignment: Self::classify(column.kind()),
                    slot,
                    template,
                }
            })
            .collect();

        debug!(
            columns = rules.len(),
            left = rules
                .iter()
                .filter(|r| r.alignment == Alignment::Left)
                .count(),
            templated = rules.iter().filter(|r| r.template.is_some()).count(),
            "Column rules derived"
        );

        rules
    }

    /// `td.col{n}` alignment rules.
    pub fn column_styles(rules: &[ColumnRule]) -> Vec<StyleRule> {
        rules
            .iter()
            .map(|rule| {
                StyleRule::new(format!("td.col{}", rule.position))
                    .extend([rule.alignment.prop()])
            })
            .collect()
    }
}

/// Table-wide styles: tabular numbers, heading emphasis, shaded even rows
/// and cell padding.
pub fn default_styles(palette: &Palette, header: &HeaderStyle) -> Vec<StyleRule> {
    let table = StyleRule::new("")
        .prop("font-variant-numeric", "tabular-nums")
        .prop("border-spacing", "0")
        .prop("line-height", "2");

    let mut headings = StyleRule::new("th.col_heading")
        .extend([Alignment::Left.prop()])
        .prop("color", palette.foreground.as_str());
    if header.uppercase {
        headings = headings.prop("text-transform", "uppercase");
    }
    if header.bold {
        headings = headings.prop("font-weight", "bold");
    }
    if header.shaded {
        headings = headings.prop("background", palette.background.as_str());
    }

    vec![
        table,
        headings,
        StyleRule::new("tr:nth-child(even)").prop("background", palette.background.as_str()),
        StyleRule::new("th, tr, td").prop("padding", "0 1ch"),
    ]
}
