//! HTML rendering facility.
//!
//! Consumes the directives produced by [`ColumnFormatter`](crate::rules::ColumnFormatter)
//! (column rules plus CSS style rules) and emits a `<style>` block followed by
//! a `<table>`. Templates are compiled here, per column, so a malformed
//! template surfaces as a [`StyleError::TemplateError`] naming the column.
//!
//! Markup classes follow the common dataframe-styler layout:
//! `col_heading level0 col{n}` for headings, `row_heading level0 row{r}` for
//! index cells and `data row{r} col{n}` for values.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::{debug, info};
use ts_table::{CellValue, Table};

use crate::config::StyleConfig;
use crate::error::{Result, StyleError, TemplateError};
use crate::rules::{ColumnRule, StyleRule, TemplateSlot};
use crate::template::{format_default, DateTemplate, NumberTemplate};

/// Wrapper markup for [`StyledTable::embed_in_scrollable_div`].
const SCROLLABLE_DIV_OPEN: &str = "<div style='width: 100%; height: 100%; overflow: auto;'>";

/// The renderable: final HTML plus the directives that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledTable {
    table_id: String,
    html: String,
    rules: Vec<ColumnRule>,
    styles: Vec<StyleRule>,
}

impl StyledTable {
    /// HTML id of the `<table>` element; CSS rules are scoped under it.
    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Per-column rules, in column order.
    pub fn rules(&self) -> &[ColumnRule] {
        &self.rules
    }

    /// All CSS rules, table-wide first, then per column.
    pub fn styles(&self) -> &[StyleRule] {
        &self.styles
    }

    /// The HTML wrapped in a full-size `overflow: auto` div, making wide or
    /// long tables scrollable.
    pub fn embed_in_scrollable_div(&self) -> String {
        format!("{}{}</div>", SCROLLABLE_DIV_OPEN, self.html)
    }
}

impl fmt::Display for StyledTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// How one column's cells are turned into text.
enum CellFormat {
    Default,
    Number(NumberTemplate),
    Date(DateTemplate),
}

impl CellFormat {
    fn compile(rule: &ColumnRule) -> Result<Self> {
        let wrap = |source: TemplateError| StyleError::TemplateError {
            column: rule.column.clone(),
            source,
        };
        Ok(match (rule.slot, rule.template.as_deref()) {
            (Some(TemplateSlot::Numeric), Some(t)) => {
                CellFormat::Number(NumberTemplate::parse(t).map_err(wrap)?)
            }
            (Some(TemplateSlot::Date), Some(t)) => {
                CellFormat::Date(DateTemplate::parse(t).map_err(wrap)?)
            }
            _ => CellFormat::Default,
        })
    }
}

/// Renders tables according to a [`StyleConfig`].
pub struct Renderer<'a> {
    config: &'a StyleConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a StyleConfig) -> Self {
        Self { config }
    }

    /// Render `table` with the given directives.
    pub fn render(
        &self,
        table: &Table,
        rules: Vec<ColumnRule>,
        styles: Vec<StyleRule>,
    ) -> Result<StyledTable> {
        self.config.validate()?;

        let formats = rules
            .iter()
            .map(CellFormat::compile)
            .collect::<Result<Vec<_>>>()?;

        let table_id = match &self.config.table_id {
            Some(id) => id.clone(),
            None => derive_table_id(table, self.config)?,
        };
        debug!(table_id = %table_id, rows = table.row_count(), "Rendering table");

        let mut html = render_css(&table_id, &styles);
        html.push_str(&self.render_table(&table_id, table, &rules, &formats)?);

        let html = if self.config.minify {
            minify(html)
        } else {
            html
        };

        info!(
            bytes = html.len(),
            table_id = %table_id,
            columns = rules.len(),
            rows = table.row_count(),
            "Table rendered"
        );

        Ok(StyledTable {
            table_id,
            html,
            rules,
            styles,
        })
    }

    fn render_table(
        &self,
        table_id: &str,
        table: &Table,
        rules: &[ColumnRule],
        formats: &[CellFormat],
    ) -> Result<String> {
        let show_index = !self.config.hide_index;
        let mut out = format!("<table id=\"{}\">\n", table_id);

        if let Some(caption) = &self.config.caption {
            out.push_str(&format!("  <caption>{}</caption>\n", html_escape(caption)));
        }

        out.push_str("  <thead>\n    <tr>\n");
        if show_index {
            match table.index().name() {
                Some(name) => out.push_str(&format!(
                    "      <th class=\"index_name level0\">{}</th>\n",
                    html_escape(name)
                )),
                None => out.push_str("      <th class=\"blank level0\">&nbsp;</th>\n"),
            }
        }
        for rule in rules {
            out.push_str(&format!(
                "      <th id=\"{id}_level0_col{n}\" class=\"col_heading level0 col{n}\">{name}</th>\n",
                id = table_id,
                n = rule.position,
                name = html_escape(&rule.column),
            ));
        }
        out.push_str("    </tr>\n  </thead>\n  <tbody>\n");

        let columns = table.columns();
        for (row, label) in table.index().labels().iter().enumerate() {
            out.push_str("    <tr>\n");
            if show_index {
                out.push_str(&format!(
                    "      <th id=\"{id}_level0_row{row}\" class=\"row_heading level0 row{row}\">{label}</th>\n",
                    id = table_id,
                    row = row,
                    label = html_escape(&self.plain_text(label)),
                ));
            }
            for ((rule, format), column) in rules.iter().zip(formats).zip(columns) {
                let value = column.get(row).unwrap_or(&CellValue::Null);
                let text = self.cell_text(rule, format, value)?;
                out.push_str(&format!(
                    "      <td id=\"{id}_row{row}_col{n}\" class=\"data row{row} col{n}\">{text}</td>\n",
                    id = table_id,
                    row = row,
                    n = rule.position,
                    text = html_escape(&text),
                ));
            }
            out.push_str("    </tr>\n");
        }

        out.push_str("  </tbody>\n</table>\n");
        Ok(out)
    }

    fn cell_text(
        &self,
        rule: &ColumnRule,
        format: &CellFormat,
        value: &CellValue,
    ) -> Result<String> {
        if value.is_missing() {
            return Ok(self.config.na_rep.clone());
        }
        let formatted = match format {
            CellFormat::Default => Ok(format_default(value, self.config.precision)),
            CellFormat::Number(t) => t.apply(value),
            CellFormat::Date(t) => t.apply(value),
        };
        formatted.map_err(|source| StyleError::TemplateError {
            column: rule.column.clone(),
            source,
        })
    }

    fn plain_text(&self, value: &CellValue) -> String {
        if value.is_missing() {
            self.config.na_rep.clone()
        } else {
            format_default(value, self.config.precision)
        }
    }
}

/// `T_` plus the first ten hex digits of a SHA-256 over table and config.
fn derive_table_id(table: &Table, config: &StyleConfig) -> Result<String> {
    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_vec(table)?);
    hasher.update(serde_json::to_vec(config)?);
    let digest = hex::encode(hasher.finalize());
    Ok(format!("T_{}", &digest[..10]))
}

/// Scope every comma-separated part of `selector` under the table id.
fn scoped_selector(table_id: &str, selector: &str) -> String {
    if selector.trim().is_empty() {
        return format!("#{}", table_id);
    }
    selector
        .split(',')
        .map(|part| format!("#{} {}", table_id, part.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_css(table_id: &str, styles: &[StyleRule]) -> String {
    let mut css = String::from("<style type=\"text/css\">\n");
    for rule in styles.iter().filter(|r| !r.props.is_empty()) {
        css.push_str(&format!("{} {{\n", scoped_selector(table_id, &rule.selector)));
        for (name, value) in &rule.props {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");
    }
    css.push_str("</style>\n");
    css
}

fn minify(html: String) -> String {
    let cfg = minify_html::Cfg {
        minify_css: true,
        ..Default::default()
    };
    String::from_utf8(minify_html::minify(html.as_bytes(), &cfg)).unwrap_or(html)
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{default_styles, ColumnFormatter};
    use ts_table::Column;

    fn render(table: &Table, config: &StyleConfig) -> Result<StyledTable> {
        let rules = ColumnFormatter::rules(table, config);
        let mut styles = default_styles(&config.palette, &config.header);
        styles.extend(ColumnFormatter::column_styles(&rules));
        Renderer::new(config).render(table, rules, styles)
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape(r#""quoted""#), "&quot;quoted&quot;");
    }

    #[test]
    fn test_scoped_selector() {
        assert_eq!(scoped_selector("T_x", ""), "#T_x");
        assert_eq!(scoped_selector("T_x", "td.col0"), "#T_x td.col0");
        assert_eq!(
            scoped_selector("T_x", "th, tr, td"),
            "#T_x th, #T_x tr, #T_x td"
        );
    }

    #[test]
    fn test_render_css_skips_empty_rules() {
        let css = render_css(
            "T_x",
            &[
                StyleRule::new("td.col0").prop("text-align", "left"),
                StyleRule::new("td.col1"),
            ],
        );
        assert!(css.contains("#T_x td.col0 {\n  text-align: left;\n}"));
        assert!(!css.contains("td.col1"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let table = Table::builder()
            .column(Column::text("<b>", ["<i>x</i>"]))
            .build()
            .unwrap();
        let styled = render(&table, &StyleConfig::default()).unwrap();
        assert!(styled.html().contains("&lt;i&gt;x&lt;/i&gt;"));
        assert!(styled.html().contains("&lt;b&gt;"));
        assert!(!styled.html().contains("<i>"));
    }

    #[test]
    fn test_na_rep() {
        let table = Table::builder()
            .column(Column::float("f", [f64::NAN, 1.0]))
            .build()
            .unwrap();
        let config = StyleConfig::new().with_na_rep("-").with_table_id("T_na");
        let styled = render(&table, &config).unwrap();
        assert!(styled.html().contains(r#"class="data row0 col0">-</td>"#));
        assert!(styled.html().contains(r#"class="data row1 col0">1.000000</td>"#));
    }

    #[test]
    fn test_template_error_names_column() {
        let table = Table::builder()
            .column(Column::integer("count", [1]))
            .build()
            .unwrap();
        let config = StyleConfig::new().with_numerical_format("{:z}");
        match render(&table, &config) {
            Err(StyleError::TemplateError { column, .. }) => assert_eq!(column, "count"),
            other => panic!("expected template error, got {:?}", other),
        }
    }

    #[test]
    fn test_unused_template_is_not_checked() {
        let table = Table::builder()
            .column(Column::text("t", ["a"]))
            .build()
            .unwrap();
        let config = StyleConfig::new().with_numerical_format("{:z}");
        assert!(render(&table, &config).is_ok());
    }

    #[test]
    fn test_derived_id_is_stable() {
        let table = Table::builder()
            .column(Column::integer("n", [1, 2]))
            .build()
            .unwrap();
        let a = derive_table_id(&table, &StyleConfig::default()).unwrap();
        let b = derive_table_id(&table, &StyleConfig::default()).unwrap();
        let c = derive_table_id(&table, &StyleConfig::new().with_hide_index(true)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("T_"));
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn test_scrollable_div() {
        let table = Table::builder()
            .column(Column::integer("n", [1]))
            .build()
            .unwrap();
        let styled = render(&table, &StyleConfig::default()).unwrap();
        let wrapped = styled.embed_in_scrollable_div();
        assert!(wrapped.starts_with(SCROLLABLE_DIV_OPEN));
        assert!(wrapped.ends_with("</table>\n</div>"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let table = Table::builder().build().unwrap();
        let config = StyleConfig::new().with_table_id("bad id");
        assert!(matches!(
            render(&table, &config),
            Err(StyleError::InvalidConfig(_))
        ));
    }
}
