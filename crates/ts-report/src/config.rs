//! Styling configuration types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

/// Colours shared by the heading row and the shaded even rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Heading and even-row background.
    #[serde(default = "default_background")]
    pub background: String,
    /// Heading text colour.
    #[serde(default = "default_foreground")]
    pub foreground: String,
}

fn default_background() -> String {
    "#fff4f9".to_string()
}

fn default_foreground() -> String {
    "#b28d9f".to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
        }
    }
}

/// Header emphasis policy, applied to every heading regardless of column kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderStyle {
    /// Render headings in uppercase.
    #[serde(default = "default_true")]
    pub uppercase: bool,
    /// Render headings in bold.
    #[serde(default)]
    pub bold: bool,
    /// Shade headings with the palette background.
    #[serde(default = "default_true")]
    pub shaded: bool,
}

fn default_true() -> bool {
    true
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            uppercase: true,
            bold: false,
            shaded: true,
        }
    }
}

/// Complete styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Template applied to integer and float columns, e.g. `"{:,}"`.
    #[serde(default)]
    pub numerical_format: Option<String>,
    /// Template applied to date and datetime columns, e.g. `"{:%Y-%m-%d}"`.
    #[serde(default)]
    pub date_format: Option<String>,
    /// Omit the index column from the output.
    #[serde(default)]
    pub hide_index: bool,
    /// Decimal places for floats rendered without a template.
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Text shown for missing values.
    #[serde(default)]
    pub na_rep: String,
    /// Optional table caption.
    #[serde(default)]
    pub caption: Option<String>,
    /// Fixed HTML id; derived from the content when unset.
    #[serde(default)]
    pub table_id: Option<String>,
    /// Minify the generated markup.
    #[serde(default)]
    pub minify: bool,
    /// Colours.
    #[serde(default)]
    pub palette: Palette,
    /// Heading style.
    #[serde(default)]
    pub header: HeaderStyle,
}

fn default_precision() -> usize {
    6
}

/// Largest precision accepted for default float rendering.
pub const MAX_PRECISION: usize = 17;

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            numerical_format: None,
            date_format: None,
            hide_index: false,
            precision: default_precision(),
            na_rep: String::new(),
            caption: None,
            table_id: None,
            minify: false,
            palette: Palette::default(),
            header: HeaderStyle::default(),
        }
    }
}

impl StyleConfig {
    /// Create a new styling configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the numeric column template.
    pub fn with_numerical_format(mut self, template: impl Into<String>) -> Self {
        self.numerical_format = Some(template.into());
        self
    }

    /// Set the date column template.
    pub fn with_date_format(mut self, template: impl Into<String>) -> Self {
        self.date_format = Some(template.into());
        self
    }

    /// Hide or show the index.
    pub fn with_hide_index(mut self, hide: bool) -> Self {
        self.hide_index = hide;
        self
    }

    /// Set default float precision.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the missing-value text.
    pub fn with_na_rep(mut self, na_rep: impl Into<String>) -> Self {
        self.na_rep = na_rep.into();
        self
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Pin the HTML id of the table.
    pub fn with_table_id(mut self, id: impl Into<String>) -> Self {
        self.table_id = Some(id.into());
        self
    }

    /// Enable markup minification.
    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Set heading/even-row colours.
    pub fn with_palette(
        mut self,
        background: impl Into<String>,
        foreground: impl Into<String>,
    ) -> Self {
        self.palette = Palette {
            background: background.into(),
            foreground: foreground.into(),
        };
        self
    }

    /// Set the heading style.
    pub fn with_header(mut self, header: HeaderStyle) -> Self {
        self.header = header;
        self
    }

    /// Check values that would produce broken CSS or markup.
    ///
    /// Templates are not checked here; they fail when applied to a column.
    pub fn validate(&self) -> Result<()> {
        if self.precision > MAX_PRECISION {
            return Err(StyleError::InvalidConfig(format!(
                "precision {} exceeds {}",
                self.precision, MAX_PRECISION
            )));
        }
        if let Some(id) = &self.table_id {
            let valid = id
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(StyleError::InvalidConfig(format!(
                    "table id '{}' is not a valid HTML id",
                    id
                )));
            }
        }
        for (name, colour) in [
            ("background", &self.palette.background),
            ("foreground", &self.palette.foreground),
        ] {
            if colour.is_empty() || colour.contains([';', '{', '}', '<', '>']) {
                return Err(StyleError::InvalidConfig(format!(
                    "{} colour '{}' is not a CSS value",
                    name, colour
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StyleConfig::default();
        assert!(config.numerical_format.is_none());
        assert!(config.date_format.is_none());
        assert!(!config.hide_index);
        assert_eq!(config.precision, 6);
        assert_eq!(config.palette.background, "#fff4f9");
        assert_eq!(config.palette.foreground, "#b28d9f");
        assert!(config.header.uppercase);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StyleConfig::new()
            .with_numerical_format("{:,}")
            .with_date_format("{:%d/%m/%Y}")
            .with_hide_index(true)
            .with_caption("Sales");

        assert_eq!(config.numerical_format.as_deref(), Some("{:,}"));
        assert_eq!(config.date_format.as_deref(), Some("{:%d/%m/%Y}"));
        assert!(config.hide_index);
        assert_eq!(config.caption.as_deref(), Some("Sales"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = StyleConfig::from_json(r#"{"numerical_format": "{:.2f}"}"#).unwrap();
        assert_eq!(config.numerical_format.as_deref(), Some("{:.2f}"));
        assert_eq!(config.precision, 6);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = StyleConfig::default().with_table_id("T_fixed");
        let json = config.to_json().unwrap();
        let parsed = StyleConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(StyleConfig::new().with_precision(40).validate().is_err());
        assert!(StyleConfig::new().with_table_id("1abc").validate().is_err());
        assert!(StyleConfig::new().with_table_id("a b").validate().is_err());
        assert!(StyleConfig::new()
            .with_palette("red; x: y", "#000")
            .validate()
            .is_err());
        assert!(StyleConfig::new().with_table_id("T_ok-1").validate().is_ok());
    }
}
