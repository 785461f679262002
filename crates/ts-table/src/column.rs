//! Named, typed columns and the row index.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::value::{CellValue, ColumnKind};

/// A named column whose cells all share one [`ColumnKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<CellValue>,
}

impl Column {
    /// Create a column from raw values, checking every cell against `kind`.
    pub fn new(
        name: impl Into<String>,
        kind: ColumnKind,
        values: impl IntoIterator<Item = CellValue>,
    ) -> Result<Self> {
        let column = Self {
            name: name.into(),
            kind,
            values: values.into_iter().collect(),
        };
        column.validate()?;
        Ok(column)
    }

    /// Text column.
    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::typed(name, ColumnKind::Text, values, |s| CellValue::Text(s.into()))
    }

    /// Integer column.
    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::typed(name, ColumnKind::Integer, values, CellValue::Integer)
    }

    /// Float column. NaN values display as missing.
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::typed(name, ColumnKind::Float, values, CellValue::Float)
    }

    /// Boolean column.
    pub fn boolean(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self::typed(name, ColumnKind::Boolean, values, CellValue::Boolean)
    }

    /// Date column.
    pub fn date(name: impl Into<String>, values: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::typed(name, ColumnKind::Date, values, CellValue::Date)
    }

    /// Datetime column.
    pub fn datetime(
        name: impl Into<String>,
        values: impl IntoIterator<Item = NaiveDateTime>,
    ) -> Self {
        Self::typed(name, ColumnKind::DateTime, values, CellValue::DateTime)
    }

    fn typed<T>(
        name: impl Into<String>,
        kind: ColumnKind,
        values: impl IntoIterator<Item = T>,
        wrap: impl Fn(T) -> CellValue,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            values: values.into_iter().map(wrap).collect(),
        }
    }

    /// Check that every cell fits the declared kind.
    pub fn validate(&self) -> Result<()> {
        match self.values.iter().position(|v| !v.fits(self.kind)) {
            Some(row) => Err(TableError::KindMismatch {
                column: self.name.clone(),
                row,
                expected: self.kind,
                found: self.values[row].type_name(),
            }),
            None => Ok(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    pub fn get(&self, row: usize) -> Option<&CellValue> {
        self.values.get(row)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Row labels, optionally named.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Index {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    labels: Vec<CellValue>,
}

impl Index {
    /// Index with explicit labels.
    pub fn new<T: Into<CellValue>>(labels: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: None,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Positional labels `0..len`.
    pub fn range(len: usize) -> Self {
        Self::new((0..len).map(|i| CellValue::Integer(i as i64)))
    }

    /// Set the index name, shown in the header corner.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn labels(&self) -> &[CellValue] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
