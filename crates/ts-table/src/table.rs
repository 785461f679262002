//! The table itself and its validating builder.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::column::{Column, Index};
use crate::error::{Result, TableError};

/// Ordered, named, typed columns sharing one row count.
///
/// Built through [`Table::builder`], which guarantees that every column has
/// the same length, column names are unique, each cell fits its column kind,
/// and the index labels every row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    index: Index,
}

/// Serialized shape accepted by [`Table::from_json`].
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<Column>,
    #[serde(default)]
    index: Option<Index>,
}

impl Table {
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Load a table from JSON, applying the builder's validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json)?;
        let mut builder = Table::builder();
        for column in raw.columns {
            builder = builder.column(column);
        }
        if let Some(index) = raw.index {
            builder = builder.index(index);
        }
        builder.build()
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for [`Table`].
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<Column>,
    index: Option<Index>,
}

impl TableBuilder {
    /// Append a column.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Use explicit row labels instead of positional ones.
    pub fn index(mut self, index: Index) -> Self {
        self.index = Some(index);
        self
    }

    /// Validate and assemble the table.
    pub fn build(self) -> Result<Table> {
        let expected = self
            .columns
            .first()
            .map(Column::len)
            .or_else(|| self.index.as_ref().map(Index::len))
            .unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name()) {
                return Err(TableError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: column.name().to_string(),
                    expected,
                    actual: column.len(),
                });
            }
            column.validate()?;
        }

        let index = match self.index {
            Some(index) if index.len() != expected => {
                return Err(TableError::IndexLength {
                    expected,
                    actual: index.len(),
                });
            }
            Some(index) => index,
            None => Index::range(expected),
        };

        Ok(Table {
            columns: self.columns,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{CellValue, ColumnKind};

    fn sample() -> Table {
        Table::builder()
            .column(Column::text("name", ["alpha", "beta"]))
            .column(Column::integer("count", [91, 1243]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_assigns_range_index() {
        let table = sample();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.index().labels()[1], CellValue::Integer(1));
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec!["name", "count"]
        );
        assert_eq!(table.column("count").unwrap().kind(), ColumnKind::Integer);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_length_mismatch() {
        let err = Table::builder()
            .column(Column::text("a", ["x", "y"]))
            .column(Column::integer("b", [1]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "b".to_string(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_column() {
        let err = Table::builder()
            .column(Column::integer("a", [1]))
            .column(Column::integer("a", [2]))
            .build()
            .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn test_index_length() {
        let err = Table::builder()
            .column(Column::integer("a", [1, 2]))
            .index(Index::new(["only"]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TableError::IndexLength {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_index_only_table() {
        let table = Table::builder()
            .index(Index::new(["r1", "r2", "r3"]))
            .build()
            .unwrap();
        assert_eq!(table.row_count(), 3);
        assert!(table.columns().is_empty());
    }

    #[test]
    fn test_empty_table() {
        let table = Table::builder().build().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let table = sample();
        let json = table.to_json().unwrap();
        let parsed = Table::from_json(&json).unwrap();
        assert_eq!(parsed, table);

        let bad = r#"{"columns":[{"name":"n","kind":"integer","values":[{"type":"text","value":"x"}]}]}"#;
        assert!(matches!(
            Table::from_json(bad),
            Err(TableError::KindMismatch { .. })
        ));
    }
}
