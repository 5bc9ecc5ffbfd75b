//! Canonical column-labelled table.
//!
//! A [`Table`] is immutable once built: every edit goes through a consuming
//! method (`with_column`, `map_column`, ...) that re-validates the invariants
//! and returns a new table.
//!
//! Invariants:
//! - column names are unique
//! - all columns have the same length
//! - the date column, when designated, sits at position 0, holds dates only
//!   and has no missing cells

use std::collections::HashSet;

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::{ModelError, Result};
use crate::value::{ColumnData, ColumnType, Value};

/// A named column of homogeneous values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Builds a column from loose values, inferring its type.
    pub fn from_values(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::new(name, ColumnData::from_values(values))
    }

    /// Builds a date column with no missing cells.
    pub fn dates(name: impl Into<String>, values: Vec<NaiveDate>) -> Self {
        Self::new(name, ColumnData::Date(values.into_iter().map(Some).collect()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn column_type(&self) -> ColumnType {
        self.data.column_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    date_column: Option<String>,
    row_count: usize,
}

impl Table {
    /// Validates `columns` and promotes `date_column` to the first position.
    pub fn new(mut columns: Vec<Column>, date_column: Option<&str>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }

        let row_count = columns.first().map_or(0, Column::len);
        for column in &columns {
            if column.len() != row_count {
                return Err(ModelError::ColumnLengthMismatch {
                    column: column.name.clone(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        if let Some(date_key) = date_column {
            let Some(idx) = columns.iter().position(|c| c.name == date_key) else {
                return Err(ModelError::MissingDateColumn {
                    column: date_key.to_string(),
                    available: columns.iter().map(|c| c.name.clone()).collect(),
                });
            };
            let ColumnData::Date(dates) = &columns[idx].data else {
                return Err(ModelError::DateColumnType {
                    column: date_key.to_string(),
                    found: columns[idx].column_type(),
                });
            };
            if let Some(row) = dates.iter().position(Option::is_none) {
                return Err(ModelError::DateParse {
                    row,
                    value: String::new(),
                });
            }
            let date = columns.remove(idx);
            columns.insert(0, date);
        }

        Ok(Self {
            columns,
            date_column: date_column.map(str::to_string),
            row_count,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Zero-based position of `name` in output order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn date_column_name(&self) -> Option<&str> {
        self.date_column.as_deref()
    }

    pub fn date_column(&self) -> Option<&Column> {
        self.date_column.as_ref().and(self.columns.first())
    }

    /// Columns other than the date column, in output order.
    pub fn value_columns(&self) -> impl Iterator<Item = &Column> {
        let skip = usize::from(self.date_column.is_some());
        self.columns.iter().skip(skip)
    }

    pub fn is_date_column(&self, name: &str) -> bool {
        self.date_column.as_deref() == Some(name)
    }

    /// Earliest and latest dates, or `None` without a date column or rows.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let ColumnData::Date(dates) = self.date_column()?.data() else {
            return None;
        };
        let mut iter = dates.iter().flatten().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// Values per row, in column order.
    pub fn rows(&self) -> Vec<Vec<Value>> {
        (0..self.row_count)
            .map(|idx| {
                self.columns
                    .iter()
                    .map(|c| c.data.get(idx).unwrap_or(Value::Missing))
                    .collect()
            })
            .collect()
    }

    /// Rows as name-to-value mappings, in column order.
    pub fn row_mappings(&self) -> Vec<IndexMap<String, Value>> {
        self.rows()
            .into_iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| c.name.clone())
                    .zip(row)
                    .collect()
            })
            .collect()
    }

    /// Appends `name`, or replaces it in place when it already exists.
    ///
    /// Values for the date column keep the date type as long as every cell
    /// holds a date, including when there are no cells.
    pub fn with_column(self, name: impl Into<String>, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        let column = if self.is_date_column(&name) {
            match values.iter().map(Value::as_date).collect::<Option<Vec<_>>>() {
                Some(dates) => Column::dates(name.clone(), dates),
                None => Column::from_values(name.clone(), values),
            }
        } else {
            Column::from_values(name.clone(), values)
        };
        let mut columns = self.columns;
        match columns.iter().position(|c| c.name == name) {
            Some(idx) => columns[idx] = column,
            None => columns.push(column),
        }
        Self::new(columns, self.date_column.as_deref())
    }

    /// Rebuilds `name` from `f` applied to each cell; the type is re-inferred.
    pub fn map_column<F>(self, name: &str, f: F) -> Result<Self>
    where
        F: FnMut(&Value) -> Value,
    {
        let column = self.column(name).ok_or_else(|| ModelError::UnknownColumn {
            column: name.to_string(),
        })?;
        let values = column.data.values().iter().map(f).collect();
        self.with_column(name, values)
    }

    pub fn rename_column(self, from: &str, to: impl Into<String>) -> Result<Self> {
        let to = to.into();
        let Some(idx) = self.position(from) else {
            return Err(ModelError::UnknownColumn {
                column: from.to_string(),
            });
        };
        let date_column = if self.is_date_column(from) {
            Some(to.clone())
        } else {
            self.date_column
        };
        let mut columns = self.columns;
        columns[idx].name = to;
        Self::new(columns, date_column.as_deref())
    }

    pub fn drop_column(self, name: &str) -> Result<Self> {
        if self.is_date_column(name) {
            return Err(ModelError::DateColumnRequired {
                column: name.to_string(),
            });
        }
        let Some(idx) = self.position(name) else {
            return Err(ModelError::UnknownColumn {
                column: name.to_string(),
            });
        };
        let mut columns = self.columns;
        columns.remove(idx);
        Self::new(columns, self.date_column.as_deref())
    }

    /// Stable sort of every row by the date column. No-op without one.
    #[must_use]
    pub fn sort_by_date(self) -> Self {
        let Some(ColumnData::Date(dates)) = self.date_column().map(Column::data) else {
            return self;
        };
        let mut order: Vec<usize> = (0..self.row_count).collect();
        order.sort_by_key(|&idx| dates[idx]);
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.take(&order)))
            .collect();
        Self { columns, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Table {
        Table::new(
            vec![
                Column::from_values("x", vec![Value::Int(7), Value::Int(1)]),
                Column::dates("date", vec![date(2012, 10, 1), date(2012, 9, 1)]),
                Column::from_values("y", vec![Value::Int(9), Value::Int(2)]),
            ],
            Some("date"),
        )
        .unwrap()
    }

    #[test]
    fn test_date_column_is_promoted() {
        let table = sample();
        assert_eq!(table.column_names(), vec!["date", "x", "y"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.date_column().map(Column::name), Some("date"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Table::new(
            vec![
                Column::from_values("x", vec![Value::Int(1)]),
                Column::from_values("x", vec![Value::Int(2)]),
            ],
            None,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateColumn {
                column: "x".to_string()
            }
        );
    }

    #[test]
    fn test_date_column_must_hold_dates() {
        let err = Table::new(
            vec![Column::from_values("date", vec![Value::Int(1)])],
            Some("date"),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DateColumnType { .. }));
    }

    #[test]
    fn test_sort_by_date_moves_whole_rows() {
        let table = sample().sort_by_date();
        assert_eq!(
            table.rows(),
            vec![
                vec![Value::Date(date(2012, 9, 1)), Value::Int(1), Value::Int(2)],
                vec![Value::Date(date(2012, 10, 1)), Value::Int(7), Value::Int(9)],
            ]
        );
    }

    #[test]
    fn test_date_range() {
        assert_eq!(
            sample().date_range(),
            Some((date(2012, 9, 1), date(2012, 10, 1)))
        );
    }

    #[test]
    fn test_date_column_edits_on_empty_table() {
        let empty = Table::new(
            vec![
                Column::dates("date", vec![]),
                Column::from_values("x", vec![]),
            ],
            Some("date"),
        )
        .unwrap();

        let mapped = empty.clone().map_column("date", Value::clone).unwrap();
        assert_eq!(mapped.date_column().map(Column::column_type), Some(ColumnType::Date));
        let replaced = empty.with_column("date", vec![]).unwrap();
        assert_eq!(replaced.row_count(), 0);
        assert_eq!(replaced.column_names(), vec!["date", "x"]);
    }

    #[test]
    fn test_map_column_reinfers_type() {
        let table = sample()
            .map_column("x", |v| Value::from(v.as_f64().map(|x| x / 2.0)))
            .unwrap();
        assert_eq!(
            table.column("x").map(Column::column_type),
            Some(ColumnType::Float)
        );
    }

    #[test]
    fn test_date_column_cannot_be_dropped() {
        let err = sample().drop_column("date").unwrap_err();
        assert!(matches!(err, ModelError::DateColumnRequired { .. }));
    }

    #[test]
    fn test_rename_date_column_follows() {
        let table = sample().rename_column("date", "day").unwrap();
        assert_eq!(table.date_column_name(), Some("day"));
        assert_eq!(table.column_names(), vec!["day", "x", "y"]);
    }

    #[test]
    fn test_rename_onto_existing_name_rejected() {
        let err = sample().rename_column("x", "y").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateColumn { .. }));
    }
}
