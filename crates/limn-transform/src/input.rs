//! The input shapes accepted by [`normalize`](crate::normalize).

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use limn_model::{ModelError, Table, Value};

/// Tabular data in one of the supported layouts.
///
/// The layout is resolved once, when the input is flattened into named
/// columns; nothing downstream inspects which shape was given.
#[derive(Debug, Clone, PartialEq)]
pub enum TableInput {
    /// One mapping per row. The column set is the union of all keys in
    /// first-seen order and every row must define every column. An empty
    /// list therefore has no columns at all, not even the date column; use
    /// [`TableInput::RowsWithLabels`] or [`TableInput::ColumnMapping`] to
    /// describe an empty table.
    RowMappings(Vec<IndexMap<String, Value>>),
    /// Positional rows with one label per position.
    RowsWithLabels {
        rows: Vec<Vec<Value>>,
        labels: Vec<String>,
    },
    /// Column-major data. All columns must have the same length.
    ColumnMapping(IndexMap<String, Vec<Value>>),
    /// An existing table, re-validated against the new options.
    Canonical(Table),
}

impl TableInput {
    pub fn rows_with_labels<I, S>(rows: Vec<Vec<Value>>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableInput::RowsWithLabels {
            rows,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Flattens the input into named columns, checking its shape.
    pub(crate) fn into_columns(self) -> Result<Vec<(String, Vec<Value>)>, ModelError> {
        match self {
            TableInput::RowMappings(rows) => row_mappings_to_columns(rows),
            TableInput::RowsWithLabels { rows, labels } => labelled_rows_to_columns(rows, labels),
            TableInput::ColumnMapping(columns) => {
                let expected = columns.values().next().map_or(0, Vec::len);
                if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != expected) {
                    return Err(ModelError::ColumnLengthMismatch {
                        column: name.clone(),
                        expected,
                        found: values.len(),
                    });
                }
                Ok(columns.into_iter().collect())
            }
            TableInput::Canonical(table) => Ok(table
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.data().values()))
                .collect()),
        }
    }
}

fn row_mappings_to_columns(
    rows: Vec<IndexMap<String, Value>>,
) -> Result<Vec<(String, Vec<Value>)>, ModelError> {
    let keys: IndexSet<String> = rows.iter().flat_map(|row| row.keys().cloned()).collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); keys.len()];

    for (idx, mut row) in rows.into_iter().enumerate() {
        for (key, column) in keys.iter().zip(columns.iter_mut()) {
            let value = row
                .swap_remove(key.as_str())
                .ok_or_else(|| ModelError::MalformedRow {
                    row: idx,
                    column: key.clone(),
                })?;
            column.push(value);
        }
    }

    Ok(keys.into_iter().zip(columns).collect())
}

fn labelled_rows_to_columns(
    rows: Vec<Vec<Value>>,
    labels: Vec<String>,
) -> Result<Vec<(String, Vec<Value>)>, ModelError> {
    let mut seen = HashSet::with_capacity(labels.len());
    if let Some(dup) = labels.iter().find(|label| !seen.insert(label.as_str())) {
        return Err(ModelError::DuplicateColumn {
            column: dup.clone(),
        });
    }

    let mut columns: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); labels.len()];
    for (idx, row) in rows.into_iter().enumerate() {
        if row.len() != labels.len() {
            return Err(ModelError::LabelMismatch {
                row: idx,
                expected: labels.len(),
                found: row.len(),
            });
        }
        for (value, column) in row.into_iter().zip(columns.iter_mut()) {
            column.push(value);
        }
    }

    Ok(labels.into_iter().zip(columns).collect())
}

impl From<Vec<IndexMap<String, Value>>> for TableInput {
    fn from(rows: Vec<IndexMap<String, Value>>) -> Self {
        TableInput::RowMappings(rows)
    }
}

impl From<IndexMap<String, Vec<Value>>> for TableInput {
    fn from(columns: IndexMap<String, Vec<Value>>) -> Self {
        TableInput::ColumnMapping(columns)
    }
}

impl From<Table> for TableInput {
    fn from(table: Table) -> Self {
        TableInput::Canonical(table)
    }
}
