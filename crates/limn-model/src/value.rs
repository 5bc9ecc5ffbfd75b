//! Cell values and typed column storage.
//!
//! Input data arrives as loosely typed [`Value`]s. Each column is stored as a
//! single [`ColumnData`] variant whose type is inferred from the non-missing
//! values:
//!
//! - only integers → `int`
//! - integers mixed with floats → `float`
//! - only dates or date-times → `date` (time of day discarded)
//! - anything else → `string`, each value rendered as text
//! - no values at all → `string`

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date layout used for every rendered date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single input cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns the calendar date for date and date-time values.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(date) => Some(*date),
            Value::DateTime(datetime) => Some(datetime.date()),
            _ => None,
        }
    }

    /// Returns the numeric value for integer and float cells.
    ///
    /// Integers beyond ±2^53 are rounded to the nearest `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Value::Missing => Ok(()),
        }
    }
}

/// Formats a float in its shortest round-trip form; NaN renders empty.
///
/// ```
/// use limn_model::format_float;
///
/// assert_eq!(format_float(1.5), "1.5");
/// assert_eq!(format_float(100.0), "100");
/// assert_eq!(format_float(f64::NAN), "");
/// ```
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v}")
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

/// Column types understood by Limn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Int,
    Float,
    Date,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Date => "date",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Homogeneous storage for one column. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDate>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inferred {
    Empty,
    Int,
    Float,
    Date,
    Text,
}

/// Largest magnitude an `i64` can have and still convert to `f64` exactly.
const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

fn widen(current: Inferred, value: &Value) -> Inferred {
    match (current, value) {
        (current, Value::Missing) => current,
        (Inferred::Empty | Inferred::Int, Value::Int(_)) => Inferred::Int,
        (Inferred::Empty | Inferred::Int | Inferred::Float, Value::Float(_))
        | (Inferred::Float, Value::Int(_)) => Inferred::Float,
        (Inferred::Empty | Inferred::Date, Value::Date(_) | Value::DateTime(_)) => Inferred::Date,
        _ => Inferred::Text,
    }
}

fn is_inexact_as_float(value: &Value) -> bool {
    matches!(value, Value::Int(v) if v.unsigned_abs() > MAX_EXACT_FLOAT_INT.unsigned_abs())
}

impl ColumnData {
    /// Builds typed storage from loose values, inferring the column type.
    pub fn from_values(values: Vec<Value>) -> Self {
        // Mixed int/float columns stay exact: if an int would round, keep text.
        let kind = match values.iter().fold(Inferred::Empty, widen) {
            Inferred::Float if values.iter().any(is_inexact_as_float) => Inferred::Text,
            kind => kind,
        };
        match kind {
            Inferred::Int => ColumnData::Int(
                values
                    .into_iter()
                    .map(|value| match value {
                        Value::Int(v) => Some(v),
                        _ => None,
                    })
                    .collect(),
            ),
            Inferred::Float => {
                ColumnData::Float(values.into_iter().map(|value| value.as_f64()).collect())
            }
            Inferred::Date => {
                ColumnData::Date(values.into_iter().map(|value| value.as_date()).collect())
            }
            Inferred::Empty | Inferred::Text => ColumnData::Text(
                values
                    .into_iter()
                    .map(|value| match value {
                        Value::Missing => None,
                        Value::Text(s) => Some(s),
                        other => Some(other.to_string()),
                    })
                    .collect(),
            ),
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            ColumnData::Int(_) => ColumnType::Int,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Text(_) => ColumnType::String,
            ColumnData::Date(_) => ColumnType::Date,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cell at `idx` as a [`Value`], or `None` past the end.
    pub fn get(&self, idx: usize) -> Option<Value> {
        match self {
            ColumnData::Int(v) => v.get(idx).map(|cell| Value::from(*cell)),
            ColumnData::Float(v) => v.get(idx).map(|cell| Value::from(*cell)),
            ColumnData::Text(v) => v.get(idx).map(|cell| Value::from(cell.clone())),
            ColumnData::Date(v) => v.get(idx).map(|cell| Value::from(*cell)),
        }
    }

    /// Returns every cell as a [`Value`].
    pub fn values(&self) -> Vec<Value> {
        (0..self.len()).filter_map(|idx| self.get(idx)).collect()
    }

    /// Renders the cell at `idx` for a datafile; missing cells render empty.
    pub fn render(&self, idx: usize) -> String {
        self.get(idx)
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Returns a copy reordered by `order` (indices into this column).
    pub(crate) fn take(&self, order: &[usize]) -> Self {
        fn pick<T: Clone>(cells: &[Option<T>], order: &[usize]) -> Vec<Option<T>> {
            order
                .iter()
                .map(|&idx| cells.get(idx).cloned().flatten())
                .collect()
        }
        match self {
            ColumnData::Int(v) => ColumnData::Int(pick(v, order)),
            ColumnData::Float(v) => ColumnData::Float(pick(v, order)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, order)),
            ColumnData::Date(v) => ColumnData::Date(pick(v, order)),
        }
    }
}
