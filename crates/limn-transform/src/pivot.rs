//! Long-to-wide reshaping of `(date, metric, value)` records.
//!
//! Records are summed per `(date, metric)` pair with a polars lazy
//! `group_by`, then spread into one column per metric. Dates and metrics come
//! out sorted ascending; pairs with no record become missing cells.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use polars::prelude::{Column, DataFrame, IntoLazy, col};
use tracing::{debug, warn};

use limn_model::{ModelError, Value};

use crate::datetime::coerce_date;
use crate::error::{Result, TransformError};
use crate::input::TableInput;
use crate::options::DateStrings;

const DATE: &str = "__date";
const METRIC: &str = "__metric";
const VALUE: &str = "__value";

/// Which input columns hold the date, the metric name and the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotSpec {
    pub date_column: String,
    pub metric_column: String,
    pub value_column: String,
}

impl PivotSpec {
    pub fn new(
        date_column: impl Into<String>,
        metric_column: impl Into<String>,
        value_column: impl Into<String>,
    ) -> Self {
        Self {
            date_column: date_column.into(),
            metric_column: metric_column.into(),
            value_column: value_column.into(),
        }
    }
}

/// Sums `spec.value_column` per date and metric and returns a wide table
/// keyed by `spec.date_column`.
///
/// Rows with a missing metric or value are skipped. Any other non-numeric
/// value fails with [`TransformError::NonNumericValue`]. Sums stay integers
/// when every value is an integer.
pub fn pivot_sum(
    input: impl Into<TableInput>,
    spec: &PivotSpec,
    date_strings: &DateStrings,
) -> Result<TableInput> {
    let mut columns: IndexMap<String, Vec<Value>> =
        input.into().into_columns()?.into_iter().collect();
    let mut take = |name: &str| {
        columns
            .swap_remove(name)
            .ok_or_else(|| TransformError::MissingColumn {
                column: name.to_string(),
            })
    };
    let dates = take(spec.date_column.as_str())?;
    let metrics = take(spec.metric_column.as_str())?;
    let values = take(spec.value_column.as_str())?;

    let all_int = values
        .iter()
        .all(|v| matches!(v, Value::Int(_) | Value::Missing));

    let mut days = Vec::with_capacity(values.len());
    let mut names = Vec::with_capacity(values.len());
    let mut ints = Vec::new();
    let mut floats = Vec::new();
    let mut skipped = 0usize;
    for (row, ((date, metric), value)) in dates.iter().zip(&metrics).zip(&values).enumerate() {
        match value {
            Value::Missing => {
                skipped += 1;
                continue;
            }
            Value::Int(_) | Value::Float(_) => {}
            other => {
                return Err(TransformError::NonNumericValue {
                    row,
                    column: spec.value_column.clone(),
                    value: other.to_string(),
                });
            }
        }
        if metric.is_missing() {
            skipped += 1;
            continue;
        }
        days.push(coerce_date(date, row, date_strings)?.num_days_from_ce());
        names.push(metric.to_string());
        match value {
            Value::Int(v) if all_int => ints.push(*v),
            _ => floats.extend(value.as_f64()),
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped records with a missing metric or value");
    }

    let mut wide = IndexMap::new();
    if days.is_empty() {
        wide.insert(spec.date_column.clone(), Vec::new());
        return Ok(TableInput::ColumnMapping(wide));
    }

    let value_column = if all_int {
        Column::new(VALUE.into(), ints)
    } else {
        Column::new(VALUE.into(), floats)
    };
    let frame = DataFrame::new(vec![
        Column::new(DATE.into(), days),
        Column::new(METRIC.into(), names),
        value_column,
    ])?;
    let grouped = frame
        .lazy()
        .group_by([col(DATE), col(METRIC)])
        .agg([col(VALUE).sum()])
        .collect()?;

    let sums: Vec<Value> = if all_int {
        grouped
            .column(VALUE)?
            .i64()?
            .into_iter()
            .map(Value::from)
            .collect()
    } else {
        grouped
            .column(VALUE)?
            .f64()?
            .into_iter()
            .map(Value::from)
            .collect()
    };

    let mut cells: BTreeMap<(i32, String), Value> = BTreeMap::new();
    let day_keys = grouped.column(DATE)?.i32()?;
    let metric_keys = grouped.column(METRIC)?.str()?;
    for ((day, metric), sum) in day_keys.into_iter().zip(metric_keys).zip(sums) {
        let (Some(day), Some(metric)) = (day, metric) else {
            continue;
        };
        cells.insert((day, metric.to_string()), sum);
    }

    let day_list: BTreeSet<i32> = cells.keys().map(|(day, _)| *day).collect();
    let metric_list: BTreeSet<String> = cells.keys().map(|(_, m)| m.clone()).collect();

    wide.insert(
        spec.date_column.clone(),
        day_list
            .iter()
            .map(|day| NaiveDate::from_num_days_from_ce_opt(*day).map_or(Value::Missing, Value::Date))
            .collect(),
    );
    for metric in metric_list {
        if wide.contains_key(&metric) {
            return Err(ModelError::DuplicateColumn { column: metric }.into());
        }
        let column = day_list
            .iter()
            .map(|day| cells.remove(&(*day, metric.clone())).unwrap_or(Value::Missing))
            .collect();
        wide.insert(metric, column);
    }

    debug!(
        records = values.len(),
        dates = day_list.len(),
        metrics = wide.len() - 1,
        "pivoted long records"
    );
    Ok(TableInput::ColumnMapping(wide))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn long(rows: Vec<(&str, &str, Value)>) -> TableInput {
        TableInput::rows_with_labels(
            rows.into_iter()
                .map(|(d, m, v)| vec![Value::from(d), Value::from(m), v])
                .collect(),
            ["day", "project", "count"],
        )
    }

    fn spec() -> PivotSpec {
        PivotSpec::new("day", "project", "count")
    }

    fn wide(input: TableInput) -> IndexMap<String, Vec<Value>> {
        match input {
            TableInput::ColumnMapping(columns) => columns,
            other => panic!("expected a column mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_sums_duplicates_and_sorts() {
        let input = long(vec![
            ("2012-10-01", "wikipedia", Value::Int(5)),
            ("2012-09-01", "wiktionary", Value::Int(1)),
            ("2012-09-01", "wikipedia", Value::Int(2)),
            ("2012-09-01", "wikipedia", Value::Int(3)),
        ]);
        let columns = wide(pivot_sum(input, &spec(), &DateStrings::BestEffort).unwrap());

        assert_eq!(
            columns.keys().collect::<Vec<_>>(),
            vec!["day", "wikipedia", "wiktionary"]
        );
        assert_eq!(
            columns["day"],
            vec![Value::Date(date(2012, 9, 1)), Value::Date(date(2012, 10, 1))]
        );
        assert_eq!(columns["wikipedia"], vec![Value::Int(5), Value::Int(5)]);
        assert_eq!(columns["wiktionary"], vec![Value::Int(1), Value::Missing]);
    }

    #[test]
    fn test_floats_sum_as_floats() {
        let input = long(vec![
            ("2012-09-01", "a", Value::Int(1)),
            ("2012-09-01", "a", Value::Float(0.5)),
        ]);
        let columns = wide(pivot_sum(input, &spec(), &DateStrings::BestEffort).unwrap());
        assert_eq!(columns["a"], vec![Value::Float(1.5)]);
    }

    #[test]
    fn test_hourly_records_collapse_to_days() {
        let input = long(vec![
            ("2013-01-01_00", "a", Value::Int(1)),
            ("2013-01-01_13", "a", Value::Int(2)),
        ]);
        let strings = DateStrings::Format("%Y-%m-%d_%H".to_string());
        let columns = wide(pivot_sum(input, &spec(), &strings).unwrap());
        assert_eq!(columns["day"], vec![Value::Date(date(2013, 1, 1))]);
        assert_eq!(columns["a"], vec![Value::Int(3)]);
    }

    #[test]
    fn test_missing_values_are_skipped() {
        let input = long(vec![
            ("2012-09-01", "a", Value::Missing),
            ("2012-09-01", "b", Value::Int(4)),
        ]);
        let columns = wide(pivot_sum(input, &spec(), &DateStrings::BestEffort).unwrap());
        assert_eq!(columns.keys().collect::<Vec<_>>(), vec!["day", "b"]);
    }

    #[test]
    fn test_non_numeric_value() {
        let input = long(vec![("2012-09-01", "a", Value::from("lots"))]);
        let err = pivot_sum(input, &spec(), &DateStrings::BestEffort).unwrap_err();
        assert!(matches!(
            err,
            TransformError::NonNumericValue { row: 0, ref value, .. } if value == "lots"
        ));
    }

    #[test]
    fn test_unknown_pivot_column() {
        let input = long(vec![]);
        let err = pivot_sum(input, &PivotSpec::new("day", "site", "count"), &DateStrings::BestEffort)
            .unwrap_err();
        assert!(matches!(err, TransformError::MissingColumn { ref column } if column == "site"));
    }

    #[test]
    fn test_metric_named_like_date_column() {
        let input = long(vec![("2012-09-01", "day", Value::Int(1))]);
        let err = pivot_sum(input, &spec(), &DateStrings::BestEffort).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Model(ModelError::DuplicateColumn { .. })
        ));
    }
}
