//! Integration tests for table construction and the transform API.

use chrono::NaiveDate;
use proptest::prelude::*;

use limn_model::{Column, ColumnData, ColumnType, ModelError, Table, Value};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_unequal_columns_rejected() {
    let err = Table::new(
        vec![
            Column::dates("date", vec![date(2012, 9, 1), date(2012, 10, 1)]),
            Column::from_values("x", vec![Value::Int(1)]),
        ],
        Some("date"),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ModelError::ColumnLengthMismatch {
            column: "x".to_string(),
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_missing_date_cell_rejected() {
    let err = Table::new(
        vec![Column::new(
            "date",
            ColumnData::Date(vec![Some(date(2012, 9, 1)), None]),
        )],
        Some("date"),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ModelError::DateParse {
            row: 1,
            value: String::new()
        }
    );
}

#[test]
fn test_table_without_date_column() {
    let table = Table::new(
        vec![Column::from_values("name", vec![Value::from("a")])],
        None,
    )
    .unwrap();
    assert!(table.date_column().is_none());
    assert_eq!(table.value_columns().count(), 1);
    assert_eq!(table.date_range(), None);
}

#[test]
fn test_with_column_replaces_in_place() {
    let table = Table::new(
        vec![
            Column::dates("date", vec![date(2012, 9, 1)]),
            Column::from_values("x", vec![Value::Int(1)]),
            Column::from_values("y", vec![Value::Int(2)]),
        ],
        Some("date"),
    )
    .unwrap()
    .with_column("x", vec![Value::from("one")])
    .unwrap();
    assert_eq!(table.column_names(), vec!["date", "x", "y"]);
    assert_eq!(
        table.column("x").map(Column::column_type),
        Some(ColumnType::String)
    );
}

#[test]
fn test_with_column_length_checked() {
    let err = Table::new(vec![Column::dates("date", vec![date(2012, 9, 1)])], Some("date"))
        .unwrap()
        .with_column("x", vec![Value::Int(1), Value::Int(2)])
        .unwrap_err();
    assert!(matches!(err, ModelError::ColumnLengthMismatch { .. }));
}

#[test]
fn test_map_unknown_column() {
    let err = Table::new(vec![Column::dates("date", vec![])], Some("date"))
        .unwrap()
        .map_column("nope", Value::clone)
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownColumn {
            column: "nope".to_string()
        }
    );
}

proptest! {
    #[test]
    fn prop_rows_round_trip_int_columns(
        cells in proptest::collection::vec((0u32..20_000, any::<i64>(), any::<i64>()), 0..40)
    ) {
        let base = date(2000, 1, 1);
        let dates: Vec<NaiveDate> = cells
            .iter()
            .map(|(offset, _, _)| base + chrono::Days::new(u64::from(*offset)))
            .collect();
        let xs: Vec<Value> = cells.iter().map(|(_, x, _)| Value::Int(*x)).collect();
        let ys: Vec<Value> = cells.iter().map(|(_, _, y)| Value::Int(*y)).collect();

        let table = Table::new(
            vec![
                Column::from_values("x", xs.clone()),
                Column::from_values("y", ys.clone()),
                Column::dates("date", dates.clone()),
            ],
            Some("date"),
        )
        .unwrap();

        prop_assert_eq!(table.row_count(), cells.len());
        for (idx, row) in table.rows().into_iter().enumerate() {
            prop_assert_eq!(
                row,
                vec![Value::Date(dates[idx]), xs[idx].clone(), ys[idx].clone()]
            );
        }
    }
}
