use std::fs;

use limn_ingest::{ColumnSelector, DelimitedOptions, IngestError, InputSource, read_delimited};
use limn_model::Value;
use limn_transform::{NormalizeOptions, TableInput, normalize};

#[test]
fn test_read_tsv_file_into_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("views.tsv");
    fs::write(&path, "\u{feff}date\tviews\n2012-09-01\t10\n2012-10-01\t\n").unwrap();

    let source = InputSource::File(path);
    assert_eq!(source.stem(), "views");

    let table = read_delimited(&source, &DelimitedOptions::default()).unwrap();
    assert_eq!(table.headers(), ["date", "views"]);
    assert_eq!(table.resolve(&ColumnSelector::Index(0)).unwrap(), "date");

    let table = normalize(
        TableInput::from(table),
        &NormalizeOptions::new().with_best_effort_dates(),
    )
    .unwrap();
    assert_eq!(
        table.rows()[1],
        vec![
            Value::Date(chrono::NaiveDate::from_ymd_opt(2012, 10, 1).unwrap()),
            Value::Missing
        ]
    );
}

#[test]
fn test_missing_file_reported() {
    let dir = tempfile::tempdir().unwrap();
    let source = InputSource::File(dir.path().join("absent.tsv"));
    let err = read_delimited(&source, &DelimitedOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
