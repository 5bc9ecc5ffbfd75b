//! Delimited text reading with optional header override.

use std::io::Read;

use csv::ReaderBuilder;
use tracing::debug;

use limn_model::Value;
use limn_transform::TableInput;

use crate::error::{IngestError, Result};
use crate::selector::ColumnSelector;
use crate::source::InputSource;

/// Options for reading delimited input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedOptions {
    /// Field delimiter byte (tab by default).
    pub delimiter: u8,

    /// Column names to use instead of a header row. When set, the first line
    /// of the input is data.
    pub header: Option<Vec<String>>,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        Self {
            delimiter: b'\t',
            header: None,
        }
    }
}

impl DelimitedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_header(mut self, header: Vec<String>) -> Self {
        self.header = Some(header);
        self
    }
}

/// Parses a delimiter argument. Accepts one ASCII character, or the escape
/// `\t` / the word `tab` for a tab.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        other if other.len() == 1 && other.is_ascii() => Ok(other.as_bytes()[0]),
        other => Err(IngestError::InvalidDelimiter {
            value: other.to_string(),
        }),
    }
}

/// Types one raw field: empty is missing, then integer, then finite float,
/// otherwise text. Dates stay text until normalization.
pub fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Value::Int(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Float(v),
        _ => Value::Text(trimmed.to_string()),
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Header names plus typed rows, as read from one input.
#[derive(Debug, Clone, PartialEq)]
pub struct DelimitedTable {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DelimitedTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header name selected by `selector`.
    pub fn resolve(&self, selector: &ColumnSelector) -> Result<&str> {
        selector.resolve(&self.headers)
    }
}

impl From<DelimitedTable> for TableInput {
    fn from(table: DelimitedTable) -> Self {
        TableInput::RowsWithLabels {
            rows: table.rows,
            labels: table.headers,
        }
    }
}

/// Reads `source` with `options`.
pub fn read_delimited(source: &InputSource, options: &DelimitedOptions) -> Result<DelimitedTable> {
    let reader = source.open()?;
    read_delimited_from(reader, &source.to_string(), options)
}

/// Reads delimited text from any reader; `input` names it in errors.
pub fn read_delimited_from<R: Read>(
    reader: R,
    input: &str,
    options: &DelimitedOptions,
) -> Result<DelimitedTable> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let parse_error = |source| IngestError::CsvParse {
        input: input.to_string(),
        source,
    };
    let mut records = csv_reader.records();

    let headers: Vec<String> = match &options.header {
        Some(header) => header.clone(),
        None => match records.next() {
            Some(record) => record.map_err(parse_error)?.iter().map(normalize_header).collect(),
            None => {
                return Err(IngestError::EmptyInput {
                    input: input.to_string(),
                });
            }
        },
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(parse_error)?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(IngestError::HeaderMismatch {
                input: input.to_string(),
                line: record.position().map_or(0, |pos| pos.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
        rows.push(record.iter().map(parse_cell).collect());
    }

    debug!(
        input,
        columns = headers.len(),
        rows = rows.len(),
        "read delimited input"
    );
    Ok(DelimitedTable { headers, rows })
}
