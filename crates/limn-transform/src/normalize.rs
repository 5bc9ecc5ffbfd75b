use tracing::debug;

use limn_model::{Column, ModelError, Table};

use crate::datetime::coerce_date;
use crate::input::TableInput;
use crate::options::NormalizeOptions;

/// Builds a canonical [`Table`] from any supported input shape.
///
/// The date column (when `options.date_key` is set) is coerced cell by cell
/// and moved to the first position; every other column keeps its discovery
/// order and has its type inferred.
pub fn normalize(
    input: impl Into<TableInput>,
    options: &NormalizeOptions,
) -> Result<Table, ModelError> {
    let raw = input.into().into_columns()?;
    let date_key = options.date_key.as_deref();

    if let Some(key) = date_key
        && !raw.iter().any(|(name, _)| name == key)
    {
        return Err(ModelError::MissingDateColumn {
            column: key.to_string(),
            available: raw.into_iter().map(|(name, _)| name).collect(),
        });
    }

    let columns = raw
        .into_iter()
        .map(|(name, values)| -> Result<Column, ModelError> {
            if date_key == Some(name.as_str()) {
                let dates = values
                    .iter()
                    .enumerate()
                    .map(|(row, value)| coerce_date(value, row, &options.date_strings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Column::dates(name, dates))
            } else {
                Ok(Column::from_values(name, values))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let table = Table::new(columns, date_key)?;
    debug!(
        rows = table.row_count(),
        columns = table.columns().len(),
        date_column = ?table.date_column_name(),
        "normalized table"
    );
    Ok(table)
}
