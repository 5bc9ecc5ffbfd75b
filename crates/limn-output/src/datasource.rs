//! Limn datasources: a datafile plus its YAML descriptor.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use limn_model::{ColumnType, DATE_FORMAT, ModelError, Slug, Table};
use limn_transform::{DEFAULT_DATE_KEY, NormalizeOptions, TableInput, normalize};

use crate::common::{DATAFILES_DIR, DATASOURCES_DIR, ensure_output_dir, write_yaml};
use crate::error::{OutputError, Result};
use crate::graph::{Graph, GraphOptions};

/// One entry of the descriptor's `columns` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timespan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub step: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub chart_type: String,
}

/// The `datasources/{id}.yaml` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    pub id: Slug,
    pub slug: Slug,
    pub name: String,
    pub short_name: String,
    pub desc: String,
    pub notes: String,
    pub format: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub url: String,
    pub columns: Vec<ColumnSpec>,
    pub timespan: Timespan,
    pub chart: ChartSpec,
}

/// A table bound to a Limn identity.
///
/// The table always has a date column. Edits go through [`DataSource::transform`],
/// and [`DataSource::write`] produces the same bytes for the same table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSource {
    id: Slug,
    name: String,
    table: Table,
    group: String,
    url: Option<String>,
    short_name: Option<String>,
    description: String,
    notes: String,
}

impl DataSource {
    /// Builds a datasource whose date column is `date` and must already hold
    /// dates.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<TableInput>,
    ) -> Result<Self> {
        Self::with_options(id, name, data, &NormalizeOptions::default())
    }

    pub fn with_options(
        id: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<TableInput>,
        options: &NormalizeOptions,
    ) -> Result<Self> {
        let id = Slug::new(id)?;
        let table = normalize(data, options)?;
        require_date_column(&table)?;
        debug!(
            id = %id,
            rows = table.row_count(),
            columns = table.columns().len(),
            "built datasource"
        );
        Ok(Self {
            id,
            name: name.into(),
            table,
            group: String::new(),
            url: None,
            short_name: None,
            description: String::new(),
            notes: String::new(),
        })
    }

    /// Server directory segment used in the default datafile url.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn id(&self) -> &Slug {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Replaces the table with `f(table)`. On error the datasource is left
    /// unchanged.
    pub fn transform<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(Table) -> std::result::Result<Table, ModelError>,
    {
        let table = f(self.table.clone())?;
        require_date_column(&table)?;
        self.table = table;
        Ok(())
    }

    /// Datafile url, `/data/datafiles/{group}/{id}.csv` unless overridden.
    pub fn url(&self) -> String {
        match (&self.url, self.group.is_empty()) {
            (Some(url), _) => url.clone(),
            (None, true) => format!("/data/{DATAFILES_DIR}/{}.csv", self.id),
            (None, false) => format!("/data/{DATAFILES_DIR}/{}/{}.csv", self.group, self.id),
        }
    }

    /// The datasource descriptor for the current table.
    pub fn metadata(&self) -> SourceMetadata {
        let range = self.table.date_range();
        let render = |date: chrono::NaiveDate| date.format(DATE_FORMAT).to_string();
        SourceMetadata {
            id: self.id.clone(),
            slug: self.id.clone(),
            name: self.name.clone(),
            short_name: self.short_name.clone().unwrap_or_else(|| self.name.clone()),
            desc: self.description.clone(),
            notes: self.notes.clone(),
            format: "csv".to_string(),
            source_type: "timeseries".to_string(),
            url: self.url(),
            columns: self
                .table
                .columns()
                .iter()
                .map(|c| ColumnSpec {
                    label: c.name().to_string(),
                    column_type: c.column_type(),
                })
                .collect(),
            timespan: Timespan {
                start: range.map(|(start, _)| render(start)),
                end: range.map(|(_, end)| render(end)),
                step: "1d".to_string(),
            },
            chart: ChartSpec {
                chart_type: "dygraphs".to_string(),
            },
        }
    }

    /// Writes `datafiles/{id}.csv` then `datasources/{id}.yaml` under
    /// `basedir` and returns both paths.
    ///
    /// The datafile is not removed if the descriptor write fails.
    pub fn write(&self, basedir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let basedir = basedir.as_ref();

        let datafile = ensure_output_dir(basedir, DATAFILES_DIR)?.join(format!("{}.csv", self.id));
        self.write_datafile(&datafile)?;

        let descriptor =
            ensure_output_dir(basedir, DATASOURCES_DIR)?.join(format!("{}.yaml", self.id));
        write_yaml(&descriptor, &self.metadata())?;

        info!(
            id = %self.id,
            rows = self.table.row_count(),
            datafile = %datafile.display(),
            "wrote datasource"
        );
        Ok(vec![datafile, descriptor])
    }

    fn write_datafile(&self, path: &Path) -> Result<()> {
        let csv_error = |source| OutputError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
        writer
            .write_record(self.table.column_names())
            .map_err(csv_error)?;
        for idx in 0..self.table.row_count() {
            writer
                .write_record(self.table.columns().iter().map(|c| c.data().render(idx)))
                .map_err(csv_error)?;
        }
        writer.flush().map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "wrote datafile");
        Ok(())
    }

    /// Builds a graph over `columns` of this datasource (every non-date
    /// column when `None`).
    pub fn graph(&self, columns: Option<&[&str]>, options: &GraphOptions) -> Result<Graph> {
        let refs: Vec<(&str, &str)> = match columns {
            Some(columns) => columns.iter().map(|c| (self.id.as_str(), *c)).collect(),
            None => self
                .table
                .value_columns()
                .map(|c| (self.id.as_str(), c.name()))
                .collect(),
        };
        let id = options.id.as_deref().unwrap_or(self.id.as_str());
        let name = options.name.as_deref().unwrap_or(&self.name);
        let graph = Graph::new(id, name, &[self], &refs)?;
        match &options.slug {
            Some(slug) => graph.with_slug(slug.as_str()),
            None => Ok(graph),
        }
    }

    /// Builds the default graph for `columns` and writes it under `basedir`.
    pub fn write_graph(&self, columns: Option<&[&str]>, basedir: impl AsRef<Path>) -> Result<Graph> {
        let graph = self.graph(columns, &GraphOptions::default())?;
        graph.write(basedir)?;
        Ok(graph)
    }
}

fn require_date_column(table: &Table) -> std::result::Result<(), ModelError> {
    if table.date_column().is_some() {
        return Ok(());
    }
    Err(ModelError::MissingDateColumn {
        column: DEFAULT_DATE_KEY.to_string(),
        available: table.column_names().into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use limn_model::Value;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> DataSource {
        DataSource::new(
            "t",
            "T",
            TableInput::rows_with_labels(
                vec![
                    vec![Value::Date(date(2012, 10, 1)), Value::Int(7), Value::Int(9)],
                    vec![Value::Date(date(2012, 9, 1)), Value::Int(1), Value::Int(2)],
                ],
                ["date", "x", "y"],
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_default_url() {
        assert_eq!(sample().url(), "/data/datafiles/t.csv");
        assert_eq!(
            sample().with_group("reportcard").url(),
            "/data/datafiles/reportcard/t.csv"
        );
        assert_eq!(sample().with_url("http://x/t.csv").url(), "http://x/t.csv");
    }

    #[test]
    fn test_metadata_fields() {
        let meta = sample().with_short_name("Tee").metadata();
        assert_eq!(meta.short_name, "Tee");
        assert_eq!(meta.timespan.start.as_deref(), Some("2012-09-01"));
        assert_eq!(meta.timespan.end.as_deref(), Some("2012-10-01"));
        assert_eq!(
            meta.columns,
            vec![
                ColumnSpec {
                    label: "date".to_string(),
                    column_type: ColumnType::Date
                },
                ColumnSpec {
                    label: "x".to_string(),
                    column_type: ColumnType::Int
                },
                ColumnSpec {
                    label: "y".to_string(),
                    column_type: ColumnType::Int
                },
            ]
        );
    }

    #[test]
    fn test_empty_table_has_no_timespan_bounds() {
        let meta = DataSource::new(
            "empty",
            "Empty",
            TableInput::rows_with_labels(vec![], ["date", "x"]),
        )
        .unwrap()
        .metadata();
        assert_eq!(meta.timespan.start, None);
        assert_eq!(meta.timespan.end, None);
        assert_eq!(meta.columns[0].column_type, ColumnType::Date);
        assert_eq!(meta.columns[1].column_type, ColumnType::String);
    }

    #[test]
    fn test_requires_date_column() {
        let err = DataSource::with_options(
            "t",
            "T",
            TableInput::rows_with_labels(vec![vec![Value::Int(1)]], ["x"]),
            &NormalizeOptions::new().without_date(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OutputError::Model(ModelError::MissingDateColumn { .. })
        ));
    }

    #[test]
    fn test_invalid_id() {
        let err = DataSource::new("../t", "T", sample().table().clone()).unwrap_err();
        assert!(matches!(
            err,
            OutputError::Model(ModelError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_failed_transform_leaves_table() {
        let mut source = sample();
        let before = source.table().clone();
        let err = source.transform(|t| t.drop_column("date")).unwrap_err();
        assert!(matches!(
            err,
            OutputError::Model(ModelError::DateColumnRequired { .. })
        ));
        assert_eq!(source.table(), &before);

        source
            .transform(|t| t.with_column("z", vec![Value::Int(0), Value::Int(1)]))
            .unwrap();
        assert_eq!(source.table().column_names(), vec!["date", "x", "y", "z"]);
    }
}
