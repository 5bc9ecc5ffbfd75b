//! Limn graph documents.
//!
//! A [`Graph`] holds weak references to datasource columns: a datasource id
//! plus a column label. References are checked once, against the datasources
//! passed in when the metric is added, and are plain strings afterwards.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use limn_model::{ColumnType, Slug};

use crate::common::{GRAPHS_DIR, ensure_output_dir, write_yaml};
use crate::datasource::DataSource;
use crate::error::{OutputError, Result};
use crate::palette::color_map;

/// Graph document schema version understood by Limn.
pub const GRAPH_VERSION: &str = "0.6.0";

const DATE_FORMAT_LABEL: &str = "MMM YYYY";

/// Overrides for graphs derived from a single datasource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Graph id; defaults to the datasource id.
    pub id: Option<String>,
    /// Display name; defaults to the datasource name.
    pub name: Option<String>,
    /// Url slug; defaults to the graph id.
    pub slug: Option<String>,
}

impl GraphOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

/// One plotted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub source_id: String,
    pub column: String,
    /// Position of `column` in the datasource's datafile.
    pub source_col: usize,
    pub column_type: ColumnType,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    id: Slug,
    slug: Slug,
    name: String,
    metrics: Vec<Metric>,
}

impl Graph {
    /// Builds a graph plotting `column_refs` (`(datasource id, column)`) in
    /// order, resolved against `sources`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sources: &[&DataSource],
        column_refs: &[(&str, &str)],
    ) -> Result<Self> {
        let id = Slug::new(id)?;
        let mut graph = Self {
            slug: id.clone(),
            id,
            name: name.into(),
            metrics: Vec::with_capacity(column_refs.len()),
        };
        for (source_id, column) in column_refs {
            let source = sources
                .iter()
                .find(|s| s.id().as_str() == *source_id)
                .ok_or_else(|| OutputError::UnknownColumnReference {
                    source_id: (*source_id).to_string(),
                    column: (*column).to_string(),
                })?;
            graph.add_metric(source, column, None)?;
        }
        debug!(id = %graph.id, metrics = graph.metrics.len(), "built graph");
        Ok(graph)
    }

    /// Plots every non-date column of every source, in order.
    pub fn all_columns(
        id: impl Into<String>,
        name: impl Into<String>,
        sources: &[&DataSource],
    ) -> Result<Self> {
        let refs: Vec<(&str, &str)> = sources
            .iter()
            .flat_map(|source| {
                source
                    .table()
                    .value_columns()
                    .map(|c| (source.id().as_str(), c.name()))
            })
            .collect();
        Self::new(id, name, sources, &refs)
    }

    /// Appends a metric for `column` of `source`, labelled `label` or the
    /// column name.
    pub fn add_metric(
        &mut self,
        source: &DataSource,
        column: &str,
        label: Option<&str>,
    ) -> Result<&mut Self> {
        let table = source.table();
        let unknown = || OutputError::UnknownColumnReference {
            source_id: source.id().to_string(),
            column: column.to_string(),
        };
        if table.is_date_column(column) {
            return Err(unknown());
        }
        let source_col = table.position(column).ok_or_else(unknown)?;
        let column_type = table.columns()[source_col].column_type();

        self.metrics.push(Metric {
            source_id: source.id().to_string(),
            column: column.to_string(),
            source_col,
            column_type,
            label: label.unwrap_or(column).to_string(),
        });
        Ok(self)
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Result<Self> {
        self.slug = Slug::new(slug)?;
        Ok(self)
    }

    pub fn id(&self) -> &Slug {
        &self.id
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// The chart configuration document.
    pub fn document(&self) -> GraphDocument {
        let colors = color_map(self.metrics.len());
        let children = self
            .metrics
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(index, (metric, color))| MetricNode {
                node_type: "line",
                disabled: false,
                index,
                metric: MetricBinding {
                    source_id: metric.source_id.clone(),
                    source_col: metric.source_col,
                    column_type: metric.column_type,
                },
                options: MetricOptions {
                    label: metric.label.clone(),
                    color: color.to_string(),
                    stroke: Stroke { width: 2 },
                    no_legend: false,
                    date_format: DATE_FORMAT_LABEL,
                },
            })
            .collect();

        let mut nodes = chrome_nodes();
        nodes.push(CanvasNode::Lines(LineGroup {
            node_type: "line-group",
            disabled: false,
            options: json!({
                "palette": "wmf_projects",
                "scale": "log",
                "dateFormat": DATE_FORMAT_LABEL,
                "stroke": {"width": 2, "opacity": 1},
            }),
            children,
        }));

        GraphDocument {
            graph_version: GRAPH_VERSION,
            id: self.id.to_string(),
            slug: self.slug.to_string(),
            name: self.name.clone(),
            short_name: String::new(),
            desc: String::new(),
            notes: String::new(),
            root: Canvas {
                node_type: "canvas",
                disabled: false,
                children: nodes,
                width: "auto",
                min_width: 750,
                height: 500,
                min_height: 500,
                scaling: "linear",
            },
        }
    }

    /// Writes `graphs/{id}.yaml` under `basedir`.
    pub fn write(&self, basedir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = ensure_output_dir(basedir.as_ref(), GRAPHS_DIR)?.join(format!("{}.yaml", self.id));
        write_yaml(&path, &self.document())?;
        info!(id = %self.id, metrics = self.metrics.len(), path = %path.display(), "wrote graph");
        Ok(path)
    }
}

fn chrome_nodes() -> Vec<CanvasNode> {
    let axis = |dimension: &str, orient: &str| {
        json!({
            "nodeType": "axis",
            "disabled": false,
            "options": {"tickFormat": "MMM YY", "dimension": dimension, "orient": orient},
        })
    };
    let grid = |dimension: &str| {
        json!({
            "nodeType": "grid",
            "disabled": false,
            "options": {"ticks": 10, "dimension": dimension},
        })
    };
    [
        axis("x", "bottom"),
        axis("y", "left"),
        grid("x"),
        grid("y"),
        json!({
            "nodeType": "zoom-brush",
            "disabled": false,
            "options": {"allowX": true, "allowY": true},
        }),
        json!({
            "nodeType": "callout",
            "disabled": false,
            "options": {"dateFormat": DATE_FORMAT_LABEL, "deltaPercent": true, "colorDelta": true},
            "metricRef": 0,
            "target": "latest",
            "steps": ["1y", "1M"],
        }),
        json!({
            "nodeType": "legend",
            "disabled": false,
            "label": "Aug 2012",
            "options": {"dateFormat": DATE_FORMAT_LABEL, "valueFormat": ",.2s"},
        }),
    ]
    .into_iter()
    .map(CanvasNode::Chrome)
    .collect()
}

// === Document Types ===

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(rename = "graph_version")]
    pub graph_version: &'static str,
    pub id: String,
    pub slug: String,
    pub name: String,
    pub short_name: String,
    pub desc: String,
    pub notes: String,
    pub root: Canvas,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Canvas {
    pub node_type: &'static str,
    pub disabled: bool,
    pub children: Vec<CanvasNode>,
    pub width: &'static str,
    pub min_width: u32,
    pub height: u32,
    pub min_height: u32,
    pub scaling: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanvasNode {
    Chrome(serde_json::Value),
    Lines(LineGroup),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineGroup {
    pub node_type: &'static str,
    pub disabled: bool,
    pub options: serde_json::Value,
    pub children: Vec<MetricNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricNode {
    pub node_type: &'static str,
    pub disabled: bool,
    pub index: usize,
    pub metric: MetricBinding,
    pub options: MetricOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBinding {
    pub source_id: String,
    pub source_col: usize,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOptions {
    pub label: String,
    pub color: String,
    pub stroke: Stroke,
    pub no_legend: bool,
    pub date_format: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub width: u32,
}
