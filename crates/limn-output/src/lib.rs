//! Limn artifact generation.
//!
//! - [`DataSource`]: `datafiles/{id}.csv` and `datasources/{id}.yaml`
//! - [`Graph`]: `graphs/{id}.yaml`
//! - [`Dashboard`]: `dashboards/{id}.json`
//!
//! Every `write` creates its directory under the base directory if needed
//! and overwrites existing files.

pub mod common;
pub mod dashboard;
pub mod datasource;
pub mod error;
pub mod graph;
pub mod palette;

pub use dashboard::{Dashboard, Tab};
pub use datasource::{ColumnSpec, DataSource, SourceMetadata, Timespan};
pub use error::{OutputError, Result};
pub use graph::{GRAPH_VERSION, Graph, GraphDocument, GraphOptions, Metric};
