//! Data model for Limn datasources.
//!
//! - **value**: loose input cells ([`Value`]) and typed column storage
//! - **table**: the canonical [`Table`] and its transform API
//! - **ids**: filesystem-safe identifiers ([`Slug`])
//! - **error**: [`ModelError`] covering every data-shape failure

pub mod error;
pub mod ids;
pub mod table;
pub mod value;

pub use error::{ModelError, Result};
pub use ids::Slug;
pub use table::{Column, Table};
pub use value::{ColumnData, ColumnType, DATE_FORMAT, Value, format_float};
