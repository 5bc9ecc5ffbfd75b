//! Normalization of tabular input into canonical Limn tables.
//!
//! [`normalize`] accepts row mappings, labelled rows, column mappings or an
//! existing [`Table`](limn_model::Table) and returns a validated table with
//! its date column first. [`pivot_sum`] reshapes long `(date, metric, value)`
//! records into that wide layout beforehand; it is behind the `pivot` feature
//! (on by default), the only part of the crate that needs polars.

pub mod datetime;
pub mod error;
pub mod input;
pub mod normalize;
pub mod options;
#[cfg(feature = "pivot")]
pub mod pivot;

pub use error::{Result, TransformError};
pub use input::TableInput;
pub use normalize::normalize;
pub use options::{DEFAULT_DATE_KEY, DateStrings, NormalizeOptions};
#[cfg(feature = "pivot")]
pub use pivot::{PivotSpec, pivot_sum};
