//! Delimited input for the `limnify` command.
//!
//! Reads tab (or otherwise) delimited text from a file or stdin, types each
//! field, and hands the result to normalization as labelled rows.

pub mod error;
pub mod reader;
pub mod selector;
pub mod source;

pub use error::{IngestError, Result};
pub use reader::{
    DelimitedOptions, DelimitedTable, parse_cell, parse_delimiter, read_delimited,
    read_delimited_from,
};
pub use selector::ColumnSelector;
pub use source::InputSource;
