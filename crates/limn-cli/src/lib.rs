//! The `limnify` command: delimited timeseries in, Limn datasource out.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
