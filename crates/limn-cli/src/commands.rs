use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use limn_ingest::{DelimitedOptions, InputSource, read_delimited};
use limn_output::{DataSource, GraphOptions};
use limn_transform::{DateStrings, NormalizeOptions, PivotSpec, TableInput, pivot_sum};

use crate::cli::LimnifyArgs;

/// What a limnify run produced.
#[derive(Debug)]
pub struct LimnifyOutcome {
    pub datasource: DataSource,
    /// The datafile and the datasource metadata, in that order.
    pub written: Vec<PathBuf>,
    pub graph_path: Option<PathBuf>,
}

pub fn run_limnify(args: &LimnifyArgs) -> Result<LimnifyOutcome> {
    let source = InputSource::from_arg(args.input.as_deref());
    let span = info_span!("limnify", input = %source);
    let _guard = span.enter();

    let mut read_options = DelimitedOptions::new().with_delimiter(args.delim);
    if let Some(header) = &args.header {
        read_options = read_options.with_header(header.clone());
    }
    let table = read_delimited(&source, &read_options)
        .with_context(|| format!("read delimited input from {source}"))?;
    info!(
        rows = table.row_count(),
        columns = table.headers().len(),
        "read input"
    );

    let date_key = table
        .resolve(&args.datecol)
        .context("resolve date column")?
        .to_string();
    let date_strings = match &args.datefmt {
        Some(format) => DateStrings::Format(format.clone()),
        None => DateStrings::BestEffort,
    };

    let input: TableInput = if args.pivot {
        let spec = PivotSpec::new(
            date_key.as_str(),
            table
                .resolve(&args.metriccol)
                .context("resolve metric column")?,
            table.resolve(&args.valcol).context("resolve value column")?,
        );
        pivot_sum(table, &spec, &date_strings).context("pivot input")?
    } else {
        table.into()
    };

    let stem = source.stem();
    let id = args.id.clone().unwrap_or_else(|| stem.clone());
    let name = args
        .name
        .as_ref()
        .map_or(stem, |words| words.join(" "));
    let normalize_options = NormalizeOptions {
        date_key: Some(date_key),
        date_strings,
    };
    let datasource = DataSource::with_options(id, name, input, &normalize_options)
        .context("build datasource")?;

    let written = datasource
        .write(&args.basedir)
        .with_context(|| format!("write datasource under {}", args.basedir.display()))?;

    let graph_path = if args.write_graph {
        let graph = datasource
            .graph(None, &GraphOptions::default())
            .context("build graph")?;
        let path = graph.write(&args.basedir).context("write graph")?;
        Some(path)
    } else {
        None
    };

    Ok(LimnifyOutcome {
        datasource,
        written,
        graph_path,
    })
}
