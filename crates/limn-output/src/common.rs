//! Shared helpers for writing output files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{OutputError, Result};

/// Datafile directory under the base directory.
pub const DATAFILES_DIR: &str = "datafiles";

/// Datasource descriptor directory.
pub const DATASOURCES_DIR: &str = "datasources";

/// Graph document directory.
pub const GRAPHS_DIR: &str = "graphs";

/// Dashboard document directory.
pub const DASHBOARDS_DIR: &str = "dashboards";

/// Ensure an output subdirectory exists and return its path.
pub fn ensure_output_dir(base_dir: &Path, name: &str) -> Result<PathBuf> {
    let dir = base_dir.join(name);
    fs::create_dir_all(&dir).map_err(|source| OutputError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    debug!(path = %dir.display(), "output directory ready");
    Ok(dir)
}

pub(crate) fn create_file(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
}

pub(crate) fn finish(mut writer: BufWriter<File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes `document` as YAML to `path`, replacing any existing file.
pub(crate) fn write_yaml<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let mut writer = create_file(path)?;
    serde_yaml::to_writer(&mut writer, document).map_err(|source| OutputError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    finish(writer, path)?;
    debug!(path = %path.display(), "wrote yaml document");
    Ok(())
}

/// Serializes `document` as pretty JSON with a trailing newline.
pub(crate) fn write_json<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let mut writer = create_file(path)?;
    serde_json::to_writer_pretty(&mut writer, document).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    finish(writer, path)?;
    debug!(path = %path.display(), "wrote json document");
    Ok(())
}
