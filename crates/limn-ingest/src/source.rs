use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Where delimited input is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// Interprets a command-line argument; `None` and `-` mean stdin.
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => InputSource::Stdin,
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_path_buf()),
        }
    }

    /// File stem used as the default datasource id and name.
    pub fn stem(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "stdin".to_string()),
        }
    }

    pub(crate) fn open(&self) -> Result<Box<dyn Read>> {
        match self {
            InputSource::Stdin => Ok(Box::new(io::stdin().lock())),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|e| {
                    if e.kind() == io::ErrorKind::NotFound {
                        IngestError::FileNotFound { path: path.clone() }
                    } else {
                        IngestError::FileRead {
                            path: path.clone(),
                            source: e,
                        }
                    }
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
