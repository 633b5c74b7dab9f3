use std::path::Path;

use serde::Deserialize;
use tracing::Span;

use crate::document::read_structured_file;
use crate::error::FsError;
use crate::utils::resolved;

/// Logging settings for the command line tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Crate log level used when neither `--debug` nor `--verbose` is given.
    pub log_level: String,
    pub ansi: bool,
    pub with_target: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { log_level: "warn".into(), ansi: true, with_target: false }
    }
}

impl Config {
    /// Load from a json file; keys left out keep their defaults.
    pub fn from_file(path: &Path, log: &Span) -> Result<Self, FsError> {
        let value = read_structured_file(path, log)?;
        serde_json::from_value(value).map_err(|source| {
            tracing::error!(parent: log, error = %source, path = %resolved(path).display(), "Invalid config");
            FsError::Json { path: path.to_path_buf(), source }
        })
    }
}
