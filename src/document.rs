use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;
use tracing::Span;

use crate::error::FsError;
use crate::utils::resolved;

/// Read a json file and return the whole document.
///
/// `false`, `0` and `null` documents are ordinary successes.
pub fn read_structured_file(path: &Path, log: &Span) -> Result<Value, FsError> {
    tracing::debug!(parent: log, path = %path.display(), "Trying to get json file");
    let f = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(parent: log, error = %e, path = %resolved(path).display(), "Unable to read file");
            return Err(FsError::Open { path: path.to_path_buf(), source: e });
        }
    };

    match serde_json::from_reader(BufReader::new(f)) {
        Ok(v) => {
            tracing::info!(parent: log, path = %path.display(), "Data successfully extracted");
            Ok(v)
        }
        Err(e) => {
            tracing::error!(parent: log, error = %e, path = %resolved(path).display(), "Unable to get json data");
            Err(FsError::Json { path: path.to_path_buf(), source: e })
        }
    }
}
