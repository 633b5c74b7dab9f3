use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Coarse failure category, for callers that need to branch on what went wrong.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Path missing or not readable/openable.
    Unreadable,
    /// Content could not be parsed.
    Parse,
    /// Rows could not be written.
    Write,
    /// Expected a file and found a directory, or the other way round.
    TypeMismatch,
    Create,
    Remove,
}

#[derive(Debug, Error)]
pub enum FsError {
    #[error("unable to open [{}]: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("unable to get csv data from [{}]: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("unable to add lines in [{}]: {source}", .path.display())]
    CsvWrite { path: PathBuf, source: csv::Error },

    #[error("unable to add lines in [{}]: field {field:?} is not in the headers", .path.display())]
    UnknownField { path: PathBuf, field: String },

    #[error("unable to get json data from [{}]: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unable to create [{}]: it already exists and isn't a dir", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("wrong type file for [{}]: not a regular file", .path.display())]
    NotAFile { path: PathBuf },

    #[error("unable to create directory [{}]: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("unable to remove file [{}]: {source}", .path.display())]
    Remove { path: PathBuf, source: io::Error },
}

impl FsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::Open { .. } => ErrorKind::Unreadable,
            FsError::Csv { .. } | FsError::Json { .. } => ErrorKind::Parse,
            FsError::CsvWrite { .. } | FsError::UnknownField { .. } => ErrorKind::Write,
            FsError::NotADirectory { .. } | FsError::NotAFile { .. } => ErrorKind::TypeMismatch,
            FsError::CreateDir { .. } => ErrorKind::Create,
            FsError::Remove { .. } => ErrorKind::Remove,
        }
    }

    /// Path the failed operation was called with.
    pub fn path(&self) -> &std::path::Path {
        match self {
            FsError::Open { path, .. }
            | FsError::Csv { path, .. }
            | FsError::CsvWrite { path, .. }
            | FsError::UnknownField { path, .. }
            | FsError::Json { path, .. }
            | FsError::NotADirectory { path }
            | FsError::NotAFile { path }
            | FsError::CreateDir { path, .. }
            | FsError::Remove { path, .. } => path,
        }
    }
}
