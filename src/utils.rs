use std::fs;
use std::path::{Path, PathBuf};

use tracing::Span;

use crate::error::FsError;

/// Absolute, symlink-resolved form of `path` for log lines. Falls back to the
/// lexical absolute path when the target doesn't exist yet.
pub fn resolved(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Check if a directory exists, if not create it (parents included).
///
/// Fails without touching anything when `path` is taken by something that
/// isn't a directory.
pub fn ensure_directory(path: &Path, log: &Span) -> Result<(), FsError> {
    if path.exists() {
        if !path.is_dir() {
            tracing::error!(parent: log, path = %resolved(path).display(), "Unable to create directory: it already exists and isn't a dir");
            return Err(FsError::NotADirectory { path: path.to_path_buf() });
        }
        tracing::debug!(parent: log, path = %resolved(path).display(), "Directory already exists");
        return Ok(());
    }

    if let Err(e) = fs::create_dir_all(path) {
        tracing::error!(parent: log, error = %e, path = %resolved(path).display(), "Unable to create directory");
        return Err(FsError::CreateDir { path: path.to_path_buf(), source: e });
    }
    tracing::debug!(parent: log, path = %resolved(path).display(), "Directory created");
    Ok(())
}

/// Remove a regular file if it exists. A missing path is a no-op success.
pub fn remove_file(path: &Path, log: &Span) -> Result<(), FsError> {
    tracing::debug!(parent: log, path = %resolved(path).display(), "Removing file");
    if !path.exists() {
        return Ok(());
    }
    if !path.is_file() {
        tracing::error!(parent: log, path = %resolved(path).display(), "Wrong type file: aborted");
        return Err(FsError::NotAFile { path: path.to_path_buf() });
    }

    // resolve before unlinking, canonicalize needs the target to exist
    let shown = resolved(path);
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::info!(parent: log, path = %shown.display(), "File removed");
            Ok(())
        }
        Err(e) => {
            tracing::error!(parent: log, error = %e, path = %shown.display(), "Unable to remove file");
            Err(FsError::Remove { path: path.to_path_buf(), source: e })
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_log::capture;
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn ensure_directory_creates_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("reports").join("2020").join("leaks");
        ensure_directory(&target, &Span::none()).unwrap();
        assert!(target.is_dir());
    }

    #[test]
    fn ensure_directory_fails_when_parent_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = ensure_directory(&blocker.join("child"), &Span::none()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Create);
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
    }

    #[test]
    fn remove_file_deletes_regular_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("results.csv");
        fs::write(&file, "a,b\n").unwrap();

        remove_file(&file, &Span::none()).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn remove_file_on_missing_path_only_logs_debug() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope.json");

        let mut outcome = None;
        let logs = capture(|| outcome = Some(remove_file(&missing, &Span::none())));

        assert!(outcome.unwrap().is_ok());
        assert!(logs.contains("Removing file"));
        assert_eq!(logs.lines().count(), 1);
        assert!(!logs.contains("ERROR"));
    }

    #[test]
    fn type_mismatch_is_logged_as_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        fs::write(&file, "").unwrap();

        let mut outcome = None;
        let logs = capture(|| outcome = Some(ensure_directory(&file, &Span::none())));

        assert_eq!(outcome.unwrap().unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert!(logs.contains("ERROR"));
        assert!(logs.contains("isn't a dir"));
    }

    #[test]
    fn resolved_is_absolute_for_missing_relative_path() {
        let p = resolved(Path::new("does/not/exist.csv"));
        assert!(p.is_absolute());
        assert!(p.ends_with("does/not/exist.csv"));
    }
}
