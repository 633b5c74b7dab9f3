use std::fs::{File, OpenOptions};
use std::path::Path;

use csv::{Terminator, Writer, WriterBuilder};
use tracing::Span;

use crate::error::FsError;
use crate::table::Record;
use crate::utils::resolved;

/// Append `rows` to the csv file at `path`, columns in `headers` order.
///
/// A header absent from a row is written empty. A row key absent from
/// `headers` fails the call; rows before it stay in the file.
pub fn write_delimited_table(
    path: &Path,
    rows: &[Record],
    headers: &[String],
    write_headers: bool,
    log: &Span,
) -> Result<(), FsError> {
    tracing::info!(parent: log, rows = rows.len(), path = %resolved(path).display(), "Adding rows in file");
    append_rows(path, rows, headers, write_headers).inspect_err(|e| {
        tracing::error!(parent: log, error = %e, path = %resolved(path).display(), "Unable to add lines");
    })
}

fn append_rows(path: &Path, rows: &[Record], headers: &[String], write_headers: bool) -> Result<(), FsError> {
    let f = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|source| FsError::Open { path: path.to_path_buf(), source })?;
    let mut w = WriterBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .terminator(Terminator::CRLF)
        .from_writer(f);

    let written = write_all(&mut w, path, rows, headers, write_headers);
    // flush even after a bad row so the rows before it land on disk
    let flushed = w
        .flush()
        .map_err(|e| FsError::CsvWrite { path: path.to_path_buf(), source: e.into() });
    written.and(flushed)
}

fn write_all(
    w: &mut Writer<File>,
    path: &Path,
    rows: &[Record],
    headers: &[String],
    write_headers: bool,
) -> Result<(), FsError> {
    let write_err = |source| FsError::CsvWrite { path: path.to_path_buf(), source };

    if write_headers {
        w.write_record(headers).map_err(write_err)?;
    }
    for row in rows {
        if let Some(field) = row.keys().find(|k| !headers.contains(k)) {
            return Err(FsError::UnknownField { path: path.to_path_buf(), field: field.clone() });
        }
        let fields = headers.iter().map(|h| row.get(h).map(String::as_str).unwrap_or(""));
        w.write_record(fields).map_err(write_err)?;
    }
    Ok(())
}
