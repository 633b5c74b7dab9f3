use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::Span;

use crate::error::FsError;
use crate::table::{Record, Table};
use crate::utils::resolved;

/// Read a csv file with a header row and return its records keyed by header.
///
/// Values past the last header land in [`Table::extras`] and are logged at
/// warn. Nothing is returned on failure, not even the rows parsed before it.
pub fn read_delimited_table(path: &Path, log: &Span) -> Result<Table, FsError> {
    tracing::debug!(parent: log, path = %path.display(), "Trying to get csv file");
    match read_table(path, log) {
        Ok(table) => {
            tracing::info!(parent: log, path = %path.display(), rows = table.len(), "Data successfully extracted");
            Ok(table)
        }
        Err(e) => {
            tracing::error!(parent: log, error = %e, path = %resolved(path).display(), "Unable to read csv file");
            Err(e)
        }
    }
}

fn read_table(path: &Path, log: &Span) -> Result<Table, FsError> {
    let f = File::open(path).map_err(|source| FsError::Open { path: path.to_path_buf(), source })?;
    let csv_err = |source| FsError::Csv { path: path.to_path_buf(), source };

    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .flexible(true)
        .from_reader(f);
    let headers: Vec<String> = rdr.headers().map_err(csv_err)?.iter().map(str::to_owned).collect();

    let mut records = Vec::new();
    let mut extras = BTreeMap::new();
    for row in rdr.records() {
        let row = row.map_err(csv_err)?;
        if row.len() > headers.len() {
            let surplus: Vec<String> = row.iter().skip(headers.len()).map(str::to_owned).collect();
            tracing::warn!(
                parent: log,
                path = %path.display(),
                line = row.position().map(|p| p.line()).unwrap_or_default(),
                expected = headers.len(),
                found = row.len(),
                "Row has more fields than the header"
            );
            extras.insert(records.len(), surplus);
        }
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.clone(), v.to_owned()))
            .collect();
        records.push(record);
    }

    Ok(Table { headers, records, extras })
}
