//! Comma-delimited tables: one header row, then one record per line.

use std::collections::BTreeMap;

use serde::Serialize;

pub mod reader_csv;
pub mod writer_csv;

pub use reader_csv::read_delimited_table;
pub use writer_csv::write_delimited_table;

/// One row, keyed by column name.
pub type Record = BTreeMap<String, String>;

/// Headers in file order plus the records read under them.
///
/// Every record's keys are a subset of `headers`; short rows simply lack the
/// trailing columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    /// Values past the last header, by index into `records`.
    pub extras: BTreeMap<usize, Vec<String>>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
