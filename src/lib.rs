pub mod config;
pub mod document;
pub mod error;
pub mod table;
pub mod utils;

pub use crate::document::read_structured_file;
pub use crate::error::{ErrorKind, FsError};
pub use crate::table::{read_delimited_table, write_delimited_table, Record, Table};
pub use crate::utils::{ensure_directory, remove_file};
