use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable detailed debug logging (global)
    #[arg(long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Enable verbose logging (global)
    #[arg(long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// JSON file with logging settings
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print every record of a csv file as one JSON line
    ReadCsv {
        path: PathBuf,
    },

    /// Append rows from a JSON array of objects to a csv file
    AppendCsv {
        /// Target csv file (created if missing)
        path: PathBuf,

        /// Column order, comma separated (e.g. user,secret)
        #[arg(long, value_delimiter = ',', required = true)]
        headers: Vec<String>,

        /// JSON file holding the rows
        #[arg(long, value_name = "FILE")]
        rows: PathBuf,

        /// Write the header row before the rows
        #[arg(long, default_value_t = false)]
        write_headers: bool,
    },

    /// Pretty print a JSON file
    ReadJson {
        path: PathBuf,
    },

    /// Create a directory and its parents unless it already exists
    Mkdir {
        path: PathBuf,
    },

    /// Remove a file if it exists
    Rm {
        path: PathBuf,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
