//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::search::session::SessionOptions;

/// Search the Property table interactively.
#[derive(Parser, Debug)]
#[command(name = "property_search")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// SQLite database holding the Property table
    #[arg(
        short = 'd',
        long = "database",
        env = "PROPERTY_DB",
        value_name = "PATH",
        default_value = "properties.sqlite3"
    )]
    pub database: PathBuf,

    /// SQL file applied before the session starts (creates the file if needed)
    #[arg(long = "schema", value_name = "SQL_FILE")]
    pub schema: Option<PathBuf>,

    /// Output format for search results
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Print each query before running it
    #[arg(long = "show-query")]
    pub show_query: bool,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            format: self.format,
            show_query: self.show_query,
        }
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
