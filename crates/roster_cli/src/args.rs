//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Interactive employee roster backed by a CSV file
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the employee CSV file (created if missing)
    #[arg(long, default_value = "employee_data.csv")]
    pub file: PathBuf,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, default_value_t = roster_core::default_log_level().to_string())]
    pub log_level: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
