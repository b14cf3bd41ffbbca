//! Interactive front end for the employee roster.
//!
//! # Responsibility
//! - Parse command-line configuration and bootstrap logging.
//! - Load the store and hand it to the menu loop.

pub mod args;
pub mod menu;

use args::Cli;
use log::info;
use menu::Menu;
use roster_core::{init_logging, CsvEmployeeRepository, EmployeeStore, LoggingError, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Startup or terminal I/O failure that ends the process.
#[derive(Debug)]
pub enum CliError {
    Logging(LoggingError),
    Load(StoreError),
    Io(io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "failed to initialize logging: {err}"),
            Self::Load(err) => write!(f, "failed to load employees: {err}"),
            Self::Io(err) => write!(f, "terminal I/O failed: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Parses process arguments and runs the menu on stdin/stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse_args();
    if let Some(log_dir) = &cli.log_dir {
        let log_dir = absolute_dir(log_dir)?;
        init_logging(&cli.log_level, &log_dir).map_err(CliError::Logging)?;
    }

    let stdin = io::stdin();
    run_with(&cli, stdin.lock(), io::stdout())
}

/// Loads the backing file named by `cli` and runs the menu over the given streams.
pub fn run_with<I: BufRead, O: Write>(cli: &Cli, input: I, output: O) -> Result<(), CliError> {
    let repo = CsvEmployeeRepository::new(&cli.file);
    let mut store = EmployeeStore::load(repo).map_err(CliError::Load)?;
    info!("event=menu_start module=cli status=ok count={}", store.len());

    Menu::new(&mut store, input, output).run()?;

    info!("event=menu_exit module=cli status=ok count={}", store.len());
    Ok(())
}

fn absolute_dir(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
