//! Employee repository contract and delimited-text implementation.
//!
//! # Responsibility
//! - Load and save the full employee collection.
//! - Keep CSV quoting and header handling inside the persistence boundary.
//!
//! # Invariants
//! - The backing file always starts with `EMPLOYEE_HEADER` after a save.
//! - A missing backing file is created with only the header row.
//! - Malformed rows abort the load; nothing is skipped except blank rows.

use crate::model::employee::{Employee, EmployeeValidationError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Header row written in front of every saved collection.
pub const EMPLOYEE_HEADER: [&str; 5] = ["id", "firstName", "lastName", "department", "phone"];

/// Header row written by earlier releases; still recognized on load.
pub const LEGACY_EMPLOYEE_HEADER: [&str; 5] = ["id", "fname", "lname", "department", "phNumber"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for the employee backing file.
#[derive(Debug)]
pub enum RepoError {
    /// The file could not be opened, created, or flushed.
    Io { path: PathBuf, source: io::Error },
    /// The delimited text could not be read or written.
    Csv { path: PathBuf, source: csv::Error },
    /// A stored row failed record validation.
    InvalidRow {
        line: u64,
        source: EmployeeValidationError,
    },
}

impl RepoError {
    /// Returns the record-level validation error for bad rows.
    pub fn validation_error(&self) -> Option<&EmployeeValidationError> {
        match self {
            Self::InvalidRow { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Metadata-only `key=value` summary for log lines.
    ///
    /// `Display` may echo field values from the file; this never does.
    fn log_fields(&self) -> String {
        match self {
            Self::Io { source, .. } => {
                format!("error_code=io_failed io_kind={:?}", source.kind())
            }
            Self::Csv { source, .. } => format!(
                "error_code=csv_failed line={}",
                source.position().map_or(0, |position| position.line())
            ),
            Self::InvalidRow { line, source } => format!(
                "error_code=invalid_row line={line} reason={}",
                source.code()
            ),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidRow { line, source } => {
                write!(f, "invalid employee row at line {line}: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::InvalidRow { source, .. } => Some(source),
        }
    }
}

/// Whole-collection persistence for employees.
pub trait EmployeeRepository {
    /// Reads every stored employee in file order.
    fn load_all(&self) -> RepoResult<Vec<Employee>>;
    /// Replaces the stored collection with `employees`, in order.
    fn save_all(&self, employees: &[Employee]) -> RepoResult<()>;
}

/// Delimited-text employee repository backed by a single file.
#[derive(Debug, Clone)]
pub struct CsvEmployeeRepository {
    path: PathBuf,
}

impl CsvEmployeeRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> RepoError {
        RepoError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn read_rows(&self, file: File) -> RepoResult<Vec<Employee>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut employees = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|err| self.csv_error(err))?;
            if index == 0 && is_header(&record) {
                continue;
            }
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            let line = record
                .position()
                .map(|position| position.line())
                .unwrap_or(index as u64 + 1);
            let fields: Vec<&str> = record.iter().collect();
            let employee = Employee::from_row(&fields)
                .map_err(|source| RepoError::InvalidRow { line, source })?;
            employees.push(employee);
        }

        Ok(employees)
    }

    /// Writes the full collection to a staged file next to the target, then
    /// renames it over the target. A failed write leaves the old file intact.
    fn write_rows(&self, employees: &[Employee]) -> RepoResult<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
                parent
            }
            None => Path::new("."),
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| self.io_error(err))?;
        {
            let mut writer = csv::Writer::from_writer(staged.as_file_mut());
            writer
                .write_record(EMPLOYEE_HEADER)
                .map_err(|err| self.csv_error(err))?;
            for employee in employees {
                writer
                    .write_record(employee.to_row())
                    .map_err(|err| self.csv_error(err))?;
            }
            writer.flush().map_err(|err| self.io_error(err))?;
        }
        staged
            .as_file()
            .sync_all()
            .map_err(|err| self.io_error(err))?;
        staged
            .persist(&self.path)
            .map_err(|err| self.io_error(err.error))?;
        Ok(())
    }
}

impl EmployeeRepository for CsvEmployeeRepository {
    fn load_all(&self) -> RepoResult<Vec<Employee>> {
        let started_at = Instant::now();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                self.write_rows(&[])?;
                info!(
                    "event=roster_load module=repo status=ok created=true count=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                let err = self.io_error(err);
                error!("event=roster_load module=repo status=error {}", err.log_fields());
                return Err(err);
            }
        };

        match self.read_rows(file) {
            Ok(employees) => {
                info!(
                    "event=roster_load module=repo status=ok created=false count={} duration_ms={}",
                    employees.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(employees)
            }
            Err(err) => {
                error!("event=roster_load module=repo status=error {}", err.log_fields());
                Err(err)
            }
        }
    }

    fn save_all(&self, employees: &[Employee]) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_rows(employees) {
            Ok(()) => {
                info!(
                    "event=roster_save module=repo status=ok count={} duration_ms={}",
                    employees.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=roster_save module=repo status=error {}", err.log_fields());
                Err(err)
            }
        }
    }
}

fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().eq(EMPLOYEE_HEADER) || record.iter().eq(LEGACY_EMPLOYEE_HEADER)
}
