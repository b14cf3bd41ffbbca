//! Core domain logic for the employee roster.
//! This crate is the single source of truth for record rules and persistence.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::employee::{Employee, EmployeeValidationError, NameField, EMPLOYEE_ROW_LEN};
pub use repo::csv_repo::{
    CsvEmployeeRepository, EmployeeRepository, RepoError, RepoResult, EMPLOYEE_HEADER,
    LEGACY_EMPLOYEE_HEADER,
};
pub use service::employee_store::{
    display_employees, EmployeeStore, EmployeeUpdate, NewEmployee, StoreError,
    EMPTY_ROSTER_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
