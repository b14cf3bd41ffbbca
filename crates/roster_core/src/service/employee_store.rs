//! Employee store use-case service.
//!
//! # Responsibility
//! - Own the ordered in-memory employee collection.
//! - Provide create/edit/delete/display entry points for front ends.
//! - Persist the whole collection after every successful mutation.
//!
//! # Invariants
//! - No two employees in the collection share an `id`.
//! - Indices are 0-based here; front ends translate from 1-based input.
//! - `edit` is all-or-nothing: either every provided field is applied or
//!   none is.
//! - After any call returns, the collection matches the last successful save.
//!   A failed save rolls the in-memory mutation back.

use crate::model::employee::{Employee, EmployeeValidationError};
use crate::repo::csv_repo::{EmployeeRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Listing text returned by `display` for an empty collection.
pub const EMPTY_ROSTER_MESSAGE: &str = "(No employees found)";

/// Service error for employee store use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// An employee with this id already exists.
    DuplicateId(String),
    /// Position is outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// A field value broke a record rule.
    Validation(EmployeeValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "employee with id `{id}` already exists"),
            Self::IndexOutOfRange { index, len } => write!(
                f,
                "invalid employee index {index}; roster has {len} employee(s)"
            ),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeValidationError> for StoreError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for creating one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEmployee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub department: String,
    /// Any formatting is accepted as long as ten digits remain.
    pub phone: String,
}

/// Partial update for an existing employee.
///
/// `None` keeps the current value. The id is never editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
}

impl EmployeeUpdate {
    /// Returns whether this update leaves every field unchanged.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.department.is_none()
            && self.phone.is_none()
    }

    fn apply_to(&self, employee: &mut Employee) -> Result<(), EmployeeValidationError> {
        if let Some(value) = &self.first_name {
            employee.set_first_name(value)?;
        }
        if let Some(value) = &self.last_name {
            employee.set_last_name(value)?;
        }
        if let Some(value) = &self.department {
            employee.set_department(value)?;
        }
        if let Some(value) = &self.phone {
            employee.set_phone(value)?;
        }
        Ok(())
    }
}

/// In-memory employee collection persisted through a repository.
pub struct EmployeeStore<R: EmployeeRepository> {
    repo: R,
    employees: Vec<Employee>,
}

impl<R: EmployeeRepository> EmployeeStore<R> {
    /// Loads the current collection from `repo`.
    ///
    /// A malformed stored row aborts the load with its validation error.
    pub fn load(repo: R) -> Result<Self, StoreError> {
        let employees = repo.load_all()?;
        Ok(Self { repo, employees })
    }

    /// Employees in display order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Employee> {
        self.employees.get(index)
    }

    /// Validates, appends and persists a new employee.
    ///
    /// # Errors
    /// - `DuplicateId` when the id is already present; nothing changes.
    /// - `Validation` when any field breaks a record rule; nothing changes.
    /// - `Repo` when persisting fails; the new employee is not kept.
    pub fn create(&mut self, request: NewEmployee) -> Result<&Employee, StoreError> {
        if self.employees.iter().any(|e| e.id() == request.id) {
            warn!("event=employee_create module=service status=error error_code=duplicate_id");
            return Err(StoreError::DuplicateId(request.id));
        }

        let employee = Employee::new(
            request.id,
            &request.first_name,
            &request.last_name,
            &request.department,
            &request.phone,
        )?;
        self.employees.push(employee);

        if let Err(err) = self.repo.save_all(&self.employees) {
            self.employees.pop();
            return Err(err.into());
        }

        let index = self.employees.len() - 1;
        info!(
            "event=employee_create module=service status=ok index={} count={}",
            index,
            self.employees.len()
        );
        Ok(&self.employees[index])
    }

    /// Applies `update` to the employee at `index` and persists.
    ///
    /// An empty update changes nothing and skips the save.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`.
    /// - `Validation` when any provided field is invalid; the employee keeps
    ///   all of its previous values.
    /// - `Repo` when persisting fails; the previous values are restored.
    pub fn edit(&mut self, index: usize, update: &EmployeeUpdate) -> Result<&Employee, StoreError> {
        let len = self.employees.len();
        let current = self
            .employees
            .get(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;

        if update.is_empty() {
            return Ok(&self.employees[index]);
        }

        let mut updated = current.clone();
        update.apply_to(&mut updated)?;

        let previous = std::mem::replace(&mut self.employees[index], updated);
        if let Err(err) = self.repo.save_all(&self.employees) {
            self.employees[index] = previous;
            return Err(err.into());
        }

        info!("event=employee_edit module=service status=ok index={}", index);
        Ok(&self.employees[index])
    }

    /// Removes and returns the employee at `index`, then persists.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`.
    /// - `Repo` when persisting fails; the employee is put back in place.
    pub fn delete(&mut self, index: usize) -> Result<Employee, StoreError> {
        let len = self.employees.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let removed = self.employees.remove(index);
        if let Err(err) = self.repo.save_all(&self.employees) {
            self.employees.insert(index, removed);
            return Err(err.into());
        }

        info!(
            "event=employee_delete module=service status=ok index={} count={}",
            index,
            self.employees.len()
        );
        Ok(removed)
    }

    /// Persists the current collection.
    pub fn save(&self) -> Result<(), StoreError> {
        self.repo.save_all(&self.employees)?;
        Ok(())
    }

    /// Renders a 1-based numbered listing, or `EMPTY_ROSTER_MESSAGE`.
    pub fn display(&self) -> String {
        display_employees(&self.employees)
    }
}

/// Formats employees as `<n>. <id> - <last>, <first> - <dept> - <phone>` lines.
pub fn display_employees(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return EMPTY_ROSTER_MESSAGE.to_string();
    }

    employees
        .iter()
        .enumerate()
        .map(|(i, employee)| format!("{}. {employee}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
