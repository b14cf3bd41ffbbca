//! Employee domain model.
//!
//! # Responsibility
//! - Define the validated employee record persisted by the roster.
//! - Own every field rule (name, department, phone) in one place.
//!
//! # Invariants
//! - Every constructed `Employee` satisfies all field rules.
//! - Field setters are the only mutation path; a failed setter leaves the
//!   record unchanged.
//! - `id` is fixed at construction and has no setter.
//! - Phone is stored as exactly 10 ASCII digits and formatted on read.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of fields in a persisted employee row.
pub const EMPLOYEE_ROW_LEN: usize = 5;

const PHONE_DIGITS: usize = 10;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s\-']+$").expect("valid name regex"));
static NAME_LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]").expect("valid name letter regex"));
static DEPARTMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid department regex"));
static NON_DIGIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]+").expect("valid non-digit regex"));

/// Which name field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
    First,
    Last,
}

impl Display for NameField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first name"),
            Self::Last => write!(f, "last name"),
        }
    }
}

/// Field-level validation failure for employee records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Name is empty, has no letter, or contains a disallowed character.
    InvalidName { field: NameField, value: String },
    /// Department is not exactly three letters.
    InvalidDepartment(String),
    /// Phone does not reduce to exactly ten digits.
    InvalidPhone { digits: usize },
    /// Persisted row does not have exactly five fields.
    InvalidRecord { fields: usize },
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName { field, value } if value.trim().is_empty() => {
                write!(f, "{field} cannot be empty")
            }
            Self::InvalidName { field, value } => write!(
                f,
                "{field} `{}` may only contain letters, spaces, hyphens and apostrophes",
                value.trim()
            ),
            Self::InvalidDepartment(value) => write!(
                f,
                "department must be exactly 3 letters, got `{}`",
                value.trim()
            ),
            Self::InvalidPhone { digits } => write!(
                f,
                "phone number must have exactly {PHONE_DIGITS} digits, got {digits}"
            ),
            Self::InvalidRecord { fields } => write!(
                f,
                "employee row must have {EMPLOYEE_ROW_LEN} fields \
                 (id,firstName,lastName,department,phone), got {fields}"
            ),
        }
    }
}

impl EmployeeValidationError {
    /// Stable reason code for diagnostics. Never includes the rejected value.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName {
                field: NameField::First,
                ..
            } => "invalid_first_name",
            Self::InvalidName {
                field: NameField::Last,
                ..
            } => "invalid_last_name",
            Self::InvalidDepartment(_) => "invalid_department",
            Self::InvalidPhone { .. } => "invalid_phone",
            Self::InvalidRecord { .. } => "invalid_record",
        }
    }
}

impl Error for EmployeeValidationError {}

/// Validated employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EmployeeWire", into = "EmployeeWire")]
pub struct Employee {
    id: String,
    first_name: String,
    last_name: String,
    department: String,
    phone_digits: String,
}

/// Unvalidated serde shape; converted through `Employee::new`.
#[derive(Serialize, Deserialize)]
struct EmployeeWire {
    id: String,
    first_name: String,
    last_name: String,
    department: String,
    phone: String,
}

impl TryFrom<EmployeeWire> for Employee {
    type Error = EmployeeValidationError;

    fn try_from(wire: EmployeeWire) -> Result<Self, Self::Error> {
        Employee::new(
            wire.id,
            &wire.first_name,
            &wire.last_name,
            &wire.department,
            &wire.phone,
        )
    }
}

impl From<Employee> for EmployeeWire {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            department: employee.department,
            phone: employee.phone_digits,
        }
    }
}

impl Employee {
    /// Creates a validated employee.
    ///
    /// # Errors
    /// - `InvalidName` when either name breaks the name rule.
    /// - `InvalidDepartment` when the department is not three letters.
    /// - `InvalidPhone` when the phone does not contain exactly ten digits.
    pub fn new(
        id: impl Into<String>,
        first_name: &str,
        last_name: &str,
        department: &str,
        phone: &str,
    ) -> Result<Self, EmployeeValidationError> {
        Ok(Self {
            id: id.into(),
            first_name: normalize_name(NameField::First, first_name)?,
            last_name: normalize_name(NameField::Last, last_name)?,
            department: normalize_department(department)?,
            phone_digits: normalize_phone(phone)?,
        })
    }

    /// Rebuilds an employee from a persisted row.
    ///
    /// Field rules apply exactly as in `new`, so stored data is re-validated on
    /// every load.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Result<Self, EmployeeValidationError> {
        match row {
            [id, first_name, last_name, department, phone] => Self::new(
                id.as_ref(),
                first_name.as_ref(),
                last_name.as_ref(),
                department.as_ref(),
                phone.as_ref(),
            ),
            _ => Err(EmployeeValidationError::InvalidRecord { fields: row.len() }),
        }
    }

    /// Returns the persisted row: `[id, first, last, department, raw digits]`.
    pub fn to_row(&self) -> [String; EMPLOYEE_ROW_LEN] {
        [
            self.id.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.department.clone(),
            self.phone_digits.clone(),
        ]
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    /// Returns the phone formatted as `(XXX)YYY-ZZZZ`.
    pub fn phone(&self) -> String {
        let digits = &self.phone_digits;
        format!("({}){}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
    }

    /// Returns the stored ten phone digits without formatting.
    pub fn raw_phone(&self) -> &str {
        &self.phone_digits
    }

    pub fn set_first_name(&mut self, value: &str) -> Result<(), EmployeeValidationError> {
        self.first_name = normalize_name(NameField::First, value)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> Result<(), EmployeeValidationError> {
        self.last_name = normalize_name(NameField::Last, value)?;
        Ok(())
    }

    pub fn set_department(&mut self, value: &str) -> Result<(), EmployeeValidationError> {
        self.department = normalize_department(value)?;
        Ok(())
    }

    /// Accepts any punctuation around the digits, e.g. `317-555-1212`.
    pub fn set_phone(&mut self, value: &str) -> Result<(), EmployeeValidationError> {
        self.phone_digits = normalize_phone(value)?;
        Ok(())
    }
}

impl Display for Employee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}, {} - {} - {}",
            self.id,
            self.last_name,
            self.first_name,
            self.department,
            self.phone()
        )
    }
}

fn normalize_name(field: NameField, value: &str) -> Result<String, EmployeeValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !NAME_RE.is_match(trimmed) || !NAME_LETTER_RE.is_match(trimmed) {
        return Err(EmployeeValidationError::InvalidName {
            field,
            value: value.to_string(),
        });
    }
    Ok(title_case(trimmed))
}

fn normalize_department(value: &str) -> Result<String, EmployeeValidationError> {
    let normalized = value.trim().to_ascii_uppercase();
    if !DEPARTMENT_RE.is_match(&normalized) {
        return Err(EmployeeValidationError::InvalidDepartment(value.to_string()));
    }
    Ok(normalized)
}

fn normalize_phone(value: &str) -> Result<String, EmployeeValidationError> {
    let digits = NON_DIGIT_RE.replace_all(value, "").into_owned();
    if digits.len() != PHONE_DIGITS {
        return Err(EmployeeValidationError::InvalidPhone {
            digits: digits.len(),
        });
    }
    Ok(digits)
}

/// Uppercases a letter at the start of the value or after any non-letter and
/// lowercases every other letter.
fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut word_start = true;
    for ch in value.chars() {
        if ch.is_ascii_alphabetic() {
            if word_start {
                result.push(ch.to_ascii_uppercase());
            } else {
                result.push(ch.to_ascii_lowercase());
            }
            word_start = false;
        } else {
            result.push(ch);
            word_start = true;
        }
    }
    result
}
