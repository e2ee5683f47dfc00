//! Employee Model
//!
//! The one validation policy for employee records lives here, so every
//! writer (HTTP handlers, the seed generator, tests) is held to the same
//! rules regardless of which storage engine sits underneath.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::util;

/// Earliest accepted hire date: 2020-01-01T00:00:00Z
pub const HIRE_DATE_EPOCH_MILLIS: i64 = 1_577_836_800_000;

/// Max length for employee names
pub const MAX_NAME_LEN: usize = 50;

/// Max length for department labels
pub const MAX_DEPARTMENT_LEN: usize = 50;

/// Employee record
///
/// `hire_date` is Unix millis in storage and `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Free-text grouping label
    pub department: String,
    pub salary: i64,
    #[serde(with = "util::date_millis")]
    pub hire_date: i64,
}

/// Create employee payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub department: String,
    pub salary: i64,
    #[serde(with = "util::date_millis")]
    pub hire_date: i64,
}

/// Update employee payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "util::option_date_millis"
    )]
    pub hire_date: Option<i64>,
}

/// Field-level validation failures for employee writes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmployeeValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field} is too long ({len} chars, max {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("salary must not be negative (got {0})")]
    NegativeSalary(i64),

    #[error("hire_date {} is before 2020-01-01", display_millis(*.0))]
    HireDateBeforeEpoch(i64),

    #[error("hire_date {} is in the future", display_millis(*.0))]
    HireDateInFuture(i64),
}

fn display_millis(millis: i64) -> String {
    util::format_date(millis).unwrap_or_else(|| millis.to_string())
}

impl EmployeeValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field } | Self::TooLong { field, .. } => *field,
            Self::NegativeSalary(_) => "salary",
            Self::HireDateBeforeEpoch(_) | Self::HireDateInFuture(_) => "hire_date",
        }
    }

    /// Error code reported to API clients
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyField { .. } => ErrorCode::RequiredField,
            Self::TooLong { .. } => ErrorCode::ValueOutOfRange,
            Self::NegativeSalary(_) => ErrorCode::SalaryNegative,
            Self::HireDateBeforeEpoch(_) | Self::HireDateInFuture(_) => {
                ErrorCode::HireDateOutOfRange
            }
        }
    }
}

impl From<EmployeeValidationError> for AppError {
    fn from(err: EmployeeValidationError) -> Self {
        AppError::with_message(err.code(), err.to_string()).with_detail("field", err.field())
    }
}

fn validate_text(value: &str, field: &'static str, max: usize) -> Result<(), EmployeeValidationError> {
    if value.trim().is_empty() {
        return Err(EmployeeValidationError::EmptyField { field });
    }
    let len = value.chars().count();
    if len > max {
        return Err(EmployeeValidationError::TooLong { field, len, max });
    }
    Ok(())
}

/// Check every field of an employee record against the write policy.
///
/// `now` is the upper bound for `hire_date` (Unix millis).
pub fn validate_fields(
    name: &str,
    department: &str,
    salary: i64,
    hire_date: i64,
    now: i64,
) -> Result<(), EmployeeValidationError> {
    validate_text(name, "name", MAX_NAME_LEN)?;
    validate_text(department, "department", MAX_DEPARTMENT_LEN)?;
    if salary < 0 {
        return Err(EmployeeValidationError::NegativeSalary(salary));
    }
    if hire_date < HIRE_DATE_EPOCH_MILLIS {
        return Err(EmployeeValidationError::HireDateBeforeEpoch(hire_date));
    }
    if hire_date > now {
        return Err(EmployeeValidationError::HireDateInFuture(hire_date));
    }
    Ok(())
}

impl EmployeeCreate {
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        salary: i64,
        hire_date: i64,
    ) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            salary,
            hire_date,
        }
    }

    pub fn validate(&self, now: i64) -> Result<(), EmployeeValidationError> {
        validate_fields(&self.name, &self.department, self.salary, self.hire_date, now)
    }

    /// Attach the id assigned by the store
    pub fn into_employee(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            department: self.department,
            salary: self.salary,
            hire_date: self.hire_date,
        }
    }
}

impl Employee {
    pub fn validate(&self, now: i64) -> Result<(), EmployeeValidationError> {
        validate_fields(&self.name, &self.department, self.salary, self.hire_date, now)
    }

    /// Apply a partial update in place. `id` is never touched.
    pub fn apply(&mut self, update: EmployeeUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(department) = update.department {
            self.department = department;
        }
        if let Some(salary) = update.salary {
            self.salary = salary;
        }
        if let Some(hire_date) = update.hire_date {
            self.hire_date = hire_date;
        }
    }
}

impl EmployeeUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.hire_date.is_none()
    }
}
