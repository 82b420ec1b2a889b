//! Domain models for the department/employee roster.
//!
//! # Responsibility
//! - Define the two canonical records mapped onto relational rows.
//! - Enforce field invariants at construction and every later mutation.
//!
//! # Invariants
//! - Names, locations and job titles are never empty or whitespace-only at
//!   any observable point after construction.
//! - `id` is `None` until storage assigns a row id on first save.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod department;
pub mod employee;

/// Field-invariant violation raised before any storage mutation occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyLocation,
    EmptyJobTitle,
    /// The referenced department id does not resolve to a stored row.
    UnknownDepartment(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must be a non-empty string"),
            Self::EmptyLocation => write!(f, "location must be a non-empty string"),
            Self::EmptyJobTitle => write!(f, "job title must be a non-empty string"),
            Self::UnknownDepartment(id) => {
                write!(f, "department_id {id} must reference a valid department")
            }
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty or whitespace-only text, returning the caller's error.
pub(crate) fn require_non_blank(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(err);
    }
    Ok(())
}
