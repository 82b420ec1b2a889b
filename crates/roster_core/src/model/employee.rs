//! Employee domain model.
//!
//! # Responsibility
//! - Represent one member row in memory, including its department
//!   reference.
//! - Keep name/job title non-blank through every constructor and setter.
//!
//! # Invariants
//! - `department_id` existence is checked by the repository write paths
//!   through the `DepartmentExistence` capability; this model only carries
//!   the value.
//! - `id` is `Some` exactly while the record is persisted.

use super::{require_non_blank, ValidationError};
use serde::Serialize;

/// One member of an organizational unit.
///
/// Mutation of `department_id` goes through
/// `EmployeeRepository::assign_department`, which runs the eager existence
/// check before the value lands here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: Option<i64>,
    name: String,
    job_title: String,
    department_id: i64,
}

impl Employee {
    /// Creates an unpersisted employee after validating the string fields.
    pub fn new(
        name: impl Into<String>,
        job_title: impl Into<String>,
        department_id: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let job_title = job_title.into();
        require_non_blank(&name, ValidationError::EmptyName)?;
        require_non_blank(&job_title, ValidationError::EmptyJobTitle)?;
        Ok(Self {
            id: None,
            name,
            job_title,
            department_id,
        })
    }

    /// Storage-assigned row id; `None` while unpersisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require_non_blank(&name, ValidationError::EmptyName)?;
        self.name = name;
        Ok(())
    }

    pub fn set_job_title(&mut self, job_title: impl Into<String>) -> Result<(), ValidationError> {
        let job_title = job_title.into();
        require_non_blank(&job_title, ValidationError::EmptyJobTitle)?;
        self.job_title = job_title;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    /// Existence-checked by the repository before this is called.
    pub(crate) fn set_department_id(&mut self, department_id: i64) {
        self.department_id = department_id;
    }
}
