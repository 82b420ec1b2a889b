//! Directory use-case service.
//!
//! # Responsibility
//! - Provide stable entry points combining both mappers.
//! - Expose the department → members traversal.
//!
//! # Invariants
//! - Service APIs never bypass mapper validation/persistence contracts.
//! - Member traversal routes through the employee identity registry.

use crate::model::department::Department;
use crate::repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
use crate::repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
use crate::repo::identity::EmployeeHandle;
use crate::repo::{RepoError, RepoResult};
use rusqlite::Connection;

/// Facade bundling a department mapper and an employee mapper over the
/// same migrated connection.
pub struct DirectoryService<'conn> {
    departments: SqliteDepartmentRepository<'conn>,
    employees: SqliteEmployeeRepository<'conn, SqliteDepartmentRepository<'conn>>,
}

impl<'conn> DirectoryService<'conn> {
    /// Builds the facade, wiring the department mapper in as the employee
    /// mapper's existence-check capability.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let departments = SqliteDepartmentRepository::try_new(conn)?;
        let employees =
            SqliteEmployeeRepository::try_new(conn, SqliteDepartmentRepository::try_new(conn)?)?;
        Ok(Self {
            departments,
            employees,
        })
    }

    /// Creates and persists a department.
    pub fn create_department(&self, name: &str, location: &str) -> RepoResult<Department> {
        self.departments.create(name, location)
    }

    /// Creates and persists an employee under an existing department.
    pub fn create_employee(
        &mut self,
        name: &str,
        job_title: &str,
        department_id: i64,
    ) -> RepoResult<EmployeeHandle> {
        self.employees.create(name, job_title, department_id)
    }

    pub fn find_department(&self, id: i64) -> RepoResult<Option<Department>> {
        self.departments.find_by_id(id)
    }

    pub fn find_employee(&mut self, id: i64) -> RepoResult<Option<EmployeeHandle>> {
        self.employees.find_by_id(id)
    }

    /// Members of `department`, freshly reconstructed through the employee
    /// identity registry.
    ///
    /// The collection is computed on demand, never stored on the
    /// department.
    pub fn members_of(&mut self, department: &Department) -> RepoResult<Vec<EmployeeHandle>> {
        let id = department.id().ok_or(RepoError::NotPersisted {
            entity: "department",
        })?;
        self.employees.find_by_department(id)
    }

    /// Direct access to the department mapper.
    pub fn departments(&self) -> &SqliteDepartmentRepository<'conn> {
        &self.departments
    }

    /// Direct access to the employee mapper.
    pub fn employees(
        &mut self,
    ) -> &mut SqliteEmployeeRepository<'conn, SqliteDepartmentRepository<'conn>> {
        &mut self.employees
    }
}
