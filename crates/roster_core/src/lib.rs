//! Core persistence layer for the department/employee roster.
//! This crate is the single source of truth for record-to-row mapping
//! invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::Department;
pub use model::employee::Employee;
pub use model::ValidationError;
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::employee_repo::{
    DepartmentExistence, EmployeeRepository, SqliteEmployeeRepository,
};
pub use repo::identity::{EmployeeHandle, IdentityRegistry};
pub use repo::{RepoError, RepoResult};
pub use service::directory_service::DirectoryService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
