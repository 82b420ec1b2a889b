//! Department mapper contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate `Department` instances to/from `departments` rows.
//! - Serve as the existence-check capability for employee validation.
//!
//! # Invariants
//! - Every read reconstructs a fresh instance; departments are not routed
//!   through an identity registry (deliberate asymmetry with employees,
//!   see DESIGN.md).
//! - Row mapping is strictly positional: `(id, name, location)`.
//! - Write paths validate field invariants before issuing SQL.

use crate::model::department::Department;
use crate::repo::employee_repo::DepartmentExistence;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

const DEPARTMENT_SELECT_SQL: &str = "SELECT id, name, location FROM departments";

/// Mapper interface for organizational-unit CRUD operations.
pub trait DepartmentRepository {
    /// Constructs and immediately persists a department.
    fn create(&self, name: &str, location: &str) -> RepoResult<Department>;
    /// Inserts a new row and captures the storage-assigned id into the
    /// instance.
    fn save(&self, department: &mut Department) -> RepoResult<()>;
    /// Overwrites the row matching the instance's id with current values.
    fn update(&self, department: &Department) -> RepoResult<()>;
    /// Removes the row matching the instance's id and clears the id.
    fn delete(&self, department: &mut Department) -> RepoResult<()>;
    fn find_by_id(&self, id: i64) -> RepoResult<Option<Department>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Department>>;
    /// All rows, in storage-determined order.
    fn get_all(&self) -> RepoResult<Vec<Department>>;
    /// Drops the departments table.
    fn drop_table(&self) -> RepoResult<()>;
}

/// SQLite-backed department mapper.
#[derive(Debug)]
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Constructs a mapper over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn create(&self, name: &str, location: &str) -> RepoResult<Department> {
        let mut department = Department::new(name, location)?;
        self.save(&mut department)?;
        Ok(department)
    }

    fn save(&self, department: &mut Department) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO departments (name, location) VALUES (?1, ?2);",
            params![department.name(), department.location()],
        )?;
        department.set_id(Some(self.conn.last_insert_rowid()));
        Ok(())
    }

    fn update(&self, department: &Department) -> RepoResult<()> {
        let id = department.id().ok_or(RepoError::NotPersisted {
            entity: "department",
        })?;

        let changed = self.conn.execute(
            "UPDATE departments SET name = ?1, location = ?2 WHERE id = ?3;",
            params![department.name(), department.location(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&self, department: &mut Department) -> RepoResult<()> {
        let id = department.id().ok_or(RepoError::NotPersisted {
            entity: "department",
        })?;

        // No cascade and no guard: dependent employee rows keep their
        // department_id and may dangle from here on (see DESIGN.md).
        let changed = self
            .conn
            .execute("DELETE FROM departments WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        department.set_id(None);
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> RepoResult<Option<Department>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        row.map(department_from_parts).transpose()
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Department>> {
        let row = self
            .conn
            .query_row(
                &format!("{DEPARTMENT_SELECT_SQL} WHERE name = ?1;"),
                [name],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        row.map(department_from_parts).transpose()
    }

    fn get_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self.conn.prepare(&format!("{DEPARTMENT_SELECT_SQL};"))?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;

        let mut departments = Vec::new();
        for row in rows {
            departments.push(department_from_parts(row?)?);
        }
        Ok(departments)
    }

    fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS departments;")?;
        Ok(())
    }
}

impl DepartmentExistence for SqliteDepartmentRepository<'_> {
    fn department_exists(&self, department_id: i64) -> RepoResult<bool> {
        let hit = self
            .conn
            .query_row(
                "SELECT 1 FROM departments WHERE id = ?1 LIMIT 1;",
                [department_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(hit.is_some())
    }
}

/// Reconstructs a fresh instance from positional row values, rejecting
/// persisted state that violates model invariants instead of masking it.
fn department_from_parts((id, name, location): (i64, String, String)) -> RepoResult<Department> {
    let mut department = Department::new(name, location)
        .map_err(|err| RepoError::InvalidData(format!("department row {id}: {err}")))?;
    department.set_id(Some(id));
    Ok(department)
}
