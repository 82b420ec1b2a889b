//! Employee mapper contract and SQLite implementation.
//!
//! # Responsibility
//! - Translate `Employee` instances to/from `employees` rows.
//! - Own the identity registry so repeated loads of the same row return
//!   the same live instance.
//!
//! # Invariants
//! - Write paths confirm the referenced department exists before issuing
//!   SQL; reads never re-run that check (a dangling reference must stay
//!   loadable).
//! - At most one live instance per persisted row id.
//! - Row mapping is strictly positional:
//!   `(id, name, job_title, department_id)`.

use crate::model::employee::Employee;
use crate::model::ValidationError;
use crate::repo::identity::{EmployeeHandle, IdentityRegistry};
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::rc::Rc;

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, job_title, department_id FROM employees";

/// Raw positional column values of one `employees` row.
type EmployeeRow = (i64, String, String, i64);

/// Existence check for department references.
///
/// Injected into the employee mapper so the cross-entity validation is an
/// explicit capability instead of a dependency on the department module.
pub trait DepartmentExistence {
    /// Returns whether storage currently holds a department row with this id.
    fn department_exists(&self, department_id: i64) -> RepoResult<bool>;
}

/// Mapper interface for member CRUD operations.
///
/// Read operations take `&mut self` because they may refresh or extend the
/// identity registry.
pub trait EmployeeRepository {
    /// Constructs, validates and immediately persists an employee,
    /// returning the registered handle.
    fn create(&mut self, name: &str, job_title: &str, department_id: i64)
        -> RepoResult<EmployeeHandle>;
    /// Inserts when the instance has no id (capturing and registering the
    /// new id); otherwise performs an update-style write.
    fn save(&mut self, employee: &EmployeeHandle) -> RepoResult<()>;
    /// Overwrites the row matching the instance's id with current values.
    fn update(&self, employee: &EmployeeHandle) -> RepoResult<()>;
    /// Removes the row, the registry entry and the instance's id.
    fn delete(&mut self, employee: &EmployeeHandle) -> RepoResult<()>;
    /// Points the instance at another department after the eager existence
    /// check. In-memory only; persist with `update` or `save`.
    fn assign_department(
        &self,
        employee: &EmployeeHandle,
        department_id: i64,
    ) -> RepoResult<()>;
    fn find_by_id(&mut self, id: i64) -> RepoResult<Option<EmployeeHandle>>;
    fn find_by_name(&mut self, name: &str) -> RepoResult<Option<EmployeeHandle>>;
    /// Employees whose department reference equals `department_id`.
    fn find_by_department(&mut self, department_id: i64) -> RepoResult<Vec<EmployeeHandle>>;
    fn get_all(&mut self) -> RepoResult<Vec<EmployeeHandle>>;
    /// Drops the employees table and clears the whole registry.
    fn drop_table(&mut self) -> RepoResult<()>;
}

/// SQLite-backed employee mapper, generic over the department existence
/// capability.
#[derive(Debug)]
pub struct SqliteEmployeeRepository<'conn, D: DepartmentExistence> {
    conn: &'conn Connection,
    departments: D,
    registry: IdentityRegistry,
}

impl<'conn, D: DepartmentExistence> SqliteEmployeeRepository<'conn, D> {
    /// Constructs a mapper over a migrated connection. The registry starts
    /// empty and lives exactly as long as this value.
    pub fn try_new(conn: &'conn Connection, departments: D) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            departments,
            registry: IdentityRegistry::new(),
        })
    }

    /// Read access to the identity registry (test observability).
    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    fn ensure_department_exists(&self, department_id: i64) -> RepoResult<()> {
        if self.departments.department_exists(department_id)? {
            Ok(())
        } else {
            Err(ValidationError::UnknownDepartment(department_id).into())
        }
    }

    /// Identity-aware reconstruction: a registered id gets its mutable
    /// fields refreshed in place and the existing handle back; anything
    /// else is allocated and registered.
    fn handle_from_row(&mut self, (id, name, job_title, department_id): EmployeeRow)
        -> RepoResult<EmployeeHandle> {
        if let Some(handle) = self.registry.get(id) {
            {
                let mut employee = handle.borrow_mut();
                employee
                    .set_name(name)
                    .map_err(|err| invalid_row(id, err))?;
                employee
                    .set_job_title(job_title)
                    .map_err(|err| invalid_row(id, err))?;
                employee.set_department_id(department_id);
            }
            return Ok(handle);
        }

        let mut employee =
            Employee::new(name, job_title, department_id).map_err(|err| invalid_row(id, err))?;
        employee.set_id(Some(id));
        let handle = Rc::new(RefCell::new(employee));
        self.registry.insert(id, Rc::clone(&handle));
        Ok(handle)
    }
}

impl<D: DepartmentExistence> EmployeeRepository for SqliteEmployeeRepository<'_, D> {
    fn create(
        &mut self,
        name: &str,
        job_title: &str,
        department_id: i64,
    ) -> RepoResult<EmployeeHandle> {
        let employee = Employee::new(name, job_title, department_id)?;
        let handle = Rc::new(RefCell::new(employee));
        self.save(&handle)?;
        Ok(handle)
    }

    fn save(&mut self, employee: &EmployeeHandle) -> RepoResult<()> {
        let (maybe_id, department_id) = {
            let employee = employee.borrow();
            (employee.id(), employee.department_id())
        };
        self.ensure_department_exists(department_id)?;

        match maybe_id {
            Some(id) => {
                let employee = employee.borrow();
                let changed = self.conn.execute(
                    "UPDATE employees SET name = ?1, job_title = ?2, department_id = ?3 \
                     WHERE id = ?4;",
                    params![employee.name(), employee.job_title(), department_id, id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound(id));
                }
            }
            None => {
                {
                    let employee = employee.borrow();
                    self.conn.execute(
                        "INSERT INTO employees (name, job_title, department_id) \
                         VALUES (?1, ?2, ?3);",
                        params![employee.name(), employee.job_title(), department_id],
                    )?;
                }
                let id = self.conn.last_insert_rowid();
                employee.borrow_mut().set_id(Some(id));
                self.registry.insert(id, Rc::clone(employee));
            }
        }
        Ok(())
    }

    fn update(&self, employee: &EmployeeHandle) -> RepoResult<()> {
        let employee = employee.borrow();
        let id = employee.id().ok_or(RepoError::NotPersisted {
            entity: "employee",
        })?;
        self.ensure_department_exists(employee.department_id())?;

        let changed = self.conn.execute(
            "UPDATE employees SET name = ?1, job_title = ?2, department_id = ?3 WHERE id = ?4;",
            params![
                employee.name(),
                employee.job_title(),
                employee.department_id(),
                id
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&mut self, employee: &EmployeeHandle) -> RepoResult<()> {
        let id = employee.borrow().id().ok_or(RepoError::NotPersisted {
            entity: "employee",
        })?;

        let changed = self
            .conn
            .execute("DELETE FROM employees WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        self.registry.remove(id);
        employee.borrow_mut().set_id(None);
        Ok(())
    }

    fn assign_department(&self, employee: &EmployeeHandle, department_id: i64) -> RepoResult<()> {
        self.ensure_department_exists(department_id)?;
        employee.borrow_mut().set_department_id(department_id);
        Ok(())
    }

    fn find_by_id(&mut self, id: i64) -> RepoResult<Option<EmployeeHandle>> {
        let row = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                },
            )
            .optional()?;

        row.map(|row| self.handle_from_row(row)).transpose()
    }

    fn find_by_name(&mut self, name: &str) -> RepoResult<Option<EmployeeHandle>> {
        let row = self
            .conn
            .query_row(
                &format!("{EMPLOYEE_SELECT_SQL} WHERE name = ?1;"),
                [name],
                |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                },
            )
            .optional()?;

        row.map(|row| self.handle_from_row(row)).transpose()
    }

    fn find_by_department(&mut self, department_id: i64) -> RepoResult<Vec<EmployeeHandle>> {
        let rows = {
            let mut stmt = self
                .conn
                .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE department_id = ?1;"))?;
            let mapped = stmt.query_map([department_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;
            mapped.collect::<Result<Vec<EmployeeRow>, _>>()?
        };

        rows.into_iter()
            .map(|row| self.handle_from_row(row))
            .collect()
    }

    fn get_all(&mut self) -> RepoResult<Vec<EmployeeHandle>> {
        let rows = {
            let mut stmt = self.conn.prepare(&format!("{EMPLOYEE_SELECT_SQL};"))?;
            let mapped = stmt.query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;
            mapped.collect::<Result<Vec<EmployeeRow>, _>>()?
        };

        rows.into_iter()
            .map(|row| self.handle_from_row(row))
            .collect()
    }

    fn drop_table(&mut self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS employees;")?;
        // No rows remain, so no instance may be considered live.
        self.registry.clear();
        Ok(())
    }
}

fn invalid_row(id: i64, err: ValidationError) -> RepoError {
    RepoError::InvalidData(format!("employee row {id}: {err}"))
}
