use roster_core::db::open_db_in_memory;
use roster_core::{
    DepartmentRepository, RepoError, SqliteDepartmentRepository, ValidationError,
};
use rusqlite::Connection;

#[test]
fn create_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let department = repo.create("Engineering", "Building A").unwrap();
    let id = department.id().expect("create must assign an id");

    let loaded = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id(), Some(id));
    assert_eq!(loaded.name(), "Engineering");
    assert_eq!(loaded.location(), "Building A");
}

#[test]
fn create_rejects_invalid_fields_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let err = repo.create("  ", "Building A").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyName)
    ));

    assert!(repo.get_all().unwrap().is_empty());
}

#[test]
fn find_by_name_and_missing_lookups() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    repo.create("Sales", "Building B").unwrap();

    let found = repo.find_by_name("Sales").unwrap().unwrap();
    assert_eq!(found.location(), "Building B");

    assert!(repo.find_by_name("Marketing").unwrap().is_none());
    assert!(repo.find_by_id(9999).unwrap().is_none());
}

#[test]
fn get_all_returns_every_created_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let names = ["Engineering", "Sales", "Support"];
    for name in names {
        repo.create(name, "HQ").unwrap();
    }

    let all = repo.get_all().unwrap();
    assert_eq!(all.len(), names.len());
    for department in &all {
        let id = department.id().unwrap();
        let reloaded = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(&reloaded, department);
    }
}

#[test]
fn reads_reconstruct_fresh_instances() {
    // Departments are deliberately not identity-mapped: two loads of the
    // same row yield equal but independent values.
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let department = repo.create("Engineering", "Building A").unwrap();
    let id = department.id().unwrap();

    let mut first = repo.find_by_id(id).unwrap().unwrap();
    let second = repo.find_by_id(id).unwrap().unwrap();
    assert_eq!(first, second);

    first.set_location("Building Z").unwrap();
    assert_eq!(second.location(), "Building A");
}

#[test]
fn update_overwrites_row_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let mut department = repo.create("Engineering", "Building A").unwrap();
    let id = department.id().unwrap();

    department.set_location("Building C").unwrap();
    repo.update(&department).unwrap();
    let row_after_first = raw_department_row(&conn, id);

    repo.update(&department).unwrap();
    let row_after_second = raw_department_row(&conn, id);

    assert_eq!(row_after_first, (id, "Engineering".into(), "Building C".into()));
    assert_eq!(row_after_first, row_after_second);
}

#[test]
fn update_without_id_is_a_state_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let department = roster_core::Department::new("Engineering", "Building A").unwrap();
    let err = repo.update(&department).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotPersisted {
            entity: "department"
        }
    ));
}

#[test]
fn delete_removes_row_and_clears_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let mut department = repo.create("Engineering", "Building A").unwrap();
    let id = department.id().unwrap();

    repo.delete(&mut department).unwrap();
    assert_eq!(department.id(), None);
    assert!(repo.find_by_id(id).unwrap().is_none());

    // Deleting again is a state error now that the id is gone.
    let err = repo.delete(&mut department).unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted { .. }));
}

#[test]
fn update_against_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    let mut department = repo.create("Engineering", "Building A").unwrap();
    let kept = department.clone();
    repo.delete(&mut department).unwrap();

    let err = repo.update(&kept).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if Some(id) == kept.id()));
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteDepartmentRepository::try_new(&conn).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn drop_table_removes_the_table() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDepartmentRepository::try_new(&conn).unwrap();

    repo.drop_table().unwrap();

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'departments'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 0);
}

fn raw_department_row(conn: &Connection, id: i64) -> (i64, String, String) {
    conn.query_row(
        "SELECT id, name, location FROM departments WHERE id = ?1;",
        [id],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )
    .unwrap()
}
