//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `roster_core` end to end against an in-memory database.
//! - Keep output deterministic for quick local sanity checks.

use roster_core::{DirectoryService, RepoError};

fn main() {
    if let Err(err) = run() {
        eprintln!("roster smoke run failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), RepoError> {
    let conn = roster_core::open_db_in_memory()?;
    let mut directory = DirectoryService::try_new(&conn)?;

    let engineering = directory.create_department("Engineering", "Building A")?;
    let department_id = engineering.id().ok_or(RepoError::NotPersisted {
        entity: "department",
    })?;
    directory.create_employee("Alice", "Engineer", department_id)?;

    println!("roster_core version={}", roster_core::core_version());
    println!(
        "department id={department_id} name={} location={}",
        engineering.name(),
        engineering.location()
    );
    for member in directory.members_of(&engineering)? {
        let member = member.borrow();
        println!(
            "employee id={} name={} job_title={} department_id={}",
            member.id().unwrap_or(-1),
            member.name(),
            member.job_title(),
            member.department_id()
        );
    }
    Ok(())
}
