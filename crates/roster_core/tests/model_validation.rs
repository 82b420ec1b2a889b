use roster_core::{Department, Employee, ValidationError};

#[test]
fn department_rejects_blank_fields_at_construction() {
    let err = Department::new("", "Building A").unwrap_err();
    assert_eq!(err, ValidationError::EmptyName);

    let err = Department::new("Engineering", "   ").unwrap_err();
    assert_eq!(err, ValidationError::EmptyLocation);
}

#[test]
fn department_rejects_blank_fields_on_mutation() {
    let mut department = Department::new("Engineering", "Building A").unwrap();

    assert_eq!(
        department.set_name("  ").unwrap_err(),
        ValidationError::EmptyName
    );
    assert_eq!(
        department.set_location("").unwrap_err(),
        ValidationError::EmptyLocation
    );

    // Failed mutation leaves the previous values observable.
    assert_eq!(department.name(), "Engineering");
    assert_eq!(department.location(), "Building A");

    department.set_name("Platform Engineering").unwrap();
    assert_eq!(department.name(), "Platform Engineering");
}

#[test]
fn new_department_is_unpersisted() {
    let department = Department::new("Engineering", "Building A").unwrap();
    assert_eq!(department.id(), None);
}

#[test]
fn employee_rejects_blank_fields() {
    let err = Employee::new("", "Engineer", 1).unwrap_err();
    assert_eq!(err, ValidationError::EmptyName);

    let err = Employee::new("Alice", " \t", 1).unwrap_err();
    assert_eq!(err, ValidationError::EmptyJobTitle);

    let mut employee = Employee::new("Alice", "Engineer", 1).unwrap();
    assert_eq!(
        employee.set_job_title("").unwrap_err(),
        ValidationError::EmptyJobTitle
    );
    assert_eq!(employee.job_title(), "Engineer");
}

#[test]
fn validation_errors_render_field_messages() {
    assert_eq!(
        ValidationError::EmptyName.to_string(),
        "name must be a non-empty string"
    );
    assert_eq!(
        ValidationError::UnknownDepartment(9999).to_string(),
        "department_id 9999 must reference a valid department"
    );
}

#[test]
fn department_serializes_with_stable_field_names() {
    let department = Department::new("Engineering", "Building A").unwrap();
    let json = serde_json::to_value(&department).unwrap();

    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["name"], "Engineering");
    assert_eq!(json["location"], "Building A");
}
