use coursetrack_core::{Course, CourseDraft, CourseValidationError};

#[test]
fn valid_draft_passes_validation() {
    let draft = CourseDraft::new(3210, "CS", "Benedum Hall 102");
    assert!(draft.validate().is_ok());
}

#[test]
fn empty_department_is_rejected() {
    let draft = CourseDraft::new(3210, "", "Benedum Hall 102");
    assert_eq!(
        draft.validate().unwrap_err(),
        CourseValidationError::EmptyDepartment
    );

    let whitespace = CourseDraft::new(3210, "   ", "Benedum Hall 102");
    assert_eq!(
        whitespace.validate().unwrap_err(),
        CourseValidationError::EmptyDepartment
    );
}

#[test]
fn empty_location_is_rejected() {
    let draft = CourseDraft::new(3210, "CS", "");
    assert_eq!(
        draft.validate().unwrap_err(),
        CourseValidationError::EmptyLocation
    );
}

#[test]
fn zero_and_negative_numbers_are_rejected() {
    let zero = CourseDraft::new(0, "CS", "Benedum Hall 102");
    assert_eq!(
        zero.validate().unwrap_err(),
        CourseValidationError::NonPositiveNumber(0)
    );

    let negative = CourseDraft::new(-7, "CS", "Benedum Hall 102");
    assert_eq!(
        negative.validate().unwrap_err(),
        CourseValidationError::NonPositiveNumber(-7)
    );
}

#[test]
fn course_matches_requires_all_three_fields() {
    let course = Course {
        id: 1,
        number: 1501,
        department: "MATH".to_string(),
        location: "Thackeray 704".to_string(),
    };

    assert!(course.matches(1501, "MATH", "Thackeray 704"));
    assert!(!course.matches(1501, "MATH", "Thackeray 703"));
    assert!(!course.matches(1501, "math", "Thackeray 704"));
    assert!(!course.matches(1502, "MATH", "Thackeray 704"));
}

#[test]
fn course_serialization_uses_expected_wire_fields() {
    let course = Course {
        id: 42,
        number: 447,
        department: "CS".to_string(),
        location: "Sennott Square 5313".to_string(),
    };

    let json = serde_json::to_value(&course).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["number"], 447);
    assert_eq!(json["department"], "CS");
    assert_eq!(json["location"], "Sennott Square 5313");

    let decoded: Course = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, course);
}

#[test]
fn draft_round_trips_through_course() {
    let course = Course {
        id: 9,
        number: 2210,
        department: "EE".to_string(),
        location: "Annex 2".to_string(),
    };

    let draft = course.draft();
    assert_eq!(draft, CourseDraft::new(2210, "EE", "Annex 2"));
    assert!(course.validate().is_ok());
}
