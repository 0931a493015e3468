use course_registry::domain::model::Student;
use course_registry::{Registry, RegistryError};

fn slots(registry: &Registry, code: &str) -> usize {
    registry.course(code).unwrap().available_slots()
}

fn assert_invariants(registry: &Registry) {
    for course in registry.courses() {
        assert!(
            course.enrolled_count() <= course.capacity(),
            "{} over capacity",
            course.code()
        );
        for id in course.enrolled() {
            assert!(registry.student(id).unwrap().is_registered(course.code()));
        }
    }
    for student in registry.students() {
        for code in student.registered_courses() {
            let course = registry.course(code).unwrap();
            assert!(course.enrolled().iter().any(|id| id == student.id()));
        }
    }
}

#[test]
fn test_register_twice_then_drop_math101() {
    let mut registry = Registry::sample();
    assert_eq!(slots(&registry, "MATH101"), 2);

    registry.register("S001", "MATH101").unwrap();
    assert_eq!(slots(&registry, "MATH101"), 1);

    let err = registry.register("S001", "MATH101").unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateRegistration { .. }));
    assert_eq!(slots(&registry, "MATH101"), 1);
    assert_eq!(registry.course("MATH101").unwrap().enrolled().len(), 1);
    assert_eq!(registry.registered_courses("S001").unwrap().len(), 1);

    registry.drop_course("S001", "MATH101").unwrap();
    assert_eq!(slots(&registry, "MATH101"), 2);
    assert!(registry.registered_courses("S001").unwrap().is_empty());
    assert_invariants(&registry);
}

#[test]
fn test_fill_cs101_then_reject_fourth_student() {
    let mut registry = Registry::sample();
    registry.add_student(Student::new("S003", "Carol")).unwrap();
    registry.add_student(Student::new("S004", "Dave")).unwrap();

    registry.register("S001", "CS101").unwrap();
    registry.register("S002", "CS101").unwrap();
    registry.register("S003", "CS101").unwrap();
    assert_eq!(slots(&registry, "CS101"), 0);

    let err = registry.register("S004", "CS101").unwrap_err();
    assert!(matches!(err, RegistryError::CapacityExceeded { capacity: 3, .. }));
    assert_eq!(slots(&registry, "CS101"), 0);
    assert!(registry.registered_courses("S004").unwrap().is_empty());
    assert_invariants(&registry);
}

#[test]
fn test_drop_unregistered_course_changes_nothing() {
    let mut registry = Registry::sample();
    registry.register("S002", "CS101").unwrap();

    let err = registry.drop_course("S001", "CS101").unwrap_err();
    assert!(matches!(err, RegistryError::NotRegistered { .. }));
    assert_eq!(
        registry.course("CS101").unwrap().enrolled(),
        ["S002".to_string()]
    );
    assert!(registry.registered_courses("S001").unwrap().is_empty());
    assert_invariants(&registry);
}

#[test]
fn test_unknown_student_never_mutates() {
    let mut registry = Registry::sample();

    assert!(matches!(
        registry.register("S999", "CS101"),
        Err(RegistryError::StudentNotFound { .. })
    ));
    assert!(matches!(
        registry.drop_course("S999", "CS101"),
        Err(RegistryError::StudentNotFound { .. })
    ));
    assert!(matches!(
        registry.registered_courses("S999"),
        Err(RegistryError::StudentNotFound { .. })
    ));

    for course in registry.courses() {
        assert_eq!(course.enrolled_count(), 0);
    }
    assert_eq!(registry.students().count(), 2);
}

#[test]
fn test_interleaved_operations_keep_invariants() {
    let mut registry = Registry::sample();
    let operations = [
        ("register", "S001", "PHYS101"),
        ("register", "S002", "PHYS101"),
        ("register", "S001", "PHYS101"),
        ("drop", "S002", "MATH101"),
        ("register", "S002", "MATH101"),
        ("drop", "S001", "PHYS101"),
        ("register", "S001", "CS101"),
        ("drop", "S001", "PHYS101"),
    ];

    for (op, student, course) in operations {
        let _ = match op {
            "register" => registry.register(student, course),
            _ => registry.drop_course(student, course),
        };
        assert_invariants(&registry);
    }

    assert_eq!(slots(&registry, "PHYS101"), 1);
    assert_eq!(slots(&registry, "MATH101"), 1);
    assert_eq!(slots(&registry, "CS101"), 2);
}
