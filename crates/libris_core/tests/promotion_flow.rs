use libris_core::{
    begin_promotion, Library, LibraryPaths, PromotionDecision, PromotionError, PromotionPolicy,
    Student,
};
use tempfile::TempDir;
use uuid::Uuid;

fn open_library(dir: &TempDir) -> Library {
    Library::open(LibraryPaths::new(dir.path()))
}

fn seed(library: &mut Library, entries: &[(&str, &str)]) {
    for (last_name, class_label) in entries {
        library
            .add_student(Student::new(
                *last_name,
                "Анна",
                "Павловна",
                *class_label,
                "А",
                Vec::new(),
            ))
            .unwrap();
    }
}

fn class_of<'a>(library: &'a Library, last_name: &str) -> &'a str {
    library
        .students()
        .iter()
        .find(|s| s.last_name == last_name)
        .map(|s| s.class_label.as_str())
        .unwrap()
}

#[test]
fn scan_increments_plain_numeric_classes_only() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(
        &mut library,
        &[("Иванова", "5"), ("Петрова", "10"), ("Экстерн", "prep")],
    );

    let run = begin_promotion(&mut library, &PromotionPolicy::default());
    assert!(run.ambiguous().is_empty());
    assert!(run.is_resolved());

    assert_eq!(class_of(&library, "Иванова"), "6");
    assert_eq!(class_of(&library, "Петрова"), "11");
    assert_eq!(class_of(&library, "Экстерн"), "prep");
}

#[test]
fn exception_and_max_grades_enter_the_worklist_unincremented() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Девятова", "9"), ("Выпускова", "11")]);

    let run = begin_promotion(&mut library, &PromotionPolicy::default());
    assert_eq!(run.ambiguous().len(), 2);
    assert_eq!(run.undecided(), 2);

    let ninth = &run.ambiguous()[0];
    assert_eq!(ninth.class_label, "9");
    assert!(!ninth.at_max_label);
    assert_eq!(ninth.full_name, "Девятова Анна Павловна");

    let terminal = &run.ambiguous()[1];
    assert_eq!(terminal.class_label, "11");
    assert!(terminal.at_max_label);

    assert_eq!(class_of(&library, "Девятова"), "9");
    assert_eq!(class_of(&library, "Выпускова"), "11");
}

#[test]
fn empty_worklist_commits_immediately_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Иванова", "5")]);

    let mut run = begin_promotion(&mut library, &PromotionPolicy::default());
    run.commit(&mut library).unwrap();

    let reopened = open_library(&dir);
    assert_eq!(class_of(&reopened, "Иванова"), "6");
}

#[test]
fn commit_requires_a_decision_for_every_ambiguous_student() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Девятова", "9"), ("Выпускова", "11")]);

    let mut run = begin_promotion(&mut library, &PromotionPolicy::default());
    let ninth_id = run.ambiguous()[0].id;
    let terminal_id = run.ambiguous()[1].id;

    run.decide(ninth_id, PromotionDecision::Promote).unwrap();
    let err = run.commit(&mut library).unwrap_err();
    assert!(matches!(err, PromotionError::PendingDecisions { undecided: 1 }));
    // The refused commit leaves the worklist intact.
    assert_eq!(run.ambiguous().len(), 2);
    assert_eq!(class_of(&library, "Девятова"), "9");

    run.decide(terminal_id, PromotionDecision::Promote).unwrap();
    run.commit(&mut library).unwrap();
    assert_eq!(class_of(&library, "Девятова"), "10");
    assert_eq!(class_of(&library, "Выпускова"), "11");
}

#[test]
fn delete_decision_removes_the_student_and_their_debt() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    library
        .add_student(Student::new(
            "Выпускова",
            "Анна",
            "Павловна",
            "11",
            "А",
            vec!["Мцыри - Лермонтов".to_string()],
        ))
        .unwrap();

    let mut run = begin_promotion(&mut library, &PromotionPolicy::default());
    let id = run.ambiguous()[0].id;
    run.decide(id, PromotionDecision::Delete).unwrap();
    run.commit(&mut library).unwrap();

    assert!(library.students().is_empty());
    let reopened = open_library(&dir);
    assert!(reopened.students().is_empty());
}

#[test]
fn promote_at_the_max_label_keeps_the_class() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Выпускова", "11")]);

    let mut run = begin_promotion(&mut library, &PromotionPolicy::default());
    let id = run.ambiguous()[0].id;
    run.decide(id, PromotionDecision::Promote).unwrap();
    run.commit(&mut library).unwrap();

    assert_eq!(class_of(&library, "Выпускова"), "11");
}

#[test]
fn cancel_keeps_scan_increments_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Иванова", "5"), ("Девятова", "9")]);

    let run = begin_promotion(&mut library, &PromotionPolicy::default());
    assert_eq!(run.ambiguous().len(), 1);
    run.cancel(&mut library).unwrap();

    let reopened = open_library(&dir);
    assert_eq!(class_of(&reopened, "Иванова"), "6");
    assert_eq!(class_of(&reopened, "Девятова"), "9");
}

#[test]
fn decisions_are_rejected_for_students_outside_the_worklist() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Девятова", "9")]);

    let mut run = begin_promotion(&mut library, &PromotionPolicy::default());
    let stranger = Uuid::new_v4();
    let err = run.decide(stranger, PromotionDecision::Delete).unwrap_err();
    assert!(matches!(err, PromotionError::UnknownStudent(id) if id == stranger));
}

#[test]
fn exception_grade_is_a_policy_parameter() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    seed(&mut library, &[("Четверкина", "4"), ("Девятова", "9")]);

    let policy = PromotionPolicy {
        exception_grade: "4".to_string(),
    };
    let run = begin_promotion(&mut library, &policy);
    assert_eq!(run.ambiguous().len(), 1);
    assert_eq!(run.ambiguous()[0].class_label, "4");

    assert_eq!(class_of(&library, "Девятова"), "10");
}

#[test]
fn all_text_class_list_leaves_only_the_exception_rule() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = open_library(&dir);
    library
        .replace_config(
            vec!["junior".to_string(), "senior".to_string()],
            vec!["А".to_string()],
        )
        .unwrap();
    seed(&mut library, &[("Иванова", "5"), ("Девятова", "9")]);

    let run = begin_promotion(&mut library, &PromotionPolicy::default());
    assert_eq!(run.ambiguous().len(), 1);
    assert_eq!(run.ambiguous()[0].class_label, "9");
    assert_eq!(class_of(&library, "Иванова"), "6");
}
