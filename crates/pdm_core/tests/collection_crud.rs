use chrono::{NaiveDate, NaiveDateTime};
use pdm_core::{
    Collection, Contact, ContactDraft, ContactPatch, FinanceDraft, FinancePatch, FinanceRecord,
    LoadStatus, Note, NoteDraft, NotePatch, RepoError, StorageConfig, Task, TaskDraft, TaskPatch,
    TaskPriority, ValidationError,
};
use std::path::Path;

fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn evening() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 2)
        .unwrap()
        .and_hms_opt(18, 45, 10)
        .unwrap()
}

fn open<R: pdm_core::Record>(dir: &Path) -> Collection<R> {
    StorageConfig::in_dir(dir).open::<R>().unwrap().with_clock(morning)
}

#[test]
fn fresh_collection_allocates_sequential_ids_from_one() {
    let dir = tempfile::tempdir().unwrap();
    let mut notes = open::<Note>(dir.path());
    assert_eq!(notes.load_status(), &LoadStatus::Initialized);
    assert!(notes.is_empty());

    let ids: Vec<u32> = (0..5)
        .map(|n| notes.add(NoteDraft::new(format!("n{n}"), "")).unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn deleted_id_is_not_reused() {
    let dir = tempfile::tempdir().unwrap();
    let mut tasks = open::<Task>(dir.path());

    tasks.add(TaskDraft::new("first")).unwrap();
    let second = tasks.add(TaskDraft::new("second")).unwrap();
    tasks.delete(second).unwrap();

    let third = tasks.add(TaskDraft::new("third")).unwrap();
    assert_eq!(third, 3);
    assert!(tasks.get(second).is_none());
}

#[test]
fn reopened_collection_continues_after_stored_maximum() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut notes = open::<Note>(dir.path());
        notes.add(NoteDraft::new("a", "")).unwrap();
        notes.add(NoteDraft::new("b", "")).unwrap();
        notes.add(NoteDraft::new("c", "")).unwrap();
        notes.delete(2).unwrap();
    }

    let mut notes = open::<Note>(dir.path());
    assert_eq!(notes.load_status(), &LoadStatus::Loaded);
    assert_eq!(notes.add(NoteDraft::new("d", "")).unwrap(), 4);
    let titles: Vec<&str> = notes.list().iter().map(|note| note.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c", "d"]);
}

#[test]
fn add_applies_type_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let mut notes = open::<Note>(dir.path());
    let id = notes.add(NoteDraft::new("title", "body")).unwrap();
    assert_eq!(notes.get(id).unwrap().timestamp, "01-05-2024 09:30:00");

    let mut tasks = open::<Task>(dir.path());
    let id = tasks
        .add(TaskDraft::new("t").priority("  ").due_date(""))
        .unwrap();
    let task = tasks.get(id).unwrap();
    assert_eq!(task.priority, TaskPriority::Low);
    assert_eq!(task.due_date, "01-05-2024");
    assert!(!task.done);

    let mut finance = open::<FinanceRecord>(dir.path());
    let id = finance
        .add(FinanceDraft::new(-12.5, "Food").description(" "))
        .unwrap();
    let record = finance.get(id).unwrap();
    assert_eq!(record.date, "01-05-2024");
    assert_eq!(record.description, None);

    let mut contacts = open::<Contact>(dir.path());
    let id = contacts.add(ContactDraft::new("Ann").phone("")).unwrap();
    assert_eq!(contacts.get(id).unwrap().phone, None);
}

#[test]
fn add_validation_failure_mutates_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let mut contacts = open::<Contact>(dir.path());
    let err = contacts.add(ContactDraft::new("   ")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::EmptyField { field: "name", .. })));
    assert!(contacts.is_empty());

    let mut finance = open::<FinanceRecord>(dir.path());
    let err = finance.add(FinanceDraft::new(10.0, "")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    let err = finance.add(FinanceDraft::new(f64::NAN, "Food")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::NonFiniteAmount(_))));

    let mut tasks = open::<Task>(dir.path());
    let err = tasks.add(TaskDraft::new("t").priority("urgent")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::InvalidPriority(_))));
    assert!(tasks.is_empty());

    // A rejected add does not consume an id.
    assert_eq!(tasks.add(TaskDraft::new("ok")).unwrap(), 1);
}

#[test]
fn task_edit_skips_blank_and_absent_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut tasks = open::<Task>(dir.path());
    let id = tasks
        .add(
            TaskDraft::new("write report")
                .description("quarterly")
                .priority("high")
                .due_date("10-05-2024"),
        )
        .unwrap();
    let before = tasks.get(id).unwrap().clone();

    tasks
        .edit(
            id,
            TaskPatch {
                title: Some("".to_string()),
                description: Some("   ".to_string()),
                priority: None,
                due_date: Some("\t".to_string()),
            },
        )
        .unwrap();
    assert_eq!(tasks.get(id).unwrap(), &before);

    tasks
        .edit(
            id,
            TaskPatch {
                description: Some("annual".to_string()),
                priority: Some("MEDIUM".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap();
    let task = tasks.get(id).unwrap();
    assert_eq!(task.title, "write report");
    assert_eq!(task.description, "annual");
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.due_date, "10-05-2024");
}

#[test]
fn task_edit_with_bad_priority_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut tasks = open::<Task>(dir.path());
    let id = tasks.add(TaskDraft::new("keep")).unwrap();

    let err = tasks
        .edit(
            id,
            TaskPatch {
                title: Some("changed".to_string()),
                priority: Some("someday".to_string()),
                ..TaskPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(tasks.get(id).unwrap().title, "keep");
}

#[test]
fn contact_edit_skips_blank_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut contacts = open::<Contact>(dir.path());
    let id = contacts
        .add(ContactDraft::new("Ann").phone("555-0100").email("ann@example.com"))
        .unwrap();

    contacts
        .edit(
            id,
            ContactPatch {
                name: Some(" ".to_string()),
                phone: Some("555-0199".to_string()),
                email: Some(String::new()),
            },
        )
        .unwrap();

    let contact = contacts.get(id).unwrap();
    assert_eq!(contact.name, "Ann");
    assert_eq!(contact.phone.as_deref(), Some("555-0199"));
    assert_eq!(contact.email.as_deref(), Some("ann@example.com"));
}

#[test]
fn finance_edit_skips_blank_fields() {
    let dir = tempfile::tempdir().unwrap();
    let mut finance = open::<FinanceRecord>(dir.path());
    let id = finance
        .add(FinanceDraft::new(100.0, "Salary").date("01-01-2024"))
        .unwrap();

    finance
        .edit(
            id,
            FinancePatch {
                amount: Some(120.0),
                category: Some("".to_string()),
                date: None,
                description: Some("bonus".to_string()),
            },
        )
        .unwrap();

    let record = finance.get(id).unwrap();
    assert_eq!(record.amount, 120.0);
    assert_eq!(record.category, "Salary");
    assert_eq!(record.date, "01-01-2024");
    assert_eq!(record.description.as_deref(), Some("bonus"));
}

#[test]
fn note_edit_overwrites_unconditionally_and_refreshes_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let mut notes = open::<Note>(dir.path());
    let id = notes.add(NoteDraft::new("title", "body")).unwrap();

    let mut notes = notes.with_clock(evening);
    notes.edit(id, NotePatch::new("", "")).unwrap();

    let note = notes.get(id).unwrap();
    assert_eq!(note.title, "");
    assert_eq!(note.content, "");
    assert_eq!(note.timestamp, "02-05-2024 18:45:10");
}

#[test]
fn not_found_is_reported_and_leaves_state_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut contacts = open::<Contact>(dir.path());
    contacts.add(ContactDraft::new("Ann")).unwrap();
    let before = contacts.list().to_vec();

    assert!(contacts.get(42).is_none());
    assert!(matches!(
        contacts.edit(42, ContactPatch::default()),
        Err(RepoError::NotFound(42))
    ));
    assert!(matches!(contacts.delete(42), Err(RepoError::NotFound(42))));
    assert_eq!(contacts.list(), before.as_slice());
}

#[test]
fn every_mutation_is_persisted_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let mut tasks = open::<Task>(dir.path());
    let id = tasks.add(TaskDraft::new("persist me")).unwrap();
    tasks.mark_done(id).unwrap();

    let reopened = open::<Task>(dir.path());
    assert!(reopened.get(id).unwrap().done);

    let mut tasks = reopened;
    tasks.delete(id).unwrap();
    assert!(open::<Task>(dir.path()).is_empty());
}

#[test]
fn mark_done_reports_missing_task() {
    let dir = tempfile::tempdir().unwrap();
    let mut tasks = open::<Task>(dir.path());
    assert!(matches!(tasks.mark_done(3), Err(RepoError::NotFound(3))));
}

#[test]
fn contact_lookup_by_name_and_phone() {
    let dir = tempfile::tempdir().unwrap();
    let mut contacts = open::<Contact>(dir.path());
    contacts.add(ContactDraft::new("Ann Lee").phone("555-0100")).unwrap();
    contacts.add(ContactDraft::new("Bob")).unwrap();

    assert_eq!(contacts.find_by_name("ann lee").unwrap().id, 1);
    assert_eq!(contacts.find_by_name("  BOB ").unwrap().id, 2);
    assert!(contacts.find_by_name("Ann").is_none());
    assert_eq!(contacts.find_by_phone("555-0100").unwrap().id, 1);
    assert!(contacts.find_by_phone("").is_none());
}
