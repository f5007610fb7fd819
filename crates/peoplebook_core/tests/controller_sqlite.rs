use peoplebook_core::db::open_db_in_memory;
use peoplebook_core::{ControllerError, PeopleController, RepoError, SqliteRepository};

fn titles<R: peoplebook_core::PersonRepository>(controller: &PeopleController<R>) -> Vec<String> {
    controller.rows().into_iter().map(|row| row.title).collect()
}

#[test]
fn controller_runs_add_edit_delete_against_sqlite() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&mut conn).unwrap();
    let mut controller = PeopleController::new(repo);

    assert!(controller.load().unwrap().is_empty());

    let alice = controller.add_person(Some("Alice".to_string())).unwrap();
    controller.add_person(Some("Bob".to_string())).unwrap();
    assert_eq!(titles(&controller), vec!["Alice", "Bob"]);

    controller.edit_row(1, Some("Aaron".to_string())).unwrap();
    assert_eq!(titles(&controller), vec!["Aaron", "Alice"]);

    controller.delete_person(alice.id).unwrap();
    assert_eq!(titles(&controller), vec!["Aaron"]);
    assert_eq!(controller.row_count(), 1);
    assert!(controller.notice().is_none());
}

#[test]
fn controller_surfaces_commit_failure_and_keeps_snapshot() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_insert BEFORE INSERT ON people
         WHEN NEW.name = 'reject'
         BEGIN
            SELECT RAISE(ABORT, 'insert rejected');
         END;",
    )
    .unwrap();
    let repo = SqliteRepository::try_new(&mut conn).unwrap();
    let mut controller = PeopleController::new(repo);
    controller.add_person(Some("Alice".to_string())).unwrap();

    let err = controller
        .add_person(Some("reject".to_string()))
        .unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Repo(RepoError::StorageWrite(_))
    ));
    assert_eq!(titles(&controller), vec!["Alice"]);
    assert!(controller
        .notice()
        .expect("failure notice should be set")
        .contains("storage write failed"));

    controller.refresh().unwrap();
    assert_eq!(titles(&controller), vec!["Alice"]);
}

#[test]
fn deleting_row_that_vanished_underneath_reports_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteRepository::try_new(&mut conn).unwrap();
    let mut controller = PeopleController::new(repo);
    let person = controller.add_person(Some("Alice".to_string())).unwrap();

    controller.delete_person(person.id).unwrap();
    let err = controller.delete_person(person.id).unwrap_err();

    assert!(matches!(
        err,
        ControllerError::Repo(RepoError::PersonNotFound(id)) if id == person.id
    ));
    assert!(controller.notice().is_some());
}
