use chrono::NaiveDate;
use period_core::db::{open_db, open_db_in_memory, DbError};
use period_core::{
    PeriodRepository, PeriodService, Prediction, RepoError, SqlitePeriodRepository,
};
use rusqlite::params;
use std::collections::HashSet;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn add_then_list_grows_by_one_with_fresh_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();

    repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    let before = repo.list_periods().unwrap();

    let id = repo.add_period(ymd(2024, 1, 29), ymd(2024, 2, 2)).unwrap();
    let after = repo.list_periods().unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert!(before.iter().all(|record| record.id != id));
    let added = after.iter().find(|record| record.id == id).unwrap();
    assert_eq!(added.start_date, ymd(2024, 1, 29));
    assert_eq!(added.end_date, ymd(2024, 2, 2));

    let ids: HashSet<_> = after.iter().map(|record| record.id).collect();
    assert_eq!(ids.len(), after.len());
}

#[test]
fn ids_are_monotonic_and_list_is_insertion_ordered() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();

    let first = repo.add_period(ymd(2024, 3, 1), ymd(2024, 3, 4)).unwrap();
    let second = repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 4)).unwrap();
    let third = repo.add_period(ymd(2024, 2, 1), ymd(2024, 2, 4)).unwrap();
    assert!(first < second && second < third);

    let listed: Vec<_> = repo
        .list_periods()
        .unwrap()
        .into_iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(listed, vec![first, second, third]);
}

#[test]
fn dates_are_stored_as_ddmmyy_text() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
    let id = repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();

    let (start, end): (String, String) = conn
        .query_row(
            "SELECT start_date, end_date FROM periods WHERE id = ?1;",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(start, "01/01/24");
    assert_eq!(end, "05/01/24");
}

#[test]
fn overlapping_duplicate_and_reversed_intervals_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();

    repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    repo.add_period(ymd(2024, 1, 10), ymd(2024, 1, 3)).unwrap();

    assert_eq!(repo.list_periods().unwrap().len(), 3);
}

#[test]
fn update_existing_keeps_id_and_count() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();

    let id = repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    repo.add_period(ymd(2024, 1, 29), ymd(2024, 2, 2)).unwrap();

    repo.update_period(id, ymd(2024, 1, 3), ymd(2024, 1, 7))
        .unwrap();

    let listed = repo.list_periods().unwrap();
    assert_eq!(listed.len(), 2);
    let updated = listed.iter().find(|record| record.id == id).unwrap();
    assert_eq!(updated.start_date, ymd(2024, 1, 3));
    assert_eq!(updated.end_date, ymd(2024, 1, 7));
}

#[test]
fn update_missing_id_returns_not_found_and_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
    repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    let before = repo.list_periods().unwrap();

    let err = repo
        .update_period(99, ymd(2024, 2, 1), ymd(2024, 2, 5))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
    assert_eq!(repo.list_periods().unwrap(), before);
}

#[test]
fn list_is_idempotent_without_writes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
    repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    repo.add_period(ymd(2024, 1, 29), ymd(2024, 2, 2)).unwrap();

    assert_eq!(repo.list_periods().unwrap(), repo.list_periods().unwrap());
}

#[test]
fn get_period_returns_none_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
    let id = repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();

    assert!(repo.get_period(id).unwrap().is_some());
    assert!(repo.get_period(id + 1).unwrap().is_none());
}

#[test]
fn malformed_stored_date_fails_the_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO periods (start_date, end_date) VALUES ('2024-01-01', '05/01/24');",
        [],
    )
    .unwrap();

    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
    let err = repo.list_periods().unwrap_err();
    match err {
        RepoError::InvalidDate { column, value } => {
            assert_eq!(column, "start_date");
            assert_eq!(value, "2024-01-01");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn writes_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("period_tracker.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
        repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
        repo.add_period(ymd(2024, 1, 29), ymd(2024, 2, 2)).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let service = PeriodService::new(SqlitePeriodRepository::try_new(&conn).unwrap());
    assert_eq!(service.list_periods().unwrap().len(), 2);
    assert_eq!(
        service.predict_next_period().unwrap(),
        Prediction::Predicted {
            next_start: ymd(2024, 2, 26),
            average_cycle_days: 28,
        }
    );
}

#[test]
fn prediction_follows_stored_history() {
    let conn = open_db_in_memory().unwrap();
    let service = PeriodService::new(SqlitePeriodRepository::try_new(&conn).unwrap());
    assert_eq!(service.predict_next_period().unwrap(), Prediction::NoData);

    service.add_period(ymd(2024, 1, 29), ymd(2024, 2, 2)).unwrap();
    assert_eq!(
        service.predict_next_period().unwrap(),
        Prediction::InsufficientData
    );

    // Out-of-order inserts: gaps 28 and 31 after sorting.
    service.add_period(ymd(2024, 2, 29), ymd(2024, 3, 4)).unwrap();
    service.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();
    assert_eq!(
        service.predict_next_period().unwrap().next_start(),
        Some(ymd(2024, 2, 29) + chrono::Duration::days(29))
    );
}

#[test]
fn dates_outside_two_digit_year_window_are_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();

    let err = repo
        .add_period(ymd(2070, 1, 1), ymd(2024, 1, 5))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::DateOutOfRange { column: "start_date", date } if date == ymd(2070, 1, 1)
    ));

    let err = repo
        .add_period(ymd(2024, 1, 1), ymd(1950, 1, 5))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::DateOutOfRange { column: "end_date", .. }
    ));
    assert!(repo.list_periods().unwrap().is_empty());

    let id = repo.add_period(ymd(1969, 1, 1), ymd(2068, 12, 31)).unwrap();
    let stored = repo.get_period(id).unwrap().unwrap();
    assert_eq!(stored.start_date, ymd(1969, 1, 1));
    assert_eq!(stored.end_date, ymd(2068, 12, 31));

    let err = repo
        .update_period(id, ymd(2069, 1, 1), ymd(2069, 1, 5))
        .unwrap_err();
    assert!(matches!(err, RepoError::DateOutOfRange { .. }));
    assert_eq!(repo.get_period(id).unwrap().unwrap(), stored);
}

#[test]
fn add_on_unwritable_connection_is_a_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePeriodRepository::try_new(&conn).unwrap();
    repo.add_period(ymd(2024, 1, 1), ymd(2024, 1, 5)).unwrap();

    conn.execute_batch("PRAGMA query_only = ON;").unwrap();

    let err = repo
        .add_period(ymd(2024, 1, 29), ymd(2024, 2, 2))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));

    let err = repo
        .update_period(1, ymd(2024, 1, 2), ymd(2024, 1, 6))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let listed = repo.list_periods().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].start_date, ymd(2024, 1, 1));
}
