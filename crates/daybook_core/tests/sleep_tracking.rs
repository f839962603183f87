use daybook_core::db::open_store_in_memory;
use daybook_core::service::sleep_service::{
    SleepDraft, SleepService, SleepServiceError, WeekRollover,
};
use daybook_core::{DayKey, KvStore, Mood, SqliteKvStore, WeekKey};

fn day(value: &str) -> DayKey {
    value.parse().unwrap()
}

fn draft(bed: &str, wake: &str) -> SleepDraft {
    SleepDraft {
        bed_time: bed.to_string(),
        wake_time: wake.to_string(),
        mood: Mood::Good,
    }
}

#[test]
fn record_and_read_back_one_night() {
    let conn = open_store_in_memory().unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    let saved = service
        .record_night(day("2026-03-03"), &draft("22:00", "06:30"))
        .unwrap();
    assert_eq!(saved.duration_hours(), 8.5);

    let loaded = service.night(day("2026-03-03")).unwrap().unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(service.night(day("2026-03-04")).unwrap(), None);
}

#[test]
fn duration_covers_daytime_and_full_day_wrap() {
    let conn = open_store_in_memory().unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    let nap = service
        .record_night(day("2026-03-02"), &draft("09:00", "17:00"))
        .unwrap();
    assert_eq!(nap.duration_hours(), 8.0);

    // Equal bed/wake times read as a full day, the documented edge case.
    let wrap = service
        .record_night(day("2026-03-03"), &draft("23:00", "23:00"))
        .unwrap();
    assert_eq!(wrap.duration_hours(), 24.0);
}

#[test]
fn saving_the_same_date_replaces_in_place() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    service
        .record_night(day("2026-03-03"), &draft("23:00", "06:00"))
        .unwrap();
    let entries_before = store.len().unwrap();

    service
        .record_night(day("2026-03-03"), &draft("22:30", "07:15"))
        .unwrap();

    assert_eq!(store.len().unwrap(), entries_before);
    let logs = service.logs().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].bed_time.to_string(), "22:30");
}

#[test]
fn missing_or_invalid_times_block_the_save() {
    let conn = open_store_in_memory().unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    let err = service
        .record_night(day("2026-03-03"), &draft("", "06:00"))
        .unwrap_err();
    assert!(matches!(err, SleepServiceError::MissingTime("bed")));

    let err = service
        .record_night(day("2026-03-03"), &draft("23:00", "late"))
        .unwrap_err();
    assert!(matches!(
        err,
        SleepServiceError::InvalidTime { field: "wake", .. }
    ));

    assert!(service.logs().unwrap().is_empty());
}

#[test]
fn week_check_clears_logs_exactly_once_per_boundary() {
    let conn = open_store_in_memory().unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    // First check anchors and clears into the week of 2026-03-02.
    let first = service.check_week(day("2026-03-04")).unwrap();
    assert!(matches!(
        first,
        WeekRollover::Cleared {
            previous: None,
            ..
        }
    ));

    service
        .record_night(day("2026-03-04"), &draft("23:00", "07:00"))
        .unwrap();

    // Same week: nothing happens, data survives.
    assert_eq!(
        service.check_week(day("2026-03-08")).unwrap(),
        WeekRollover::Unchanged
    );
    assert_eq!(service.logs().unwrap().len(), 1);

    // Crossing Monday clears the collection and advances the marker.
    let crossed = service.check_week(day("2026-03-09")).unwrap();
    let expected_week: WeekKey = "2026-03-09".parse().unwrap();
    assert_eq!(
        crossed,
        WeekRollover::Cleared {
            previous: Some("2026-03-02".parse().unwrap()),
            current: expected_week,
        }
    );
    assert!(service.logs().unwrap().is_empty());

    // The same boundary never clears twice.
    assert_eq!(
        service.check_week(day("2026-03-10")).unwrap(),
        WeekRollover::Unchanged
    );
}

#[test]
fn week_report_aggregates_hours_into_mon_sun_series() {
    let conn = open_store_in_memory().unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    // Monday and Wednesday of the week starting 2026-03-02.
    service
        .record_night(day("2026-03-02"), &draft("23:00", "07:00"))
        .unwrap();
    service
        .record_night(day("2026-03-04"), &draft("01:00", "07:00"))
        .unwrap();

    let week: WeekKey = "2026-03-02".parse().unwrap();
    let report = service.week_report(week).unwrap();

    assert_eq!(report.hours, [8.0, 0.0, 6.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(report.summary.filled, 2);
    assert_eq!(report.summary.average, Some(7.0));
    assert_eq!(report.summary.min, 0.0);
    assert_eq!(report.summary.max, 8.0);
    assert!(!report.suggestions.is_empty());
}

#[test]
fn malformed_log_blob_reads_as_empty() {
    let conn = open_store_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();
    let service = SleepService::new(SqliteKvStore::try_new(&conn).unwrap());

    store.put_raw("sleep_logs", "{broken").unwrap();
    assert!(service.logs().unwrap().is_empty());
}
