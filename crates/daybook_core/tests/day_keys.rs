use chrono::{FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
use daybook_core::{DayKey, WeekKey};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn day_key_uses_local_day_boundaries_not_utc() {
    // 23:59 in UTC-10: the UTC calendar has already moved to March 6.
    let zone = FixedOffset::west_opt(10 * 3600).unwrap();
    let late_evening = zone.with_ymd_and_hms(2026, 3, 5, 23, 59, 0).unwrap();

    assert_eq!(
        late_evening.with_timezone(&Utc).date_naive(),
        date(2026, 3, 6),
        "precondition: UTC must already be on the next day"
    );
    assert_eq!(DayKey::for_instant(&late_evening).to_string(), "2026-03-05");
}

#[test]
fn day_key_round_trips_through_its_string_form() {
    let key = DayKey::from_date(date(2026, 1, 9));
    assert_eq!(key.to_string(), "2026-01-09");
    assert_eq!("2026-01-09".parse::<DayKey>().unwrap(), key);

    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"2026-01-09\"");
    assert_eq!(serde_json::from_str::<DayKey>(&json).unwrap(), key);
}

#[test]
fn week_key_is_identical_across_its_whole_span() {
    let monday = date(2026, 3, 2);
    let expected = WeekKey::for_date(monday);

    for offset in 0..7 {
        let day = monday + chrono::Days::new(offset);
        assert_eq!(WeekKey::for_date(day), expected, "offset {offset}");
    }

    assert_ne!(WeekKey::for_date(monday + chrono::Days::new(7)), expected);
    assert_ne!(WeekKey::for_date(monday - chrono::Days::new(1)), expected);
}

#[test]
fn week_key_anchor_is_always_monday() {
    for offset in 0..14 {
        let day = date(2026, 2, 20) + chrono::Days::new(offset);
        assert_eq!(WeekKey::for_date(day).anchor().weekday(), Weekday::Mon);
    }
}

#[test]
fn week_days_run_monday_to_sunday() {
    let week = WeekKey::for_date(date(2026, 3, 4));
    let days = week.days();

    assert_eq!(days[0].to_string(), "2026-03-02");
    assert_eq!(days[6].to_string(), "2026-03-08");
    let weekdays: Vec<Weekday> = days.iter().map(|day| day.weekday()).collect();
    assert_eq!(
        weekdays,
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun
        ]
    );
}

#[test]
fn week_key_deserialization_rejects_non_monday() {
    let err = serde_json::from_str::<WeekKey>("\"2026-03-04\"").unwrap_err();
    assert!(err.to_string().contains("Monday"));

    let week: WeekKey = serde_json::from_str("\"2026-03-02\"").unwrap();
    assert_eq!(week.anchor(), DayKey::from_date(date(2026, 3, 2)));
}

#[test]
fn year_boundary_weeks_span_both_years() {
    // 2026-01-01 is a Thursday; its week starts in 2025.
    let week = WeekKey::for_date(date(2026, 1, 1));
    assert_eq!(week.to_string(), "2025-12-29");
    assert!(week.contains(DayKey::from_date(date(2026, 1, 4))));
    assert!(!week.contains(DayKey::from_date(date(2026, 1, 5))));
}
