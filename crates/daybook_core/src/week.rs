//! Week window assembly and numeric summaries.
//!
//! # Responsibility
//! - Reconstruct a 7-slot Mon..Sun view over per-day records.
//! - Derive the counts/averages/extremes chart consumers display.
//!
//! # Invariants
//! - Assembly is pure and idempotent; the store is never touched here.
//! - Exactly 7 slots come back in Mon..Sun order regardless of input.
//! - Absent days count as zero for extremes and chart series, and are
//!   excluded from averages.

use crate::model::day_key::{DayKey, WeekKey};

/// Display labels for the seven slots, in slot order.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One day of a week view: the day key plus the stored record, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot<T> {
    pub date: DayKey,
    pub record: Option<T>,
}

/// Assembles the 7-slot Mon..Sun view for a week.
///
/// `lookup` is consulted once per day key; days without a record yield an
/// empty slot.
pub fn assemble_week<T, F>(week: WeekKey, mut lookup: F) -> [DaySlot<T>; 7]
where
    F: FnMut(DayKey) -> Option<T>,
{
    week.days().map(|date| DaySlot {
        date,
        record: lookup(date),
    })
}

/// Numeric roll-up over one week of slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSummary {
    /// Number of slots holding a record.
    pub filled: usize,
    /// Sum of the metric across filled slots.
    pub total: f64,
    /// Mean of the metric across filled slots; `None` when all are empty.
    pub average: Option<f64>,
    /// Smallest value across all 7 slots, absent slots counting as zero.
    pub min: f64,
    /// Largest value across all 7 slots, absent slots counting as zero.
    pub max: f64,
}

/// Summarizes a week of slots through a numeric metric.
pub fn summarize_week<T, F>(slots: &[DaySlot<T>; 7], mut metric: F) -> WeekSummary
where
    F: FnMut(&T) -> f64,
{
    let series = bar_series(slots, &mut metric);
    let filled = slots.iter().filter(|slot| slot.record.is_some()).count();
    let total: f64 = slots
        .iter()
        .filter_map(|slot| slot.record.as_ref())
        .map(&mut metric)
        .sum();
    let average = if filled > 0 {
        Some(total / filled as f64)
    } else {
        None
    };

    let mut min = series[0];
    let mut max = series[0];
    for value in &series[1..] {
        min = min.min(*value);
        max = max.max(*value);
    }

    WeekSummary {
        filled,
        total,
        average,
        min,
        max,
    }
}

/// Chart series over one week: 7 values in Mon..Sun order, absent = 0.
pub fn bar_series<T, F>(slots: &[DaySlot<T>; 7], mut metric: F) -> [f64; 7]
where
    F: FnMut(&T) -> f64,
{
    let mut series = [0.0; 7];
    for (value, slot) in series.iter_mut().zip(slots.iter()) {
        if let Some(record) = slot.record.as_ref() {
            *value = metric(record);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::{assemble_week, bar_series, summarize_week, DaySlot};
    use crate::model::day_key::WeekKey;
    use chrono::{NaiveDate, Weekday};
    use std::collections::HashMap;

    fn week() -> WeekKey {
        WeekKey::for_date(NaiveDate::from_ymd_opt(2026, 3, 4).expect("valid date"))
    }

    #[test]
    fn assemble_always_yields_seven_slots_mon_to_sun() {
        let slots = assemble_week::<f64, _>(week(), |_| None);

        assert_eq!(slots.len(), 7);
        assert_eq!(slots[0].date.weekday(), Weekday::Mon);
        assert_eq!(slots[6].date.weekday(), Weekday::Sun);
        for pair in slots.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn assemble_pulls_records_by_day_key() {
        let mut records = HashMap::new();
        records.insert(week().anchor(), 7.5_f64);

        let slots = assemble_week(week(), |date| records.get(&date).copied());

        assert_eq!(slots[0].record, Some(7.5));
        assert!(slots[1..].iter().all(|slot| slot.record.is_none()));
    }

    #[test]
    fn summary_averages_filled_slots_only() {
        let slots = assemble_week(week(), |date| {
            let offset = date
                .date()
                .signed_duration_since(week().anchor().date())
                .num_days();
            // Records on Monday (8.0) and Wednesday (6.0) only.
            match offset {
                0 => Some(8.0_f64),
                2 => Some(6.0_f64),
                _ => None,
            }
        });

        let summary = summarize_week(&slots, |hours| *hours);
        assert_eq!(summary.filled, 2);
        assert_eq!(summary.total, 14.0);
        assert_eq!(summary.average, Some(7.0));
        // Absent days pull the minimum to zero.
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 8.0);
    }

    #[test]
    fn summary_of_empty_week_has_no_average() {
        let slots = assemble_week::<f64, _>(week(), |_| None);
        let summary = summarize_week(&slots, |hours| *hours);

        assert_eq!(summary.filled, 0);
        assert_eq!(summary.average, None);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 0.0);
    }

    #[test]
    fn bar_series_zeroes_absent_days() {
        let slots: [DaySlot<f64>; 7] =
            assemble_week(week(), |date| (date == week().anchor()).then_some(4.0));

        let series = bar_series(&slots, |hours| *hours);
        assert_eq!(series, [4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
