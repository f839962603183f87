//! Sleep log domain model.
//!
//! # Responsibility
//! - Define the per-night record stored by the sleep tracker.
//! - Compute elapsed sleep duration from bed/wake clock times.
//!
//! # Invariants
//! - Exactly one record exists per `DayKey`; saves replace in place.
//! - Clock times carry no date part; overnight wrap is inferred.

use crate::model::day_key::DayKey;
use crate::model::mood::Mood;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const CLOCK_FORMAT: &str = "%H:%M";
const MINUTES_PER_DAY: i32 = 24 * 60;

/// Wall-clock time of day in `HH:MM` form, no date part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

/// Parse failure for clock times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockTimeParseError(pub String);

impl Display for ClockTimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "not a HH:MM clock time: `{}`", self.0)
    }
}

impl Error for ClockTimeParseError {}

impl ClockTime {
    /// Builds a clock time from hour/minute components.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Minutes elapsed since midnight.
    pub fn minutes_from_midnight(self) -> i32 {
        (self.0.hour() * 60 + self.0.minute()) as i32
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(CLOCK_FORMAT))
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT)
            .map(Self)
            .map_err(|_| ClockTimeParseError(value.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// One night's sleep record, keyed by the wake-up day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLog {
    /// Calendar key identifying the record within the log collection.
    pub date: DayKey,
    /// Clock time the user went to bed.
    pub bed_time: ClockTime,
    /// Clock time the user woke up.
    pub wake_time: ClockTime,
    /// Mood on waking.
    pub mood: Mood,
}

impl SleepLog {
    /// Hours slept, rounded to one decimal.
    ///
    /// Wake is assumed to land on the next calendar day when it reads
    /// earlier than bed time (overnight sleep). Equal bed and wake times
    /// deliberately yield 24.0 hours (full-day wrap), not zero.
    pub fn duration_hours(&self) -> f64 {
        duration_hours(self.bed_time, self.wake_time)
    }
}

/// Elapsed hours between two clock readings, wrapping past midnight.
///
/// `duration_hours("22:00", "06:30")` is 8.5, `("09:00", "17:00")` is 8.0,
/// and the documented `("23:00", "23:00")` edge reads as 24.0.
pub fn duration_hours(bed: ClockTime, wake: ClockTime) -> f64 {
    let mut elapsed = wake.minutes_from_midnight() - bed.minutes_from_midnight();
    if elapsed <= 0 {
        elapsed += MINUTES_PER_DAY;
    }
    round_tenth(f64::from(elapsed) / 60.0)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
