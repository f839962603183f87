//! Calendar key domain model.
//!
//! # Responsibility
//! - Define the canonical per-day key (`DayKey`) every tracker stores under.
//! - Derive Monday-aligned week anchors (`WeekKey`) for aggregation windows.
//!
//! # Invariants
//! - Keys render as zero-padded `YYYY-MM-DD` and parse only that form.
//! - Keys are taken from the local calendar date, never through UTC.
//! - `WeekKey::for_date(d)` is identical for every `d` inside the same
//!   Monday-aligned 7-day span.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical calendar-day key in `YYYY-MM-DD` form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

/// Parse failure for calendar keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayKeyParseError {
    /// Input is not a valid calendar date.
    Unparsable(String),
    /// Input is a date but not in canonical zero-padded form.
    NotCanonical(String),
}

impl Display for DayKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(value) => write!(f, "not a calendar date: `{value}`"),
            Self::NotCanonical(value) => {
                write!(f, "calendar key must be zero-padded YYYY-MM-DD, got `{value}`")
            }
        }
    }
}

impl Error for DayKeyParseError {}

impl DayKey {
    /// Wraps a calendar date as a key.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Derives the key for an instant using that instant's own calendar,
    /// not UTC. An instant at 23:59 local time keeps the local day even
    /// when UTC has already rolled over.
    pub fn for_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    /// Derives the key for the current local wall-clock day.
    pub fn today() -> Self {
        Self::for_instant(&Local::now())
    }

    /// Returns the underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// Returns the weekday of this key.
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Returns the next calendar day, if representable.
    pub fn next(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Returns the previous calendar day, if representable.
    pub fn prev(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DayKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(value, KEY_FORMAT)
            .map_err(|_| DayKeyParseError::Unparsable(value.to_string()))?;
        let key = Self(date);
        if key.to_string() != value {
            return Err(DayKeyParseError::NotCanonical(value.to_string()));
        }
        Ok(key)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DayKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.to_string()
    }
}

/// `DayKey` of the Monday anchoring a 7-day aggregation window.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey(DayKey);

/// Parse failure for week anchors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekKeyParseError {
    /// Anchor is not a valid calendar key.
    Day(DayKeyParseError),
    /// Anchor is a valid calendar key but not a Monday.
    NotWeekStart(String),
}

impl Display for WeekKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(err) => write!(f, "{err}"),
            Self::NotWeekStart(value) => {
                write!(f, "week key must be a Monday, got `{value}`")
            }
        }
    }
}

impl Error for WeekKeyParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Day(err) => Some(err),
            Self::NotWeekStart(_) => None,
        }
    }
}

impl WeekKey {
    /// Derives the week anchor for a calendar date: Monday keeps the date,
    /// Tuesday steps one day back, ..., Sunday steps six days back.
    pub fn for_date(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        // checked_sub only fails at the calendar minimum.
        let anchor = date
            .checked_sub_days(Days::new(offset))
            .unwrap_or(date);
        Self(DayKey(anchor))
    }

    /// Derives the week anchor for an instant's local calendar date.
    pub fn for_instant<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::for_date(instant.date_naive())
    }

    /// Derives the anchor of the current local week.
    pub fn this_week() -> Self {
        Self::for_instant(&Local::now())
    }

    /// Returns the Monday key anchoring this week.
    pub fn anchor(self) -> DayKey {
        self.0
    }

    /// Returns the seven day keys of this week in Mon..Sun order.
    pub fn days(self) -> [DayKey; 7] {
        let mut days = [self.0; 7];
        for index in 1..7 {
            days[index] = days[index - 1].next().unwrap_or(days[index - 1]);
        }
        days
    }

    /// Returns whether a day falls inside this week's 7-day span.
    pub fn contains(self, day: DayKey) -> bool {
        let offset = day
            .date()
            .signed_duration_since(self.0.date())
            .num_days();
        (0..7).contains(&offset)
    }
}

impl Display for WeekKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WeekKey {
    type Err = WeekKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let day: DayKey = value.parse().map_err(WeekKeyParseError::Day)?;
        if day.weekday() != Weekday::Mon {
            return Err(WeekKeyParseError::NotWeekStart(value.to_string()));
        }
        Ok(Self(day))
    }
}

impl TryFrom<String> for WeekKey {
    type Error = WeekKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WeekKey> for String {
    fn from(value: WeekKey) -> Self {
        value.to_string()
    }
}
