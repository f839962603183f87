//! Sleep tracker use-case service.
//!
//! # Responsibility
//! - Persist one sleep record per day under the shared log key.
//! - Apply the destructive week-boundary reset policy.
//! - Build the weekly report consumed by chart and suggestion views.
//!
//! # Invariants
//! - Saving an existing date replaces the record in place.
//! - The log collection only ever holds records for one week; crossing a
//!   Monday boundary clears it exactly once and advances the marker.
//! - Missing or malformed stored blobs read as an empty log, never an
//!   error.

use crate::model::day_key::{DayKey, WeekKey};
use crate::model::mood::Mood;
use crate::model::sleep::{ClockTime, SleepLog};
use crate::repo::kv_repo::{KvStore, StoreError, StoreResult};
use crate::service::load_or_default;
use crate::week::{assemble_week, bar_series, summarize_week, WeekSummary};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SLEEP_LOGS_KEY: &str = "sleep_logs";
const WEEK_MARKER_KEY: &str = "sleep_week_start";

const SHORT_SLEEP_HOURS: f64 = 6.0;
const LOW_NORMAL_HOURS: f64 = 7.0;
const LONG_SLEEP_HOURS: f64 = 9.0;
const UNEVEN_SPREAD_HOURS: f64 = 3.0;

/// Raw form input for one night, validated on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepDraft {
    /// Bed time text, `HH:MM`.
    pub bed_time: String,
    /// Wake time text, `HH:MM`.
    pub wake_time: String,
    /// Mood on waking.
    pub mood: Mood,
}

/// Service error for sleep tracker use-cases.
#[derive(Debug)]
pub enum SleepServiceError {
    /// A required clock-time field was left empty.
    MissingTime(&'static str),
    /// A clock-time field holds unparsable text.
    InvalidTime {
        field: &'static str,
        value: String,
    },
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for SleepServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTime(field) => write!(f, "please fill in the {field} time"),
            Self::InvalidTime { field, value } => {
                write!(f, "{field} time `{value}` is not a valid HH:MM clock time")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SleepServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SleepServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a week-boundary check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekRollover {
    /// Stored marker already matches the current week.
    Unchanged,
    /// The log was cleared and the marker advanced.
    Cleared {
        previous: Option<WeekKey>,
        current: WeekKey,
    },
}

/// Weekly report for chart, stat, and suggestion views.
#[derive(Debug, Clone, PartialEq)]
pub struct SleepWeekReport {
    /// Week anchor the report covers.
    pub week: WeekKey,
    /// Hours slept per day in Mon..Sun order, absent nights as zero.
    pub hours: [f64; 7],
    /// Count/total/average/extremes over the week.
    pub summary: WeekSummary,
    /// Threshold-rule advice derived from the summary.
    pub suggestions: Vec<String>,
}

/// Sleep tracker facade over the key-value store.
pub struct SleepService<S: KvStore> {
    store: S,
}

impl<S: KvStore> SleepService<S> {
    /// Creates a service over the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates a draft and saves its record under `date`, replacing any
    /// existing record for that day.
    pub fn record_night(
        &self,
        date: DayKey,
        draft: &SleepDraft,
    ) -> Result<SleepLog, SleepServiceError> {
        let bed_time = parse_required(&draft.bed_time, "bed")?;
        let wake_time = parse_required(&draft.wake_time, "wake")?;
        let record = SleepLog {
            date,
            bed_time,
            wake_time,
            mood: draft.mood,
        };

        let mut logs = self.logs()?;
        match logs.iter_mut().find(|log| log.date == date) {
            Some(existing) => *existing = record.clone(),
            None => logs.push(record.clone()),
        }
        self.store.put_json(SLEEP_LOGS_KEY, &logs)?;

        info!(
            "event=sleep_saved module=sleep status=ok date={} hours={}",
            date,
            record.duration_hours()
        );
        Ok(record)
    }

    /// Reads the record stored under `date`, if any.
    pub fn night(&self, date: DayKey) -> StoreResult<Option<SleepLog>> {
        Ok(self.logs()?.into_iter().find(|log| log.date == date))
    }

    /// All currently stored records, unordered.
    pub fn logs(&self) -> StoreResult<Vec<SleepLog>> {
        load_or_default(&self.store, SLEEP_LOGS_KEY, "sleep")
    }

    /// Week-boundary check: clears the log and advances the marker when
    /// `today` falls outside the stored current week.
    pub fn check_week(&self, today: DayKey) -> StoreResult<WeekRollover> {
        let current = WeekKey::for_date(today.date());
        let previous: Option<WeekKey> =
            load_or_default(&self.store, WEEK_MARKER_KEY, "sleep")?;
        if previous == Some(current) {
            return Ok(WeekRollover::Unchanged);
        }

        self.store.remove(SLEEP_LOGS_KEY)?;
        self.store.put_json(WEEK_MARKER_KEY, &current)?;
        info!(
            "event=sleep_week_reset module=sleep status=ok previous={} current={current}",
            previous.map_or_else(|| "none".to_string(), |week| week.to_string()),
        );
        Ok(WeekRollover::Cleared { previous, current })
    }

    /// Builds the weekly report over whatever records exist for `week`.
    pub fn week_report(&self, week: WeekKey) -> StoreResult<SleepWeekReport> {
        let logs = self.logs()?;
        let slots = assemble_week(week, |date| {
            logs.iter().find(|log| log.date == date).cloned()
        });
        let summary = summarize_week(&slots, SleepLog::duration_hours);
        let hours = bar_series(&slots, SleepLog::duration_hours);
        let suggestions = suggestions_for(&summary);

        Ok(SleepWeekReport {
            week,
            hours,
            summary,
            suggestions,
        })
    }
}

fn parse_required(value: &str, field: &'static str) -> Result<ClockTime, SleepServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SleepServiceError::MissingTime(field));
    }
    trimmed
        .parse()
        .map_err(|_| SleepServiceError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

/// Threshold rules over the weekly average and spread.
fn suggestions_for(summary: &WeekSummary) -> Vec<String> {
    let mut suggestions = Vec::new();
    let Some(average) = summary.average else {
        suggestions.push("No nights recorded yet this week. Log tonight to get started.".into());
        return suggestions;
    };

    if average < SHORT_SLEEP_HOURS {
        suggestions
            .push("You averaged under 6 hours. Try moving bedtime earlier this week.".into());
    } else if average < LOW_NORMAL_HOURS {
        suggestions.push(
            "You're a little under 7 hours on average; an extra half hour would help.".into(),
        );
    } else if average > LONG_SLEEP_HOURS {
        suggestions
            .push("You averaged over 9 hours. Oversleeping can leave you groggy too.".into());
    } else {
        suggestions.push("Nice! Your average is in the 7 to 9 hour range. Keep it up.".into());
    }

    if summary.filled > 1 && summary.max - summary.min > UNEVEN_SPREAD_HOURS {
        suggestions.push(
            "Your nights vary a lot; a steadier schedule improves sleep quality.".into(),
        );
    }

    suggestions
}
