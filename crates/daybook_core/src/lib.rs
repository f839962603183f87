//! Core domain logic for Daybook.
//! This crate is the single source of truth for tracker invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod quote;
pub mod repo;
pub mod service;
pub mod week;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::day_key::{DayKey, DayKeyParseError, WeekKey, WeekKeyParseError};
pub use model::journal::{ImageOverlay, JournalEntry, JournalSnapshot, JournalValidationError};
pub use model::mood::Mood;
pub use model::quest::{PlayerStats, QuestState, Task, TaskKind, TaskValidationError};
pub use model::sleep::{duration_hours, ClockTime, ClockTimeParseError, SleepLog};
pub use quote::{quote_of_the_day, BuiltinQuotes, Quote, QuoteProvider};
pub use repo::kv_repo::{KvStore, SqliteKvStore, StoreError, StoreResult};
pub use service::journal_service::{DayMood, JournalService, JournalServiceError};
pub use service::prefs_service::{PrefsService, Theme, ThemePrefs};
pub use service::quest_service::{DayRollover, QuestService, QuestServiceError};
pub use service::sleep_service::{
    SleepDraft, SleepService, SleepServiceError, SleepWeekReport, WeekRollover,
};
pub use week::{assemble_week, bar_series, summarize_week, DaySlot, WeekSummary, DAY_LABELS};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
