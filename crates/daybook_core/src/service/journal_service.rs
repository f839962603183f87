//! Journal use-case service.
//!
//! # Responsibility
//! - Persist one entry blob per day under a date-suffixed key.
//! - Keep the latest-entry snapshot and its derived preview current.
//! - Annotate calendar months with per-day mood glyphs.
//!
//! # Invariants
//! - Entries are never reset; the journal keeps every saved day.
//! - An empty body blocks the save; nothing is written.
//! - Overlays are clamped into page bounds before persistence.
//! - The latest snapshot always reflects the most recent successful save.

use crate::model::day_key::DayKey;
use crate::model::journal::{JournalEntry, JournalSnapshot, JournalValidationError};
use crate::model::mood::Mood;
use crate::repo::kv_repo::{KvStore, StoreError, StoreResult};
use crate::service::load_or_default;
use chrono::Datelike;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_KEY_PREFIX: &str = "journal_";
const LATEST_KEY: &str = "journal_latest";
const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Entry failed its persistence preconditions.
    Validation(JournalValidationError),
    /// Persistence-layer failure.
    Store(StoreError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent journal state: {details}")
            }
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InconsistentState(_) => None,
        }
    }
}

impl From<JournalValidationError> for JournalServiceError {
    fn from(value: JournalValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for JournalServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One calendar-grid annotation: a day that has an entry, with its mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMood {
    pub date: DayKey,
    pub mood: Mood,
    /// Glyph rendered into the calendar cell.
    pub glyph: &'static str,
}

/// Journal facade over the key-value store.
pub struct JournalService<S: KvStore> {
    store: S,
}

impl<S: KvStore> JournalService<S> {
    /// Creates a service over the provided store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and saves an entry, refreshing the latest snapshot.
    ///
    /// Returns the entry as persisted (overlays clamped).
    pub fn save_entry(&self, entry: &JournalEntry) -> Result<JournalEntry, JournalServiceError> {
        entry.validate()?;
        let entry = entry.with_clamped_overlays();

        self.store.put_json(&entry_key(entry.date), &entry)?;
        let snapshot = JournalSnapshot {
            date: entry.date,
            preview_text: derive_preview(&entry.body),
            mood: entry.mood,
        };
        self.store.put_json(LATEST_KEY, &snapshot)?;

        info!(
            "event=journal_saved module=journal status=ok date={} overlays={}",
            entry.date,
            entry.overlays.len()
        );
        self.entry(entry.date)?
            .ok_or(JournalServiceError::InconsistentState(
                "saved entry not found in read-back",
            ))
    }

    /// Reads the entry stored under `date`, if any. A malformed blob
    /// reads as absent.
    pub fn entry(&self, date: DayKey) -> StoreResult<Option<JournalEntry>> {
        match self.store.get_json(&entry_key(date)) {
            Ok(found) => Ok(found),
            Err(StoreError::Serde { key, source }) => {
                warn!(
                    "event=blob_reset module=journal status=degraded key={key} error={source}"
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Latest-entry snapshot, if any entry was ever saved.
    pub fn latest(&self) -> StoreResult<Option<JournalSnapshot>> {
        load_or_default(&self.store, LATEST_KEY, "journal")
    }

    /// Every day that has a stored entry, ascending.
    pub fn entry_dates(&self) -> StoreResult<Vec<DayKey>> {
        let keys = self.store.keys_with_prefix(ENTRY_KEY_PREFIX)?;
        Ok(keys
            .iter()
            .filter_map(|key| parse_entry_key(key))
            .collect())
    }

    /// Mood annotations for a calendar month, in day order.
    pub fn month_moods(&self, year: i32, month: u32) -> StoreResult<Vec<DayMood>> {
        let mut moods = Vec::new();
        for date in self.entry_dates()? {
            if date.date().year() != year || date.date().month() != month {
                continue;
            }
            if let Some(entry) = self.entry(date)? {
                moods.push(DayMood {
                    date,
                    mood: entry.mood,
                    glyph: entry.mood.glyph(),
                });
            }
        }
        Ok(moods)
    }
}

fn entry_key(date: DayKey) -> String {
    format!("{ENTRY_KEY_PREFIX}{date}")
}

/// Recovers the day key from a `journal_YYYY-MM-DD` store key. Keys with
/// a non-date suffix (the latest snapshot lives under one) yield `None`.
fn parse_entry_key(key: &str) -> Option<DayKey> {
    key.strip_prefix(ENTRY_KEY_PREFIX)?.parse().ok()
}

/// Derives the snapshot preview from entry body text.
///
/// Rules: markdown images dropped, links reduced to their text, markdown
/// symbols removed, whitespace collapsed, first 100 chars retained.
pub fn derive_preview(body: &str) -> Option<String> {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(body, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}
