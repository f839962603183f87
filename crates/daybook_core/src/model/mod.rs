//! Domain models for the daybook trackers.
//!
//! # Responsibility
//! - Define the calendar/week keys every record is stored under.
//! - Define the per-tracker record shapes and their validation rules.
//!
//! # Invariants
//! - Every persisted record is keyed by a canonical `DayKey`.
//! - Validation lives on the model; services never persist unchecked data.

pub mod day_key;
pub mod journal;
pub mod mood;
pub mod quest;
pub mod sleep;
