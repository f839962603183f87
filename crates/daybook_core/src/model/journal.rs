//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the per-day journal record and its decorative image overlays.
//! - Keep overlay geometry inside the page bounds.
//!
//! # Invariants
//! - One entry per `DayKey`; entries are retained indefinitely.
//! - `body` must be non-empty after trimming before persistence.
//! - Overlay geometry is expressed in percent of the page and clamped so
//!   the overlay rectangle never escapes the page.

use crate::model::day_key::DayKey;
use crate::model::mood::Mood;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PAGE_SPAN_PCT: f32 = 100.0;

/// Decorative image placed on an entry page.
///
/// Position and size are percentages of the page; rotation is degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOverlay {
    /// Image source reference (path or data URI, opaque to core).
    pub src: String,
    /// Left edge offset in percent of page width.
    pub x_pct: f32,
    /// Top edge offset in percent of page height.
    pub y_pct: f32,
    /// Width in percent of page width.
    pub width_pct: f32,
    /// Height in percent of page height.
    pub height_pct: f32,
    /// Clockwise rotation in degrees.
    pub rotation_deg: f32,
}

impl ImageOverlay {
    /// Returns a copy with geometry clamped into the page bounds.
    ///
    /// Size clamps to `[0, 100]`, position clamps so `x + width` and
    /// `y + height` stay within the page, rotation normalizes to
    /// `[0, 360)`. Non-finite inputs collapse to zero.
    pub fn clamped(&self) -> Self {
        let width_pct = clamp_span(self.width_pct);
        let height_pct = clamp_span(self.height_pct);
        Self {
            src: self.src.clone(),
            x_pct: clamp_offset(self.x_pct, width_pct),
            y_pct: clamp_offset(self.y_pct, height_pct),
            width_pct,
            height_pct,
            rotation_deg: normalize_rotation(self.rotation_deg),
        }
    }

    /// Returns whether the overlay already sits inside the page bounds.
    pub fn in_bounds(&self) -> bool {
        self == &self.clamped()
    }
}

fn clamp_span(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, PAGE_SPAN_PCT)
    } else {
        0.0
    }
}

fn clamp_offset(value: f32, span: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, PAGE_SPAN_PCT - span)
    } else {
        0.0
    }
}

fn normalize_rotation(value: f32) -> f32 {
    if value.is_finite() {
        value.rem_euclid(360.0)
    } else {
        0.0
    }
}

/// One day's journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Calendar key identifying the entry.
    pub date: DayKey,
    /// Optional short title.
    pub title: Option<String>,
    /// Entry body text. Required; may contain markdown.
    pub body: String,
    /// Mood recorded with the entry.
    pub mood: Mood,
    /// Decorative overlays placed on the page.
    pub overlays: Vec<ImageOverlay>,
}

/// Validation failure for journal entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalValidationError {
    /// Body is empty after trimming.
    EmptyBody,
}

impl Display for JournalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "journal body must not be empty"),
        }
    }
}

impl Error for JournalValidationError {}

impl JournalEntry {
    /// Builds an entry with no title and no overlays.
    pub fn new(date: DayKey, body: impl Into<String>, mood: Mood) -> Self {
        Self {
            date,
            title: None,
            body: body.into(),
            mood,
            overlays: Vec::new(),
        }
    }

    /// Checks persistence preconditions.
    pub fn validate(&self) -> Result<(), JournalValidationError> {
        if self.body.trim().is_empty() {
            return Err(JournalValidationError::EmptyBody);
        }
        Ok(())
    }

    /// Returns a copy with every overlay clamped into the page bounds.
    pub fn with_clamped_overlays(&self) -> Self {
        let mut entry = self.clone();
        entry.overlays = self
            .overlays
            .iter()
            .map(ImageOverlay::clamped)
            .collect();
        entry
    }
}

/// Snapshot of the most recently saved entry, kept for quick display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalSnapshot {
    /// Day the snapshot was taken from.
    pub date: DayKey,
    /// Derived plain-text preview of the body.
    pub preview_text: Option<String>,
    /// Mood of the snapshotted entry.
    pub mood: Mood,
}

#[cfg(test)]
mod tests {
    use super::ImageOverlay;

    fn overlay(x: f32, y: f32, width: f32, height: f32, rotation: f32) -> ImageOverlay {
        ImageOverlay {
            src: "sticker.png".to_string(),
            x_pct: x,
            y_pct: y,
            width_pct: width,
            height_pct: height,
            rotation_deg: rotation,
        }
    }

    #[test]
    fn clamp_keeps_rectangle_on_page() {
        let clamped = overlay(95.0, -4.0, 20.0, 30.0, 0.0).clamped();
        assert_eq!(clamped.x_pct, 80.0);
        assert_eq!(clamped.y_pct, 0.0);
        assert_eq!(clamped.width_pct, 20.0);
        assert_eq!(clamped.height_pct, 30.0);
    }

    #[test]
    fn clamp_normalizes_rotation() {
        assert_eq!(overlay(0.0, 0.0, 10.0, 10.0, 450.0).clamped().rotation_deg, 90.0);
        assert_eq!(overlay(0.0, 0.0, 10.0, 10.0, -90.0).clamped().rotation_deg, 270.0);
    }

    #[test]
    fn clamp_collapses_non_finite_geometry() {
        let clamped = overlay(f32::NAN, 5.0, f32::INFINITY, 10.0, f32::NAN).clamped();
        assert_eq!(clamped.x_pct, 0.0);
        assert_eq!(clamped.width_pct, 0.0);
        assert_eq!(clamped.rotation_deg, 0.0);
    }

    #[test]
    fn in_bounds_reports_untouched_overlays() {
        assert!(overlay(10.0, 10.0, 50.0, 40.0, 15.0).in_bounds());
        assert!(!overlay(90.0, 10.0, 50.0, 40.0, 15.0).in_bounds());
    }
}
