//! Mood scale shared by the journal and the sleep tracker.

use serde::{Deserialize, Serialize};

/// Five-step mood scale recorded alongside daily entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Low,
    Awful,
}

impl Mood {
    /// Glyph used to annotate calendar grid cells.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Great => "😄",
            Self::Good => "🙂",
            Self::Okay => "😐",
            Self::Low => "😕",
            Self::Awful => "😢",
        }
    }

    /// Human-readable label for list views.
    pub fn label(self) -> &'static str {
        match self {
            Self::Great => "great",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Low => "low",
            Self::Awful => "awful",
        }
    }
}
