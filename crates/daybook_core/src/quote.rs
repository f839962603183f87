//! Quote-of-the-day widget seam.
//!
//! # Responsibility
//! - Abstract the external quote source behind a provider contract.
//! - Degrade silently to built-in placeholder quotes on provider failure.
//!
//! # Invariants
//! - `quote_of_the_day` never fails; a broken provider falls back.
//! - The built-in rotation is deterministic per day key.

use crate::model::day_key::DayKey;
use chrono::Datelike;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One displayable quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: Option<String>,
}

/// Provider failure envelope; the reason is logged, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteFetchError {
    pub provider_id: String,
    pub reason: String,
}

impl Display for QuoteFetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "quote provider `{}` failed: {}", self.provider_id, self.reason)
    }
}

impl Error for QuoteFetchError {}

/// External quote source contract. The shell supplies an implementation
/// that talks to the network; core never does.
pub trait QuoteProvider {
    /// Stable provider identifier for logging.
    fn provider_id(&self) -> &str;
    /// Fetches one quote, best effort.
    fn fetch(&self) -> Result<Quote, QuoteFetchError>;
}

const PLACEHOLDER_QUOTES: &[(&str, &str)] = &[
    ("Well begun is half done.", "Aristotle"),
    ("Little by little, one travels far.", "J. R. R. Tolkien"),
    ("What gets measured gets managed.", "Peter Drucker"),
    ("It always seems impossible until it's done.", "Nelson Mandela"),
    ("Lost time is never found again.", "Benjamin Franklin"),
];

/// Built-in provider rotating the placeholder list by day key.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinQuotes;

impl BuiltinQuotes {
    /// Deterministic placeholder for a given day.
    pub fn for_day(day: DayKey) -> Quote {
        let index = day.date().num_days_from_ce().rem_euclid(
            PLACEHOLDER_QUOTES.len() as i32,
        ) as usize;
        let (text, author) = PLACEHOLDER_QUOTES[index];
        Quote {
            text: text.to_string(),
            author: Some(author.to_string()),
        }
    }
}

impl QuoteProvider for BuiltinQuotes {
    fn provider_id(&self) -> &str {
        "builtin"
    }

    fn fetch(&self) -> Result<Quote, QuoteFetchError> {
        Ok(Self::for_day(DayKey::today()))
    }
}

/// Returns the provider's quote, or the day's placeholder when it fails.
pub fn quote_of_the_day(provider: &dyn QuoteProvider, today: DayKey) -> Quote {
    match provider.fetch() {
        Ok(quote) => quote,
        Err(err) => {
            debug!("event=quote_fallback module=quote status=degraded error={err}");
            BuiltinQuotes::for_day(today)
        }
    }
}
