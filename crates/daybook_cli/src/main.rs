//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `daybook_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use daybook_core::{quote_of_the_day, BuiltinQuotes, DayKey, WeekKey};

fn main() {
    let today = DayKey::today();
    let week = WeekKey::this_week();
    let quote = quote_of_the_day(&BuiltinQuotes, today);

    println!("daybook_core version={}", daybook_core::core_version());
    println!("today={today} week_start={week}");
    match quote.author {
        Some(author) => println!("quote=\"{}\" ({author})", quote.text),
        None => println!("quote=\"{}\"", quote.text),
    }
}
