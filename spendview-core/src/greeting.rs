//! Time-of-day greeting for the main view.

use chrono::{NaiveDateTime, Timelike};

/// Greeting band for an hour of the day: [5,12) morning, [12,18)
/// afternoon, [18,23) evening, everything else night.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning",
        12..=17 => "Good afternoon",
        18..=22 => "Good evening",
        _ => "Good night",
    }
}

pub fn greeting_at(instant: NaiveDateTime) -> &'static str {
    greeting_for_hour(instant.hour())
}
