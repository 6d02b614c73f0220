//! Display formatting for dates, times and countdowns.

use chrono::{DateTime, Utc};

/// Whole days and hours left until `deadline`, or `"Expired"` once it has passed.
pub fn format_time_remaining(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if now >= deadline {
        return "Expired".to_string();
    }

    let remaining = deadline - now;
    let days = remaining.num_days();
    let hours = remaining.num_hours() - days * 24;

    format!("{days}d {hours}h")
}

/// e.g. `Jan 1, 2025`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// e.g. `9:05 AM`
pub fn format_time(at: DateTime<Utc>) -> String {
    at.format("%-I:%M %p").to_string()
}
