use chrono::{Datelike, Timelike};

/// Shown before the clock has produced its first sample.
pub const TIME_PLACEHOLDER: &str = "--:--:--";
pub const DATE_PLACEHOLDER: &str = "---- -- --";

/// `HH:MM:SS`, 24-hour, zero-padded.
pub fn format_time<T: Timelike>(t: &T) -> String {
    format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())
}

/// `YYYY - MM - DD`, local calendar date, month 1-indexed.
pub fn format_date<D: Datelike>(d: &D) -> String {
    format!("{:04} - {:02} - {:02}", d.year(), d.month(), d.day())
}
