use chrono::{DateTime, Utc};

/// Short local-style timestamp for history rows (`14/11/2023 22:13`).
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{seconds}s")
}
