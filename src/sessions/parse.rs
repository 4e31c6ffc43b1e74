use chrono::NaiveDate;

use crate::error::{StoreError, StoreResult};

/// Parse a duration given as plain seconds (`5400`), `H:MM` (`1:30`) or
/// `H:MM:SS` (`1:30:00`).
pub fn parse_duration(input: &str) -> StoreResult<i64> {
    let trimmed = input.trim();
    let invalid = || StoreError::InvalidDuration(input.to_string());

    if !trimmed.contains(':') {
        return trimmed
            .parse::<i64>()
            .ok()
            .filter(|secs| *secs >= 0)
            .ok_or_else(invalid);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(invalid()),
    };

    let hours: i64 = hours.parse().map_err(|_| invalid())?;
    let minutes: i64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: i64 = seconds.parse().map_err(|_| invalid())?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(invalid());
    }

    Ok(hours * 3600 + minutes * 60 + seconds)
}

pub fn parse_date(input: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| StoreError::InvalidDate(input.to_string()))
}

/// Render seconds as `H:MM`.
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let minutes = seconds.abs() / 60;
    format!("{}{}:{:02}", sign, minutes / 60, minutes % 60)
}
