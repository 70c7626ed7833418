//! Time handling for journey planning.
//!
//! Feed times are relative: a route stop or a transfer carries a travel
//! time in seconds, and the planner accumulates them into offsets from the
//! moment of departure. Only the journey assembler turns those offsets into
//! wall-clock instants, using `chrono::NaiveDateTime`.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Error returned when parsing an invalid departure time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid departure time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Convert a whole number of seconds, as authored in a feed, to a duration.
pub fn seconds(secs: i64) -> Duration {
    Duration::seconds(secs)
}

/// Format a wall-clock instant as `H:mm` (hour without padding).
///
/// # Examples
///
/// ```
/// use transit_planner::domain::format_clock;
/// use chrono::NaiveDate;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
///     .unwrap()
///     .and_hms_opt(9, 5, 0)
///     .unwrap();
/// assert_eq!(format_clock(dt), "9:05");
/// ```
pub fn format_clock(instant: NaiveDateTime) -> String {
    instant.format("%-H:%M").to_string()
}

/// Format a duration as `H:MM`.
///
/// Hours are rounded down; the remaining minutes are rounded up, so a
/// journey of 61 seconds reads `0:02`. Rounding never carries into the
/// hour: a remainder over 59 minutes reads `60`.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::format_duration;
/// use chrono::Duration;
///
/// assert_eq!(format_duration(Duration::seconds(600)), "0:10");
/// assert_eq!(format_duration(Duration::seconds(3720)), "1:02");
/// assert_eq!(format_duration(Duration::seconds(61)), "0:02");
/// assert_eq!(format_duration(Duration::seconds(3599)), "0:60");
/// assert_eq!(format_duration(Duration::seconds(7141)), "1:60");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = ceil_div(total % 3600, 60);
    format!("{hours}:{minutes:02}")
}

/// Returns the number of started minutes in a duration.
///
/// Used to display walking times, where 90 seconds reads as 2 minutes.
pub fn ceil_minutes(duration: Duration) -> i64 {
    ceil_div(duration.num_seconds().max(0), 60)
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
    (value + divisor - 1) / divisor
}

/// Parse a departure time.
///
/// Accepts either a full `YYYY-MM-DDTHH:MM` instant or a bare `HH:MM`,
/// which is taken on `today`.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::parse_departure;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
///
/// let dt = parse_departure("14:30", today).unwrap();
/// assert_eq!(dt.to_string(), "2024-03-15 14:30:00");
///
/// let dt = parse_departure("2024-03-16T08:00", today).unwrap();
/// assert_eq!(dt.to_string(), "2024-03-16 08:00:00");
///
/// assert!(parse_departure("25:00", today).is_err());
/// ```
pub fn parse_departure(s: &str, today: NaiveDate) -> Result<NaiveDateTime, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::new("empty string"));
    }

    if let Ok(instant) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(instant);
    }

    NaiveTime::parse_from_str(s, "%H:%M")
        .map(|time| today.and_time(time))
        .map_err(|_| TimeError::new("expected HH:MM or YYYY-MM-DDTHH:MM"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn clock_has_unpadded_hour() {
        assert_eq!(format_clock(at(0, 0, 0)), "0:00");
        assert_eq!(format_clock(at(7, 9, 59)), "7:09");
        assert_eq!(format_clock(at(23, 45, 0)), "23:45");
    }

    #[test]
    fn duration_rounds_minutes_up() {
        assert_eq!(format_duration(Duration::zero()), "0:00");
        assert_eq!(format_duration(Duration::seconds(1)), "0:01");
        assert_eq!(format_duration(Duration::seconds(120)), "0:02");
        assert_eq!(format_duration(Duration::seconds(3600)), "1:00");
        assert_eq!(format_duration(Duration::seconds(2 * 3600 + 30 * 60)), "2:30");
    }

    #[test]
    fn minutes_round_up_without_carrying() {
        assert_eq!(format_duration(Duration::seconds(3540)), "0:59");
        assert_eq!(format_duration(Duration::seconds(3541)), "0:60");
        assert_eq!(format_duration(Duration::seconds(3600 + 3599)), "1:60");
        assert_eq!(format_duration(Duration::seconds(7200)), "2:00");
    }

    #[test]
    fn negative_duration_is_clamped() {
        assert_eq!(format_duration(Duration::seconds(-30)), "0:00");
        assert_eq!(ceil_minutes(Duration::seconds(-30)), 0);
    }

    #[test]
    fn walking_minutes() {
        assert_eq!(ceil_minutes(Duration::seconds(0)), 0);
        assert_eq!(ceil_minutes(Duration::seconds(60)), 1);
        assert_eq!(ceil_minutes(Duration::seconds(90)), 2);
    }

    #[test]
    fn parse_rejects_garbage() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert!(parse_departure("", today).is_err());
        assert!(parse_departure("noon", today).is_err());
        assert!(parse_departure("12:60", today).is_err());
        assert!(parse_departure("2024-13-01T10:00", today).is_err());
    }

    #[test]
    fn error_display() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let err = parse_departure("", today).unwrap_err();
        assert_eq!(err.to_string(), "invalid departure time: empty string");
    }
}
