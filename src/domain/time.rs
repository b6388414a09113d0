//! Clock-time value object and UTC-day helpers shared across the engine.

use std::fmt;
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// A time of day in 24-hour HH:MM form.
///
/// # Domain Rules
/// - Hour must be 0..=23
/// - Minute must be 0..=59
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockTimeError> {
        if hour > 23 {
            return Err(ClockTimeError::InvalidHour(hour));
        }
        if minute > 59 {
            return Err(ClockTimeError::InvalidMinute(minute));
        }
        Ok(Self { hour, minute })
    }

    /// Parses a string of the form "HH:MM".
    pub fn parse(s: &str) -> Result<Self, ClockTimeError> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| ClockTimeError::Malformed(s.to_string()))?;
        let hour: u8 = h.parse().map_err(|_| ClockTimeError::Malformed(s.to_string()))?;
        let minute: u8 = m.parse().map_err(|_| ClockTimeError::Malformed(s.to_string()))?;
        Self::new(hour, minute)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Total minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Adds a duration in minutes, without wrapping past 24:00.
    ///
    /// Visits are required not to cross midnight, so a result at or beyond
    /// 24:00 is a validation error rather than a silent wraparound.
    pub fn add_minutes(&self, minutes: u32) -> Result<Self, ClockTimeError> {
        let total = self.minutes_since_midnight() + minutes;
        if total >= 24 * 60 {
            return Err(ClockTimeError::CrossesMidnight);
        }
        Self::new((total / 60) as u8, (total % 60) as u8)
    }

    /// Whether `[self, other)` contains `point`.
    pub fn contains(start: ClockTime, end: ClockTime, point: ClockTime) -> bool {
        start <= point && point < end
    }

    /// Whether `[a0, a1)` and `[b0, b1)` overlap (touching endpoints do not).
    pub fn overlaps(a0: ClockTime, a1: ClockTime, b0: ClockTime, b1: ClockTime) -> bool {
        a0 < b1 && b0 < a1
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockTimeError {
    InvalidHour(u8),
    InvalidMinute(u8),
    Malformed(String),
    CrossesMidnight,
}

impl fmt::Display for ClockTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockTimeError::InvalidHour(h) => write!(f, "invalid hour {}: must be 0-23", h),
            ClockTimeError::InvalidMinute(m) => write!(f, "invalid minute {}: must be 0-59", m),
            ClockTimeError::Malformed(s) => write!(f, "malformed time \"{}\": expected HH:MM", s),
            ClockTimeError::CrossesMidnight => write!(f, "resulting time crosses midnight"),
        }
    }
}

impl std::error::Error for ClockTimeError {}

/// Normalizes an instant to 00:00:00 UTC of its calendar date.
pub fn utc_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Weekday of a UTC instant, under the Monday-first convention used
/// throughout the recurrence and availability logic.
pub fn weekday_of(at: DateTime<Utc>) -> Weekday {
    at.weekday()
}

/// Number of whole weeks between two UTC days, floor-divided, where `later`
/// may be before `earlier` (yielding a negative count).
pub fn whole_weeks_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    let days = (later - earlier).num_days();
    days.div_euclid(7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn parses_valid_time() {
        let t = ClockTime::parse("09:30").unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(ClockTime::parse("9:30am").is_err());
        assert!(ClockTime::parse("25:00").is_err());
        assert!(ClockTime::parse("10:61").is_err());
    }

    #[test]
    fn add_minutes_carries_hours() {
        let t = ClockTime::new(9, 45).unwrap();
        let end = t.add_minutes(30).unwrap();
        assert_eq!(end, ClockTime::new(10, 15).unwrap());
    }

    #[test]
    fn add_minutes_rejects_crossing_midnight() {
        let t = ClockTime::new(23, 30).unwrap();
        assert!(matches!(t.add_minutes(45), Err(ClockTimeError::CrossesMidnight)));
    }

    #[test]
    fn contains_is_half_open() {
        let start = ClockTime::new(9, 0).unwrap();
        let end = ClockTime::new(10, 0).unwrap();
        assert!(ClockTime::contains(start, end, start));
        assert!(!ClockTime::contains(start, end, end));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a0 = ClockTime::new(9, 0).unwrap();
        let a1 = ClockTime::new(10, 0).unwrap();
        let b0 = ClockTime::new(10, 0).unwrap();
        let b1 = ClockTime::new(11, 0).unwrap();
        assert!(!ClockTime::overlaps(a0, a1, b0, b1));
    }

    #[test]
    fn overlapping_intervals_are_detected() {
        let a0 = ClockTime::new(9, 0).unwrap();
        let a1 = ClockTime::new(10, 30).unwrap();
        let b0 = ClockTime::new(10, 0).unwrap();
        let b1 = ClockTime::new(11, 0).unwrap();
        assert!(ClockTime::overlaps(a0, a1, b0, b1));
    }

    #[test]
    fn utc_day_normalizes_to_midnight() {
        let at = Utc.with_ymd_and_hms(2026, 3, 5, 14, 30, 0).unwrap();
        let day = utc_day(at);
        assert_eq!(day.hour(), 0);
        assert_eq!(day.minute(), 0);
        assert_eq!(day.date_naive(), at.date_naive());
    }

    #[test]
    fn whole_weeks_between_computes_floor_division() {
        let anchor = NaiveDate::from_ymd_opt(2025, 12, 30).unwrap();
        let two_weeks_later = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
        assert_eq!(whole_weeks_between(anchor, two_weeks_later), 2);
    }
}
