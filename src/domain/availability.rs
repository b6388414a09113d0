//! Availability history: versioned weekly schedules and holiday blocks.
//!
//! A care giver's availability is append-only. Each [`AvailabilityVersion`]
//! covers `[effective_from, effective_to)`; creating a new version closes
//! whichever version was previously open. This lets a scheduled appointment
//! keep a snapshot of the schedule in force when it was created, even after
//! the care giver's pattern later changes.

use std::collections::HashMap;
use std::fmt;
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{AvailabilityVersionId, CareGiverId};
use crate::domain::time::{utc_day, ClockTime};

/// A single working window on a given weekday.
pub type Slot = (ClockTime, ClockTime);

/// Weekday-indexed working slots. A day absent from the map has no slots.
pub type WeeklySchedule = HashMap<Weekday, Vec<Slot>>;

/// A block of time a care giver is unavailable, e.g. a holiday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    reason: Option<String>,
}

impl TimeOffInterval {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason: Option<String>,
    ) -> Result<Self, AvailabilityError> {
        if end < start {
            return Err(AvailabilityError::InvalidTimeOff);
        }
        Ok(Self {
            start: utc_day(start),
            end: utc_day(end),
            reason,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Whether the given UTC day falls within this interval, inclusive.
    pub fn covers(&self, day: DateTime<Utc>) -> bool {
        let day = utc_day(day);
        self.start <= day && day <= self.end
    }
}

/// An immutable slice of a care giver's schedule, valid over
/// `[effective_from, effective_to)`. `effective_to = None` means "still open".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityVersion {
    id: AvailabilityVersionId,
    care_giver_id: CareGiverId,
    version: u32,
    schedule: WeeklySchedule,
    time_off: Vec<TimeOffInterval>,
    effective_from: DateTime<Utc>,
    effective_to: Option<DateTime<Utc>>,
    is_active: bool,
}

impl AvailabilityVersion {
    /// Constructs a new open version. Closing any prior open version for
    /// the same care giver is the Availability Store's responsibility, not
    /// this constructor's — see `application::ports::AvailabilityRepository`.
    pub fn new(
        care_giver_id: CareGiverId,
        version: u32,
        schedule: WeeklySchedule,
        time_off: Vec<TimeOffInterval>,
        effective_from: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AvailabilityVersionId::new(),
            care_giver_id,
            version,
            schedule,
            time_off,
            effective_from: utc_day(effective_from),
            effective_to: None,
            is_active: true,
        }
    }

    pub fn care_giver_id(&self) -> CareGiverId {
        self.care_giver_id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn time_off(&self) -> &[TimeOffInterval] {
        &self.time_off
    }

    pub fn effective_from(&self) -> DateTime<Utc> {
        self.effective_from
    }

    pub fn effective_to(&self) -> Option<DateTime<Utc>> {
        self.effective_to
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// True if this version was in force on `at_date` (ignoring `is_active`,
    /// so historical audit can still see a closed version's coverage).
    pub fn covers_date(&self, at_date: DateTime<Utc>) -> bool {
        let day = utc_day(at_date);
        self.effective_from <= day && self.effective_to.map_or(true, |to| day < utc_day(to))
    }

    /// Closes this version as of `at`, called when a newer version opens.
    pub(crate) fn close(&mut self, at: DateTime<Utc>) {
        self.effective_to = Some(utc_day(at));
        self.is_active = false;
    }

    /// Whether `(day, time)` falls inside a scheduled working slot.
    pub fn available_at(&self, day: Weekday, time: ClockTime) -> bool {
        self.schedule
            .get(&day)
            .map(|slots| slots.iter().any(|(s, e)| ClockTime::contains(*s, *e, time)))
            .unwrap_or(false)
    }

    /// Whether a full `[start, end)` window fits inside a single slot.
    pub fn slot_contains_window(&self, day: Weekday, start: ClockTime, end: ClockTime) -> bool {
        self.schedule
            .get(&day)
            .map(|slots| slots.iter().any(|(s, e)| *s <= start && end <= *e))
            .unwrap_or(false)
    }

    /// Whether `date` lies inside any holiday interval of this version.
    pub fn on_time_off(&self, date: DateTime<Utc>) -> bool {
        self.time_off.iter().any(|to| to.covers(date))
    }

    /// Stable for the lifetime of this version, assigned at construction.
    /// Appointments snapshot it at creation time to audit which version was
    /// in force.
    pub fn id(&self) -> AvailabilityVersionId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    InvalidTimeOff,
}

impl fmt::Display for AvailabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilityError::InvalidTimeOff => write!(f, "time off end cannot precede start"),
        }
    }
}

impl std::error::Error for AvailabilityError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn time_off_rejects_inverted_range() {
        let err = TimeOffInterval::new(day(2026, 2, 10), day(2026, 2, 5), None);
        assert!(matches!(err, Err(AvailabilityError::InvalidTimeOff)));
    }

    #[test]
    fn time_off_covers_inclusive_range() {
        let off = TimeOffInterval::new(day(2026, 2, 5), day(2026, 2, 10), None).unwrap();
        assert!(off.covers(day(2026, 2, 5)));
        assert!(off.covers(day(2026, 2, 10)));
        assert!(!off.covers(day(2026, 2, 11)));
    }

    #[test]
    fn available_at_checks_weekday_slots() {
        let mut schedule = WeeklySchedule::new();
        schedule.insert(
            Weekday::Mon,
            vec![(ClockTime::new(9, 0).unwrap(), ClockTime::new(17, 0).unwrap())],
        );
        let version = AvailabilityVersion::new(
            CareGiverId::new(),
            1,
            schedule,
            vec![],
            day(2026, 1, 1),
        );

        assert!(version.available_at(Weekday::Mon, ClockTime::new(10, 0).unwrap()));
        assert!(!version.available_at(Weekday::Mon, ClockTime::new(18, 0).unwrap()));
        assert!(!version.available_at(Weekday::Tue, ClockTime::new(10, 0).unwrap()));
    }

    #[test]
    fn slot_contains_window_requires_full_fit() {
        let mut schedule = WeeklySchedule::new();
        schedule.insert(
            Weekday::Mon,
            vec![(ClockTime::new(9, 0).unwrap(), ClockTime::new(12, 0).unwrap())],
        );
        let version = AvailabilityVersion::new(CareGiverId::new(), 1, schedule, vec![], day(2026, 1, 1));

        assert!(version.slot_contains_window(
            Weekday::Mon,
            ClockTime::new(9, 0).unwrap(),
            ClockTime::new(10, 0).unwrap()
        ));
        assert!(!version.slot_contains_window(
            Weekday::Mon,
            ClockTime::new(11, 0).unwrap(),
            ClockTime::new(13, 0).unwrap()
        ));
    }

    #[test]
    fn closing_a_version_sets_effective_to_and_deactivates() {
        let mut version = AvailabilityVersion::new(
            CareGiverId::new(),
            1,
            WeeklySchedule::new(),
            vec![],
            day(2026, 1, 1),
        );
        version.close(day(2026, 2, 1));
        assert_eq!(version.effective_to(), Some(day(2026, 2, 1)));
        assert!(!version.is_active());
    }

    #[test]
    fn covers_date_respects_open_and_closed_bounds() {
        let mut version = AvailabilityVersion::new(
            CareGiverId::new(),
            1,
            WeeklySchedule::new(),
            vec![],
            day(2026, 1, 1),
        );
        assert!(version.covers_date(day(2026, 6, 1)));
        version.close(day(2026, 3, 1));
        assert!(version.covers_date(day(2026, 2, 15)));
        assert!(!version.covers_date(day(2026, 3, 1)));
    }
}
