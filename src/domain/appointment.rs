//! The Appointment aggregate: a materialized, dated visit instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{AvailabilityVersionId, CareGiverId, CareReceiverId};
use crate::domain::skill::SkillSet;
use crate::domain::time::ClockTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    Missed,
    NeedsReview,
    NeedsReassignment,
}

/// A snapshot of the AvailabilityVersion in force when an appointment was
/// created, so historical audit survives later schedule changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    pub version_id: AvailabilityVersionId,
    pub slots: Vec<(ClockTime, ClockTime)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentValidationError {
    InvalidTimeWindow,
    DoubleHandedMissingSecondary,
}

impl std::fmt::Display for AppointmentValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentValidationError::InvalidTimeWindow => {
                write!(f, "end_time must be strictly after start_time")
            }
            AppointmentValidationError::DoubleHandedMissingSecondary => {
                write!(f, "double-handed appointment requires a secondary care giver")
            }
        }
    }
}

impl std::error::Error for AppointmentValidationError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    care_receiver_id: CareReceiverId,
    care_giver_id: CareGiverId,
    secondary_care_giver_id: Option<CareGiverId>,
    date: DateTime<Utc>,
    start_time: ClockTime,
    end_time: ClockTime,
    visit_number: u32,
    requirements: SkillSet,
    double_handed: bool,
    priority: u8,
    status: AppointmentStatus,
    cancellation_reason: Option<String>,
    invalidation_reason: Option<String>,
    invalidated_at: Option<DateTime<Utc>>,
    snapshot: Option<AvailabilitySnapshot>,
}

impl Appointment {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        care_receiver_id: CareReceiverId,
        care_giver_id: CareGiverId,
        secondary_care_giver_id: Option<CareGiverId>,
        date: DateTime<Utc>,
        start_time: ClockTime,
        end_time: ClockTime,
        visit_number: u32,
        requirements: SkillSet,
        double_handed: bool,
        priority: u8,
        snapshot: Option<AvailabilitySnapshot>,
    ) -> Result<Self, AppointmentValidationError> {
        if end_time <= start_time {
            return Err(AppointmentValidationError::InvalidTimeWindow);
        }
        if double_handed && secondary_care_giver_id.is_none() {
            return Err(AppointmentValidationError::DoubleHandedMissingSecondary);
        }

        Ok(Self {
            care_receiver_id,
            care_giver_id,
            secondary_care_giver_id,
            date: crate::domain::time::utc_day(date),
            start_time,
            end_time,
            visit_number,
            requirements,
            double_handed,
            priority,
            status: AppointmentStatus::Scheduled,
            cancellation_reason: None,
            invalidation_reason: None,
            invalidated_at: None,
            snapshot,
        })
    }

    // ── GETTERS ─────────────────────────────────────────────

    pub fn care_receiver_id(&self) -> CareReceiverId {
        self.care_receiver_id
    }

    pub fn care_giver_id(&self) -> CareGiverId {
        self.care_giver_id
    }

    pub fn secondary_care_giver_id(&self) -> Option<CareGiverId> {
        self.secondary_care_giver_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn start_time(&self) -> ClockTime {
        self.start_time
    }

    pub fn end_time(&self) -> ClockTime {
        self.end_time
    }

    pub fn visit_number(&self) -> u32 {
        self.visit_number
    }

    pub fn requirements(&self) -> &SkillSet {
        &self.requirements
    }

    pub fn double_handed(&self) -> bool {
        self.double_handed
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn invalidation_reason(&self) -> Option<&str> {
        self.invalidation_reason.as_deref()
    }

    pub fn invalidated_at(&self) -> Option<DateTime<Utc>> {
        self.invalidated_at
    }

    /// Whether `[start_time, end_time)` overlaps another appointment's window.
    /// Touching endpoints do not count as an overlap.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.date == other.date
            && ClockTime::overlaps(self.start_time, self.end_time, other.start_time, other.end_time)
    }

    /// Whether the given care giver id holds either role on this appointment.
    pub fn involves(&self, care_giver_id: CareGiverId) -> bool {
        self.care_giver_id == care_giver_id || self.secondary_care_giver_id == Some(care_giver_id)
    }

    // ── STATUS TRANSITIONS ──────────────────────────────────

    pub fn cancel(&mut self, reason: String) {
        self.status = AppointmentStatus::Cancelled;
        self.cancellation_reason = Some(reason);
    }

    pub fn mark_needs_reassignment(&mut self, reason: String, at: DateTime<Utc>) {
        self.status = AppointmentStatus::NeedsReassignment;
        self.invalidation_reason = Some(reason);
        self.invalidated_at = Some(at);
    }

    /// Restores a previously invalidated appointment once its issues have
    /// all cleared.
    pub fn restore_to_scheduled(&mut self) {
        self.status = AppointmentStatus::Scheduled;
        self.invalidation_reason = None;
        self.invalidated_at = None;
    }

    pub fn set_status(&mut self, status: AppointmentStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appt(start: u8, end: u8) -> Appointment {
        Appointment::new(
            CareReceiverId::new(),
            CareGiverId::new(),
            None,
            Utc::now(),
            ClockTime::new(start, 0).unwrap(),
            ClockTime::new(end, 0).unwrap(),
            1,
            SkillSet::new(),
            false,
            3,
            None,
        )
        .unwrap()
    }

    #[test]
    fn rejects_inverted_time_window() {
        let err = Appointment::new(
            CareReceiverId::new(),
            CareGiverId::new(),
            None,
            Utc::now(),
            ClockTime::new(10, 0).unwrap(),
            ClockTime::new(9, 0).unwrap(),
            1,
            SkillSet::new(),
            false,
            3,
            None,
        );
        assert!(matches!(err, Err(AppointmentValidationError::InvalidTimeWindow)));
    }

    #[test]
    fn rejects_double_handed_without_secondary() {
        let err = Appointment::new(
            CareReceiverId::new(),
            CareGiverId::new(),
            None,
            Utc::now(),
            ClockTime::new(9, 0).unwrap(),
            ClockTime::new(10, 0).unwrap(),
            1,
            SkillSet::new(),
            true,
            3,
            None,
        );
        assert!(matches!(
            err,
            Err(AppointmentValidationError::DoubleHandedMissingSecondary)
        ));
    }

    #[test]
    fn touching_appointments_on_same_day_do_not_overlap() {
        let a = appt(9, 10);
        let b = appt(10, 11);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn overlapping_appointments_are_detected() {
        let a = appt(9, 11);
        let b = appt(10, 12);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn restore_clears_invalidation_fields() {
        let mut a = appt(9, 10);
        a.mark_needs_reassignment("on time off".to_string(), Utc::now());
        assert_eq!(a.status(), AppointmentStatus::NeedsReassignment);
        assert!(a.invalidation_reason().is_some());

        a.restore_to_scheduled();
        assert_eq!(a.status(), AppointmentStatus::Scheduled);
        assert!(a.invalidation_reason().is_none());
        assert!(a.invalidated_at().is_none());
    }
}
