//! The Validator (SPEC_FULL §4.6): periodically re-checks materialized
//! appointments against the current state of care givers and care receivers,
//! flagging ones whose assumptions no longer hold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::errors::AppResult;
use crate::application::ports::{
    AppointmentRepository, AvailabilityRepository, CareGiverRepository, CareReceiverRepository,
};
use crate::domain::appointment::AppointmentStatus;
use crate::domain::ids::AppointmentId;

/// One appointment's outcome from a validator pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Already valid, or restored to `scheduled` because its issues cleared.
    Valid,
    /// Moved (or kept) in `needs_reassignment`, with the joined reasons.
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub checked: usize,
    pub invalidated: usize,
    pub restored: usize,
}

pub struct Validator<'a> {
    care_givers: &'a dyn CareGiverRepository,
    care_receivers: &'a dyn CareReceiverRepository,
    availability: &'a dyn AvailabilityRepository,
    appointments: &'a mut dyn AppointmentRepository,
}

impl<'a> Validator<'a> {
    pub fn new(
        care_givers: &'a dyn CareGiverRepository,
        care_receivers: &'a dyn CareReceiverRepository,
        availability: &'a dyn AvailabilityRepository,
        appointments: &'a mut dyn AppointmentRepository,
    ) -> Self {
        Self { care_givers, care_receivers, availability, appointments }
    }

    /// Scans appointments in `{scheduled, needs_reassignment}` whose `date`
    /// falls in `[start, end]` and re-checks each against current state.
    pub fn validate_range(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<(ValidationSummary, Vec<(AppointmentId, ValidationOutcome)>)> {
        let candidates: Vec<(AppointmentId, _)> = self
            .appointments
            .list_in_range(start, end)?
            .into_iter()
            .filter(|(_, apt)| {
                matches!(apt.status(), AppointmentStatus::Scheduled | AppointmentStatus::NeedsReassignment)
            })
            .collect();

        let mut summary = ValidationSummary::default();
        let mut outcomes = Vec::with_capacity(candidates.len());

        for (id, mut appointment) in candidates {
            summary.checked += 1;
            let issues = self.issues_for(&appointment)?;

            if issues.is_empty() {
                if appointment.status() == AppointmentStatus::NeedsReassignment {
                    appointment.restore_to_scheduled();
                    self.appointments.update(id, appointment)?;
                    summary.restored += 1;
                    outcomes.push((id, ValidationOutcome::Valid));
                } else {
                    outcomes.push((id, ValidationOutcome::Valid));
                }
            } else {
                let joined = issues.join("; ");
                appointment.mark_needs_reassignment(joined.clone(), Utc::now());
                self.appointments.update(id, appointment)?;
                summary.invalidated += 1;
                outcomes.push((id, ValidationOutcome::Invalid(joined)));
            }
        }

        Ok((summary, outcomes))
    }

    fn issues_for(&self, appointment: &crate::domain::appointment::Appointment) -> AppResult<Vec<String>> {
        let mut issues = Vec::new();

        match self.care_receivers.find_by_id(appointment.care_receiver_id()) {
            Ok(r) if r.is_active() => {}
            _ => issues.push("care receiver no longer exists or is inactive".to_string()),
        }

        for (role, care_giver_id) in [
            ("primary", Some(appointment.care_giver_id())),
            ("secondary", appointment.secondary_care_giver_id()),
        ] {
            let Some(care_giver_id) = care_giver_id else { continue };
            match self.care_givers.find_by_id(care_giver_id) {
                Ok(cg) if cg.is_active() => {
                    let version = self.availability.current_for(care_giver_id, appointment.date())?;
                    let on_holiday = match &version {
                        Some(v) => v.on_time_off(appointment.date()),
                        None => cg.time_off().iter().any(|to| to.covers(appointment.date())),
                    };
                    if on_holiday {
                        issues.push(format!("{} care giver is on time off", role));
                    }
                }
                _ => issues.push(format!("{} care giver no longer exists or is inactive", role)),
            }
        }

        if appointment.double_handed() && appointment.secondary_care_giver_id().is_none() {
            issues.push("double-handed appointment is missing a secondary care giver".to_string());
        }

        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::appointment::Appointment;
    use crate::domain::availability::TimeOffInterval;
    use crate::domain::care_giver::CareGiver;
    use crate::domain::care_receiver::CareReceiver;
    use crate::domain::geo::GeoCoordinates;
    use crate::domain::skill::{Gender, GenderPreference, SkillSet};
    use crate::domain::time::ClockTime;
    use crate::infrastructure::memory::{
        InMemoryAppointmentRepository, InMemoryAvailabilityRepository, InMemoryCareGiverRepository,
        InMemoryCareReceiverRepository,
    };
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn home() -> GeoCoordinates {
        GeoCoordinates::new(51.5, -0.1).unwrap()
    }

    #[test]
    fn flags_a_newly_added_holiday_then_restores_once_removed() {
        let mut care_givers = InMemoryCareGiverRepository::new();
        let mut care_receivers = InMemoryCareReceiverRepository::new();
        let availability = InMemoryAvailabilityRepository::new();
        let mut appointments = InMemoryAppointmentRepository::new();

        let mut cg = CareGiver::new("Jane".to_string(), home(), Gender::Female, SkillSet::new()).unwrap();
        cg.set_time_off(vec![]);
        let cg_id = care_givers.save(cg).unwrap();

        let receiver = CareReceiver::new("Robert".to_string(), home(), Gender::Male, GenderPreference::NoPreference)
            .unwrap();
        let receiver_id = care_receivers.save(receiver).unwrap();

        let apt = Appointment::new(
            receiver_id,
            cg_id,
            None,
            day(2026, 1, 5),
            ClockTime::new(9, 0).unwrap(),
            ClockTime::new(10, 0).unwrap(),
            1,
            SkillSet::new(),
            false,
            3,
            None,
        )
        .unwrap();
        let apt_id = appointments.save(apt).unwrap();

        // First pass: no holiday yet, appointment stays valid.
        {
            let mut validator = Validator::new(&care_givers, &care_receivers, &availability, &mut appointments);
            let (summary, _) = validator.validate_range(day(2026, 1, 1), day(2026, 1, 31)).unwrap();
            assert_eq!(summary.invalidated, 0);
        }

        // Add a holiday covering the appointment's date.
        let mut cg = care_givers.find_by_id(cg_id).unwrap();
        cg.set_time_off(vec![TimeOffInterval::new(day(2026, 1, 5), day(2026, 1, 5), None).unwrap()]);
        care_givers.update(cg_id, cg).unwrap();

        {
            let mut validator = Validator::new(&care_givers, &care_receivers, &availability, &mut appointments);
            let (summary, _) = validator.validate_range(day(2026, 1, 1), day(2026, 1, 31)).unwrap();
            assert_eq!(summary.invalidated, 1);
        }
        let invalidated = appointments.find_by_id(apt_id).unwrap();
        assert_eq!(invalidated.status(), AppointmentStatus::NeedsReassignment);
        assert!(invalidated.invalidation_reason().unwrap().contains("time off"));

        // Remove the holiday; the next pass restores it.
        let mut cg = care_givers.find_by_id(cg_id).unwrap();
        cg.set_time_off(vec![]);
        care_givers.update(cg_id, cg).unwrap();

        {
            let mut validator = Validator::new(&care_givers, &care_receivers, &availability, &mut appointments);
            let (summary, _) = validator.validate_range(day(2026, 1, 1), day(2026, 1, 31)).unwrap();
            assert_eq!(summary.restored, 1);
        }
        let restored = appointments.find_by_id(apt_id).unwrap();
        assert_eq!(restored.status(), AppointmentStatus::Scheduled);
        assert!(restored.invalidation_reason().is_none());
    }

    #[test]
    fn appointment_referencing_a_vanished_care_giver_is_flagged() {
        let care_givers = InMemoryCareGiverRepository::new();
        let mut care_receivers = InMemoryCareReceiverRepository::new();
        let availability = InMemoryAvailabilityRepository::new();
        let mut appointments = InMemoryAppointmentRepository::new();

        let receiver = CareReceiver::new("Margaret".to_string(), home(), Gender::Female, GenderPreference::NoPreference)
            .unwrap();
        let receiver_id = care_receivers.save(receiver).unwrap();

        let mut apt = Appointment::new(
            receiver_id,
            crate::domain::ids::CareGiverId::new(),
            None,
            day(2026, 1, 5),
            ClockTime::new(9, 0).unwrap(),
            ClockTime::new(10, 0).unwrap(),
            1,
            SkillSet::new(),
            false,
            3,
            None,
        )
        .unwrap();
        apt.set_status(AppointmentStatus::Scheduled);
        appointments.save(apt).unwrap();

        let mut validator = Validator::new(&care_givers, &care_receivers, &availability, &mut appointments);
        let (summary, _) = validator.validate_range(day(2026, 1, 1), day(2026, 1, 31)).unwrap();
        // Primary care giver doesn't exist in the repository, so it is flagged
        // regardless of the double-handed check.
        assert_eq!(summary.invalidated, 1);
    }

    #[test]
    fn a_holiday_added_as_a_new_availability_version_invalidates_too() {
        let mut care_givers = InMemoryCareGiverRepository::new();
        let mut care_receivers = InMemoryCareReceiverRepository::new();
        let mut availability = InMemoryAvailabilityRepository::new();
        let mut appointments = InMemoryAppointmentRepository::new();

        let cg = CareGiver::new("Jane".to_string(), home(), Gender::Female, SkillSet::new()).unwrap();
        let cg_id = care_givers.save(cg).unwrap();
        availability
            .create_version(cg_id, Default::default(), vec![], day(2026, 1, 1))
            .unwrap();

        let receiver = CareReceiver::new("Robert".to_string(), home(), Gender::Male, GenderPreference::NoPreference)
            .unwrap();
        let receiver_id = care_receivers.save(receiver).unwrap();

        let apt = Appointment::new(
            receiver_id,
            cg_id,
            None,
            day(2026, 1, 10),
            ClockTime::new(9, 0).unwrap(),
            ClockTime::new(10, 0).unwrap(),
            1,
            SkillSet::new(),
            false,
            3,
            None,
        )
        .unwrap();
        let apt_id = appointments.save(apt).unwrap();

        // Versioned holiday, not the care giver's inline time-off list.
        availability
            .create_version(
                cg_id,
                Default::default(),
                vec![TimeOffInterval::new(day(2026, 1, 10), day(2026, 1, 10), None).unwrap()],
                day(2026, 1, 5),
            )
            .unwrap();

        let mut validator = Validator::new(&care_givers, &care_receivers, &availability, &mut appointments);
        let (summary, _) = validator.validate_range(day(2026, 1, 1), day(2026, 1, 31)).unwrap();
        assert_eq!(summary.invalidated, 1);

        let invalidated = appointments.find_by_id(apt_id).unwrap();
        assert_eq!(invalidated.status(), AppointmentStatus::NeedsReassignment);
    }
}
