//! The Diagnostic Analyzer (SPEC_FULL §4.7): for a hypothetical visit,
//! explains why each active care giver would or wouldn't be assignable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::errors::AppResult;
use crate::application::oracle::FeasibilityOracle;
use crate::application::ports::{
    AppointmentRepository, AvailabilityRepository, CareGiverRepository, CareReceiverRepository,
    RoutingService,
};
use crate::domain::geo::GeoCoordinates;
use crate::domain::ids::CareGiverId;
use crate::domain::settings::SystemSettings;
use crate::domain::skill::{satisfies, GenderPreference, SkillSet};
use crate::domain::time::{weekday_of, ClockTime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareGiverAssignmentReport {
    pub care_giver_id: CareGiverId,
    pub name: String,
    pub can_assign: bool,
    pub rejection_reasons: Vec<String>,
    pub match_score: i32,
    pub distance_km: f64,
}

pub struct DiagnosticAnalyzer<'a> {
    care_givers: &'a dyn CareGiverRepository,
    care_receivers: &'a dyn CareReceiverRepository,
    availability: &'a dyn AvailabilityRepository,
    appointments: &'a dyn AppointmentRepository,
    routing: &'a dyn RoutingService,
    settings: SystemSettings,
}

impl<'a> DiagnosticAnalyzer<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        care_givers: &'a dyn CareGiverRepository,
        care_receivers: &'a dyn CareReceiverRepository,
        availability: &'a dyn AvailabilityRepository,
        appointments: &'a dyn AppointmentRepository,
        routing: &'a dyn RoutingService,
        settings: SystemSettings,
    ) -> Self {
        Self { care_givers, care_receivers, availability, appointments, routing, settings }
    }

    /// Reports on every active care giver for the hypothetical visit
    /// `(care_receiver, requirements, double_handed, date, start, end)`.
    /// Sorted assignable-first, then by descending `match_score`.
    #[allow(clippy::too_many_arguments)]
    pub fn analyze(
        &self,
        care_receiver_id: crate::domain::ids::CareReceiverId,
        requirements: &SkillSet,
        double_handed: bool,
        date: DateTime<Utc>,
        start: ClockTime,
        end: ClockTime,
    ) -> AppResult<Vec<CareGiverAssignmentReport>> {
        let receiver = self.care_receivers.find_by_id(care_receiver_id)?;
        let oracle = FeasibilityOracle::new(
            self.care_givers,
            self.care_receivers,
            self.availability,
            self.appointments,
            self.routing,
            self.settings,
        );

        let mut reports = Vec::new();
        for (id, care_giver) in self.care_givers.list_active()? {
            let mut score: i32 = 100;
            let mut reasons = Vec::new();
            let mut blocked = false;

            let missing = requirements.difference(care_giver.skills()).count();
            if missing > 0 {
                score -= 25 * missing as i32;
                reasons.push(format!("missing {} required skill(s)", missing));
            }

            if receiver.gender_preference() != GenderPreference::NoPreference
                && !receiver.gender_preference().accepts(care_giver.gender())
            {
                score -= 30;
                reasons.push("gender preference violated".to_string());
                blocked = true;
            }

            if double_handed && care_giver.single_handed_only() {
                score -= 50;
                reasons.push("secondary needed but care giver is single-handed only".to_string());
            }

            let version = self.availability.current_for(id, date)?;
            let weekday = weekday_of(date);

            match &version {
                None if care_giver.schedule().is_empty() => {
                    score -= 100;
                    reasons.push("no availability schedule at all".to_string());
                }
                _ => {
                    let working_that_day = match &version {
                        Some(v) => v.schedule().contains_key(&weekday),
                        None => care_giver.schedule().contains_key(&weekday),
                    };
                    if !working_that_day {
                        score -= 40;
                        reasons.push("not working that weekday".to_string());
                    } else {
                        let fits = match &version {
                            Some(v) => v.slot_contains_window(weekday, start, end),
                            None => care_giver
                                .schedule()
                                .get(&weekday)
                                .map(|slots| slots.iter().any(|(s, e)| *s <= start && end <= *e))
                                .unwrap_or(false),
                        };
                        if !fits {
                            score -= 30;
                            reasons.push("not within a working slot at the visit time".to_string());
                        }
                    }

                    let on_holiday = match &version {
                        Some(v) => v.on_time_off(date),
                        None => care_giver.time_off().iter().any(|to| to.covers(date)),
                    };
                    if on_holiday {
                        score -= 100;
                        reasons.push("on holiday".to_string());
                    }
                }
            }

            let distance_km = care_giver.home().distance_km(&receiver.home());
            if distance_km > self.settings.max_distance_km {
                score -= 20;
                reasons.push("distance exceeds maximum".to_string());
            } else {
                let bonus = (10.0 * (self.settings.max_distance_km - distance_km) / self.settings.max_distance_km)
                    .round() as i32;
                score += bonus;
            }

            let day_appointments = self.appointments.list_for_care_giver_on_day(id, date)?;
            let active_day_appointments: Vec<_> = day_appointments
                .into_iter()
                .filter(|(_, apt)| {
                    matches!(
                        apt.status(),
                        crate::domain::appointment::AppointmentStatus::Scheduled
                            | crate::domain::appointment::AppointmentStatus::InProgress
                    )
                })
                .collect();

            if active_day_appointments.len() as u32 >= self.settings.max_appointments_per_day {
                score -= 30;
                reasons.push("at or above daily appointment cap".to_string());
            }

            let overlap = active_day_appointments
                .iter()
                .any(|(_, apt)| ClockTime::overlaps(apt.start_time(), apt.end_time(), start, end));
            if overlap {
                score -= 40;
                reasons.push("overlaps an existing appointment".to_string());
            }

            let insufficient_gap = self.has_insufficient_travel_gap(
                id,
                &active_day_appointments,
                receiver.home(),
                start,
                end,
            );
            if insufficient_gap {
                score -= 25;
                reasons.push("insufficient travel gap to an adjacent appointment".to_string());
            }

            let result = oracle.is_available(id, date, start, end, receiver.home(), None)?;
            let can_assign = result.available && !blocked && satisfies(care_giver.skills(), requirements);

            reports.push(CareGiverAssignmentReport {
                care_giver_id: id,
                name: care_giver.name().to_string(),
                can_assign,
                rejection_reasons: reasons,
                match_score: score.clamp(0, 100),
                distance_km,
            });
        }

        reports.sort_by(|a, b| {
            b.can_assign.cmp(&a.can_assign).then(b.match_score.cmp(&a.match_score))
        });

        Ok(reports)
    }

    fn has_insufficient_travel_gap(
        &self,
        _care_giver_id: CareGiverId,
        day_appointments: &[(crate::domain::ids::AppointmentId, crate::domain::appointment::Appointment)],
        receiver_location: GeoCoordinates,
        start: ClockTime,
        end: ClockTime,
    ) -> bool {
        let buffer = self.settings.travel_time_buffer_minutes;

        let prior = day_appointments.iter().filter(|(_, apt)| apt.end_time() <= start).max_by_key(|(_, apt)| apt.end_time());
        if let Some((_, apt)) = prior {
            if let Ok(r) = self.care_receivers.find_by_id(apt.care_receiver_id()) {
                let gap = start.minutes_since_midnight() - apt.end_time().minutes_since_midnight();
                let required = self.routing.travel_time_minutes(r.home(), receiver_location) + buffer;
                if gap < required {
                    return true;
                }
            }
        }

        let next = day_appointments.iter().filter(|(_, apt)| apt.start_time() >= end).min_by_key(|(_, apt)| apt.start_time());
        if let Some((_, apt)) = next {
            if let Ok(r) = self.care_receivers.find_by_id(apt.care_receiver_id()) {
                let gap = apt.start_time().minutes_since_midnight() - end.minutes_since_midnight();
                let required = self.routing.travel_time_minutes(receiver_location, r.home()) + buffer;
                if gap < required {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::care_giver::CareGiver;
    use crate::domain::care_receiver::CareReceiver;
    use crate::domain::skill::Gender;
    use crate::infrastructure::memory::{
        InMemoryAppointmentRepository, InMemoryAvailabilityRepository, InMemoryCareGiverRepository,
        InMemoryCareReceiverRepository,
    };
    use chrono::{TimeZone, Weekday};
    use std::collections::HashMap;

    struct FixedRouting(u32);
    impl RoutingService for FixedRouting {
        fn travel_time_minutes(&self, _from: GeoCoordinates, _to: GeoCoordinates) -> u32 {
            self.0
        }
    }

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn reports_full_score_for_a_perfectly_matching_care_giver() {
        let mut care_givers = InMemoryCareGiverRepository::new();
        let mut care_receivers = InMemoryCareReceiverRepository::new();
        let mut availability = InMemoryAvailabilityRepository::new();
        let appointments = InMemoryAppointmentRepository::new();
        let routing = FixedRouting(5);

        let home = GeoCoordinates::new(51.5, -0.1).unwrap();
        let cg = CareGiver::new("Jane".to_string(), home, Gender::Female, SkillSet::new()).unwrap();
        let cg_id = care_givers.save(cg).unwrap();
        let mut schedule = HashMap::new();
        schedule.insert(Weekday::Mon, vec![(ClockTime::new(8, 0).unwrap(), ClockTime::new(18, 0).unwrap())]);
        availability.create_version(cg_id, schedule, vec![], day(2026, 1, 1)).unwrap();

        let receiver = CareReceiver::new(
            "Robert".to_string(),
            home,
            Gender::Male,
            GenderPreference::NoPreference,
        )
        .unwrap();
        let receiver_id = care_receivers.save(receiver).unwrap();

        let analyzer = DiagnosticAnalyzer::new(
            &care_givers,
            &care_receivers,
            &availability,
            &appointments,
            &routing,
            SystemSettings::default(),
        );

        let reports = analyzer
            .analyze(
                receiver_id,
                &SkillSet::new(),
                false,
                day(2026, 1, 5),
                ClockTime::new(9, 0).unwrap(),
                ClockTime::new(10, 0).unwrap(),
            )
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert!(reports[0].can_assign);
        assert_eq!(reports[0].match_score, 100);
    }

    #[test]
    fn penalizes_missing_skills_and_blocks_gender_mismatch() {
        let mut care_givers = InMemoryCareGiverRepository::new();
        let mut care_receivers = InMemoryCareReceiverRepository::new();
        let availability = InMemoryAvailabilityRepository::new();
        let appointments = InMemoryAppointmentRepository::new();
        let routing = FixedRouting(5);

        let home = GeoCoordinates::new(51.5, -0.1).unwrap();
        let cg = CareGiver::new("Jane".to_string(), home, Gender::Female, SkillSet::new()).unwrap();
        let cg_id = care_givers.save(cg).unwrap();

        let receiver = CareReceiver::new("Robert".to_string(), home, Gender::Male, GenderPreference::Male).unwrap();
        let receiver_id = care_receivers.save(receiver).unwrap();

        let analyzer = DiagnosticAnalyzer::new(
            &care_givers,
            &care_receivers,
            &availability,
            &appointments,
            &routing,
            SystemSettings::default(),
        );

        let mut required = SkillSet::new();
        required.insert(crate::domain::skill::Skill::DementiaCare);

        let reports = analyzer
            .analyze(
                receiver_id,
                &required,
                false,
                day(2026, 1, 5),
                ClockTime::new(9, 0).unwrap(),
                ClockTime::new(10, 0).unwrap(),
            )
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert!(!reports[0].can_assign);
        assert!(reports[0].rejection_reasons.iter().any(|r| r.contains("missing")));
        assert!(reports[0].rejection_reasons.iter().any(|r| r.contains("gender")));
        let _ = cg_id;
    }
}
