//! The Assignment Engine (SPEC_FULL §4.5): expands a care receiver's
//! VisitTemplates over a date range and assigns feasible care givers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::application::errors::AppResult;
use crate::application::oracle::FeasibilityOracle;
use crate::application::ports::{
    AppointmentRepository, AvailabilityRepository, CareGiverRepository, CareReceiverRepository,
    RoutingService,
};
use crate::domain::appointment::{Appointment, AppointmentStatus, AvailabilitySnapshot};
use crate::domain::care_giver::CareGiver;
use crate::domain::geo::GeoCoordinates;
use crate::domain::ids::{AppointmentId, CareGiverId, CareReceiverId};
use crate::domain::recurrence::recurs_on;
use crate::domain::settings::SystemSettings;
use crate::domain::time::utc_day;
use crate::domain::visit_template::VisitTemplate;

/// A single visit that could not be scheduled, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnscheduledVisit {
    pub visit_number: u32,
    pub date: DateTime<Utc>,
    pub reason: String,
}

/// The outcome of running the engine for one care receiver over a range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiverScheduleResult {
    pub care_receiver_id: Option<CareReceiverId>,
    pub scheduled: Vec<AppointmentId>,
    pub failed: Vec<UnscheduledVisit>,
}

/// Totals across a bulk `generate` run, published to the notification port.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateSummary {
    pub total_scheduled: usize,
    pub total_failed: usize,
    pub care_receivers_processed: usize,
}

struct Candidate {
    id: CareGiverId,
    care_giver: CareGiver,
    score: f64,
}

pub struct AssignmentEngine<'a> {
    care_givers: &'a mut dyn CareGiverRepository,
    care_receivers: &'a dyn CareReceiverRepository,
    availability: &'a dyn AvailabilityRepository,
    appointments: &'a mut dyn AppointmentRepository,
    routing: &'a dyn RoutingService,
    settings: SystemSettings,
}

impl<'a> AssignmentEngine<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        care_givers: &'a mut dyn CareGiverRepository,
        care_receivers: &'a dyn CareReceiverRepository,
        availability: &'a dyn AvailabilityRepository,
        appointments: &'a mut dyn AppointmentRepository,
        routing: &'a dyn RoutingService,
        settings: SystemSettings,
    ) -> Self {
        Self { care_givers, care_receivers, availability, appointments, routing, settings }
    }

    /// Expands and assigns visits for one care receiver over `[start, end]`
    /// (UTC-day inclusive). Days are walked in increasing order; templates
    /// within a day are walked in ascending `visit_number` order.
    pub fn schedule_receiver(
        &mut self,
        care_receiver_id: CareReceiverId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<ReceiverScheduleResult> {
        let receiver = self.care_receivers.find_by_id(care_receiver_id)?;
        let mut result =
            ReceiverScheduleResult { care_receiver_id: Some(care_receiver_id), ..Default::default() };

        let start = utc_day(start);
        let end = utc_day(end);
        let mut templates = receiver.visit_templates().to_vec();
        templates.sort_by_key(|t| t.visit_number());

        let mut day = start;
        while day <= end {
            for template in &templates {
                if !recurs_on(template, day, receiver.created_at()) {
                    continue;
                }

                if self.already_covered(care_receiver_id, day, template.visit_number())? {
                    continue;
                }

                let start_time = template.preferred_time();
                let end_time = match start_time.add_minutes(template.duration_minutes()) {
                    Ok(t) => t,
                    Err(_) => {
                        result.failed.push(UnscheduledVisit {
                            visit_number: template.visit_number(),
                            date: day,
                            reason: "visit duration crosses midnight".to_string(),
                        });
                        continue;
                    }
                };

                match self.assign_visit(care_receiver_id, template, day, start_time, end_time, None) {
                    Ok((appointment, None)) => {
                        let id = self.appointments.save(appointment)?;
                        result.scheduled.push(id);
                    }
                    Ok((_, Some(reason))) => {
                        result.failed.push(UnscheduledVisit {
                            visit_number: template.visit_number(),
                            date: day,
                            reason,
                        });
                    }
                    Err(reason) => {
                        result.failed.push(UnscheduledVisit {
                            visit_number: template.visit_number(),
                            date: day,
                            reason,
                        });
                    }
                }
            }
            day += Duration::days(1);
        }

        Ok(result)
    }

    /// Schedules a list of receivers in the order supplied, aggregating a
    /// summary across the whole run.
    pub fn schedule_many(
        &mut self,
        care_receiver_ids: &[CareReceiverId],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<(Vec<ReceiverScheduleResult>, GenerateSummary)> {
        let mut results = Vec::with_capacity(care_receiver_ids.len());
        let mut summary = GenerateSummary::default();

        for &care_receiver_id in care_receiver_ids {
            let result = self.schedule_receiver(care_receiver_id, start, end)?;
            summary.total_scheduled += result.scheduled.len();
            summary.total_failed += result.failed.len();
            summary.care_receivers_processed += 1;
            results.push(result);
        }

        Ok((results, summary))
    }

    /// Attempts to find and commit a primary (and, if required, secondary)
    /// care giver for one visit occurrence. Returns either the created
    /// appointment, or `None` plus a human-readable failure reason — the
    /// primary is never committed unless the whole visit succeeds.
    fn assign_visit(
        &self,
        care_receiver_id: CareReceiverId,
        template: &VisitTemplate,
        day: DateTime<Utc>,
        start_time: crate::domain::time::ClockTime,
        end_time: crate::domain::time::ClockTime,
        _exclude: Option<CareGiverId>,
    ) -> Result<(Appointment, Option<String>), String> {
        let receiver = self
            .care_receivers
            .find_by_id(care_receiver_id)
            .map_err(|e| e.to_string())?;

        let primary = self
            .best_candidate(&receiver, template, day, start_time, end_time, None)
            .map_err(|e| e.to_string())?;

        let Some(primary) = primary else {
            return Ok((dummy_appointment(), Some("no feasible care giver found".to_string())));
        };

        let secondary = if template.double_handed() {
            let candidate = self
                .best_candidate(&receiver, template, day, start_time, end_time, Some(primary.id))
                .map_err(|e| e.to_string())?;
            match candidate {
                Some(c) => Some(c.id),
                None => {
                    return Ok((
                        dummy_appointment(),
                        Some("double-handed visit has no feasible secondary care giver".to_string()),
                    ));
                }
            }
        } else {
            None
        };

        let snapshot = self
            .availability
            .current_for(primary.id, day)
            .ok()
            .flatten()
            .map(|version| AvailabilitySnapshot {
                version_id: version.id(),
                slots: version.schedule().get(&crate::domain::time::weekday_of(day)).cloned().unwrap_or_default(),
            });

        let appointment = Appointment::new(
            care_receiver_id,
            primary.id,
            secondary,
            day,
            start_time,
            end_time,
            template.visit_number(),
            template.requirements().clone(),
            template.double_handed(),
            template.priority(),
            snapshot,
        )
        .map_err(|e| e.to_string())?;

        Ok((appointment, None))
    }

    /// Whether an appointment already exists for this `(receiver, day,
    /// visit_number)` occurrence, other than a cancelled one. Re-running
    /// `generate` over an unchanged range must create zero new
    /// appointments, so each occurrence is only ever assigned once.
    fn already_covered(
        &self,
        care_receiver_id: CareReceiverId,
        day: DateTime<Utc>,
        visit_number: u32,
    ) -> AppResult<bool> {
        Ok(self.appointments.list_in_range(day, day)?.into_iter().any(|(_, apt)| {
            apt.care_receiver_id() == care_receiver_id
                && apt.visit_number() == visit_number
                && apt.status() != AppointmentStatus::Cancelled
        }))
    }

    /// Filters active care givers per SPEC_FULL §4.5 step 2, runs the
    /// Feasibility Oracle over each, and returns the lowest-scoring
    /// (best) feasible candidate, excluding `exclude` (the already-chosen
    /// primary, when searching for a secondary).
    fn best_candidate(
        &self,
        receiver: &crate::domain::care_receiver::CareReceiver,
        template: &VisitTemplate,
        day: DateTime<Utc>,
        start_time: crate::domain::time::ClockTime,
        end_time: crate::domain::time::ClockTime,
        exclude: Option<CareGiverId>,
    ) -> AppResult<Option<Candidate>> {
        let oracle = FeasibilityOracle::new(
            &*self.care_givers,
            self.care_receivers,
            self.availability,
            &*self.appointments,
            self.routing,
            self.settings,
        );

        let mut best: Option<Candidate> = None;
        for (id, care_giver) in self.care_givers.list_active()? {
            if Some(id) == exclude {
                continue;
            }
            if !candidate_matches(&care_giver, receiver, template, self.settings.max_distance_km) {
                continue;
            }

            let feasible = oracle.is_available(id, day, start_time, end_time, receiver.home(), None)?;
            if !feasible.available {
                continue;
            }

            let distance = care_giver.home().distance_km(&receiver.home());
            let preferred_bonus = if receiver.preferred_care_giver() == Some(id) { 10.0 } else { 0.0 };
            let score = distance - preferred_bonus;

            if best.as_ref().map(|b| score < b.score).unwrap_or(true) {
                best = Some(Candidate { id, care_giver, score });
            }
        }

        Ok(best)
    }
}

/// Step 2's candidate filter, excluding feasibility (that's the oracle's job).
fn candidate_matches(
    care_giver: &CareGiver,
    receiver: &crate::domain::care_receiver::CareReceiver,
    template: &VisitTemplate,
    max_distance_km: f64,
) -> bool {
    if !crate::domain::skill::satisfies(care_giver.skills(), template.requirements()) {
        return false;
    }
    if !template.double_handed() && care_giver.single_handed_only() {
        return false;
    }
    if receiver.gender_preference() != crate::domain::skill::GenderPreference::NoPreference
        && !receiver.gender_preference().accepts(care_giver.gender())
    {
        return false;
    }
    care_giver.home().distance_km(&receiver.home()) <= max_distance_km
}

/// Placeholder never surfaced to a caller: failure paths always pair this
/// with a `Some(reason)`, which callers must check before using the value.
fn dummy_appointment() -> Appointment {
    Appointment::new(
        CareReceiverId::new(),
        CareGiverId::new(),
        None,
        Utc::now(),
        crate::domain::time::ClockTime::new(0, 0).unwrap(),
        crate::domain::time::ClockTime::new(0, 1).unwrap(),
        0,
        crate::domain::skill::SkillSet::new(),
        false,
        1,
        None,
    )
    .unwrap()
}
