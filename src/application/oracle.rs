//! The Feasibility Oracle (SPEC_FULL §4.3): seven ordered, short-circuiting
//! checks deciding whether a care giver can take a visit.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::application::errors::AppResult;
use crate::application::ports::{
    AppointmentRepository, AvailabilityRepository, CareGiverRepository, CareReceiverRepository,
    RoutingService,
};
use crate::domain::appointment::AppointmentStatus;
use crate::domain::geo::GeoCoordinates;
use crate::domain::ids::{AppointmentId, CareGiverId};
use crate::domain::settings::SystemSettings;
use crate::domain::time::{utc_day, weekday_of, ClockTime};

#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityResult {
    pub available: bool,
    pub reason: Option<String>,
    pub conflicts: Vec<AppointmentId>,
}

impl FeasibilityResult {
    fn ok() -> Self {
        Self { available: true, reason: None, conflicts: Vec::new() }
    }

    fn reject(reason: impl Into<String>) -> Self {
        Self { available: false, reason: Some(reason.into()), conflicts: Vec::new() }
    }
}

pub struct FeasibilityOracle<'a> {
    care_givers: &'a dyn CareGiverRepository,
    care_receivers: &'a dyn CareReceiverRepository,
    availability: &'a dyn AvailabilityRepository,
    appointments: &'a dyn AppointmentRepository,
    routing: &'a dyn RoutingService,
    settings: SystemSettings,
}

impl<'a> FeasibilityOracle<'a> {
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

    #[allow(clippy::too_many_arguments)]
    pub fn is_available(
        &self,
        care_giver_id: CareGiverId,
        date: DateTime<Utc>,
        start: ClockTime,
        end: ClockTime,
        receiver_location: GeoCoordinates,
        exclude_apt: Option<AppointmentId>,
    ) -> AppResult<FeasibilityResult> {
        let date = utc_day(date);

        // 1. Existence & active
        let care_giver = match self.care_givers.find_by_id(care_giver_id) {
            Ok(cg) if cg.is_active() => cg,
            _ => {
                debug!(%care_giver_id, "rejected: not found or inactive");
                return Ok(FeasibilityResult::reject("care giver not found or inactive"));
            }
        };

        let version = self.availability.current_for(care_giver_id, date)?;

        // 2. Holiday
        let on_holiday = match &version {
            Some(v) => v.on_time_off(date),
            None => care_giver.time_off().iter().any(|to| to.covers(date)),
        };
        if on_holiday {
            debug!(%care_giver_id, "rejected: on time off");
            return Ok(FeasibilityResult::reject("care giver is on time off for this date"));
        }

        // 3. Weekly pattern
        let weekday = weekday_of(date);
        let working = match &version {
            Some(v) => v.slot_contains_window(weekday, start, end),
            None => care_giver
                .schedule()
                .get(&weekday)
                .map(|slots| slots.iter().any(|(s, e)| *s <= start && end <= *e))
                .unwrap_or(false),
        };
        if !working {
            debug!(%care_giver_id, ?weekday, "rejected: not within a working slot");
            return Ok(FeasibilityResult::reject("requested time is outside the care giver's working hours"));
        }

        let day_appointments = self.appointments.list_for_care_giver_on_day(care_giver_id, date)?;
        let active_day_appointments: Vec<_> = day_appointments
            .into_iter()
            .filter(|(id, apt)| {
                Some(*id) != exclude_apt
                    && matches!(apt.status(), AppointmentStatus::Scheduled | AppointmentStatus::InProgress)
            })
            .collect();

        // 4. Daily cap
        if active_day_appointments.len() as u32 >= self.settings.max_appointments_per_day {
            debug!(%care_giver_id, "rejected: at daily cap");
            return Ok(FeasibilityResult::reject("care giver is at their daily appointment cap"));
        }

        // 5. Intra-day overlap
        let conflicts: Vec<AppointmentId> = active_day_appointments
            .iter()
            .filter(|(_, apt)| ClockTime::overlaps(apt.start_time(), apt.end_time(), start, end))
            .map(|(id, _)| *id)
            .collect();
        if !conflicts.is_empty() {
            debug!(%care_giver_id, "rejected: intra-day overlap");
            return Ok(FeasibilityResult {
                available: false,
                reason: Some("requested window overlaps an existing appointment".to_string()),
                conflicts,
            });
        }

        // 6 & 7. Travel time before/after
        let buffer = self.settings.travel_time_buffer_minutes;

        let prior = active_day_appointments
            .iter()
            .filter(|(_, apt)| apt.end_time() <= start)
            .max_by_key(|(_, apt)| apt.end_time());
        if let Some((_, prior_apt)) = prior {
            if let Ok(receiver) = self.care_receivers.find_by_id(prior_apt.care_receiver_id()) {
                let gap = start.minutes_since_midnight() - prior_apt.end_time().minutes_since_midnight();
                let required = self.routing.travel_time_minutes(receiver.home(), receiver_location) + buffer;
                if gap < required {
                    debug!(%care_giver_id, gap, required, "rejected: insufficient travel time before");
                    return Ok(FeasibilityResult::reject("insufficient travel time from previous appointment"));
                }
            }
        }

        let next = active_day_appointments
            .iter()
            .filter(|(_, apt)| apt.start_time() >= end)
            .min_by_key(|(_, apt)| apt.start_time());
        if let Some((_, next_apt)) = next {
            if let Ok(receiver) = self.care_receivers.find_by_id(next_apt.care_receiver_id()) {
                let gap = next_apt.start_time().minutes_since_midnight() - end.minutes_since_midnight();
                let required = self.routing.travel_time_minutes(receiver_location, receiver.home()) + buffer;
                if gap < required {
                    debug!(%care_giver_id, gap, required, "rejected: insufficient travel time after");
                    return Ok(FeasibilityResult::reject("insufficient travel time to next appointment"));
                }
            }
        }

        Ok(FeasibilityResult::ok())
    }
}
