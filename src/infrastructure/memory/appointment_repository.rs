/// In-memory Appointment repository, used by tests and the demo binary.

use std::collections::HashMap;
use chrono::{DateTime, Utc};

use crate::application::errors::{AppError, AppResult};
use crate::application::ports::AppointmentRepository;
use crate::domain::appointment::Appointment;
use crate::domain::ids::{AppointmentId, CareGiverId};
use crate::domain::time::utc_day;

pub struct InMemoryAppointmentRepository {
    appointments: HashMap<AppointmentId, Appointment>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self { appointments: HashMap::new() }
    }
}

impl Default for InMemoryAppointmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentRepository for InMemoryAppointmentRepository {
    fn save(&mut self, appointment: Appointment) -> AppResult<AppointmentId> {
        let id = AppointmentId::new();
        self.appointments.insert(id, appointment);
        Ok(id)
    }

    fn find_by_id(&self, id: AppointmentId) -> AppResult<Appointment> {
        self.appointments.get(&id).cloned().ok_or(AppError::AppointmentNotFound(id))
    }

    fn update(&mut self, id: AppointmentId, appointment: Appointment) -> AppResult<()> {
        if !self.appointments.contains_key(&id) {
            return Err(AppError::AppointmentNotFound(id));
        }
        self.appointments.insert(id, appointment);
        Ok(())
    }

    fn delete(&mut self, id: AppointmentId) -> AppResult<()> {
        self.appointments.remove(&id).ok_or(AppError::AppointmentNotFound(id))?;
        Ok(())
    }

    fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<(AppointmentId, Appointment)>> {
        let start = utc_day(start);
        let end = utc_day(end);
        Ok(self
            .appointments
            .iter()
            .filter(|(_, apt)| apt.date() >= start && apt.date() <= end)
            .map(|(id, apt)| (*id, apt.clone()))
            .collect())
    }

    fn list_for_care_giver_on_day(
        &self,
        care_giver_id: CareGiverId,
        day: DateTime<Utc>,
    ) -> AppResult<Vec<(AppointmentId, Appointment)>> {
        let day = utc_day(day);
        Ok(self
            .appointments
            .iter()
            .filter(|(_, apt)| apt.date() == day && apt.involves(care_giver_id))
            .map(|(id, apt)| (*id, apt.clone()))
            .collect())
    }
}
