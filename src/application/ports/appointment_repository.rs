/// Repository port for the Appointment aggregate.

use chrono::{DateTime, Utc};

use crate::application::errors::AppResult;
use crate::domain::appointment::Appointment;
use crate::domain::ids::{AppointmentId, CareGiverId};

pub trait AppointmentRepository {
    fn save(&mut self, appointment: Appointment) -> AppResult<AppointmentId>;

    fn find_by_id(&self, id: AppointmentId) -> AppResult<Appointment>;

    fn update(&mut self, id: AppointmentId, appointment: Appointment) -> AppResult<()>;

    fn delete(&mut self, id: AppointmentId) -> AppResult<()>;

    /// Appointments whose `date` falls within `[start, end]`, UTC-day inclusive.
    fn list_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<(AppointmentId, Appointment)>>;

    /// All appointments on the given UTC day where `care_giver_id` holds
    /// either the primary or secondary role.
    fn list_for_care_giver_on_day(
        &self,
        care_giver_id: CareGiverId,
        day: DateTime<Utc>,
    ) -> AppResult<Vec<(AppointmentId, Appointment)>>;
}
