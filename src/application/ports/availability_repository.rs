/// Repository port for the Availability Store (SPEC_FULL §4.2).

use chrono::{DateTime, Utc};

use crate::application::errors::AppResult;
use crate::domain::availability::{AvailabilityVersion, TimeOffInterval, WeeklySchedule};
use crate::domain::ids::CareGiverId;

pub trait AvailabilityRepository {
    /// Atomically closes any currently open version for `care_giver_id` and
    /// inserts a new open version effective from `effective_from`.
    fn create_version(
        &mut self,
        care_giver_id: CareGiverId,
        schedule: WeeklySchedule,
        time_off: Vec<TimeOffInterval>,
        effective_from: DateTime<Utc>,
    ) -> AppResult<AvailabilityVersion>;

    /// The version in force on `at_date` with `is_active = true`.
    fn current_for(
        &self,
        care_giver_id: CareGiverId,
        at_date: DateTime<Utc>,
    ) -> AppResult<Option<AvailabilityVersion>>;

    /// The version in force on `at_date`, including closed ones.
    fn at(&self, care_giver_id: CareGiverId, at_date: DateTime<Utc>) -> AppResult<Option<AvailabilityVersion>>;

    /// All versions for a care giver, newest `effective_from` first.
    fn history(&self, care_giver_id: CareGiverId) -> AppResult<Vec<AvailabilityVersion>>;
}
