// ========================================================================
// DOMAIN MODULE
// Pure business logic with no external dependencies
// ========================================================================

pub mod appointment;
pub mod availability;
pub mod care_giver;
pub mod care_receiver;
pub mod geo;
pub mod ids;
pub mod recurrence;
pub mod settings;
pub mod skill;
pub mod time;
pub mod visit_template;

// ========================================================================
// CONVENIENT RE-EXPORTS
// Flatten common types to avoid deep nesting in imports
// ========================================================================

pub use appointment::{Appointment, AppointmentStatus, AppointmentValidationError, AvailabilitySnapshot};
pub use availability::{AvailabilityError, AvailabilityVersion, Slot, TimeOffInterval, WeeklySchedule};
pub use care_giver::{CareGiver, CareGiverValidationError};
pub use care_receiver::{CareReceiver, CareReceiverValidationError};
pub use geo::{haversine_km, GeoCoordinates, GeoCoordinatesError};
pub use ids::{AppointmentId, AvailabilityVersionId, CareGiverId, CareReceiverId};
pub use recurrence::recurs_on;
pub use settings::{SettingsValidationError, SystemSettings};
pub use skill::{satisfies, Gender, GenderPreference, Skill, SkillSet};
pub use time::{utc_day, weekday_of, whole_weeks_between, ClockTime, ClockTimeError};
pub use visit_template::{RecurrenceKind, VisitTemplate, VisitTemplateError};
