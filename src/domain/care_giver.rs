//! The CareGiver aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::availability::{TimeOffInterval, WeeklySchedule};
use crate::domain::geo::GeoCoordinates;
use crate::domain::skill::{Gender, SkillSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareGiverValidationError {
    EmptyName,
    NameTooLong { max: usize, actual: usize },
    InvalidTimestamps { reason: String },
}

impl std::fmt::Display for CareGiverValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CareGiverValidationError::EmptyName => write!(f, "care giver name cannot be empty"),
            CareGiverValidationError::NameTooLong { max, actual } => {
                write!(f, "care giver name too long: {} characters (max: {})", actual, max)
            }
            CareGiverValidationError::InvalidTimestamps { reason } => {
                write!(f, "invalid timestamps: {}", reason)
            }
        }
    }
}

impl std::error::Error for CareGiverValidationError {}

const MAX_NAME_LENGTH: usize = 200;

/// CareGiver represents a worker who can be assigned to visits.
///
/// # Design Decisions
/// - No `id` field — persistence concerns belong in the infrastructure layer.
/// - `schedule`/`time_off` are the legacy inline fallback used when no
///   [`crate::domain::availability::AvailabilityVersion`] exists yet for
///   this care giver (see SPEC_FULL §9 on the migration path); once a
///   version exists, the Availability Store takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareGiver {
    name: String,
    home: GeoCoordinates,
    gender: Gender,
    skills: SkillSet,
    can_drive: bool,
    single_handed_only: bool,
    max_receivers: Option<u32>,
    schedule: WeeklySchedule,
    time_off: Vec<TimeOffInterval>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CareGiver {
    pub fn new(
        name: String,
        home: GeoCoordinates,
        gender: Gender,
        skills: SkillSet,
    ) -> Result<Self, CareGiverValidationError> {
        let now = Utc::now();
        Self::with_timestamps(name, home, gender, skills, now, now)
    }

    pub fn with_timestamps(
        name: String,
        home: GeoCoordinates,
        gender: Gender,
        skills: SkillSet,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, CareGiverValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CareGiverValidationError::EmptyName);
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(CareGiverValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
                actual: trimmed.len(),
            });
        }
        if updated_at < created_at {
            return Err(CareGiverValidationError::InvalidTimestamps {
                reason: "updated_at cannot be before created_at".to_string(),
            });
        }

        Ok(Self {
            name: trimmed.to_string(),
            home,
            gender,
            skills,
            can_drive: false,
            single_handed_only: false,
            max_receivers: None,
            schedule: WeeklySchedule::new(),
            time_off: Vec::new(),
            is_active: true,
            created_at,
            updated_at,
        })
    }

    // ── GETTERS ─────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn home(&self) -> GeoCoordinates {
        self.home
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn can_drive(&self) -> bool {
        self.can_drive
    }

    pub fn single_handed_only(&self) -> bool {
        self.single_handed_only
    }

    pub fn max_receivers(&self) -> Option<u32> {
        self.max_receivers
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn time_off(&self) -> &[TimeOffInterval] {
        &self.time_off
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ── SETTERS ─────────────────────────────────────────────

    pub fn set_name(&mut self, name: String) -> Result<(), CareGiverValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CareGiverValidationError::EmptyName);
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(CareGiverValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
                actual: trimmed.len(),
            });
        }
        self.name = trimmed.to_string();
        self.touch();
        Ok(())
    }

    pub fn set_home(&mut self, home: GeoCoordinates) {
        self.home = home;
        self.touch();
    }

    pub fn set_skills(&mut self, skills: SkillSet) {
        self.skills = skills;
        self.touch();
    }

    pub fn set_can_drive(&mut self, can_drive: bool) {
        self.can_drive = can_drive;
        self.touch();
    }

    pub fn set_single_handed_only(&mut self, single_handed_only: bool) {
        self.single_handed_only = single_handed_only;
        self.touch();
    }

    pub fn set_max_receivers(&mut self, max_receivers: Option<u32>) {
        self.max_receivers = max_receivers;
        self.touch();
    }

    pub fn set_schedule(&mut self, schedule: WeeklySchedule) {
        self.schedule = schedule;
        self.touch();
    }

    pub fn set_time_off(&mut self, time_off: Vec<TimeOffInterval>) {
        self.time_off = time_off;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    pub fn reactivate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    // ── DOMAIN BEHAVIORS ────────────────────────────────────

    /// Whether this care giver is eligible as *any* role for a double-handed
    /// visit. A `single_handed_only` care giver is excluded even as primary.
    pub fn eligible_for_double_handed(&self) -> bool {
        !self.single_handed_only
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> GeoCoordinates {
        GeoCoordinates::new(51.5074, -0.1278).unwrap()
    }

    #[test]
    fn creation_valid() {
        let cg = CareGiver::new("Jane Doe".to_string(), home(), Gender::Female, SkillSet::new());
        assert!(cg.is_ok());
    }

    #[test]
    fn creation_rejects_empty_name() {
        let cg = CareGiver::new("   ".to_string(), home(), Gender::Female, SkillSet::new());
        assert!(matches!(cg, Err(CareGiverValidationError::EmptyName)));
    }

    #[test]
    fn single_handed_only_excludes_double_handed_eligibility() {
        let mut cg =
            CareGiver::new("Jane Doe".to_string(), home(), Gender::Female, SkillSet::new()).unwrap();
        assert!(cg.eligible_for_double_handed());
        cg.set_single_handed_only(true);
        assert!(!cg.eligible_for_double_handed());
    }

    #[test]
    fn deactivate_and_reactivate_toggle_is_active() {
        let mut cg =
            CareGiver::new("Jane Doe".to_string(), home(), Gender::Female, SkillSet::new()).unwrap();
        assert!(cg.is_active());
        cg.deactivate();
        assert!(!cg.is_active());
        cg.reactivate();
        assert!(cg.is_active());
    }
}
