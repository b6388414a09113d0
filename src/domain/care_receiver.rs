//! The CareReceiver aggregate, owning an ordered set of VisitTemplates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoCoordinates;
use crate::domain::ids::CareGiverId;
use crate::domain::skill::{Gender, GenderPreference};
use crate::domain::visit_template::VisitTemplate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CareReceiverValidationError {
    EmptyName,
    NameTooLong { max: usize, actual: usize },
}

impl std::fmt::Display for CareReceiverValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CareReceiverValidationError::EmptyName => write!(f, "care receiver name cannot be empty"),
            CareReceiverValidationError::NameTooLong { max, actual } => {
                write!(f, "care receiver name too long: {} characters (max: {})", actual, max)
            }
        }
    }
}

impl std::error::Error for CareReceiverValidationError {}

const MAX_NAME_LENGTH: usize = 200;

/// CareReceiver is the aggregate root owning its ordered VisitTemplates.
///
/// # Design Decisions
/// - No `id` field — persistence concerns belong in the infrastructure layer.
/// - `preferred_care_giver` is a back-reference only; this aggregate does
///   not own the care giver it names.
/// - `visit_number` values on the owned templates always form the exact
///   prefix `1..=k`; `add_visit_template` appends at `k+1` and
///   `remove_visit_template` renumbers the remainder, so the invariant
///   never needs re-validating from the outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareReceiver {
    name: String,
    home: GeoCoordinates,
    gender: Gender,
    gender_preference: GenderPreference,
    preferred_care_giver: Option<CareGiverId>,
    visit_templates: Vec<VisitTemplate>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CareReceiver {
    pub fn new(
        name: String,
        home: GeoCoordinates,
        gender: Gender,
        gender_preference: GenderPreference,
    ) -> Result<Self, CareReceiverValidationError> {
        let now = Utc::now();
        Self::with_timestamps(name, home, gender, gender_preference, now, now)
    }

    pub fn with_timestamps(
        name: String,
        home: GeoCoordinates,
        gender: Gender,
        gender_preference: GenderPreference,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, CareReceiverValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CareReceiverValidationError::EmptyName);
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(CareReceiverValidationError::NameTooLong {
                max: MAX_NAME_LENGTH,
                actual: trimmed.len(),
            });
        }

        Ok(Self {
            name: trimmed.to_string(),
            home,
            gender,
            gender_preference,
            preferred_care_giver: None,
            visit_templates: Vec::new(),
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

    pub fn gender_preference(&self) -> GenderPreference {
        self.gender_preference
    }

    pub fn preferred_care_giver(&self) -> Option<CareGiverId> {
        self.preferred_care_giver
    }

    pub fn visit_templates(&self) -> &[VisitTemplate] {
        &self.visit_templates
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

    pub fn set_home(&mut self, home: GeoCoordinates) {
        self.home = home;
        self.touch();
    }

    pub fn set_gender_preference(&mut self, preference: GenderPreference) {
        self.gender_preference = preference;
        self.touch();
    }

    pub fn set_preferred_care_giver(&mut self, care_giver: Option<CareGiverId>) {
        self.preferred_care_giver = care_giver;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    // ── VISIT TEMPLATE MANAGEMENT ───────────────────────────

    /// Appends a template, assigning it the next sequential visit number.
    pub fn add_visit_template(&mut self, mut template: VisitTemplate) {
        template.set_visit_number(self.visit_templates.len() as u32 + 1);
        self.visit_templates.push(template);
        self.touch();
    }

    /// Removes the template with the given visit number, if present, and
    /// renumbers the remainder so the 1..=k invariant holds.
    pub fn remove_visit_template(&mut self, visit_number: u32) -> bool {
        let before = self.visit_templates.len();
        self.visit_templates.retain(|v| v.visit_number() != visit_number);
        let removed = self.visit_templates.len() != before;
        if removed {
            for (i, v) in self.visit_templates.iter_mut().enumerate() {
                v.set_visit_number(i as u32 + 1);
            }
            self.touch();
        }
        removed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::ClockTime;
    use crate::domain::visit_template::RecurrenceKind;
    use crate::domain::skill::SkillSet;
    use std::collections::HashSet;

    fn home() -> GeoCoordinates {
        GeoCoordinates::new(51.5074, -0.1278).unwrap()
    }

    fn template() -> VisitTemplate {
        VisitTemplate::new(
            99, // overwritten by add_visit_template
            ClockTime::new(9, 0).unwrap(),
            60,
            SkillSet::new(),
            false,
            3,
            HashSet::new(),
            RecurrenceKind::Weekly,
            1,
            None,
        )
        .unwrap()
    }

    #[test]
    fn creation_rejects_empty_name() {
        let r = CareReceiver::new(
            "  ".to_string(),
            home(),
            Gender::Male,
            GenderPreference::NoPreference,
        );
        assert!(matches!(r, Err(CareReceiverValidationError::EmptyName)));
    }

    #[test]
    fn add_visit_template_assigns_sequential_numbers() {
        let mut r =
            CareReceiver::new("Robert".to_string(), home(), Gender::Male, GenderPreference::NoPreference)
                .unwrap();
        r.add_visit_template(template());
        r.add_visit_template(template());
        r.add_visit_template(template());

        let numbers: Vec<u32> = r.visit_templates().iter().map(|v| v.visit_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn remove_visit_template_renumbers_remainder() {
        let mut r =
            CareReceiver::new("Robert".to_string(), home(), Gender::Male, GenderPreference::NoPreference)
                .unwrap();
        r.add_visit_template(template());
        r.add_visit_template(template());
        r.add_visit_template(template());

        assert!(r.remove_visit_template(2));

        let numbers: Vec<u32> = r.visit_templates().iter().map(|v| v.visit_number()).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn remove_visit_template_returns_false_when_not_found() {
        let mut r =
            CareReceiver::new("Robert".to_string(), home(), Gender::Male, GenderPreference::NoPreference)
                .unwrap();
        r.add_visit_template(template());
        assert!(!r.remove_visit_template(42));
    }
}
