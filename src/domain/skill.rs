//! Closed vocabulary of care-giver skills and gender preference.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    PersonalCare,
    MedicationManagement,
    DementiaCare,
    MobilityAssistance,
    MealPreparation,
    Companionship,
    HouseholdTasks,
    SpecializedMedical,
}

pub type SkillSet = BTreeSet<Skill>;

/// Whether `have` satisfies every skill in `required`.
pub fn satisfies(have: &SkillSet, required: &SkillSet) -> bool {
    required.is_subset(have)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    Male,
    Female,
    NoPreference,
}

impl GenderPreference {
    /// Whether a care giver of the given gender satisfies this preference.
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            GenderPreference::NoPreference => true,
            GenderPreference::Male => gender == Gender::Male,
            GenderPreference::Female => gender == Gender::Female,
        }
    }
}
