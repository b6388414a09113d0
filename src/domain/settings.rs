//! SystemSettings: the tunables the Feasibility Oracle and Assignment
//! Engine read on every invocation.

use serde::{Deserialize, Serialize};

const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsValidationError {
    WeightsDoNotSumToOne,
    WorkingHoursInverted,
}

impl std::fmt::Display for SettingsValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsValidationError::WeightsDoNotSumToOne => {
                write!(f, "preferred_caregiver_weight + distance_weight + availability_weight must sum to 1.0")
            }
            SettingsValidationError::WorkingHoursInverted => {
                write!(f, "working hours end must be strictly after start")
            }
        }
    }
}

impl std::error::Error for SettingsValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub max_distance_km: f64,
    pub travel_time_buffer_minutes: u32,
    pub max_appointments_per_day: u32,
    pub working_hours_start_minute: u32,
    pub working_hours_end_minute: u32,
    pub preferred_caregiver_weight: f64,
    pub distance_weight: f64,
    pub availability_weight: f64,
}

impl SystemSettings {
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let sum =
            self.preferred_caregiver_weight + self.distance_weight + self.availability_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SettingsValidationError::WeightsDoNotSumToOne);
        }
        if self.working_hours_end_minute <= self.working_hours_start_minute {
            return Err(SettingsValidationError::WorkingHoursInverted);
        }
        Ok(())
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            max_distance_km: 20.0,
            travel_time_buffer_minutes: 15,
            max_appointments_per_day: 8,
            working_hours_start_minute: 7 * 60,
            working_hours_end_minute: 20 * 60,
            preferred_caregiver_weight: 0.5,
            distance_weight: 0.3,
            availability_weight: 0.2,
        }
    }
}
