//! Wire DTOs for the driving HTTP surface (SPEC_FULL §6). These are plain
//! serializable shapes a router built around this crate serializes
//! directly — no HTTP framework lives in this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::analyzer::CareGiverAssignmentReport;
use crate::application::engine::{GenerateSummary, UnscheduledVisit};
use crate::application::validator::ValidationSummary;
use crate::domain::ids::{AppointmentId, CareGiverId, CareReceiverId};
use crate::domain::skill::SkillSet;
use crate::domain::time::ClockTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub care_receiver_id: Option<CareReceiverId>,
    pub care_receiver_ids: Option<Vec<CareReceiverId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverGenerateResult {
    pub care_receiver_id: CareReceiverId,
    pub scheduled: Vec<AppointmentId>,
    pub failed: Vec<UnscheduledVisit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub results: Vec<ReceiverGenerateResult>,
    pub summary: GenerateSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub summary: ValidationSummary,
    pub invalid: Vec<AppointmentId>,
    pub valid: Vec<AppointmentId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeUnscheduledRequest {
    pub care_receiver_id: CareReceiverId,
    pub requirements: SkillSet,
    pub double_handed: bool,
    pub date: DateTime<Utc>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeUnscheduledResponse {
    pub reports: Vec<CareGiverAssignmentReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindAvailableRequest {
    pub care_receiver_id: CareReceiverId,
    pub date: DateTime<Utc>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub requirements: SkillSet,
    pub double_handed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibleCareGiver {
    pub care_giver_id: CareGiverId,
    pub name: String,
    pub distance_km: f64,
    pub travel_time_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindAvailableResponse {
    pub candidates: Vec<FeasibleCareGiver>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    pub code: String,
}

/// The `{success, data}` / `{success: false, error}` envelope every
/// response on the driving HTTP surface is wrapped in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn err(message: impl Into<String>, code: &str) -> Self {
        Self { success: false, data: None, error: Some(ErrorEnvelope { message: message.into(), code: code.to_string() }) }
    }
}
