//! Application layer errors.
//!
//! Variants map 1:1 onto the closed error-code vocabulary a driving HTTP
//! layer surfaces to clients; `error_code()` is the seam between the two.

use thiserror::Error;

use crate::domain::ids::{CareGiverId, CareReceiverId};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing start_date/end_date")]
    MissingDates,

    #[error("invalid date range: end precedes start")]
    InvalidDateRange,

    #[error("care receiver not found: {0}")]
    CareReceiverNotFound(CareReceiverId),

    #[error("care giver not found: {0}")]
    CareGiverNotFound(CareGiverId),

    #[error("appointment not found: {0}")]
    AppointmentNotFound(crate::domain::ids::AppointmentId),

    #[error("missing required fields: {0}")]
    MissingFields(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("duplicate: {0}")]
    DuplicateError(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The closed wire error-code this variant surfaces as.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingDates => "MISSING_DATES",
            AppError::InvalidDateRange => "INVALID_DATE_RANGE",
            AppError::CareReceiverNotFound(_) => "CARE_RECEIVER_NOT_FOUND",
            AppError::CareGiverNotFound(_) => "CARE_GIVER_NOT_FOUND",
            AppError::AppointmentNotFound(_) => "APPOINTMENT_NOT_FOUND",
            AppError::MissingFields(_) => "MISSING_FIELDS",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DuplicateError(_) => "DUPLICATE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::ValidationError(msg)
    }
}
