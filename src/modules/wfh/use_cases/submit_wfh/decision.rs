use chrono::NaiveDate;

use crate::shared::core::errors::ApplicationError;

pub const MIN_REASON_CHARS: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("reason must be at least {min} characters")]
    ReasonTooShort { min: usize },

    #[error("requested check-in time does not fall on {0}")]
    OutsideDay(NaiveDate),

    #[error("location coordinates are out of range")]
    InvalidLocation,
}

impl From<DecideError> for ApplicationError {
    fn from(err: DecideError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}
