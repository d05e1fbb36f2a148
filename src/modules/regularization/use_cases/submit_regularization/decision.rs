use chrono::NaiveDate;

use crate::shared::core::errors::ApplicationError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("reason is required")]
    MissingReason,

    #[error("requested {field} does not fall on {day}")]
    OutsideDay { field: &'static str, day: NaiveDate },

    #[error("requested check-in must be before requested check-out")]
    InvalidInterval,
}

impl From<DecideError> for ApplicationError {
    fn from(err: DecideError) -> Self {
        ApplicationError::Validation(err.to_string())
    }
}
