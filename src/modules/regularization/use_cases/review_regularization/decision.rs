use serde::Serialize;

use crate::modules::attendance::core::record::{AttendanceRecord, ReconciliationPatch};
use crate::modules::regularization::core::request::RegularizationRequest;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStatus;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("request is already {0}")]
    NotPending(ReviewStatus),

    #[error("approval needs a requested check-in or check-out")]
    NothingToApply,

    #[error("requested check-in must be before requested check-out")]
    InvalidInterval,
}

impl From<DecideError> for ApplicationError {
    fn from(err: DecideError) -> Self {
        match err {
            DecideError::NotPending(_) => ApplicationError::InvalidState(err.to_string()),
            DecideError::NothingToApply => ApplicationError::BusinessLogic(err.to_string()),
            DecideError::InvalidInterval => ApplicationError::Validation(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Approve { patch: ReconciliationPatch },
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegularizationReview {
    pub request: RegularizationRequest,
    pub attendance: Option<AttendanceRecord>,
}
