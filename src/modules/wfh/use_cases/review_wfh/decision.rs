use serde::Serialize;

use crate::modules::attendance::core::record::{AttendanceRecord, ReconciliationPatch};
use crate::modules::wfh::core::request::WfhRequest;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStatus;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("request is already {0}")]
    NotPending(ReviewStatus),
}

impl From<DecideError> for ApplicationError {
    fn from(err: DecideError) -> Self {
        ApplicationError::InvalidState(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Approve { patch: ReconciliationPatch },
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WfhReview {
    pub request: WfhRequest,
    pub attendance: Option<AttendanceRecord>,
}
