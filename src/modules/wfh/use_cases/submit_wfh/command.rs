use chrono::{DateTime, Utc};

use crate::modules::wfh::core::geo::Coordinates;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitWfh {
    pub employee_id: String,
    pub submitted_at: DateTime<Utc>,
    /// Defaults to `submitted_at`.
    pub requested_check_in_time: Option<DateTime<Utc>>,
    pub reason: String,
    pub location: Option<Coordinates>,
}
