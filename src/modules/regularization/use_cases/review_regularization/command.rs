use uuid::Uuid;

use crate::shared::core::review::ReviewDecision;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRegularization {
    pub request_id: Uuid,
    pub decision: ReviewDecision,
    pub reviewer_id: String,
    pub comment: Option<String>,
}
