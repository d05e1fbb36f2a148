// Review vocabulary shared by the regularization and work-from-home workflows.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReviewStatus::Pending)
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only two outcomes a reviewer may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl From<ReviewDecision> for ReviewStatus {
    fn from(decision: ReviewDecision) -> Self {
        match decision {
            ReviewDecision::Approved => ReviewStatus::Approved,
            ReviewDecision::Rejected => ReviewStatus::Rejected,
        }
    }
}

/// Reviewer stamp applied atomically with the pending -> terminal transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewStamp {
    pub decision: ReviewDecision,
    pub reviewed_by: String,
    pub review_comment: Option<String>,
    pub reviewed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod review_status_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_treat_only_pending_as_open() {
        assert!(!ReviewStatus::Pending.is_terminal());
        assert!(ReviewStatus::Approved.is_terminal());
        assert!(ReviewStatus::Rejected.is_terminal());
    }

    #[rstest]
    fn it_should_deserialize_decisions_from_snake_case() {
        let decision: ReviewDecision = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(ReviewStatus::from(decision), ReviewStatus::Approved);
        assert!(serde_json::from_str::<ReviewDecision>("\"pending\"").is_err());
    }
}
