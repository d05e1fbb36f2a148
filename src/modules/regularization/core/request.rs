// Regularization request: an employee's correction to one day's check-in/check-out.
//
// Lifecycle
// - Created pending. A resubmission while pending edits the same request.
// - Moves once to approved or rejected, then stays as audit trail.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::core::review::{ReviewStamp, ReviewStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularizationRequest {
    pub id: Uuid,
    pub employee_id: String,
    pub business_day: NaiveDate,
    pub requested_check_in: Option<DateTime<Utc>>,
    pub requested_check_out: Option<DateTime<Utc>>,
    pub reason: String,
    pub status: ReviewStatus,
    pub reviewed_by: Option<String>,
    pub review_comment: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub attendance_id: Option<Uuid>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegularizationRequest {
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }

    pub fn stamped(mut self, stamp: &ReviewStamp) -> Self {
        self.status = stamp.decision.into();
        self.reviewed_by = Some(stamp.reviewed_by.clone());
        self.review_comment = stamp.review_comment.clone();
        self.reviewed_at = Some(stamp.reviewed_at);
        self.updated_at = stamp.reviewed_at;
        self
    }

    /// Undoes an approval whose attendance side never landed.
    pub fn reopened(mut self, at: DateTime<Utc>) -> Self {
        self.status = ReviewStatus::Pending;
        self.reviewed_by = None;
        self.review_comment = None;
        self.reviewed_at = None;
        self.updated_at = at;
        self
    }
}

/// Validated submission contents.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizationDraft {
    pub employee_id: String,
    pub business_day: NaiveDate,
    pub requested_check_in: Option<DateTime<Utc>>,
    pub requested_check_out: Option<DateTime<Utc>>,
    pub reason: String,
}

impl RegularizationDraft {
    pub fn into_request(self, now: DateTime<Utc>) -> RegularizationRequest {
        RegularizationRequest {
            id: Uuid::now_v7(),
            employee_id: self.employee_id,
            business_day: self.business_day,
            requested_check_in: self.requested_check_in,
            requested_check_out: self.requested_check_out,
            reason: self.reason,
            status: ReviewStatus::Pending,
            reviewed_by: None,
            review_comment: None,
            reviewed_at: None,
            attendance_id: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the editable fields of a pending request, keeping its identity.
    pub fn apply_to(self, mut pending: RegularizationRequest, now: DateTime<Utc>) -> RegularizationRequest {
        pending.requested_check_in = self.requested_check_in;
        pending.requested_check_out = self.requested_check_out;
        pending.reason = self.reason;
        pending.updated_at = now;
        pending
    }
}
