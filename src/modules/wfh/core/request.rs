// Work-from-home request: a remote-location exception for one business day.
//
// Notes
// - At most one request per (employee, day) may be pending or approved.
// - Approval stamps `consumed_at` and `consumed_attendance`, linking the record it produced or
//   touched.
// - Office and distance fields are audit data only.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::wfh::core::geo::Coordinates;
use crate::shared::core::review::{ReviewStamp, ReviewStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WfhRequest {
    pub id: Uuid,
    pub employee_id: String,
    pub request_date: NaiveDate,
    pub requested_check_in_time: DateTime<Utc>,
    pub reason: String,
    pub attempted_location: Option<Coordinates>,
    pub nearest_office: Option<String>,
    pub distance_from_office_m: Option<f64>,
    pub status: ReviewStatus,
    pub reviewed_by: Option<String>,
    pub review_comment: Option<String>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub consumed_at: Option<DateTime<Utc>>,
    pub consumed_attendance: Option<Uuid>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WfhRequest {
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }

    /// Pending or approved requests block another request for the same day.
    pub fn is_active(&self) -> bool {
        matches!(self.status, ReviewStatus::Pending | ReviewStatus::Approved)
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

#[derive(Debug, Clone, PartialEq)]
pub struct WfhDraft {
    pub employee_id: String,
    pub request_date: NaiveDate,
    pub requested_check_in_time: DateTime<Utc>,
    pub reason: String,
    pub attempted_location: Option<Coordinates>,
}

/// Audit data resolved from the attempted location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestOffice {
    pub name: String,
    pub distance_m: f64,
}

impl WfhDraft {
    pub fn into_request(self, nearest: Option<NearestOffice>, now: DateTime<Utc>) -> WfhRequest {
        let (nearest_office, distance_from_office_m) = match nearest {
            Some(office) => (Some(office.name), Some(office.distance_m)),
            None => (None, None),
        };
        WfhRequest {
            id: Uuid::now_v7(),
            employee_id: self.employee_id,
            request_date: self.request_date,
            requested_check_in_time: self.requested_check_in_time,
            reason: self.reason,
            attempted_location: self.attempted_location,
            nearest_office,
            distance_from_office_m,
            status: ReviewStatus::Pending,
            reviewed_by: None,
            review_comment: None,
            reviewed_at: None,
            consumed_at: None,
            consumed_attendance: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
