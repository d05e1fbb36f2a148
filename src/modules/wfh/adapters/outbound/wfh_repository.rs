// Storage port for work-from-home requests.
//
// Contract
// - `insert` reports `Duplicate` when a pending or approved request exists for the same
//   (employee_id, request_date).
// - `complete_review` is the atomic pending -> terminal transition; `Ok(None)` means it was no
//   longer pending. Requests are never edited after submission so no version guard is needed.
// - `reopen_unconsumed` reverts an approval that never reached attendance back to pending.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::wfh::core::request::WfhRequest;
use crate::shared::core::errors::StoreError;
use crate::shared::core::review::{ReviewStamp, ReviewStatus};

#[async_trait]
pub trait WfhRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<WfhRequest>, StoreError>;

    async fn find_active(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<WfhRequest>, StoreError>;

    async fn insert(&self, request: WfhRequest) -> Result<WfhRequest, StoreError>;

    async fn complete_review(
        &self,
        id: Uuid,
        stamp: ReviewStamp,
    ) -> Result<Option<WfhRequest>, StoreError>;

    async fn reopen_unconsumed(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<WfhRequest>, StoreError>;

    async fn mark_consumed(
        &self,
        id: Uuid,
        attendance_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<WfhRequest, StoreError>;

    /// Newest first.
    async fn list_by_employee(
        &self,
        employee_id: &str,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<WfhRequest>, StoreError>;

    /// Newest first.
    async fn list_all(&self, status: Option<ReviewStatus>) -> Result<Vec<WfhRequest>, StoreError>;
}
