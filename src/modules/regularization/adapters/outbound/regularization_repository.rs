// Storage port for regularization requests.
//
// Contract
// - At most one pending request per (employee_id, business_day): `insert` reports `Duplicate`.
// - `update_pending` is a compare-and-swap on `version` and only touches pending requests.
// - `complete_review` is the atomic pending -> terminal transition, guarded by `expected_version`.
//   `Ok(None)` means the request was no longer pending. A pending request whose version moved on
//   reports `VersionMismatch` so the reviewer can re-read the edited contents.
// - `reopen_unlinked` reverts an approval that has no attendance link back to pending.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::regularization::core::request::RegularizationRequest;
use crate::shared::core::errors::StoreError;
use crate::shared::core::review::{ReviewStamp, ReviewStatus};

#[async_trait]
pub trait RegularizationRepository: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<RegularizationRequest>, StoreError>;

    async fn find_pending(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<RegularizationRequest>, StoreError>;

    async fn insert(
        &self,
        request: RegularizationRequest,
    ) -> Result<RegularizationRequest, StoreError>;

    async fn update_pending(
        &self,
        request: RegularizationRequest,
    ) -> Result<RegularizationRequest, StoreError>;

    async fn complete_review(
        &self,
        id: Uuid,
        expected_version: u64,
        stamp: ReviewStamp,
    ) -> Result<Option<RegularizationRequest>, StoreError>;

    async fn reopen_unlinked(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<RegularizationRequest>, StoreError>;

    async fn link_attendance(
        &self,
        id: Uuid,
        attendance_id: Uuid,
    ) -> Result<RegularizationRequest, StoreError>;

    /// Newest first.
    async fn list_by_employee(
        &self,
        employee_id: &str,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<RegularizationRequest>, StoreError>;

    /// Newest first.
    async fn list_all(
        &self,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<RegularizationRequest>, StoreError>;
}
