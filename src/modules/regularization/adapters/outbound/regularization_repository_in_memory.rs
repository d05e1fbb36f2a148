// In memory implementation of the RegularizationRepository port.
//
// All checks and writes for one call happen under a single write lock, which is what makes the
// pending-uniqueness and review transitions atomic here.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::regularization::adapters::outbound::regularization_repository::RegularizationRepository;
use crate::modules::regularization::core::request::RegularizationRequest;
use crate::shared::core::errors::StoreError;
use crate::shared::core::review::{ReviewStamp, ReviewStatus};

#[derive(Default)]
pub struct InMemoryRegularizationRepository {
    rows: RwLock<HashMap<Uuid, RegularizationRequest>>,
    is_offline: AtomicBool,
    delay_write_ms: AtomicU64,
}

impl InMemoryRegularizationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn set_delay_write_ms(&self, ms: u64) {
        self.delay_write_ms.store(ms, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("Regularization store offline".into()));
        }
        Ok(())
    }

    async fn write_delay(&self) {
        let ms = self.delay_write_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn newest_first(mut items: Vec<RegularizationRequest>) -> Vec<RegularizationRequest> {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        items
    }
}

#[async_trait::async_trait]
impl RegularizationRepository for InMemoryRegularizationRepository {
    async fn get(&self, id: Uuid) -> Result<Option<RegularizationRequest>, StoreError> {
        self.ensure_online()?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_pending(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<RegularizationRequest>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .find(|r| r.employee_id == employee_id && r.business_day == day && r.is_pending())
            .cloned())
    }

    async fn insert(
        &self,
        request: RegularizationRequest,
    ) -> Result<RegularizationRequest, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.rows.write().await;
        let clash = guard.values().any(|r| {
            r.employee_id == request.employee_id
                && r.business_day == request.business_day
                && r.is_pending()
        });
        if clash {
            return Err(StoreError::Duplicate(format!(
                "pending regularization {}:{}",
                request.employee_id, request.business_day
            )));
        }
        guard.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update_pending(
        &self,
        request: RegularizationRequest,
    ) -> Result<RegularizationRequest, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.rows.write().await;
        let stored = guard
            .get_mut(&request.id)
            .ok_or_else(|| StoreError::Backend(format!("no regularization {}", request.id)))?;
        if stored.version != request.version || !stored.is_pending() {
            return Err(StoreError::VersionMismatch {
                expected: request.version,
                actual: stored.version,
            });
        }
        let mut next = request;
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn complete_review(
        &self,
        id: Uuid,
        expected_version: u64,
        stamp: ReviewStamp,
    ) -> Result<Option<RegularizationRequest>, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.rows.write().await;
        let Some(stored) = guard.get_mut(&id) else {
            return Ok(None);
        };
        if !stored.is_pending() {
            return Ok(None);
        }
        if stored.version != expected_version {
            return Err(StoreError::VersionMismatch {
                expected: expected_version,
                actual: stored.version,
            });
        }
        let mut next = stored.clone().stamped(&stamp);
        next.version += 1;
        *stored = next.clone();
        Ok(Some(next))
    }

    async fn reopen_unlinked(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<RegularizationRequest>, StoreError> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let Some(stored) = guard.get_mut(&id) else {
            return Ok(None);
        };
        if stored.status != ReviewStatus::Approved || stored.attendance_id.is_some() {
            return Ok(None);
        }
        let mut next = stored.clone().reopened(at);
        next.version += 1;
        *stored = next.clone();
        Ok(Some(next))
    }

    async fn link_attendance(
        &self,
        id: Uuid,
        attendance_id: Uuid,
    ) -> Result<RegularizationRequest, StoreError> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let stored = guard
            .get_mut(&id)
            .ok_or_else(|| StoreError::Backend(format!("no regularization {id}")))?;
        stored.attendance_id = Some(attendance_id);
        stored.version += 1;
        Ok(stored.clone())
    }

    async fn list_by_employee(
        &self,
        employee_id: &str,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<RegularizationRequest>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let items = guard
            .values()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        Ok(Self::newest_first(items))
    }

    async fn list_all(
        &self,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<RegularizationRequest>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let items = guard
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        Ok(Self::newest_first(items))
    }
}

#[cfg(test)]
mod in_memory_regularization_repository_tests {
    use super::*;
    use crate::modules::regularization::core::request::RegularizationDraft;
    use crate::shared::core::review::ReviewDecision;
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use tokio::join;

    #[fixture]
    fn pending() -> RegularizationRequest {
        RegularizationDraft {
            employee_id: "emp-0001".into(),
            business_day: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            requested_check_in: None,
            requested_check_out: None,
            reason: "forgot".into(),
        }
        .into_request(Utc::now())
    }

    fn stamp(decision: ReviewDecision) -> ReviewStamp {
        ReviewStamp {
            decision,
            reviewed_by: "hr-0001".into(),
            review_comment: None,
            reviewed_at: Utc::now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_a_second_pending_request_for_the_same_day(
        pending: RegularizationRequest,
    ) {
        let repository = InMemoryRegularizationRepository::new();
        repository.insert(pending.clone()).await.unwrap();

        let mut other = pending.clone();
        other.id = Uuid::now_v7();
        let result = repository.insert(other.clone()).await;
        assert!(matches!(result, Err(StoreError::Duplicate(_))));

        repository
            .complete_review(pending.id, pending.version, stamp(ReviewDecision::Rejected))
            .await
            .unwrap();
        assert!(repository.insert(other).await.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_only_one_review_complete(pending: RegularizationRequest) {
        let repository = InMemoryRegularizationRepository::new();
        repository.set_delay_write_ms(5);
        repository.insert(pending.clone()).await.unwrap();

        let (first, second) = join!(
            repository.complete_review(pending.id, pending.version, stamp(ReviewDecision::Approved)),
            repository.complete_review(pending.id, pending.version, stamp(ReviewDecision::Rejected))
        );

        let winners = [first.unwrap(), second.unwrap()]
            .into_iter()
            .flatten()
            .count();
        assert_eq!(winners, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_stale_edits_of_a_pending_request(pending: RegularizationRequest) {
        let repository = InMemoryRegularizationRepository::new();
        let stored = repository.insert(pending).await.unwrap();
        repository.update_pending(stored.clone()).await.unwrap();

        let stale = repository.update_pending(stored).await;

        assert!(matches!(
            stale,
            Err(StoreError::VersionMismatch {
                expected: 0,
                actual: 1
            })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_complete_a_review_of_an_edited_request(pending: RegularizationRequest) {
        let repository = InMemoryRegularizationRepository::new();
        let stored = repository.insert(pending).await.unwrap();
        let edited = repository.update_pending(stored.clone()).await.unwrap();

        let stale = repository
            .complete_review(stored.id, stored.version, stamp(ReviewDecision::Approved))
            .await;
        assert!(matches!(
            stale,
            Err(StoreError::VersionMismatch {
                expected: 0,
                actual: 1
            })
        ));

        let current = repository
            .complete_review(edited.id, edited.version, stamp(ReviewDecision::Approved))
            .await
            .unwrap();
        assert_eq!(current.unwrap().status, ReviewStatus::Approved);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reopen_only_unlinked_approvals(pending: RegularizationRequest) {
        let repository = InMemoryRegularizationRepository::new();
        let stored = repository.insert(pending).await.unwrap();
        repository
            .complete_review(stored.id, stored.version, stamp(ReviewDecision::Approved))
            .await
            .unwrap();

        let reopened = repository.reopen_unlinked(stored.id, Utc::now()).await.unwrap().unwrap();
        assert!(reopened.is_pending());
        assert_eq!(reopened.reviewed_by, None);
        assert_eq!(reopened.reviewed_at, None);

        let approved = repository
            .complete_review(reopened.id, reopened.version, stamp(ReviewDecision::Approved))
            .await
            .unwrap()
            .unwrap();
        repository.link_attendance(approved.id, Uuid::now_v7()).await.unwrap();
        let linked = repository.reopen_unlinked(approved.id, Utc::now()).await.unwrap();
        assert!(linked.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_filter_listings_by_status(pending: RegularizationRequest) {
        let repository = InMemoryRegularizationRepository::new();
        repository.insert(pending.clone()).await.unwrap();

        let open = repository
            .list_by_employee("emp-0001", Some(ReviewStatus::Pending))
            .await
            .unwrap();
        let approved = repository.list_all(Some(ReviewStatus::Approved)).await.unwrap();

        assert_eq!(open.len(), 1);
        assert!(approved.is_empty());
    }
}
