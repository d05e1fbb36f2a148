use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::wfh::adapters::outbound::wfh_repository::WfhRepository;
use crate::modules::wfh::core::request::WfhRequest;
use crate::shared::core::errors::StoreError;
use crate::shared::core::review::{ReviewStamp, ReviewStatus};

#[derive(Default)]
pub struct InMemoryWfhRepository {
    rows: RwLock<HashMap<Uuid, WfhRequest>>,
    is_offline: AtomicBool,
    delay_write_ms: AtomicU64,
}

impl InMemoryWfhRepository {
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
            return Err(StoreError::Backend("WFH store offline".into()));
        }
        Ok(())
    }

    async fn write_delay(&self) {
        let ms = self.delay_write_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    async fn listed(&self, keep: impl Fn(&WfhRequest) -> bool) -> Result<Vec<WfhRequest>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let mut items: Vec<_> = guard.values().filter(|r| keep(*r)).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(items)
    }
}

#[async_trait::async_trait]
impl WfhRepository for InMemoryWfhRepository {
    async fn get(&self, id: Uuid) -> Result<Option<WfhRequest>, StoreError> {
        self.ensure_online()?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_active(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<WfhRequest>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard
            .values()
            .find(|r| r.employee_id == employee_id && r.request_date == day && r.is_active())
            .cloned())
    }

    async fn insert(&self, request: WfhRequest) -> Result<WfhRequest, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.rows.write().await;
        let clash = guard.values().any(|r| {
            r.employee_id == request.employee_id
                && r.request_date == request.request_date
                && r.is_active()
        });
        if clash {
            return Err(StoreError::Duplicate(format!(
                "active wfh request {}:{}",
                request.employee_id, request.request_date
            )));
        }
        guard.insert(request.id, request.clone());
        Ok(request)
    }

    async fn complete_review(
        &self,
        id: Uuid,
        stamp: ReviewStamp,
    ) -> Result<Option<WfhRequest>, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let mut guard = self.rows.write().await;
        let Some(stored) = guard.get_mut(&id) else {
            return Ok(None);
        };
        if !stored.is_pending() {
            return Ok(None);
        }
        let mut next = stored.clone().stamped(&stamp);
        next.version += 1;
        *stored = next.clone();
        Ok(Some(next))
    }

    async fn reopen_unconsumed(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<Option<WfhRequest>, StoreError> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let Some(stored) = guard.get_mut(&id) else {
            return Ok(None);
        };
        if stored.status != ReviewStatus::Approved || stored.consumed_attendance.is_some() {
            return Ok(None);
        }
        let mut next = stored.clone().reopened(at);
        next.version += 1;
        *stored = next.clone();
        Ok(Some(next))
    }

    async fn mark_consumed(
        &self,
        id: Uuid,
        attendance_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<WfhRequest, StoreError> {
        self.ensure_online()?;
        let mut guard = self.rows.write().await;
        let stored = guard
            .get_mut(&id)
            .ok_or_else(|| StoreError::Backend(format!("no wfh request {id}")))?;
        stored.consumed_at = Some(at);
        stored.consumed_attendance = Some(attendance_id);
        stored.updated_at = at;
        stored.version += 1;
        Ok(stored.clone())
    }

    async fn list_by_employee(
        &self,
        employee_id: &str,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<WfhRequest>, StoreError> {
        self.listed(|r| r.employee_id == employee_id && status.is_none_or(|s| r.status == s))
            .await
    }

    async fn list_all(&self, status: Option<ReviewStatus>) -> Result<Vec<WfhRequest>, StoreError> {
        self.listed(|r| status.is_none_or(|s| r.status == s)).await
    }
}
