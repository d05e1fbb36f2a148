// In memory implementation of the AttendanceRepository port.
//
// Purpose
// - Support use case tests and local development without a database.
//
// Responsibilities
// - Key records by (employee_id, business_day) so the uniqueness constraint holds under one lock.
// - Enforce compare-and-swap on the record version.
// - `toggle_offline` and `set_delay_write_ms` simulate outages and widen race windows in tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::attendance::adapters::outbound::attendance_repository::AttendanceRepository;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::errors::StoreError;

type DayKey = (String, NaiveDate);

#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    rows: RwLock<HashMap<DayKey, AttendanceRecord>>,
    is_offline: AtomicBool,
    delay_write_ms: AtomicU64,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn set_delay_write_ms(&self, ms: u64) {
        self.delay_write_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("Attendance store offline".into()));
        }
        Ok(())
    }

    async fn write_delay(&self) {
        let ms = self.delay_write_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn sorted(mut items: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
        items.sort_by(|a, b| {
            a.business_day
                .cmp(&b.business_day)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        items
    }
}

#[async_trait::async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find_by_day(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard.get(&(employee_id.to_string(), day)).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AttendanceRecord>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        Ok(guard.values().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let key = (record.employee_id.clone(), record.business_day);
        let mut guard = self.rows.write().await;
        if guard.contains_key(&key) {
            return Err(StoreError::Duplicate(format!(
                "attendance {}:{}",
                key.0, key.1
            )));
        }
        guard.insert(key, record.clone());
        Ok(record)
    }

    async fn replace(&self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError> {
        self.ensure_online()?;
        self.write_delay().await;
        let key = (record.employee_id.clone(), record.business_day);
        let mut guard = self.rows.write().await;
        let stored = guard
            .get_mut(&key)
            .ok_or_else(|| StoreError::Backend(format!("no attendance record {}", record.id)))?;
        if stored.version != record.version {
            return Err(StoreError::VersionMismatch {
                expected: record.version,
                actual: stored.version,
            });
        }
        let mut next = record;
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn list_by_employee(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let items = guard
            .values()
            .filter(|r| r.employee_id == employee_id && r.business_day >= from && r.business_day <= to)
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        self.ensure_online()?;
        let guard = self.rows.read().await;
        let items = guard
            .values()
            .filter(|r| r.business_day >= from && r.business_day <= to)
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }
}
