// Storage port for attendance records.
//
// Contract
// - `(employee_id, business_day)` is unique. `insert` reports `StoreError::Duplicate` instead of
//   creating a second record, so concurrent creators have exactly one winner.
// - `replace` is a compare-and-swap on `version`: it succeeds only if the stored version still
//   equals `record.version`, and persists the record with the version incremented.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::shared::core::errors::StoreError;

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_by_day(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AttendanceRecord>, StoreError>;

    async fn insert(&self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError>;

    async fn replace(&self, record: AttendanceRecord) -> Result<AttendanceRecord, StoreError>;

    /// Inclusive day range, ordered by day.
    async fn list_by_employee(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// Inclusive day range across all employees, ordered by day then employee.
    async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, StoreError>;
}
