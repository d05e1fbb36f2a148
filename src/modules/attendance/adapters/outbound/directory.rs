// Read-only collaborators the attendance engine consults but does not own.
//
// - EmployeeDirectory: resolves an employee reference and its department.
// - HolidayCalendar: registered holidays, feeding the working-day predicate.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::modules::attendance::core::status::Holiday;
use crate::shared::core::errors::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub department: Option<String>,
}

#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn find(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;
}

#[async_trait]
pub trait HolidayCalendar: Send + Sync {
    /// Inclusive range.
    async fn holidays_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Holiday>, StoreError>;
}
