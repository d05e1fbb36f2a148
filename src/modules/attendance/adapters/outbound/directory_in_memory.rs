use std::collections::HashMap;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::modules::attendance::adapters::outbound::directory::{
    Employee, EmployeeDirectory, HolidayCalendar,
};
use crate::modules::attendance::core::status::Holiday;
use crate::shared::core::errors::StoreError;

#[derive(Default)]
pub struct InMemoryEmployeeDirectory {
    employees: RwLock<HashMap<String, Employee>>,
}

impl InMemoryEmployeeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, employee: Employee) {
        self.employees
            .write()
            .await
            .insert(employee.employee_id.clone(), employee);
    }
}

#[async_trait::async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn find(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.employees.read().await.get(employee_id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryHolidayCalendar {
    holidays: RwLock<Vec<Holiday>>,
}

impl InMemoryHolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, date: NaiveDate, name: impl Into<String>) {
        self.holidays.write().await.push(Holiday {
            date,
            name: name.into(),
        });
    }
}

#[async_trait::async_trait]
impl HolidayCalendar for InMemoryHolidayCalendar {
    async fn holidays_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Holiday>, StoreError> {
        let guard = self.holidays.read().await;
        Ok(guard
            .iter()
            .filter(|h| h.date >= from && h.date <= to)
            .cloned()
            .collect())
    }
}
