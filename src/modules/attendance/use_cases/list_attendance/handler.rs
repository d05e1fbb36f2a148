// Read paths over attendance records and the working calendar.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::modules::attendance::adapters::outbound::attendance_repository::AttendanceRepository;
use crate::modules::attendance::adapters::outbound::directory::HolidayCalendar;
use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::core::status::{Holiday, expected_work_hours, is_working_day};
use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::shared::core::errors::ApplicationError;

pub const MAX_RANGE_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day: NaiveDate,
    pub working_day: bool,
    pub expected_work_hours: f64,
    pub holidays: Vec<Holiday>,
}

pub struct ListAttendanceHandler {
    repository: Arc<dyn AttendanceRepository>,
    holidays: Arc<dyn HolidayCalendar>,
    store: Arc<AttendanceStore>,
}

impl ListAttendanceHandler {
    pub fn new(
        repository: Arc<dyn AttendanceRepository>,
        holidays: Arc<dyn HolidayCalendar>,
        store: Arc<AttendanceStore>,
    ) -> Self {
        Self {
            repository,
            holidays,
            store,
        }
    }

    pub async fn by_employee(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApplicationError> {
        check_range(from, to)?;
        Ok(self.repository.list_by_employee(employee_id, from, to).await?)
    }

    pub async fn between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApplicationError> {
        check_range(from, to)?;
        Ok(self.repository.list_between(from, to).await?)
    }

    pub async fn today(&self) -> Result<Vec<AttendanceRecord>, ApplicationError> {
        let today = self.store.clock().today();
        self.between(today, today).await
    }

    /// Records for `day` with a check-in and no check-out yet.
    pub async fn missing_checkouts(
        &self,
        day: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, ApplicationError> {
        let records = self.repository.list_between(day, day).await?;
        Ok(records
            .into_iter()
            .filter(|r| r.check_in.is_some() && r.check_out.is_none())
            .collect())
    }

    pub async fn day_plan(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<DayPlan, ApplicationError> {
        let settings = self.store.settings_for(employee_id).await?;
        let holidays = self.holidays.holidays_between(day, day).await?;
        Ok(DayPlan {
            day,
            working_day: is_working_day(day, &holidays, &settings),
            expected_work_hours: expected_work_hours(day, &holidays, &settings),
            holidays,
        })
    }
}

fn check_range(from: NaiveDate, to: NaiveDate) -> Result<(), ApplicationError> {
    if from > to {
        return Err(ApplicationError::Validation(format!(
            "range start {from} is after end {to}"
        )));
    }
    if (to - from).num_days() >= MAX_RANGE_DAYS {
        return Err(ApplicationError::Validation(format!(
            "range may span at most {MAX_RANGE_DAYS} days"
        )));
    }
    Ok(())
}
