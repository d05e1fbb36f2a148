// AttendanceStore: the only writer of attendance records.
//
// Purpose
// - Keep one record per (employee, business day) while check-in, check-out and both approval
//   workflows race to create or patch it.
//
// Responsibilities
// - Resolve the employee's effective settings and recompute derived fields on every write.
// - Creation goes through `insert`; losing a creation race (`Duplicate`) re-reads and updates.
// - Updates are compare-and-swap on the record version; a lost swap re-reads and re-applies.
//
// Retries are bounded. Exhausting them surfaces as a conflict for the caller to retry.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::attendance::adapters::outbound::attendance_repository::AttendanceRepository;
use crate::modules::attendance::adapters::outbound::directory::{Employee, EmployeeDirectory};
use crate::modules::attendance::core::record::{AttendanceRecord, LocationMeta, ReconciliationPatch};
use crate::modules::attendance::core::settings::EffectiveSettings;
use crate::modules::attendance::use_cases::resolve_settings::handler::SettingsResolver;
use crate::shared::core::business_time::BusinessClock;
use crate::shared::core::errors::{ApplicationError, StoreError};

const MAX_WRITE_ATTEMPTS: usize = 5;

pub struct AttendanceStore {
    repository: Arc<dyn AttendanceRepository>,
    directory: Arc<dyn EmployeeDirectory>,
    settings: Arc<SettingsResolver>,
    clock: BusinessClock,
}

impl AttendanceStore {
    pub fn new(
        repository: Arc<dyn AttendanceRepository>,
        directory: Arc<dyn EmployeeDirectory>,
        settings: Arc<SettingsResolver>,
        clock: BusinessClock,
    ) -> Self {
        Self {
            repository,
            directory,
            settings,
            clock,
        }
    }

    pub fn clock(&self) -> &BusinessClock {
        &self.clock
    }

    pub async fn employee(&self, employee_id: &str) -> Result<Employee, ApplicationError> {
        self.directory
            .find(employee_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("employee {employee_id}")))
    }

    /// Effective settings for the employee's department. Unknown employees are `NotFound`.
    pub async fn settings_for(
        &self,
        employee_id: &str,
    ) -> Result<Arc<EffectiveSettings>, ApplicationError> {
        let employee = self.employee(employee_id).await?;
        self.settings
            .effective_settings(employee.department.as_deref())
            .await
    }

    pub async fn find_by_day(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, ApplicationError> {
        Ok(self.repository.find_by_day(employee_id, day).await?)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AttendanceRecord>, ApplicationError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    pub async fn upsert_from_check_in(
        &self,
        employee_id: &str,
        day: NaiveDate,
        check_in: DateTime<Utc>,
        location: Option<LocationMeta>,
    ) -> Result<AttendanceRecord, ApplicationError> {
        if !self.clock.falls_on(check_in, day) {
            return Err(ApplicationError::Validation(format!(
                "check-in {check_in} does not fall on {day}"
            )));
        }
        let settings = self.settings_for(employee_id).await?;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let now = Utc::now();
            match self.repository.find_by_day(employee_id, day).await? {
                Some(existing) if existing.check_in.is_some() => {
                    return Err(ApplicationError::Conflict(format!(
                        "{employee_id} already checked in on {day}"
                    )));
                }
                Some(mut absent) => {
                    absent.check_in = Some(check_in);
                    if location.is_some() {
                        absent.location = location.clone();
                    }
                    absent.recompute(&settings, &self.clock);
                    absent.updated_at = now;
                    match self.repository.replace(absent).await {
                        Ok(saved) => {
                            tracing::info!(employee_id, %day, "check-in filled absent record");
                            return Ok(saved);
                        }
                        Err(err) => retry_or_fail(err)?,
                    }
                }
                None => {
                    let mut record = AttendanceRecord::new(employee_id, day, now);
                    record.check_in = Some(check_in);
                    record.location = location.clone();
                    record.recompute(&settings, &self.clock);
                    match self.repository.insert(record).await {
                        Ok(saved) => {
                            tracing::info!(employee_id, %day, late = saved.is_late, "checked in");
                            return Ok(saved);
                        }
                        Err(err) => retry_or_fail(err)?,
                    }
                }
            }
        }
        Err(contended(employee_id, day))
    }

    pub async fn record_check_out(
        &self,
        record_id: Uuid,
        check_out: DateTime<Utc>,
    ) -> Result<AttendanceRecord, ApplicationError> {
        let mut settings: Option<Arc<EffectiveSettings>> = None;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let mut record = self
                .repository
                .find_by_id(record_id)
                .await?
                .ok_or_else(|| ApplicationError::NotFound(format!("attendance record {record_id}")))?;
            let Some(check_in) = record.check_in else {
                return Err(ApplicationError::BusinessLogic(
                    "cannot check out without a check-in".into(),
                ));
            };
            if record.check_out.is_some() {
                return Err(ApplicationError::Conflict(format!(
                    "{} already checked out on {}",
                    record.employee_id, record.business_day
                )));
            }
            if check_out < check_in {
                return Err(ApplicationError::Validation(
                    "check-out must not precede check-in".into(),
                ));
            }

            let resolved = match &settings {
                Some(s) => s.clone(),
                None => {
                    let s = self.settings_for(&record.employee_id).await?;
                    settings = Some(s.clone());
                    s
                }
            };
            record.check_out = Some(check_out);
            record.recompute(&resolved, &self.clock);
            record.updated_at = Utc::now();
            match self.repository.replace(record).await {
                Ok(saved) => {
                    tracing::info!(
                        employee_id = %saved.employee_id,
                        day = %saved.business_day,
                        work_hours = saved.work_hours,
                        status = ?saved.status,
                        "checked out"
                    );
                    return Ok(saved);
                }
                Err(err) => retry_or_fail(err)?,
            }
        }
        Err(ApplicationError::Conflict(format!(
            "attendance record {record_id} kept changing, retry"
        )))
    }

    /// Folds an approved request into the day's record, creating it when absent.
    /// Re-applying the same patch leaves the stored record untouched.
    pub async fn apply_reconciliation(
        &self,
        employee_id: &str,
        day: NaiveDate,
        patch: ReconciliationPatch,
    ) -> Result<AttendanceRecord, ApplicationError> {
        for instant in [patch.check_in, patch.check_out].into_iter().flatten() {
            if !self.clock.falls_on(instant, day) {
                return Err(ApplicationError::Validation(format!(
                    "{instant} does not fall on {day}"
                )));
            }
        }
        let settings = self.settings_for(employee_id).await?;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let now = Utc::now();
            match self.repository.find_by_day(employee_id, day).await? {
                Some(existing) => {
                    if existing.check_in.is_none() && patch.check_in.is_none() {
                        return Err(ApplicationError::BusinessLogic(format!(
                            "no check-in recorded for {employee_id} on {day} and none supplied"
                        )));
                    }
                    let mut merged = existing.clone();
                    patch.apply_to(&mut merged);
                    merged.recompute(&settings, &self.clock);
                    if merged.same_content(&existing) {
                        tracing::debug!(employee_id, %day, "reconciliation already applied");
                        return Ok(existing);
                    }
                    merged.updated_at = now;
                    match self.repository.replace(merged).await {
                        Ok(saved) => {
                            tracing::info!(employee_id, %day, status = ?saved.status, "attendance reconciled");
                            return Ok(saved);
                        }
                        Err(err) => retry_or_fail(err)?,
                    }
                }
                None => {
                    if patch.check_in.is_none() {
                        return Err(ApplicationError::BusinessLogic(format!(
                            "no attendance record for {employee_id} on {day} and no check-in supplied"
                        )));
                    }
                    let mut record = AttendanceRecord::new(employee_id, day, now);
                    patch.apply_to(&mut record);
                    record.recompute(&settings, &self.clock);
                    match self.repository.insert(record).await {
                        Ok(saved) => {
                            tracing::info!(employee_id, %day, status = ?saved.status, "attendance created by reconciliation");
                            return Ok(saved);
                        }
                        Err(err) => retry_or_fail(err)?,
                    }
                }
            }
        }
        Err(contended(employee_id, day))
    }

    /// Records an absence for a day without attendance. An existing record is returned as is.
    pub async fn mark_absent(
        &self,
        employee_id: &str,
        day: NaiveDate,
    ) -> Result<AttendanceRecord, ApplicationError> {
        self.settings_for(employee_id).await?;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            if let Some(existing) = self.repository.find_by_day(employee_id, day).await? {
                return Ok(existing);
            }
            match self
                .repository
                .insert(AttendanceRecord::new(employee_id, day, Utc::now()))
                .await
            {
                Ok(saved) => {
                    tracing::info!(employee_id, %day, "marked absent");
                    return Ok(saved);
                }
                Err(err) => retry_or_fail(err)?,
            }
        }
        Err(contended(employee_id, day))
    }
}

/// Lost races are retried; anything else ends the operation.
fn retry_or_fail(err: StoreError) -> Result<(), ApplicationError> {
    if err.is_contention() {
        tracing::debug!(error = %err, "attendance write lost a race, retrying");
        return Ok(());
    }
    Err(err.into())
}

fn contended(employee_id: &str, day: NaiveDate) -> ApplicationError {
    tracing::warn!(employee_id, %day, "attendance write retries exhausted");
    ApplicationError::Conflict(format!(
        "attendance for {employee_id} on {day} kept changing, retry"
    ))
}
