// The attendance record: one per employee per business day.
//
// Notes
// - `status`, `is_late` and `work_hours` are always derived through `recompute`, never supplied.
// - `version` increases on every persisted change and backs compare-and-swap updates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::attendance::core::settings::EffectiveSettings;
use crate::modules::attendance::core::status::{AttendanceStatus, classify};
use crate::shared::core::business_time::BusinessClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeofenceStatus {
    Inside,
    Outside,
    /// Geofence exception granted by an approved work-from-home request.
    Wfh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMeta {
    pub geofence_status: GeofenceStatus,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub office: Option<String>,
    pub distance_from_office_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: String,
    pub business_day: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub is_late: bool,
    pub work_hours: f64,
    pub reason: Option<String>,
    pub comments: Option<String>,
    pub location: Option<LocationMeta>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn new(employee_id: impl Into<String>, business_day: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            employee_id: employee_id.into(),
            business_day,
            check_in: None,
            check_out: None,
            status: AttendanceStatus::Absent,
            is_late: false,
            work_hours: 0.0,
            reason: None,
            comments: None,
            location: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn recompute(&mut self, settings: &EffectiveSettings, clock: &BusinessClock) {
        let classification = classify(self.check_in, self.check_out, settings, clock);
        self.status = classification.status;
        self.is_late = classification.flags.late;
        self.work_hours = classification.work_hours;
    }

    /// Equality on everything a caller can observe about the day, ignoring bookkeeping fields.
    pub fn same_content(&self, other: &AttendanceRecord) -> bool {
        self.employee_id == other.employee_id
            && self.business_day == other.business_day
            && self.check_in == other.check_in
            && self.check_out == other.check_out
            && self.status == other.status
            && self.is_late == other.is_late
            && self.work_hours == other.work_hours
            && self.reason == other.reason
            && self.comments == other.comments
            && self.location == other.location
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckInPolicy {
    /// A supplied check-in replaces the stored one.
    #[default]
    Overwrite,
    /// A supplied check-in is only used when the record has none yet.
    FillIfMissing,
}

/// Changes an approved request folds into the day's record. `None` fields leave the record as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPatch {
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub comments: Option<String>,
    pub location: Option<LocationMeta>,
    pub check_in_policy: CheckInPolicy,
}

impl ReconciliationPatch {
    pub fn apply_to(&self, record: &mut AttendanceRecord) {
        if let Some(check_in) = self.check_in {
            match self.check_in_policy {
                CheckInPolicy::Overwrite => record.check_in = Some(check_in),
                CheckInPolicy::FillIfMissing => {
                    record.check_in.get_or_insert(check_in);
                }
            }
        }
        if let Some(check_out) = self.check_out {
            record.check_out = Some(check_out);
        }
        if let Some(reason) = &self.reason {
            record.reason = Some(reason.clone());
        }
        if let Some(comments) = &self.comments {
            record.comments = Some(comments.clone());
        }
        if let Some(location) = &self.location {
            record.location = Some(location.clone());
        }
    }
}
