// Attendance business rules and their hierarchical resolution.
//
// Purpose
// - `EffectiveSettings` is the fully resolved rule set for one employee.
// - `SettingsOverride` is what a persisted settings document carries: every field optional.
//
// Responsibilities
// - `merge` walks the known fields only, nested groups included, and returns a new value.
// - Time-of-day helpers shared with reporting (`time_to_decimal`, `decimal_to_time`).
//
// Boundaries
// - Pure. Loading, caching and invalidation live in the resolve_settings use case.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("invalid weekday index {0}, expected 0 (Sunday) to 6 (Saturday)")]
    InvalidWeekday(u8),

    #[error("invalid saturday ordinal {0}, expected 1 to 5")]
    InvalidSaturdayOrdinal(u8),

    #[error("{0} must be a finite, non-negative number of hours")]
    InvalidHours(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturdayWorkType {
    /// Every Saturday listed in `working_days` is a full working day.
    Full,
    /// Alternate-Saturday schedule: `non_working_saturdays` are off, the others are half days.
    Half,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingWeek {
    pub working_days: BTreeSet<u8>,
    pub non_working_days: BTreeSet<u8>,
    pub saturday_work_type: SaturdayWorkType,
    pub non_working_saturdays: BTreeSet<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveSettings {
    #[serde(with = "hhmm")]
    pub late_threshold: NaiveTime,
    #[serde(with = "hhmm")]
    pub work_start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub work_end_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub half_day_end_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub late_arrival_time: NaiveTime,
    pub minimum_work_hours: f64,
    pub full_day_hours: f64,
    pub half_day_hours: f64,
    pub working_week: WorkingWeek,
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for EffectiveSettings {
    fn default() -> Self {
        Self {
            late_threshold: clock(9, 55),
            work_start_time: clock(9, 30),
            work_end_time: clock(18, 30),
            half_day_end_time: clock(14, 0),
            late_arrival_time: clock(9, 45),
            minimum_work_hours: 4.0,
            full_day_hours: 8.0,
            half_day_hours: 4.0,
            working_week: WorkingWeek {
                working_days: BTreeSet::from([1, 2, 3, 4, 5, 6]),
                non_working_days: BTreeSet::from([0]),
                saturday_work_type: SaturdayWorkType::Half,
                non_working_saturdays: BTreeSet::from([2, 4]),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkingWeekOverride {
    pub working_days: Option<BTreeSet<u8>>,
    pub non_working_days: Option<BTreeSet<u8>>,
    pub saturday_work_type: Option<SaturdayWorkType>,
    pub non_working_saturdays: Option<BTreeSet<u8>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverride {
    #[serde(with = "hhmm_opt")]
    pub late_threshold: Option<NaiveTime>,
    #[serde(with = "hhmm_opt")]
    pub work_start_time: Option<NaiveTime>,
    #[serde(with = "hhmm_opt")]
    pub work_end_time: Option<NaiveTime>,
    #[serde(with = "hhmm_opt")]
    pub half_day_end_time: Option<NaiveTime>,
    #[serde(with = "hhmm_opt")]
    pub late_arrival_time: Option<NaiveTime>,
    pub minimum_work_hours: Option<f64>,
    pub full_day_hours: Option<f64>,
    pub half_day_hours: Option<f64>,
    pub working_week: Option<WorkingWeekOverride>,
}

impl SettingsOverride {
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, hours) in [
            ("minimum_work_hours", self.minimum_work_hours),
            ("full_day_hours", self.full_day_hours),
            ("half_day_hours", self.half_day_hours),
        ] {
            if hours.is_some_and(|h| !h.is_finite() || h < 0.0) {
                return Err(SettingsError::InvalidHours(name));
            }
        }
        if let Some(week) = &self.working_week {
            let weekdays = week.working_days.iter().chain(week.non_working_days.iter()).flatten();
            if let Some(bad) = weekdays.copied().find(|d| *d > 6) {
                return Err(SettingsError::InvalidWeekday(bad));
            }
            if let Some(bad) = week
                .non_working_saturdays
                .iter()
                .flatten()
                .copied()
                .find(|n| !(1..=5).contains(n))
            {
                return Err(SettingsError::InvalidSaturdayOrdinal(bad));
            }
        }
        Ok(())
    }

    /// Field-by-field overlay: `other` wins wherever it sets a value.
    pub fn overlay(&self, other: &SettingsOverride) -> SettingsOverride {
        let working_week = match (&self.working_week, &other.working_week) {
            (Some(base), Some(top)) => Some(WorkingWeekOverride {
                working_days: top.working_days.clone().or_else(|| base.working_days.clone()),
                non_working_days: top
                    .non_working_days
                    .clone()
                    .or_else(|| base.non_working_days.clone()),
                saturday_work_type: top.saturday_work_type.or(base.saturday_work_type),
                non_working_saturdays: top
                    .non_working_saturdays
                    .clone()
                    .or_else(|| base.non_working_saturdays.clone()),
            }),
            (base, top) => top.clone().or_else(|| base.clone()),
        };
        SettingsOverride {
            late_threshold: other.late_threshold.or(self.late_threshold),
            work_start_time: other.work_start_time.or(self.work_start_time),
            work_end_time: other.work_end_time.or(self.work_end_time),
            half_day_end_time: other.half_day_end_time.or(self.half_day_end_time),
            late_arrival_time: other.late_arrival_time.or(self.late_arrival_time),
            minimum_work_hours: other.minimum_work_hours.or(self.minimum_work_hours),
            full_day_hours: other.full_day_hours.or(self.full_day_hours),
            half_day_hours: other.half_day_hours.or(self.half_day_hours),
            working_week,
        }
    }
}

pub fn merge(base: &EffectiveSettings, over: &SettingsOverride) -> EffectiveSettings {
    let week = match &over.working_week {
        None => base.working_week.clone(),
        Some(w) => WorkingWeek {
            working_days: w
                .working_days
                .clone()
                .unwrap_or_else(|| base.working_week.working_days.clone()),
            non_working_days: w
                .non_working_days
                .clone()
                .unwrap_or_else(|| base.working_week.non_working_days.clone()),
            saturday_work_type: w
                .saturday_work_type
                .unwrap_or(base.working_week.saturday_work_type),
            non_working_saturdays: w
                .non_working_saturdays
                .clone()
                .unwrap_or_else(|| base.working_week.non_working_saturdays.clone()),
        },
    };
    EffectiveSettings {
        late_threshold: over.late_threshold.unwrap_or(base.late_threshold),
        work_start_time: over.work_start_time.unwrap_or(base.work_start_time),
        work_end_time: over.work_end_time.unwrap_or(base.work_end_time),
        half_day_end_time: over.half_day_end_time.unwrap_or(base.half_day_end_time),
        late_arrival_time: over.late_arrival_time.unwrap_or(base.late_arrival_time),
        minimum_work_hours: over.minimum_work_hours.unwrap_or(base.minimum_work_hours),
        full_day_hours: over.full_day_hours.unwrap_or(base.full_day_hours),
        half_day_hours: over.half_day_hours.unwrap_or(base.half_day_hours),
        working_week: week,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "department", rename_all = "snake_case")]
pub enum SettingsScope {
    Global,
    Department(String),
}

/// A persisted settings document. Identity and timestamps are metadata and never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    pub id: Uuid,
    pub scope: SettingsScope,
    pub overrides: SettingsOverride,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SettingsDocument {
    pub fn new(scope: SettingsScope, overrides: SettingsOverride, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            scope,
            overrides,
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn parse_time_of_day(raw: &str) -> Result<NaiveTime, SettingsError> {
    let invalid = || SettingsError::InvalidTime(raw.to_string());
    let (h, m) = raw.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

pub fn format_time_of_day(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// "09:30" -> 9.5
pub fn time_to_decimal(raw: &str) -> Result<f64, SettingsError> {
    let time = parse_time_of_day(raw)?;
    Ok(f64::from(time.hour()) + f64::from(time.minute()) / 60.0)
}

/// 9.5 -> "09:30". Rounds to the nearest minute and clamps into a single day.
pub fn decimal_to_time(hours: f64) -> String {
    let total = if hours.is_finite() {
        ((hours * 60.0).round() as i64).clamp(0, 24 * 60 - 1)
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_time_of_day(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time_of_day(&raw).map_err(serde::de::Error::custom)
    }
}

mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => s.serialize_some(&super::format_time_of_day(*t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| super::parse_time_of_day(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
