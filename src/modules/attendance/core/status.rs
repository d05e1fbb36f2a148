// Status classification for a single attendance day.
//
// Purpose
// - Derive status, worked hours and flags from check-in/check-out and the effective settings.
//
// Responsibilities
// - `classify` is a pure function. Lateness is a flag on `present`, never a separate status.
// - Working-day predicate and expected hours, kept apart from `classify`.
//
// Numeric semantics
// - Worked hours are raw decimal hours. Rounding belongs to display code.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::attendance::core::settings::{EffectiveSettings, SaturdayWorkType};
use crate::shared::core::business_time::BusinessClock;

const SATURDAY: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    pub late: bool,
    pub checkout_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub status: AttendanceStatus,
    pub work_hours: f64,
    pub flags: StatusFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

pub fn hours_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 3_600_000.0
}

pub fn is_late(check_in: DateTime<Utc>, settings: &EffectiveSettings, clock: &BusinessClock) -> bool {
    let threshold = clock.at(clock.day_key(check_in), settings.late_threshold);
    check_in > threshold
}

pub fn classify(
    check_in: Option<DateTime<Utc>>,
    check_out: Option<DateTime<Utc>>,
    settings: &EffectiveSettings,
    clock: &BusinessClock,
) -> Classification {
    let Some(check_in) = check_in else {
        return Classification {
            status: AttendanceStatus::Absent,
            work_hours: 0.0,
            flags: StatusFlags::default(),
        };
    };

    let work_hours = check_out
        .map(|out| hours_between(check_in, out).max(0.0))
        .unwrap_or(0.0);
    let flags = StatusFlags {
        late: is_late(check_in, settings, clock),
        checkout_pending: check_out.is_none(),
    };
    let status = if check_out.is_some() && work_hours < settings.minimum_work_hours {
        AttendanceStatus::HalfDay
    } else {
        AttendanceStatus::Present
    };

    Classification {
        status,
        work_hours,
        flags,
    }
}

fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// 1 for the first Saturday of the month, 2 for the second, and so on.
fn saturday_ordinal(date: NaiveDate) -> u8 {
    ((date.day() - 1) / 7 + 1) as u8
}

fn is_half_saturday_pattern(date: NaiveDate, settings: &EffectiveSettings) -> bool {
    weekday_index(date) == SATURDAY
        && settings.working_week.saturday_work_type == SaturdayWorkType::Half
}

pub fn is_working_day(date: NaiveDate, holidays: &[Holiday], settings: &EffectiveSettings) -> bool {
    let week = &settings.working_week;
    let weekday = weekday_index(date);
    if week.non_working_days.contains(&weekday) || !week.working_days.contains(&weekday) {
        return false;
    }
    if holidays.iter().any(|h| h.date == date) {
        return false;
    }
    if is_half_saturday_pattern(date, settings)
        && week.non_working_saturdays.contains(&saturday_ordinal(date))
    {
        return false;
    }
    true
}

pub fn expected_work_hours(
    date: NaiveDate,
    holidays: &[Holiday],
    settings: &EffectiveSettings,
) -> f64 {
    if !is_working_day(date, holidays, settings) {
        0.0
    } else if is_half_saturday_pattern(date, settings) {
        settings.half_day_hours
    } else {
        settings.full_day_hours
    }
}
