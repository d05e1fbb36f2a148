// Business clock: canonical day handling in one fixed timezone offset.
//
// Purpose
// - Map any instant onto the business day it belongs to, independent of the host timezone.
// - Produce day boundaries used as uniqueness keys and range query bounds.
//
// Responsibilities
// - `day_key` is the only way a "day" is derived from an instant. Every persisted day field is a
//   `NaiveDate` produced here, so two instants on the same business date always yield the same key.
// - Parsing of caller supplied timestamps. Naive timestamps are read as business-local wall time.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc,
};
use thiserror::Error;

/// Indian Standard Time, +05:30.
pub const IST_OFFSET_MINUTES: i32 = 330;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeBoundaryError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("utc offset out of range: {0} minutes")]
    InvalidOffset(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    offset: FixedOffset,
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::ist()
    }
}

impl BusinessClock {
    pub fn ist() -> Self {
        Self::from_offset_minutes(IST_OFFSET_MINUTES).unwrap_or(Self { offset: Utc.fix() })
    }

    pub fn from_offset_minutes(minutes: i32) -> Result<Self, TimeBoundaryError> {
        let offset = FixedOffset::east_opt(minutes * 60)
            .ok_or(TimeBoundaryError::InvalidOffset(minutes))?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn day_key(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.day_key(Utc::now())
    }

    /// Start (inclusive) and end (last millisecond) of the business day containing `instant`.
    pub fn day_boundaries(&self, instant: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        self.bounds_of(self.day_key(instant))
    }

    pub fn bounds_of(&self, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = self.start_of_day(day);
        (start, start + Duration::days(1) - Duration::milliseconds(1))
    }

    pub fn start_of_day(&self, day: NaiveDate) -> DateTime<Utc> {
        self.at(day, NaiveTime::MIN)
    }

    /// The instant at which the business-local wall clock shows `time` on `day`.
    pub fn at(&self, day: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        self.from_local(day.and_time(time))
    }

    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.offset).time()
    }

    pub fn is_same_business_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_key(a) == self.day_key(b)
    }

    pub fn falls_on(&self, instant: DateTime<Utc>, day: NaiveDate) -> bool {
        self.day_key(instant) == day
    }

    /// Accepts RFC 3339 (any offset) or a naive `YYYY-MM-DDTHH:MM[:SS]` read as business-local time.
    pub fn parse_instant(&self, raw: &str) -> Result<DateTime<Utc>, TimeBoundaryError> {
        let raw = raw.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| self.from_local(naive))
            .ok_or_else(|| TimeBoundaryError::InvalidTimestamp(raw.to_string()))
    }

    pub fn parse_day(&self, raw: &str) -> Result<NaiveDate, TimeBoundaryError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| TimeBoundaryError::InvalidDate(raw.to_string()))
    }

    fn from_local(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        // A fixed offset has no gaps or folds, so the mapping is always single.
        (naive - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }
}
