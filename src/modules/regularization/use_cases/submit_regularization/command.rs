use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRegularization {
    pub employee_id: String,
    pub business_day: NaiveDate,
    pub requested_check_in: Option<DateTime<Utc>>,
    pub requested_check_out: Option<DateTime<Utc>>,
    pub reason: String,
}
