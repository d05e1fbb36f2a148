use chrono::{DateTime, Utc};

use crate::modules::attendance::core::record::LocationMeta;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckIn {
    pub employee_id: String,
    pub at: DateTime<Utc>,
    pub location: Option<LocationMeta>,
}
