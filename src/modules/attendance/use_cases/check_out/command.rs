use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckOut {
    pub record_id: Uuid,
    pub at: DateTime<Utc>,
}
