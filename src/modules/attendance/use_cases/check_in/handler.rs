use std::sync::Arc;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::attendance::use_cases::check_in::command::CheckIn;
use crate::shared::core::errors::ApplicationError;

pub struct CheckInHandler {
    store: Arc<AttendanceStore>,
}

impl CheckInHandler {
    pub fn new(store: Arc<AttendanceStore>) -> Self {
        Self { store }
    }

    /// The business day is derived from the check-in instant.
    pub async fn handle(&self, command: CheckIn) -> Result<AttendanceRecord, ApplicationError> {
        let day = self.store.clock().day_key(command.at);
        self.store
            .upsert_from_check_in(&command.employee_id, day, command.at, command.location)
            .await
    }
}
