use std::sync::Arc;

use crate::modules::attendance::core::record::AttendanceRecord;
use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::attendance::use_cases::check_out::command::CheckOut;
use crate::shared::core::errors::ApplicationError;

pub struct CheckOutHandler {
    store: Arc<AttendanceStore>,
}

impl CheckOutHandler {
    pub fn new(store: Arc<AttendanceStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: CheckOut) -> Result<AttendanceRecord, ApplicationError> {
        self.store.record_check_out(command.record_id, command.at).await
    }
}
