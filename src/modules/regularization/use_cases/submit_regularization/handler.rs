// Submits a regularization request.
//
// A pending request for the same (employee, day) is edited in place instead of duplicated. The
// storage layer refuses a second pending insert, so two concurrent first submissions converge on
// one request: the loser re-reads and edits the winner.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::regularization::adapters::outbound::regularization_repository::RegularizationRepository;
use crate::modules::regularization::core::request::RegularizationRequest;
use crate::modules::regularization::use_cases::submit_regularization::command::SubmitRegularization;
use crate::modules::regularization::use_cases::submit_regularization::decide::decide_submit;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationKind, NotificationTarget,
};

const MAX_WRITE_ATTEMPTS: usize = 5;

pub struct SubmitRegularizationHandler {
    repository: Arc<dyn RegularizationRepository>,
    store: Arc<AttendanceStore>,
    notifications: NotificationDispatcher,
}

impl SubmitRegularizationHandler {
    pub fn new(
        repository: Arc<dyn RegularizationRepository>,
        store: Arc<AttendanceStore>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            repository,
            store,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        command: SubmitRegularization,
    ) -> Result<RegularizationRequest, ApplicationError> {
        let draft = decide_submit(command, self.store.clock())?;
        self.store.employee(&draft.employee_id).await?;

        for _ in 0..MAX_WRITE_ATTEMPTS {
            let now = Utc::now();
            let existing = self
                .repository
                .find_pending(&draft.employee_id, draft.business_day)
                .await?;
            let updated = existing.is_some();
            let written = match existing {
                Some(pending) => {
                    self.repository
                        .update_pending(draft.clone().apply_to(pending, now))
                        .await
                }
                None => self.repository.insert(draft.clone().into_request(now)).await,
            };
            match written {
                Ok(request) => {
                    tracing::info!(
                        request_id = %request.id,
                        employee_id = %request.employee_id,
                        day = %request.business_day,
                        updated,
                        "regularization submitted"
                    );
                    self.notify_reviewers(&request, updated);
                    return Ok(request);
                }
                Err(err) if err.is_contention() => {
                    tracing::debug!(error = %err, "regularization write lost a race, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(ApplicationError::Conflict(format!(
            "pending regularization for {} on {} kept changing, retry",
            draft.employee_id, draft.business_day
        )))
    }

    fn notify_reviewers(&self, request: &RegularizationRequest, updated: bool) {
        self.notifications.emit(Notification {
            kind: NotificationKind::RegularizationRequest,
            target: NotificationTarget::HrDistributionList,
            occurred_at: request.updated_at,
            payload: json!({
                "request_id": request.id,
                "employee_id": request.employee_id,
                "business_day": request.business_day,
                "reason": request.reason,
                "updated": updated,
            }),
        });
    }
}
