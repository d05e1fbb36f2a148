// Reviews a pending work-from-home request.
//
// Same ordering as regularization review: decide, commit the pending -> terminal transition
// atomically, then reconcile attendance and stamp the request as consumed. An approval whose
// attendance write fails goes back to pending.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::modules::attendance::core::record::{AttendanceRecord, ReconciliationPatch};
use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::wfh::adapters::outbound::wfh_repository::WfhRepository;
use crate::modules::wfh::core::request::WfhRequest;
use crate::modules::wfh::use_cases::review_wfh::command::ReviewWfh;
use crate::modules::wfh::use_cases::review_wfh::decide::decide_review;
use crate::modules::wfh::use_cases::review_wfh::decision::{Decision, WfhReview};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStamp;
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationKind, NotificationTarget,
};

pub struct ReviewWfhHandler {
    repository: Arc<dyn WfhRepository>,
    store: Arc<AttendanceStore>,
    notifications: NotificationDispatcher,
}

impl ReviewWfhHandler {
    pub fn new(
        repository: Arc<dyn WfhRepository>,
        store: Arc<AttendanceStore>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            repository,
            store,
            notifications,
        }
    }

    pub async fn handle(&self, command: ReviewWfh) -> Result<WfhReview, ApplicationError> {
        let request = self
            .repository
            .get(command.request_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("wfh request {}", command.request_id)))?;

        let decision = decide_review(&request, command.decision)?;
        if matches!(decision, Decision::Approve { .. }) {
            self.store.settings_for(&request.employee_id).await?;
        }

        let stamp = ReviewStamp {
            decision: command.decision,
            reviewed_by: command.reviewer_id,
            review_comment: command.comment,
            reviewed_at: Utc::now(),
        };
        let Some(reviewed) = self.repository.complete_review(request.id, stamp).await? else {
            tracing::warn!(request_id = %request.id, "wfh review lost to a concurrent reviewer");
            return Err(ApplicationError::InvalidState(format!(
                "wfh request {} is no longer pending",
                request.id
            )));
        };
        tracing::info!(
            request_id = %reviewed.id,
            employee_id = %reviewed.employee_id,
            status = %reviewed.status,
            "wfh reviewed"
        );

        let (reviewed, attendance) = match decision {
            Decision::Approve { patch } => {
                let (consumed, record) = self.reconcile(reviewed, patch).await?;
                (consumed, Some(record))
            }
            Decision::Reject => (reviewed, None),
        };

        self.notify_employee(&reviewed);
        Ok(WfhReview {
            request: reviewed,
            attendance,
        })
    }

    async fn reconcile(
        &self,
        reviewed: WfhRequest,
        patch: ReconciliationPatch,
    ) -> Result<(WfhRequest, AttendanceRecord), ApplicationError> {
        let applied = self.apply_and_consume(&reviewed, patch).await;
        if let Err(err) = &applied {
            tracing::error!(
                request_id = %reviewed.id,
                error = %err,
                "approved wfh request could not be reconciled"
            );
            match self.repository.reopen_unconsumed(reviewed.id, Utc::now()).await {
                Ok(Some(_)) => tracing::info!(request_id = %reviewed.id, "wfh request reopened"),
                Ok(None) => tracing::warn!(request_id = %reviewed.id, "wfh approval left in place"),
                Err(reopen) => tracing::error!(
                    request_id = %reviewed.id,
                    error = %reopen,
                    "wfh request could not be reopened"
                ),
            }
        }
        applied
    }

    async fn apply_and_consume(
        &self,
        reviewed: &WfhRequest,
        patch: ReconciliationPatch,
    ) -> Result<(WfhRequest, AttendanceRecord), ApplicationError> {
        let record = self
            .store
            .apply_reconciliation(&reviewed.employee_id, reviewed.request_date, patch)
            .await?;
        let consumed = self
            .repository
            .mark_consumed(reviewed.id, record.id, Utc::now())
            .await?;
        Ok((consumed, record))
    }

    fn notify_employee(&self, request: &WfhRequest) {
        self.notifications.emit(Notification {
            kind: NotificationKind::WfhStatusUpdate,
            target: NotificationTarget::Employee(request.employee_id.clone()),
            occurred_at: request.updated_at,
            payload: json!({
                "request_id": request.id,
                "request_date": request.request_date,
                "status": request.status,
                "reviewed_by": request.reviewed_by,
                "review_comment": request.review_comment,
            }),
        });
    }
}
