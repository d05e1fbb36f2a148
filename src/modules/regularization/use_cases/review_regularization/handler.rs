// Reviews a pending regularization request.
//
// Order of operations
// 1. Load and decide against the request as read (rejects non-pending requests early).
// 2. On approval, check that reconciliation can succeed before committing anything.
// 3. Commit the pending -> terminal transition against the version that was read. An edit that
//    landed in between sends the review back to step 1 so the approved contents are the ones
//    folded into attendance. A concurrent reviewer that lost the transition gets `InvalidState`.
// 4. On approval, fold the request into the day's attendance record and link it. If that fails
//    the approval is reverted to pending so it can be reviewed again.
// 5. Emit the status update to the employee.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::modules::attendance::core::record::{AttendanceRecord, ReconciliationPatch};
use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::regularization::adapters::outbound::regularization_repository::RegularizationRepository;
use crate::modules::regularization::core::request::RegularizationRequest;
use crate::modules::regularization::use_cases::review_regularization::command::ReviewRegularization;
use crate::modules::regularization::use_cases::review_regularization::decide::decide_review;
use crate::modules::regularization::use_cases::review_regularization::decision::{
    Decision, RegularizationReview,
};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStamp;
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationKind, NotificationTarget,
};

const MAX_REVIEW_ATTEMPTS: usize = 5;

pub struct ReviewRegularizationHandler {
    repository: Arc<dyn RegularizationRepository>,
    store: Arc<AttendanceStore>,
    notifications: NotificationDispatcher,
}

impl ReviewRegularizationHandler {
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
        command: ReviewRegularization,
    ) -> Result<RegularizationReview, ApplicationError> {
        for _ in 0..MAX_REVIEW_ATTEMPTS {
            let request = self
                .repository
                .get(command.request_id)
                .await?
                .ok_or_else(|| {
                    ApplicationError::NotFound(format!(
                        "regularization request {}",
                        command.request_id
                    ))
                })?;

            let decision = decide_review(&request, command.decision)?;
            if let Decision::Approve { patch } = &decision {
                self.ensure_reconcilable(&request, patch).await?;
            }

            let stamp = ReviewStamp {
                decision: command.decision,
                reviewed_by: command.reviewer_id.clone(),
                review_comment: command.comment.clone(),
                reviewed_at: Utc::now(),
            };
            let reviewed = match self
                .repository
                .complete_review(request.id, request.version, stamp)
                .await
            {
                Ok(Some(reviewed)) => reviewed,
                Ok(None) => {
                    tracing::warn!(request_id = %request.id, "regularization review lost to a concurrent reviewer");
                    return Err(ApplicationError::InvalidState(format!(
                        "regularization request {} is no longer pending",
                        request.id
                    )));
                }
                Err(err) if err.is_contention() => {
                    tracing::debug!(request_id = %request.id, error = %err, "regularization edited during review, re-reading");
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            tracing::info!(
                request_id = %reviewed.id,
                employee_id = %reviewed.employee_id,
                status = %reviewed.status,
                "regularization reviewed"
            );

            let (reviewed, attendance) = match decision {
                Decision::Approve { patch } => {
                    let (linked, record) = self.reconcile(reviewed, patch).await?;
                    (linked, Some(record))
                }
                Decision::Reject => (reviewed, None),
            };

            self.notify_employee(&reviewed);
            return Ok(RegularizationReview {
                request: reviewed,
                attendance,
            });
        }

        tracing::warn!(request_id = %command.request_id, "regularization review retries exhausted");
        Err(ApplicationError::Conflict(format!(
            "regularization request {} kept changing, retry",
            command.request_id
        )))
    }

    /// A check-out only correction needs a recorded check-in to attach to.
    async fn ensure_reconcilable(
        &self,
        request: &RegularizationRequest,
        patch: &ReconciliationPatch,
    ) -> Result<(), ApplicationError> {
        if patch.check_in.is_some() {
            return Ok(());
        }
        let existing = self
            .store
            .find_by_day(&request.employee_id, request.business_day)
            .await?;
        if existing.is_none_or(|record| record.check_in.is_none()) {
            return Err(ApplicationError::BusinessLogic(format!(
                "no check-in recorded for {} on {} and none requested",
                request.employee_id, request.business_day
            )));
        }
        Ok(())
    }

    async fn reconcile(
        &self,
        reviewed: RegularizationRequest,
        patch: ReconciliationPatch,
    ) -> Result<(RegularizationRequest, AttendanceRecord), ApplicationError> {
        let applied = self.apply_and_link(&reviewed, patch).await;
        if let Err(err) = &applied {
            tracing::error!(
                request_id = %reviewed.id,
                error = %err,
                "approved regularization could not be reconciled"
            );
            match self.repository.reopen_unlinked(reviewed.id, Utc::now()).await {
                Ok(Some(_)) => {
                    tracing::info!(request_id = %reviewed.id, "regularization reopened for review")
                }
                Ok(None) => {
                    tracing::warn!(request_id = %reviewed.id, "regularization approval left in place")
                }
                Err(reopen) => tracing::error!(
                    request_id = %reviewed.id,
                    error = %reopen,
                    "regularization could not be reopened"
                ),
            }
        }
        applied
    }

    async fn apply_and_link(
        &self,
        reviewed: &RegularizationRequest,
        patch: ReconciliationPatch,
    ) -> Result<(RegularizationRequest, AttendanceRecord), ApplicationError> {
        let record = self
            .store
            .apply_reconciliation(&reviewed.employee_id, reviewed.business_day, patch)
            .await?;
        let linked = self.repository.link_attendance(reviewed.id, record.id).await?;
        Ok((linked, record))
    }

    fn notify_employee(&self, request: &RegularizationRequest) {
        self.notifications.emit(Notification {
            kind: NotificationKind::RegularizationStatusUpdate,
            target: NotificationTarget::Employee(request.employee_id.clone()),
            occurred_at: request.updated_at,
            payload: json!({
                "request_id": request.id,
                "business_day": request.business_day,
                "status": request.status,
                "reviewed_by": request.reviewed_by,
                "review_comment": request.review_comment,
            }),
        });
    }
}
