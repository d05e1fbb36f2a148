// Submits a work-from-home request.
//
// Responsibilities
// - Validate the reason and the requested day.
// - Refuse a second request while one is pending or approved for the same day.
// - Resolve the nearest office for audit display. Locator failures only lose the audit data.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::modules::attendance::use_cases::attendance_store::handler::AttendanceStore;
use crate::modules::wfh::adapters::outbound::office_locator::OfficeLocator;
use crate::modules::wfh::adapters::outbound::wfh_repository::WfhRepository;
use crate::modules::wfh::core::request::{NearestOffice, WfhRequest};
use crate::modules::wfh::core::geo::Coordinates;
use crate::modules::wfh::use_cases::submit_wfh::command::SubmitWfh;
use crate::modules::wfh::use_cases::submit_wfh::decide::decide_submit;
use crate::shared::core::errors::{ApplicationError, StoreError};
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationKind, NotificationTarget,
};

pub struct SubmitWfhHandler {
    repository: Arc<dyn WfhRepository>,
    locator: Arc<dyn OfficeLocator>,
    store: Arc<AttendanceStore>,
    notifications: NotificationDispatcher,
}

impl SubmitWfhHandler {
    pub fn new(
        repository: Arc<dyn WfhRepository>,
        locator: Arc<dyn OfficeLocator>,
        store: Arc<AttendanceStore>,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            repository,
            locator,
            store,
            notifications,
        }
    }

    pub async fn handle(&self, command: SubmitWfh) -> Result<WfhRequest, ApplicationError> {
        let draft = decide_submit(command, self.store.clock())?;
        self.store.employee(&draft.employee_id).await?;

        if let Some(active) = self
            .repository
            .find_active(&draft.employee_id, draft.request_date)
            .await?
        {
            return Err(already_requested(&active));
        }

        let nearest = match draft.attempted_location {
            Some(at) => self.nearest_office(at).await,
            None => None,
        };
        let request = match self.repository.insert(draft.into_request(nearest, Utc::now())).await {
            Ok(request) => request,
            Err(StoreError::Duplicate(key)) => {
                return Err(ApplicationError::Conflict(format!(
                    "a wfh request is already pending or approved ({key})"
                )));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            request_id = %request.id,
            employee_id = %request.employee_id,
            day = %request.request_date,
            "wfh requested"
        );
        self.notifications.emit(Notification {
            kind: NotificationKind::WfhRequest,
            target: NotificationTarget::HrDistributionList,
            occurred_at: request.created_at,
            payload: json!({
                "request_id": request.id,
                "employee_id": request.employee_id,
                "request_date": request.request_date,
                "reason": request.reason,
                "nearest_office": request.nearest_office,
                "distance_from_office_m": request.distance_from_office_m,
            }),
        });
        Ok(request)
    }

    async fn nearest_office(&self, at: Coordinates) -> Option<NearestOffice> {
        match self.locator.nearest(at).await {
            Ok(nearest) => nearest,
            Err(err) => {
                tracing::warn!(error = %err, "nearest office lookup failed, continuing without it");
                None
            }
        }
    }
}

fn already_requested(active: &WfhRequest) -> ApplicationError {
    ApplicationError::Conflict(format!(
        "wfh request {} for {} is already {}",
        active.id, active.request_date, active.status
    ))
}
