use std::sync::Arc;

use crate::modules::wfh::adapters::outbound::wfh_repository::WfhRepository;
use crate::modules::wfh::core::request::WfhRequest;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStatus;

pub struct ListWfhHandler {
    repository: Arc<dyn WfhRepository>,
}

impl ListWfhHandler {
    pub fn new(repository: Arc<dyn WfhRepository>) -> Self {
        Self { repository }
    }

    pub async fn by_employee(
        &self,
        employee_id: &str,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<WfhRequest>, ApplicationError> {
        Ok(self.repository.list_by_employee(employee_id, status).await?)
    }

    pub async fn all(&self, status: Option<ReviewStatus>) -> Result<Vec<WfhRequest>, ApplicationError> {
        Ok(self.repository.list_all(status).await?)
    }
}

#[cfg(test)]
mod list_wfh_handler_tests {
    use super::*;
    use crate::modules::wfh::use_cases::review_wfh::command::ReviewWfh;
    use crate::modules::wfh::use_cases::submit_wfh::command::SubmitWfh;
    use crate::shared::core::review::ReviewDecision;
    use crate::tests::fixtures::engine::{COLLEAGUE, EMPLOYEE, TestEngine};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    async fn before_each() -> TestEngine {
        let engine = TestEngine::new().await;
        for employee_id in [EMPLOYEE, COLLEAGUE] {
            engine
                .submit_wfh
                .handle(SubmitWfh {
                    employee_id: employee_id.into(),
                    submitted_at: Utc::now(),
                    requested_check_in_time: None,
                    reason: "Car is at the workshop".into(),
                    location: None,
                })
                .await
                .unwrap();
        }
        engine
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_filter_by_status_across_employees(#[future] before_each: TestEngine) {
        let engine = before_each.await;
        let pending = engine.list_wfh.by_employee(COLLEAGUE, None).await.unwrap();
        engine
            .review_wfh
            .handle(ReviewWfh {
                request_id: pending[0].id,
                decision: ReviewDecision::Rejected,
                reviewer_id: "hr-01".into(),
                comment: None,
            })
            .await
            .unwrap();

        let all = engine.list_wfh.all(None).await.unwrap();
        let still_pending = engine.list_wfh.all(Some(ReviewStatus::Pending)).await.unwrap();
        let rejected = engine
            .list_wfh
            .by_employee(COLLEAGUE, Some(ReviewStatus::Rejected))
            .await
            .unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(still_pending.len(), 1);
        assert_eq!(still_pending[0].employee_id, EMPLOYEE);
        assert_eq!(rejected.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_store_outages(#[future] before_each: TestEngine) {
        let engine = before_each.await;
        engine.wfh.toggle_offline();

        let result = engine.list_wfh.all(None).await;

        assert!(matches!(result, Err(ApplicationError::Storage(_))));
    }
}
