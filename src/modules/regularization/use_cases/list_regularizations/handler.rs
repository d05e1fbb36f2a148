use std::sync::Arc;

use crate::modules::regularization::adapters::outbound::regularization_repository::RegularizationRepository;
use crate::modules::regularization::core::request::RegularizationRequest;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::review::ReviewStatus;

pub struct ListRegularizationsHandler {
    repository: Arc<dyn RegularizationRepository>,
}

impl ListRegularizationsHandler {
    pub fn new(repository: Arc<dyn RegularizationRepository>) -> Self {
        Self { repository }
    }

    pub async fn by_employee(
        &self,
        employee_id: &str,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<RegularizationRequest>, ApplicationError> {
        Ok(self.repository.list_by_employee(employee_id, status).await?)
    }

    pub async fn all(
        &self,
        status: Option<ReviewStatus>,
    ) -> Result<Vec<RegularizationRequest>, ApplicationError> {
        Ok(self.repository.list_all(status).await?)
    }
}
