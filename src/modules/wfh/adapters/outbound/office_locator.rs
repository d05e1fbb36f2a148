use async_trait::async_trait;
use thiserror::Error;

use crate::modules::wfh::core::geo::Coordinates;
use crate::modules::wfh::core::request::NearestOffice;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("office locator unavailable: {0}")]
    Unavailable(String),
}

/// Geolocation collaborator. Its answer is audit data and never gates a request.
#[async_trait]
pub trait OfficeLocator: Send + Sync {
    async fn nearest(&self, at: Coordinates) -> Result<Option<NearestOffice>, LocatorError>;
}
