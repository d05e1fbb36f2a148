use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as Json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    RegularizationRequest,
    RegularizationStatusUpdate,
    WfhRequest,
    WfhStatusUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum NotificationTarget {
    Employee(String),
    HrDistributionList,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub target: NotificationTarget,
    pub occurred_at: DateTime<Utc>,
    pub payload: Json,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification channel closed")]
    Closed,

    #[error("notification channel full")]
    Full,

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Outbound delivery collaborator. Implementations live outside the core (email, push, SMS).
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError>;
}

pub mod dispatcher;
pub mod in_memory;
pub mod tracing_gateway;
