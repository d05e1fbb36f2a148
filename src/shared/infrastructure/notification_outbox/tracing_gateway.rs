// Notification gateway that writes every notification to the log.
//
// Used by the binary until a real delivery channel (email, push) is plugged in behind the
// same port.

use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationError, NotificationGateway,
};

#[derive(Debug, Default)]
pub struct TracingNotificationGateway;

#[async_trait::async_trait]
impl NotificationGateway for TracingNotificationGateway {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        let payload = serde_json::to_string(&notification.payload)
            .map_err(|err| NotificationError::Delivery(err.to_string()))?;
        tracing::info!(
            kind = ?notification.kind,
            recipient = ?notification.target,
            occurred_at = %notification.occurred_at,
            %payload,
            "notification"
        );
        Ok(())
    }
}
