// In memory implementation of the NotificationGateway port.
//
// Purpose
// - Support tests and local development for verifying that workflows emit notifications.
//
// Responsibilities
// - Collect delivered notifications in a list for inspection.
// - Simulate delivery outages via `toggle_offline`.

use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationError, NotificationGateway,
};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryNotificationGateway {
    pub delivered: Mutex<Vec<Notification>>,
    is_offline: AtomicBool,
}

impl InMemoryNotificationGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub async fn delivered_count(&self) -> usize {
        self.delivered.lock().await.len()
    }
}

#[async_trait::async_trait]
impl NotificationGateway for InMemoryNotificationGateway {
    async fn notify(&self, notification: Notification) -> Result<(), NotificationError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(NotificationError::Delivery("Notification gateway offline".into()));
        }
        self.delivered.lock().await.push(notification);
        Ok(())
    }
}
