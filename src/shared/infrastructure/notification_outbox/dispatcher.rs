// Asynchronous dispatch boundary between workflows and the notification gateway.
//
// Purpose
// - Workflows hand a `Notification` to `NotificationDispatcher::emit` after a committed state
//   transition and return immediately. Delivery happens on the relay task.
//
// Responsibilities
// - `emit` never blocks and never fails the caller. A full or closed channel is logged and dropped.
// - `run_relay` drains the channel into the gateway and logs delivery failures.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::shared::infrastructure::notification_outbox::{
    Notification, NotificationError, NotificationGateway,
};

#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<Notification>,
}

impl NotificationDispatcher {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Channel plus a relay task delivering into `gateway`.
    pub fn spawn(
        gateway: Arc<dyn NotificationGateway>,
        capacity: usize,
    ) -> (Self, JoinHandle<()>) {
        let (dispatcher, receiver) = Self::channel(capacity);
        let handle = tokio::spawn(run_relay(receiver, gateway));
        (dispatcher, handle)
    }

    pub fn emit(&self, notification: Notification) {
        if let Err(err) = self.try_emit(notification) {
            tracing::warn!(error = %err, "notification dropped");
        }
    }

    fn try_emit(&self, notification: Notification) -> Result<(), NotificationError> {
        self.sender.try_send(notification).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => NotificationError::Full,
            mpsc::error::TrySendError::Closed(_) => NotificationError::Closed,
        })
    }
}

pub async fn run_relay(
    mut receiver: mpsc::Receiver<Notification>,
    gateway: Arc<dyn NotificationGateway>,
) {
    while let Some(notification) = receiver.recv().await {
        let kind = notification.kind;
        match gateway.notify(notification).await {
            Ok(()) => tracing::debug!(?kind, "notification delivered"),
            Err(err) => tracing::error!(?kind, error = %err, "notification delivery failed"),
        }
    }
    tracing::info!("notification relay stopped");
}
