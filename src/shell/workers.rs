// Background tasks owned by the composition root.
//
// The engine itself is request-scoped. The only long-running task is the notification relay,
// which drains the dispatcher channel into the configured gateway until every sender is dropped.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::shared::infrastructure::notification_outbox::NotificationGateway;
use crate::shared::infrastructure::notification_outbox::dispatcher::NotificationDispatcher;
use crate::shell::config::Config;

pub fn spawn_notification_relay(
    config: &Config,
    gateway: Arc<dyn NotificationGateway>,
) -> (NotificationDispatcher, JoinHandle<()>) {
    tracing::info!(buffer = config.notification_buffer, "starting notification relay");
    NotificationDispatcher::spawn(gateway, config.notification_buffer)
}
