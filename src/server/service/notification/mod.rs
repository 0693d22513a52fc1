//! Delivery of status summaries and transition alerts.
//!
//! Messages are rendered by `composer` and handed to a `NotificationSink`. The poller
//! never waits for delivery: `dispatch` spawns a task per message and logs failures.

pub mod composer;
pub mod webhook;

use serenity::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::server::{
    error::notify::NotifyError,
    model::notification::{WebhookChannel, WebhookMessage},
};

/// Destination for rendered webhook messages.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, channel: WebhookChannel, message: WebhookMessage)
        -> Result<(), NotifyError>;
}

/// Sends a message in a detached task.
///
/// Delivery errors are logged and discarded. The returned handle may be dropped, which
/// leaves the task running.
///
/// # Arguments
/// - `sink` - Sink delivering the message
/// - `channel` - Target channel
/// - `message` - Rendered message
///
/// # Returns
/// - `JoinHandle<()>` - Handle of the spawned delivery task
pub fn dispatch(
    sink: Arc<dyn NotificationSink>,
    channel: WebhookChannel,
    message: WebhookMessage,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match sink.send(channel, message).await {
            Ok(()) => {}
            Err(NotifyError::ChannelNotConfigured(channel)) => {
                tracing::warn!("No webhook configured for {:?}, message dropped", channel);
            }
            Err(e) => {
                tracing::error!("Failed to deliver {:?} notification: {}", channel, e);
            }
        }
    })
}
