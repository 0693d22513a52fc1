use thiserror::Error;

use crate::server::model::notification::WebhookChannel;

/// Failure to deliver a message to the notification sink.
///
/// Delivery failures are logged by the dispatcher and otherwise discarded.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// No webhook URL is configured for the target channel.
    #[error("No webhook configured for channel {0:?}")]
    ChannelNotConfigured(WebhookChannel),

    /// Discord rejected or failed the webhook execution.
    ///
    /// Boxed due to the size of `serenity::Error`.
    #[error(transparent)]
    Discord(#[from] Box<serenity::Error>),
}

impl From<serenity::Error> for NotifyError {
    fn from(err: serenity::Error) -> Self {
        NotifyError::Discord(Box::new(err))
    }
}
