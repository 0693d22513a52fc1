//! Discord webhook sink.

use serenity::{
    all::{CreateEmbed, CreateEmbedFooter, ExecuteWebhook, Timestamp, Webhook},
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::notify::NotifyError,
    model::notification::{Embed, WebhookChannel, WebhookMessage},
    service::notification::NotificationSink,
};

/// Posts messages to the Discord webhooks of the two status channels.
pub struct WebhookSink {
    http: Arc<Http>,
    status_url: Option<String>,
    log_url: Option<String>,
}

impl WebhookSink {
    /// Creates a sink for the given webhook URLs.
    ///
    /// Webhook execution is authenticated by the URL token, so the HTTP client carries no
    /// bot token.
    ///
    /// # Arguments
    /// - `status_url` - Webhook of the network status channel, if configured
    /// - `log_url` - Webhook of the network log channel, if configured
    ///
    /// # Returns
    /// - `WebhookSink` - Sink ready for dispatch
    pub fn new(status_url: Option<String>, log_url: Option<String>) -> Self {
        Self {
            http: Arc::new(Http::new("")),
            status_url,
            log_url,
        }
    }

    fn url(&self, channel: WebhookChannel) -> Option<&str> {
        match channel {
            WebhookChannel::NetworkStatus => self.status_url.as_deref(),
            WebhookChannel::NetworkLog => self.log_url.as_deref(),
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn send(
        &self,
        channel: WebhookChannel,
        message: WebhookMessage,
    ) -> Result<(), NotifyError> {
        let url = self
            .url(channel)
            .ok_or(NotifyError::ChannelNotConfigured(channel))?;

        let webhook = Webhook::from_url(&*self.http, url).await?;

        let mut builder =
            ExecuteWebhook::new().embeds(message.embeds.iter().map(build_embed).collect());
        if !message.content.is_empty() {
            builder = builder.content(message.content);
        }

        webhook.execute(&*self.http, false, builder).await?;

        Ok(())
    }
}

/// Converts a rendered embed into a serenity embed builder.
fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(&embed.title)
        .description(&embed.description)
        .color(embed.color);

    if let Some(footer) = &embed.footer {
        let mut footer_builder = CreateEmbedFooter::new(&footer.text);
        if let Some(icon_url) = &footer.icon_url {
            footer_builder = footer_builder.icon_url(icon_url);
        }
        builder = builder.footer(footer_builder);
    }

    // Out-of-range timestamps are omitted
    if let Some(timestamp) = embed
        .timestamp
        .and_then(|ts| Timestamp::from_unix_timestamp(ts.timestamp()).ok())
    {
        builder = builder.timestamp(timestamp);
    }

    builder
}
