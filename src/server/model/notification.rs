//! Sink-ready webhook messages.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Discord channel a message is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WebhookChannel {
    /// Channel carrying the fleet summary embed.
    NetworkStatus,
    /// Channel carrying per-server outage and recovery alerts.
    NetworkLog,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub footer: Option<EmbedFooter>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Message body accepted by the notification sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    /// Plain message content, used for role mentions.
    pub content: String,
    pub embeds: Vec<Embed>,
}
