//! Rendering of the fleet summary and transition alerts.

use std::collections::HashSet;

use chrono::Utc;

use crate::server::{
    config::MonitorSettings,
    model::{
        notification::{Embed, EmbedFooter, WebhookMessage},
        proxy::ProxyStatus,
        server_status::ServerStatus,
    },
    util::version::short_version,
};

pub const SUMMARY_TITLE: &str = "NYC Server Status";
const SUMMARY_FOOTER: &str = "BTE NewYorkCity";
const SUMMARY_FOOTER_ICON: &str =
    "https://cdn.discordapp.com/attachments/519576567718871053/1035577973467779223/BTE_NYC_Logo.png";

const SUMMARY_COLOR: u32 = 0x1ABC9C;
const ONLINE_COLOR: u32 = 0x57F287;
const OFFLINE_COLOR: u32 = 0xED4245;

const GREEN: &str = ":green_circle:";
const YELLOW: &str = ":yellow_circle:";
const RED: &str = ":red_circle:";

/// Reads the list of server ids surfaced in the summary from its admin setting value.
///
/// # Returns
/// - `Some(ids)` - The setting holds a JSON array of strings
/// - `None` - The setting is missing or malformed; a warning is logged
pub fn display_ids_from_setting(value: Option<&str>) -> Option<Vec<String>> {
    let Some(value) = value else {
        tracing::warn!("Status embed server list is not configured, showing all servers");
        return None;
    };

    match serde_json::from_str::<Vec<String>>(value) {
        Ok(ids) => Some(ids),
        Err(e) => {
            tracing::warn!(
                "Status embed server list is not a JSON string array ({}), showing all servers",
                e
            );
            None
        }
    }
}

/// Renders the fleet summary embed.
///
/// Proxy lines come first, then one line per server in priority order. Servers outside
/// the priority list are never shown; `display_ids` only narrows the list further.
///
/// # Arguments
/// - `records` - Current server status records
/// - `proxies` - Latest proxy status
/// - `flapping` - Ids of servers in an unconfirmed failure streak
/// - `display_ids` - Ids to show, or `None` to show the whole priority list
/// - `settings` - Monitor settings holding the priority list
///
/// # Returns
/// - `WebhookMessage` - Message for the network status channel
pub fn compose_summary(
    records: &[ServerStatus],
    proxies: &ProxyStatus,
    flapping: &HashSet<String>,
    display_ids: Option<&[String]>,
    settings: &MonitorSettings,
) -> WebhookMessage {
    let mut description = String::new();

    if let Some(java) = &proxies.java {
        description.push_str(&format!("{} **Java Proxy**\n", slot_glyph(java.is_online())));
    }
    if let Some(bedrock) = &proxies.bedrock {
        let version = bedrock
            .online()
            .map(|status| format!(" [{}]", status.version.name))
            .unwrap_or_default();
        description.push_str(&format!(
            "{} **Bedrock Proxy**{}\n",
            slot_glyph(bedrock.is_online()),
            version
        ));
    }

    let mut shown: Vec<(usize, &ServerStatus)> = records
        .iter()
        .filter(|record| display_ids.is_none_or(|ids| ids.iter().any(|id| *id == record.id)))
        .filter_map(|record| settings.priority(&record.id).map(|rank| (rank, record)))
        .collect();
    shown.sort_by_key(|(rank, _)| *rank);

    for (_, record) in shown {
        // A flapping server is still persisted as online
        let glyph = if flapping.contains(&record.id) {
            YELLOW
        } else if record.online {
            GREEN
        } else {
            RED
        };
        let version = record
            .version
            .as_ref()
            .filter(|version| version.protocol > -1)
            .map(|version| format!(" [{}]", short_version(&version.name)))
            .unwrap_or_default();

        description.push_str(&format!(
            "{} **{}**{}\n",
            glyph,
            settings.display_name(&record.id),
            version
        ));
    }

    WebhookMessage {
        content: String::new(),
        embeds: vec![Embed {
            title: SUMMARY_TITLE.to_string(),
            description,
            color: SUMMARY_COLOR,
            footer: Some(EmbedFooter {
                text: SUMMARY_FOOTER.to_string(),
                icon_url: Some(SUMMARY_FOOTER_ICON.to_string()),
            }),
            timestamp: None,
        }],
    }
}

/// Renders the alert for a server whose persisted reachability flipped.
///
/// Outages of servers in the ping-role list mention the alert role, when one is
/// configured.
///
/// # Returns
/// - `Some(WebhookMessage)` - Message for the network log channel
/// - `None` - `was_online` equals `is_online`, nothing to report
pub fn compose_transition(
    id: &str,
    was_online: bool,
    is_online: bool,
    settings: &MonitorSettings,
) -> Option<WebhookMessage> {
    if was_online == is_online {
        return None;
    }

    let name = settings.display_name(id);
    let content = match &settings.alert_role_id {
        Some(role_id) if !is_online && settings.ping_role_servers.iter().any(|s| s == id) => {
            format!("<@&{}>", role_id)
        }
        _ => String::new(),
    };

    let (title, description, color) = if is_online {
        (
            ":recycle: Server Online".to_string(),
            format!("The server **{}** is online again", name),
            ONLINE_COLOR,
        )
    } else {
        (
            ":warning: Server Offline".to_string(),
            format!("The server **{}** is offline", name),
            OFFLINE_COLOR,
        )
    };

    Some(WebhookMessage {
        content,
        embeds: vec![Embed {
            title,
            description,
            color,
            footer: None,
            timestamp: Some(Utc::now()),
        }],
    })
}

fn slot_glyph(online: bool) -> &'static str {
    if online {
        GREEN
    } else {
        RED
    }
}
