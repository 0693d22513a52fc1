//! Live status of the two network entry points.
//!
//! Rebuilt by every proxy refresh and never persisted. Readers must handle unset slots,
//! which is the state before the first probe completes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::model::{probe::Motd, server_status::Version};

/// One proxy slot after at least one probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProxySlot<T> {
    Offline { last_updated: DateTime<Utc> },
    Online(T),
}

impl<T> ProxySlot<T> {
    pub fn is_online(&self) -> bool {
        matches!(self, ProxySlot::Online(_))
    }

    pub fn online(&self) -> Option<&T> {
        match self {
            ProxySlot::Online(status) => Some(status),
            ProxySlot::Offline { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProxyStatus {
    pub java: Option<ProxySlot<JavaProxy>>,
    pub bedrock: Option<ProxySlot<BedrockProxy>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaProxy {
    pub address: String,
    pub fallback_address: String,
    pub version: JavaProxyVersion,
    pub players: ProxyPlayers,
    pub motd: JavaProxyMotd,
    pub favicon: Option<String>,
    pub latency_ms: Option<u64>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaProxyVersion {
    /// Version string as reported, e.g. `"BungeeCord 1.8.x-1.20.x"`.
    pub full_name: String,
    /// Second word of the full name, or the full name when it has a single word.
    pub name: String,
    pub protocol: i32,
    /// Supported version range advertised in the first MOTD row.
    pub support: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyPlayers {
    pub total: i32,
    pub max: i32,
    /// Player count per roster group, always including `other`.
    pub groups: BTreeMap<String, i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JavaProxyMotd {
    pub raw: String,
    pub clean: String,
    pub html: String,
    /// News line carried in the second MOTD row.
    pub server_news: Option<String>,
    pub rows: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BedrockProxy {
    pub address: String,
    pub edition: Option<String>,
    pub version: Version,
    pub players_online: i32,
    pub players_max: i32,
    pub motd: Motd,
    pub last_updated: DateTime<Utc>,
}
