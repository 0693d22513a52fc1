//! Domain models for persisted server status records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version reported by a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Full version string, e.g. `"Paper 1.20.4"`.
    pub name: String,
    /// Protocol number, `-1` when the version string was not recognised.
    pub protocol: i32,
}

/// One entry of a server's player sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSample {
    pub name: String,
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    pub online: i32,
    pub max: i32,
    #[serde(default)]
    pub sample: Vec<PlayerSample>,
}

/// Last known status of one network server.
///
/// Exactly one record exists per directory id ever seen. Records are created on first
/// sighting and afterwards only written when the diff engine reports a change.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStatus {
    /// Directory id of the server.
    pub id: String,
    /// `host:port` address as last reported by the directory.
    pub address: String,
    /// Last persisted reachability.
    pub online: bool,
    /// `None` until the server has been probed successfully once.
    pub version: Option<Version>,
    pub players: Players,
    pub updated_at: DateTime<Utc>,
}

impl ServerStatus {
    /// Converts an entity model to a server status domain model at the repository boundary.
    ///
    /// A player sample that fails to deserialize is treated as empty.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `ServerStatus` - The converted domain model
    pub fn from_entity(entity: entity::server_status::Model) -> Self {
        let version = match (entity.version_name, entity.version_protocol) {
            (Some(name), Some(protocol)) => Some(Version { name, protocol }),
            _ => None,
        };
        let sample = serde_json::from_value(entity.players_sample).unwrap_or_default();

        Self {
            id: entity.id,
            address: entity.address,
            online: entity.online,
            version,
            players: Players {
                online: entity.players_online,
                max: entity.players_max,
                sample,
            },
            updated_at: entity.updated_at,
        }
    }

    /// Creates the record for a server seen in the directory for the first time.
    ///
    /// New servers start offline with no version until their first successful probe.
    pub fn first_sighting(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            online: false,
            version: None,
            players: Players::default(),
            updated_at: Utc::now(),
        }
    }
}
