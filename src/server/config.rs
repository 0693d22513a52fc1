use std::{str::FromStr, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_JAVA_PROXY: &str = "buildtheearth.net:25565";
const DEFAULT_JAVA_PROXY_FALLBACK: &str = "network.buildtheearth.net:25565";
const DEFAULT_BEDROCK_PROXY: &str = "bedrock.buildtheearth.net:19132";

/// Servers rendered in the status embed, in display order, with their display names.
const TRACKED_SERVERS: [(&str, &str); 12] = [
    ("NYC-1", "NewYorkCity"),
    ("Building1NYC", "BuildingServer1"),
    ("Building2NYC", "BuildingServer2"),
    ("Building3NYC", "BuildingServer3"),
    ("Building4NYC", "BuildingServer4"),
    ("Building5NYC", "BuildingServer5"),
    ("Building6NYC", "BuildingServer6"),
    ("Building7NYC", "BuildingServer7"),
    ("Building8NYC", "BuildingServer8"),
    ("MapNYC", "MapNYC"),
    ("LobbyNYC", "LobbyNYC"),
    ("Hub1", "Hub1"),
];

/// Servers whose outage alert mentions the alert role.
const PING_ROLE_SERVERS: [&str; 2] = ["NYC-1", "Building1NYC"];

pub struct Config {
    pub database_url: String,
    pub directory_database_url: String,

    pub status_webhook_url: Option<String>,
    pub log_webhook_url: Option<String>,

    pub monitor: MonitorSettings,
}

/// Tunable parameters of the network status monitor.
///
/// The debounce threshold, poll interval and probe timeout interact: with the defaults a
/// real outage is confirmed after two failed cycles. All three are plain parameters.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub poll_interval: Duration,
    pub proxy_interval: Duration,
    pub probe_timeout: Duration,
    /// Consecutive failed probes before an online server is declared offline.
    pub flap_threshold: u32,

    pub java_proxy: String,
    pub java_proxy_fallback: String,
    pub bedrock_proxy: String,

    /// `(server id, display name)` pairs in summary order.
    pub tracked_servers: Vec<(String, String)>,
    pub ping_role_servers: Vec<String>,
    pub alert_role_id: Option<String>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            proxy_interval: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(20),
            flap_threshold: 2,
            java_proxy: DEFAULT_JAVA_PROXY.to_string(),
            java_proxy_fallback: DEFAULT_JAVA_PROXY_FALLBACK.to_string(),
            bedrock_proxy: DEFAULT_BEDROCK_PROXY.to_string(),
            tracked_servers: TRACKED_SERVERS
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
            ping_role_servers: PING_ROLE_SERVERS.iter().map(|id| id.to_string()).collect(),
            alert_role_id: None,
        }
    }
}

impl MonitorSettings {
    /// Returns the display name of a server, falling back to its id.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.tracked_servers
            .iter()
            .find(|(server_id, _)| server_id == id)
            .map(|(_, name)| name.as_str())
            .unwrap_or(id)
    }

    /// Position of a server in the summary, `None` if it is not rendered at all.
    pub fn priority(&self, id: &str) -> Option<usize> {
        self.tracked_servers
            .iter()
            .position(|(server_id, _)| server_id == id)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = MonitorSettings::default();

        let monitor = MonitorSettings {
            poll_interval: Duration::from_secs(parse_env_or(
                "NETWORK_POLL_INTERVAL_SECS",
                defaults.poll_interval.as_secs(),
            )?
            .max(1)),
            proxy_interval: Duration::from_secs(parse_env_or(
                "NETWORK_PROXY_INTERVAL_SECS",
                defaults.proxy_interval.as_secs(),
            )?
            .max(1)),
            probe_timeout: Duration::from_secs(parse_env_or(
                "NETWORK_PROBE_TIMEOUT_SECS",
                defaults.probe_timeout.as_secs(),
            )?
            .max(1)),
            flap_threshold: parse_env_or("NETWORK_FLAP_THRESHOLD", defaults.flap_threshold)?
                .max(1),
            java_proxy: optional_env("NETWORK_JAVA_PROXY").unwrap_or(defaults.java_proxy),
            bedrock_proxy: optional_env("NETWORK_BEDROCK_PROXY").unwrap_or(defaults.bedrock_proxy),
            alert_role_id: optional_env("NETWORK_ALERT_ROLE_ID"),
            ..defaults
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            directory_database_url: std::env::var("DIRECTORY_DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DIRECTORY_DATABASE_URL".to_string()))?,
            status_webhook_url: optional_env("NETWORK_STATUS_WEBHOOK_URL"),
            log_webhook_url: optional_env("NETWORK_LOG_WEBHOOK_URL"),
            monitor,
        })
    }
}

/// Reads an optional environment variable, treating an empty value as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Reads an optional numeric environment variable, using `default` when unset.
fn parse_env_or<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(name) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}
