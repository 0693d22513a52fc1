//! Fakes for the probe and notification seams used by service tests.

use serenity::async_trait;
use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::{Arc, Mutex},
};
use tokio::sync::Notify;

use crate::server::{
    config::MonitorSettings,
    error::{notify::NotifyError, probe::ProbeError},
    model::{
        notification::{WebhookChannel, WebhookMessage},
        probe::{Edition, Motd, ProbeResult, StatusPayload},
        server_status::{PlayerSample, Players, Version},
    },
    service::{notification::NotificationSink, probe::StatusProbe},
    state::AppState,
};

/// Builds a reachable status with the given version and player counts.
pub fn payload(version: &str, protocol: i32, online: i32, max: i32) -> StatusPayload {
    StatusPayload {
        version: Version {
            name: version.to_string(),
            protocol,
        },
        players: Players {
            online,
            max,
            sample: Vec::new(),
        },
        motd: Motd::default(),
        favicon: None,
        latency_ms: Some(5),
        edition: None,
    }
}

/// Builds a status whose player sample holds the given names.
pub fn payload_with_sample(online: i32, names: &[&str]) -> StatusPayload {
    let mut status = payload("BungeeCord 1.8.x-1.20.x", 47, online, 1000);
    status.players.sample = names
        .iter()
        .map(|name| PlayerSample {
            name: name.to_string(),
            id: String::new(),
        })
        .collect();
    status
}

pub fn refused() -> ProbeResult {
    Err(ProbeError::Connection(io::Error::from(
        io::ErrorKind::ConnectionRefused,
    )))
}

/// Probe answering from per-address queues.
///
/// An address with an empty queue refuses the connection.
#[derive(Default)]
pub struct ScriptedProbe {
    scripts: Mutex<HashMap<String, VecDeque<ProbeResult>>>,
    calls: Mutex<Vec<(String, Edition)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedProbe {
    /// Creates a probe that waits for `gate` to be notified before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    /// Queues the next answer for `address`.
    pub fn push(&self, address: &str, result: ProbeResult) -> &Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(address.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<(String, Edition)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusProbe for ScriptedProbe {
    async fn status(&self, address: &str, edition: Edition) -> ProbeResult {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), edition));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let next = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(address)
            .and_then(VecDeque::pop_front);
        next.unwrap_or_else(refused)
    }
}

/// Sink recording every message it receives.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(WebhookChannel, WebhookMessage)>>,
    fail: bool,
}

impl RecordingSink {
    /// Creates a sink that records and then rejects every message.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self, channel: WebhookChannel) -> Vec<WebhookMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(
        &self,
        channel: WebhookChannel,
        message: WebhookMessage,
    ) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push((channel, message));

        if self.fail {
            Err(NotifyError::ChannelNotConfigured(channel))
        } else {
            Ok(())
        }
    }
}

/// Builds an application state around the fakes with default settings.
pub fn app_state(
    db: &sea_orm::DatabaseConnection,
    directory_db: &sea_orm::DatabaseConnection,
    probe: Arc<ScriptedProbe>,
    sink: Arc<RecordingSink>,
) -> AppState {
    AppState::new(
        db.clone(),
        directory_db.clone(),
        probe,
        sink,
        MonitorSettings::default(),
    )
}
