//! Fleet status polling.
//!
//! One cycle reads the stored records and the directory, probes every listed server,
//! debounces failures, writes changed records, and dispatches the summary and
//! transition alerts. Cycles are single-flight: a tick arriving while a cycle runs is
//! dropped.

use futures_util::future::join_all;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::task::JoinHandle;

use crate::server::{
    data::{
        admin_setting::{AdminSettingRepository, STATUS_EMBED_SERVERS},
        directory::DirectoryRepository,
        server_status::ServerStatusRepository,
    },
    error::AppError,
    model::{
        directory::DirectoryEntry,
        notification::WebhookChannel,
        probe::{Edition, StatusPayload},
        server_status::{Players, ServerStatus},
    },
    service::{
        debounce::Classification,
        diff::{diff, StatusField},
        notification::{
            composer::{compose_summary, compose_transition, display_ids_from_setting},
            dispatch,
        },
        probe::probe_with_timeout,
    },
    state::AppState,
    util::version::normalize_version,
};

/// A persisted change of a server's reachability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub id: String,
    pub online: bool,
}

/// Outcome of one fleet cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Servers listed by the directory.
    pub total: usize,
    pub online: usize,
    pub offline: usize,
    /// Ids seen for the first time this cycle.
    pub created: Vec<String>,
    /// Persisted reachability flips, in directory order.
    pub transitions: Vec<Transition>,
    /// Ids whose record could not be written; retried next cycle.
    pub write_failures: Vec<String>,
    pub summary_refreshed: bool,
    /// Handles of the spawned notification tasks. Dropping them detaches the tasks.
    pub notifications: Vec<JoinHandle<()>>,
    pub elapsed: Duration,
}

/// Service running fleet status cycles.
pub struct NetworkStatusService<'a> {
    state: &'a AppState,
}

impl<'a> NetworkStatusService<'a> {
    /// Creates a new NetworkStatusService instance.
    ///
    /// # Arguments
    /// - `state` - Application state with connections, probe, sink and monitor state
    ///
    /// # Returns
    /// - `NetworkStatusService` - New service instance
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Runs one fleet cycle.
    ///
    /// Probe failures are debounced and never returned as errors. A failed record write
    /// is logged and suppresses that server's alert. The stored record stays stale, and a
    /// confirmed outage is re-armed so the next failed probe writes it again. Notification
    /// delivery happens in detached tasks.
    ///
    /// # Returns
    /// - `Ok(Some(CycleReport))` - Cycle completed
    /// - `Ok(None)` - Another cycle is in progress, nothing was done
    /// - `Err(AppError::DirectoryUnavailable)` - Directory could not be read; no record
    ///   was written and no notification sent
    /// - `Err(AppError::DbErr)` - Stored records could not be read
    pub async fn run_cycle(&self) -> Result<Option<CycleReport>, AppError> {
        let Some(_guard) = self.state.monitor.try_begin_cycle() else {
            tracing::debug!("Fleet status cycle already running, skipping tick");
            return Ok(None);
        };

        let started = Instant::now();
        let settings = self.state.settings.as_ref();
        let repo = ServerStatusRepository::new(&self.state.db);
        let mut report = CycleReport::default();

        let mut records: HashMap<String, ServerStatus> = repo
            .get_all()
            .await?
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        let directory = DirectoryRepository::new(&self.state.directory_db)
            .get_all()
            .await
            .map_err(|e| {
                tracing::error!("Failed to read node directory: {}", e);
                AppError::DirectoryUnavailable(e)
            })?;
        report.total = directory.len();

        for entry in &directory {
            if records.contains_key(&entry.id) {
                continue;
            }

            match repo
                .create(&ServerStatus::first_sighting(&entry.id, &entry.address))
                .await
            {
                Ok(record) => {
                    tracing::debug!("New server {} at {}", entry.id, entry.address);
                    report.created.push(entry.id.clone());
                    records.insert(entry.id.clone(), record);
                }
                Err(e) => {
                    tracing::error!("Failed to create status record for {}: {}", entry.id, e);
                    report.write_failures.push(entry.id.clone());
                }
            }
        }

        let targets: Vec<&DirectoryEntry> = directory
            .iter()
            .filter(|entry| records.contains_key(&entry.id))
            .collect();
        let probe = self.state.probe.as_ref();
        let results = join_all(targets.iter().map(|entry| {
            probe_with_timeout(probe, &entry.address, Edition::Java, settings.probe_timeout)
        }))
        .await;

        let mut summary_dirty = self.state.monitor.take_summary_dirty();
        let mut flaps = self.state.monitor.flaps.lock().await;
        flaps.retain(directory.iter().map(|entry| entry.id.as_str()));

        for (entry, result) in targets.into_iter().zip(results) {
            let Some(stored) = records.get(&entry.id) else {
                continue;
            };

            let payload = match result {
                Ok(status) => Some(status),
                Err(e) => {
                    tracing::debug!("Server {} ({}) did not answer: {}", entry.id, entry.address, e);
                    None
                }
            };

            let was_flapping = flaps.is_flapping(&entry.id);
            let classification = flaps.classify(&entry.id, stored.online, payload.is_some());
            if flaps.is_flapping(&entry.id) != was_flapping {
                summary_dirty = true;
            }

            let candidate = match (classification, payload) {
                (Classification::ConfirmedOnline, Some(status)) => {
                    online_candidate(stored, entry, status)
                }
                (Classification::Suppressed { failures }, _) => {
                    tracing::debug!(
                        "Server {} failed {} consecutive probes, not yet offline",
                        entry.id,
                        failures
                    );
                    if stored.address == entry.address {
                        continue;
                    }
                    ServerStatus {
                        address: entry.address.clone(),
                        ..stored.clone()
                    }
                }
                _ => offline_candidate(stored, entry),
            };

            let changes = diff(stored, &candidate);
            if changes.is_empty() {
                continue;
            }

            tracing::debug!(
                "Server {} changed: {:?}",
                entry.id,
                changes.fields().collect::<Vec<_>>()
            );

            let confirms_outage = stored.online && !candidate.online;

            match repo.update(&candidate).await {
                Ok(record) => {
                    summary_dirty |= changes.affects_summary();

                    let is_new = report.created.contains(&record.id);
                    if changes.contains(StatusField::Online) && !(is_new && record.online) {
                        tracing::info!(
                            "Server {} is now {}",
                            record.id,
                            if record.online { "online" } else { "offline" }
                        );
                        report.transitions.push(Transition {
                            id: record.id.clone(),
                            online: record.online,
                        });
                    }

                    records.insert(record.id.clone(), record);
                }
                Err(source) => {
                    // Keep the outage pending so the next failure writes it again
                    if confirms_outage {
                        flaps.rearm(&entry.id);
                    }

                    let e = AppError::PersistenceWriteFailed {
                        id: entry.id.clone(),
                        source,
                    };
                    tracing::error!("{}", e);
                    report.write_failures.push(entry.id.clone());
                }
            }
        }

        let flapping = flaps.flapping_ids();
        drop(flaps);

        for entry in &directory {
            match records.get(&entry.id) {
                Some(record) if record.online => report.online += 1,
                _ => report.offline += 1,
            }
        }

        if summary_dirty {
            let mut snapshot: Vec<ServerStatus> = records.into_values().collect();
            snapshot.sort_by(|a, b| a.id.cmp(&b.id));

            let display_ids = match AdminSettingRepository::new(&self.state.db)
                .find_by_key(STATUS_EMBED_SERVERS)
                .await
            {
                Ok(value) => display_ids_from_setting(value.as_deref()),
                Err(e) => {
                    tracing::warn!("Failed to read {} setting: {}", STATUS_EMBED_SERVERS, e);
                    None
                }
            };
            let proxies = self.state.monitor.proxies.read().await.clone();

            tracing::info!("Updating server status embed");
            let summary = compose_summary(
                &snapshot,
                &proxies,
                &flapping,
                display_ids.as_deref(),
                settings,
            );
            report.notifications.push(dispatch(
                self.state.sink.clone(),
                WebhookChannel::NetworkStatus,
                summary,
            ));
            report.summary_refreshed = true;
        }

        for transition in &report.transitions {
            if let Some(alert) =
                compose_transition(&transition.id, !transition.online, transition.online, settings)
            {
                report.notifications.push(dispatch(
                    self.state.sink.clone(),
                    WebhookChannel::NetworkLog,
                    alert,
                ));
            }
        }

        report.elapsed = started.elapsed();
        tracing::info!(
            "Updated the server status of {} servers ({} Online | {} Offline) | {} ms",
            report.total,
            report.online,
            report.offline,
            report.elapsed.as_millis()
        );

        Ok(Some(report))
    }
}

/// Record values for a server that answered its probe.
fn online_candidate(
    stored: &ServerStatus,
    entry: &DirectoryEntry,
    status: StatusPayload,
) -> ServerStatus {
    ServerStatus {
        id: stored.id.clone(),
        address: entry.address.clone(),
        online: true,
        version: Some(normalize_version(status.version)),
        players: status.players,
        updated_at: stored.updated_at,
    }
}

/// Record values for a server confirmed offline; version and capacity are kept.
fn offline_candidate(stored: &ServerStatus, entry: &DirectoryEntry) -> ServerStatus {
    ServerStatus {
        id: stored.id.clone(),
        address: entry.address.clone(),
        online: false,
        version: stored.version.clone(),
        players: Players {
            online: 0,
            max: stored.players.max,
            sample: Vec::new(),
        },
        updated_at: stored.updated_at,
    }
}
