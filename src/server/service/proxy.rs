//! Proxy status refresh.
//!
//! Probes the Java and Bedrock entry points of the network and replaces the shared
//! `ProxyStatus`. Proxies are not debounced: a single failed probe marks the slot offline.

use chrono::{DateTime, Utc};

use crate::server::{
    config::MonitorSettings,
    model::{
        probe::{Edition, StatusPayload},
        proxy::{
            BedrockProxy, JavaProxy, JavaProxyMotd, JavaProxyVersion, ProxyPlayers, ProxySlot,
        },
    },
    service::probe::probe_with_timeout,
    state::AppState,
    util::{roster::group_counts, version::short_version},
};

/// Service refreshing the status of the two network proxies.
pub struct ProxyService<'a> {
    state: &'a AppState,
}

impl<'a> ProxyService<'a> {
    /// Creates a new ProxyService instance.
    ///
    /// # Arguments
    /// - `state` - Application state holding the probe and the shared proxy status
    ///
    /// # Returns
    /// - `ProxyService` - New service instance
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Probes both proxies concurrently and stores the results.
    ///
    /// A visible change (first result for a slot, online flag flip, or a new Bedrock
    /// version) marks the summary dirty so the next fleet cycle re-renders it.
    ///
    /// # Returns
    /// - `true` - The proxy status visibly changed
    /// - `false` - Nothing the summary renders changed
    pub async fn refresh(&self) -> bool {
        let settings = self.state.settings.as_ref();
        let probe = self.state.probe.as_ref();

        let (java, bedrock) = tokio::join!(
            probe_with_timeout(
                probe,
                &settings.java_proxy,
                Edition::Java,
                settings.probe_timeout
            ),
            probe_with_timeout(
                probe,
                &settings.bedrock_proxy,
                Edition::Bedrock,
                settings.probe_timeout
            ),
        );
        let now = Utc::now();

        let java = match java {
            Ok(status) => ProxySlot::Online(java_proxy(status, settings, now)),
            Err(e) => {
                tracing::debug!("Java proxy {} unreachable: {}", settings.java_proxy, e);
                ProxySlot::Offline { last_updated: now }
            }
        };
        let bedrock = match bedrock {
            Ok(status) => ProxySlot::Online(bedrock_proxy(status, settings, now)),
            Err(e) => {
                tracing::debug!("Bedrock proxy {} unreachable: {}", settings.bedrock_proxy, e);
                ProxySlot::Offline { last_updated: now }
            }
        };

        let mut proxies = self.state.monitor.proxies.write().await;

        let java_changed = proxies
            .java
            .as_ref()
            .is_none_or(|previous| previous.is_online() != java.is_online());
        let bedrock_changed = match (&proxies.bedrock, &bedrock) {
            (None, _) => true,
            (Some(ProxySlot::Online(previous)), ProxySlot::Online(current)) => {
                previous.version.name != current.version.name
            }
            (Some(previous), current) => previous.is_online() != current.is_online(),
        };

        proxies.java = Some(java);
        proxies.bedrock = Some(bedrock);
        drop(proxies);

        let changed = java_changed || bedrock_changed;
        if changed {
            tracing::info!("Proxy status changed, summary refresh requested");
            self.state.monitor.mark_summary_dirty();
        }

        changed
    }
}

/// Builds the Java proxy status from a probe result.
fn java_proxy(status: StatusPayload, settings: &MonitorSettings, now: DateTime<Utc>) -> JavaProxy {
    let rows: Vec<String> = status.motd.clean.lines().map(str::to_string).collect();

    // First row: "<name>  |  [1.8 - 1.20]"
    let support = rows
        .first()
        .and_then(|row| row.split_once("|  "))
        .map(|(_, range)| range.replace(['[', ']'], "").trim().to_string());
    // Second row: "|||  <news>  |||"
    let server_news = rows
        .get(1)
        .map(|row| row.replace("|||  ", "").replace("  |||", ""));

    JavaProxy {
        address: settings.java_proxy.clone(),
        fallback_address: settings.java_proxy_fallback.clone(),
        version: JavaProxyVersion {
            name: short_version(&status.version.name).to_string(),
            full_name: status.version.name,
            protocol: status.version.protocol,
            support,
        },
        players: ProxyPlayers {
            groups: group_counts(&status.players.sample, status.players.online),
            total: status.players.online,
            max: status.players.max,
        },
        motd: JavaProxyMotd {
            raw: status.motd.raw,
            clean: status.motd.clean,
            html: status.motd.html,
            server_news,
            rows,
        },
        favicon: status.favicon,
        latency_ms: status.latency_ms,
        last_updated: now,
    }
}

fn bedrock_proxy(
    status: StatusPayload,
    settings: &MonitorSettings,
    now: DateTime<Utc>,
) -> BedrockProxy {
    BedrockProxy {
        address: settings.bedrock_proxy.clone(),
        edition: status.edition,
        version: status.version,
        players_online: status.players.online,
        players_max: status.players.max,
        motd: status.motd,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        service::testing::{self, RecordingSink, ScriptedProbe},
        util::motd,
    };
    use std::sync::Arc;
    use test_utils::builder::TestBuilder;

    async fn state(probe: Arc<ScriptedProbe>) -> (test_utils::context::TestContext, AppState) {
        let test = TestBuilder::new().build().await.unwrap();
        let db = test.db.as_ref().unwrap().clone();
        let state = testing::app_state(&db, &db, probe, Arc::new(RecordingSink::default()));
        (test, state)
    }

    fn bedrock_payload(version: &str) -> StatusPayload {
        let mut status = testing::payload(version, 622, 4, 100);
        status.edition = Some("MCPE".to_string());
        status
    }

    #[tokio::test]
    async fn derives_roster_groups_from_java_sample() {
        let probe = Arc::new(ScriptedProbe::default());
        let (_test, state) = state(probe.clone()).await;
        probe.push(
            &state.settings.java_proxy,
            Ok(testing::payload_with_sample(
                10,
                &["[3] are in Lobby", "[5] are in Building"],
            )),
        );

        ProxyService::new(&state).refresh().await;

        let proxies = state.monitor.proxies.read().await;
        let java = proxies.java.as_ref().unwrap().online().unwrap();
        assert_eq!(java.players.groups.get("lobby"), Some(&3));
        assert_eq!(java.players.groups.get("building"), Some(&5));
        assert_eq!(java.players.groups.get("other"), Some(&2));
        assert_eq!(java.players.total, 10);
        assert_eq!(java.version.name, "1.8.x-1.20.x");
    }

    #[tokio::test]
    async fn parses_support_range_and_news_from_motd() {
        let probe = Arc::new(ScriptedProbe::default());
        let (_test, state) = state(probe.clone()).await;
        let mut status = testing::payload_with_sample(0, &[]);
        status.motd = motd::render("§aBuildTheEarth  |  §7[1.12 - 1.20]\n|||  §eNew York  |||");
        probe.push(&state.settings.java_proxy, Ok(status));

        ProxyService::new(&state).refresh().await;

        let proxies = state.monitor.proxies.read().await;
        let java = proxies.java.as_ref().unwrap().online().unwrap();
        assert_eq!(java.version.support.as_deref(), Some("1.12 - 1.20"));
        assert_eq!(java.motd.server_news.as_deref(), Some("New York"));
        assert_eq!(java.motd.rows.len(), 2);
    }

    #[tokio::test]
    async fn failed_probe_marks_slots_offline_without_groups() {
        let probe = Arc::new(ScriptedProbe::default());
        let (_test, state) = state(probe.clone()).await;
        probe.push(
            &state.settings.java_proxy,
            Ok(testing::payload_with_sample(10, &["[3] are in Lobby"])),
        );

        assert!(ProxyService::new(&state).refresh().await);
        assert!(state.monitor.take_summary_dirty());

        // Both queues are now empty, so the next probes are refused
        assert!(ProxyService::new(&state).refresh().await);

        let proxies = state.monitor.proxies.read().await;
        assert!(matches!(proxies.java, Some(ProxySlot::Offline { .. })));
        assert!(matches!(proxies.bedrock, Some(ProxySlot::Offline { .. })));
    }

    #[tokio::test]
    async fn unchanged_status_does_not_mark_summary_dirty() {
        let probe = Arc::new(ScriptedProbe::default());
        let (_test, state) = state(probe.clone()).await;

        assert!(ProxyService::new(&state).refresh().await);
        state.monitor.take_summary_dirty();

        assert!(!ProxyService::new(&state).refresh().await);
        assert!(!state.monitor.take_summary_dirty());
    }

    #[tokio::test]
    async fn bedrock_version_change_marks_summary_dirty() {
        let probe = Arc::new(ScriptedProbe::default());
        let (_test, state) = state(probe.clone()).await;
        let address = state.settings.bedrock_proxy.clone();
        probe.push(&address, Ok(bedrock_payload("1.20.40")));
        probe.push(&address, Ok(bedrock_payload("1.20.40")));
        probe.push(&address, Ok(bedrock_payload("1.20.50")));

        assert!(ProxyService::new(&state).refresh().await);
        assert!(!ProxyService::new(&state).refresh().await);
        state.monitor.take_summary_dirty();

        assert!(ProxyService::new(&state).refresh().await);
        assert!(state.monitor.take_summary_dirty());

        let proxies = state.monitor.proxies.read().await;
        let bedrock = proxies.bedrock.as_ref().unwrap().online().unwrap();
        assert_eq!(bedrock.version.name, "1.20.50");
        assert_eq!(bedrock.edition.as_deref(), Some("MCPE"));
    }
}
