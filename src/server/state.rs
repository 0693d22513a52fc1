//! Application state shared by the scheduled jobs.
//!
//! `AppState` holds the database connections, the probe and notification seams, and the
//! in-memory `MonitorState`. It is built once at startup and cloned into every job.

use sea_orm::DatabaseConnection;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::{Mutex, RwLock};

use crate::server::{
    config::MonitorSettings,
    model::proxy::ProxyStatus,
    service::{debounce::FlapTracker, notification::NotificationSink, probe::StatusProbe},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - the remaining fields are reference-counted
#[derive(Clone)]
pub struct AppState {
    /// Connection to the monitor's own database holding `server_status` and
    /// `admin_setting`.
    pub db: DatabaseConnection,

    /// Read-only connection to the database listing the network's server instances.
    pub directory_db: DatabaseConnection,

    /// Status probe used for fleet servers and proxies.
    pub probe: Arc<dyn StatusProbe>,

    /// Sink receiving summaries and alerts.
    pub sink: Arc<dyn NotificationSink>,

    /// In-memory monitor state surviving between cycles.
    pub monitor: Arc<MonitorState>,

    pub settings: Arc<MonitorSettings>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Monitor database connection
    /// - `directory_db` - Directory database connection
    /// - `probe` - Status probe implementation
    /// - `sink` - Notification sink implementation
    /// - `settings` - Monitor settings
    ///
    /// # Returns
    /// - `AppState` - Initialized state with empty monitor state
    pub fn new(
        db: DatabaseConnection,
        directory_db: DatabaseConnection,
        probe: Arc<dyn StatusProbe>,
        sink: Arc<dyn NotificationSink>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            db,
            directory_db,
            probe,
            sink,
            monitor: Arc::new(MonitorState::new(settings.flap_threshold)),
            settings: Arc::new(settings),
        }
    }
}

/// Monitor state kept in memory between cycles.
///
/// Flap counters are only locked by the fleet cycle. The proxy status has a single
/// writer, the proxy job, and is read by the summary renderer.
pub struct MonitorState {
    pub flaps: Mutex<FlapTracker>,
    pub proxies: RwLock<ProxyStatus>,
    summary_dirty: AtomicBool,
    cycle_running: AtomicBool,
}

impl MonitorState {
    pub fn new(flap_threshold: u32) -> Self {
        Self {
            flaps: Mutex::new(FlapTracker::new(flap_threshold)),
            proxies: RwLock::new(ProxyStatus::default()),
            summary_dirty: AtomicBool::new(false),
            cycle_running: AtomicBool::new(false),
        }
    }

    /// Acquires the single-flight cycle guard.
    ///
    /// # Returns
    /// - `Some(CycleGuard)` - No cycle was running; the guard releases on drop
    /// - `None` - Another cycle is in progress
    pub fn try_begin_cycle(&self) -> Option<CycleGuard<'_>> {
        self.cycle_running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CycleGuard {
                running: &self.cycle_running,
            })
    }

    /// Requests a summary refresh on the next fleet cycle.
    pub fn mark_summary_dirty(&self) {
        self.summary_dirty.store(true, Ordering::Release);
    }

    /// Returns and clears the summary refresh request.
    pub fn take_summary_dirty(&self) -> bool {
        self.summary_dirty.swap(false, Ordering::AcqRel)
    }
}

/// Releases the cycle flag when dropped.
pub struct CycleGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_cycle_is_rejected_while_guard_is_held() {
        let state = MonitorState::new(2);

        let guard = state.try_begin_cycle();
        assert!(guard.is_some());
        assert!(state.try_begin_cycle().is_none());

        drop(guard);
        assert!(state.try_begin_cycle().is_some());
    }

    #[test]
    fn summary_dirty_flag_is_consumed() {
        let state = MonitorState::new(2);

        assert!(!state.take_summary_dirty());
        state.mark_summary_dirty();
        assert!(state.take_summary_dirty());
        assert!(!state.take_summary_dirty());
    }
}
