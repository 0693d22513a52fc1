//! Flap debouncing of probe outcomes.
//!
//! A server that was online is only declared offline after `threshold` consecutive failed
//! probes. Until then its failures are counted and the outcome is suppressed, which the
//! summary renders as flapping.

use std::collections::{HashMap, HashSet};

/// Debounced outcome of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    ConfirmedOnline,
    ConfirmedOffline,
    /// Failure counted but not yet confirmed; the stored record must not change.
    Suppressed { failures: u32 },
}

/// Consecutive failure counters for servers currently in a failure streak.
#[derive(Debug)]
pub struct FlapTracker {
    threshold: u32,
    failures: HashMap<String, u32>,
}

impl FlapTracker {
    /// Creates a tracker; a threshold below 1 is raised to 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            failures: HashMap::new(),
        }
    }

    /// Classifies a probe outcome for a server.
    ///
    /// # Arguments
    /// - `id` - Directory id of the probed server
    /// - `was_online` - Persisted reachability before this probe
    /// - `succeeded` - Whether the probe returned a status
    ///
    /// # Returns
    /// - `Classification` - Debounced outcome; counters are updated as a side effect
    pub fn classify(&mut self, id: &str, was_online: bool, succeeded: bool) -> Classification {
        if succeeded {
            self.failures.remove(id);
            return Classification::ConfirmedOnline;
        }

        if !was_online {
            self.failures.remove(id);
            return Classification::ConfirmedOffline;
        }

        let failures = self.failures.entry(id.to_string()).or_insert(0);
        *failures += 1;
        let failures = *failures;

        if failures >= self.threshold {
            self.failures.remove(id);
            Classification::ConfirmedOffline
        } else {
            Classification::Suppressed { failures }
        }
    }

    /// Whether the server is in an unconfirmed failure streak.
    pub fn is_flapping(&self, id: &str) -> bool {
        self.failures.contains_key(id)
    }

    /// Current streak length of a server, 0 outside a streak.
    pub fn failures(&self, id: &str) -> u32 {
        self.failures.get(id).copied().unwrap_or(0)
    }

    /// Puts a server back one failure short of the threshold.
    ///
    /// Used when a confirmed outage could not be persisted, so the next failed probe
    /// confirms it again instead of starting a new streak. With a threshold of 1 there is
    /// nothing to re-arm.
    pub fn rearm(&mut self, id: &str) {
        if self.threshold > 1 {
            self.failures.insert(id.to_string(), self.threshold - 1);
        }
    }

    /// Drops counters of servers no longer present in the directory.
    pub fn retain<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let known: HashSet<&str> = ids.into_iter().collect();
        self.failures.retain(|id, _| known.contains(id.as_str()));
    }

    /// Ids currently in a failure streak.
    pub fn flapping_ids(&self) -> HashSet<String> {
        self.failures.keys().cloned().collect()
    }
}
