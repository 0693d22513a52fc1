//! Field-level comparison of server status records.

use std::collections::BTreeSet;

use crate::server::model::server_status::ServerStatus;

/// Persisted fields whose change triggers a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusField {
    Address,
    Online,
    VersionName,
    VersionProtocol,
    PlayersOnline,
    PlayersMax,
    PlayersSample,
}

/// Set of fields that differ between two records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(BTreeSet<StatusField>);

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: StatusField) -> bool {
        self.0.contains(&field)
    }

    /// Whether any field rendered in the status summary changed.
    pub fn affects_summary(&self) -> bool {
        self.contains(StatusField::Online)
            || self.contains(StatusField::VersionName)
            || self.contains(StatusField::VersionProtocol)
    }

    pub fn fields(&self) -> impl Iterator<Item = StatusField> + '_ {
        self.0.iter().copied()
    }
}

/// Compares two records field by field.
///
/// `updated_at` is bookkeeping and never compared.
pub fn diff(old: &ServerStatus, new: &ServerStatus) -> ChangeSet {
    let mut changed = BTreeSet::new();

    if old.address != new.address {
        changed.insert(StatusField::Address);
    }
    if old.online != new.online {
        changed.insert(StatusField::Online);
    }

    let old_version = old.version.as_ref();
    let new_version = new.version.as_ref();
    if old_version.map(|v| &v.name) != new_version.map(|v| &v.name) {
        changed.insert(StatusField::VersionName);
    }
    if old_version.map(|v| v.protocol) != new_version.map(|v| v.protocol) {
        changed.insert(StatusField::VersionProtocol);
    }

    if old.players.online != new.players.online {
        changed.insert(StatusField::PlayersOnline);
    }
    if old.players.max != new.players.max {
        changed.insert(StatusField::PlayersMax);
    }
    if old.players.sample != new.players.sample {
        changed.insert(StatusField::PlayersSample);
    }

    ChangeSet(changed)
}
