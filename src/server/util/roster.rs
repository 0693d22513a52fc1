//! Parser for the group labels the Java proxy publishes in its player sample.
//!
//! The proxy replaces the player sample with lines such as `§8[§b3§8]§7 are in §bLobby`.
//! Once formatting codes are stripped a label follows the grammar
//!
//! ```text
//! label := '[' count ']' ws "are in" ws group
//! ```
//!
//! Lines that do not match are ordinary player names and only contribute to `other`.

use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;

use crate::server::{model::server_status::PlayerSample, util::motd::strip_codes};

/// Bucket receiving every player not covered by a labelled group.
pub const OTHER_GROUP: &str = "other";

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*(\d+)\s*\]\s+are in\s+(.+?)\s*$").expect("roster label pattern is valid")
});

/// Parses a single roster line into `(group, count)`.
///
/// The group name is lower-cased with all whitespace removed.
///
/// # Returns
/// - `Some((group, count))` - The line is a group label
/// - `None` - The line is unmatched
pub fn parse_label(line: &str) -> Option<(String, i32)> {
    let clean = strip_codes(line);
    let captures = LABEL.captures(&clean)?;

    let count = captures[1].parse::<i32>().ok()?;
    let group: String = captures[2]
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    if group.is_empty() || group == OTHER_GROUP {
        return None;
    }

    Some((group, count))
}

/// Folds a player sample into per-group counts.
///
/// `other` is `online - sum(groups)`, clamped at zero, and is always present.
pub fn group_counts(sample: &[PlayerSample], online: i32) -> BTreeMap<String, i32> {
    let mut groups = BTreeMap::new();
    let mut counted: i64 = 0;

    for (group, count) in sample.iter().filter_map(|p| parse_label(&p.name)) {
        counted += i64::from(count);
        groups.insert(group, count);
    }

    let other = (i64::from(online) - counted).clamp(0, i64::from(i32::MAX)) as i32;
    groups.insert(OTHER_GROUP.to_string(), other);

    groups
}
