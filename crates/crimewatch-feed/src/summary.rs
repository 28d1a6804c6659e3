//! Incident counts by type and by hour of day, for the list header.
//!
//! Neither count reorders the records themselves.

use crate::record::{Incident, OccurredAt};
use chrono::{Local, Timelike};
use std::collections::BTreeMap;

/// Count per incident type, most frequent first. Ties keep the order in
/// which the types first appear. Blank types are counted under `""`.
pub fn counts_by_type(records: &[Incident]) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for incident in records {
        let kind = incident.incident_type.as_str();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Count per hour of day (0-23), ascending. Records whose time `hour_of`
/// cannot read are left out.
pub fn counts_by_hour(
    records: &[Incident],
    hour_of: impl Fn(&OccurredAt) -> Option<u32>,
) -> Vec<(u32, usize)> {
    let mut counts = BTreeMap::new();
    for hour in records.iter().filter_map(|r| hour_of(&r.occurred)) {
        *counts.entry(hour).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Hour of day in the local zone.
pub fn local_hour(occurred: &OccurredAt) -> Option<u32> {
    occurred.resolve(&Local).map(|t| t.hour())
}
