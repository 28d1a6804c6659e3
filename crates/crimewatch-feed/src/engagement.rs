//! Vote and comment numbers shown on incident cards.
//!
//! There is no vote or comment store yet. [`PlaceholderEngagement`] derives
//! stable numbers from the incident id so cards look populated; swapping in
//! a real store means implementing [`EngagementSource`] and handing it to
//! the feed view, with no change to rendering.

use crate::record::Incident;

/// Counts rendered beside an incident's vote and comment controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngagementMetrics {
    pub upvotes: u64,
    pub comments: u64,
}

/// Supplies engagement counts for an incident.
pub trait EngagementSource: Send + Sync {
    fn metrics(&self, incident: &Incident) -> EngagementMetrics;
}

/// Id-derived numbers; see [`placeholder_metrics`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderEngagement;

impl EngagementSource for PlaceholderEngagement {
    fn metrics(&self, incident: &Incident) -> EngagementMetrics {
        placeholder_metrics(incident.id)
    }
}

/// `upvotes = id % 100`, `comments = id % 5 + 1`.
pub fn placeholder_metrics(id: u64) -> EngagementMetrics {
    EngagementMetrics {
        upvotes: id % 100,
        comments: id % 5 + 1,
    }
}
