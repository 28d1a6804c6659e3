//! Incident data for **crimewatch**: the record type served by
//! `GET /api/crimes`, the client that fetches it, and the controller state
//! that turns one fetch into what the UI shows.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | [`Incident`] and its JSON shape |
//! | [`timestamp`] | Display formatting for occurrence times |
//! | [`engagement`] | Placeholder vote/comment numbers |
//! | [`decode`] | Classifies a raw response into records or a [`FetchError`] |
//! | [`source`] | [`IncidentSource`] trait, [`HttpSource`], [`StaticSource`] |
//! | [`controller`] | [`FeedState`] and its [`FeedMode`] |
//! | [`summary`] | Counts by incident type and by hour |

pub mod controller;
pub mod decode;
pub mod engagement;
pub mod error;
pub mod record;
pub mod source;
pub mod summary;
pub mod timestamp;

pub use controller::{FeedMode, FeedState};
pub use decode::decode_response;
pub use engagement::{
    placeholder_metrics, EngagementMetrics, EngagementSource, PlaceholderEngagement,
};
pub use error::FetchError;
pub use record::{Incident, OccurredAt};
pub use source::{HttpSource, IncidentSource, StaticSource, INCIDENTS_PATH};
pub use summary::{counts_by_hour, counts_by_type, local_hour};
pub use timestamp::{format_occurred, format_occurred_in, INVALID_DATE};
