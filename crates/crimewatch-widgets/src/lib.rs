//! Widgets for the **crimewatch** incident feed.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`feed_view`] | Loading / empty / populated list of incidents |
//! | [`incident_card`] | One incident as a bordered card |
//! | [`spinner`] | Animated loading indicator ([`crimewatch_core::Component`]) |

pub mod feed_view;
pub mod incident_card;
pub mod spinner;

pub use feed_view::{loading_spinner, FeedView, EMPTY_MESSAGE, LOADING_MESSAGE};
pub use incident_card::IncidentCard;
pub use spinner::Spinner;
