//! **crimewatch**: a terminal feed of community-reported crime incidents.
//!
//! The binary fetches `/api/crimes` once at startup and renders the result
//! with [`FeedApp`]. The model, configuration and log setup live here so the
//! integration tests can drive them without a terminal.

pub mod app;
pub mod config;
pub mod keys;
pub mod logging;

pub use app::{FeedApp, Flags, Msg};
pub use config::{Cli, ConfigError};
