//! Terminal runtime for **crimewatch**.
//!
//! The design follows the [Elm Architecture]: the application is a
//! [`Model`] with pure **init -> update -> view** functions, and side effects
//! (the incident fetch, quitting) are returned as [`Command`]s for the
//! runtime to execute.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect executed by the runtime |
//! | [`Subscription`] | Long-lived message source (terminal input, timers) |
//! | [`Program`] | Wires a [`Model`] to the terminal and runs the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for model tests |
//!
//! Async commands run as tokio tasks. The [`Program`] tracks every one it
//! spawns and aborts those still running when it exits, so a fetch that
//! outlives the UI never reaches a torn-down model.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run a model with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
