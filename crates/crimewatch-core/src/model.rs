use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) builds the initial state and may return a
///    [`Command`] for startup work. This is the only place the incident feed
///    starts its fetch, which is what guarantees one request per lifetime.
/// 2. [`view`](Model::view) renders the current state.
/// 3. Messages arrive from [`Subscription`]s or finished commands.
/// 4. [`update`](Model::update) applies each message. All state changes made
///    by one `update` call become visible together on the next render.
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized + Send + 'static {
    /// Every event that can change the model.
    type Message: Send + 'static;

    /// Startup data handed to [`Model::init`]. Use `()` when none is needed.
    type Flags: Send + 'static;

    /// Create the initial state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Apply a message and return a command for any follow-up work.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must be a pure function of `&self`.
    fn view(&self, frame: &mut Frame);

    /// Subscriptions that should be active for the current state.
    ///
    /// Called after every update; the runtime starts new ids and stops the
    /// ones that disappeared.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
