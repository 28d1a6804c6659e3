use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A sub-model that renders into an area chosen by its parent.
///
/// Same shape as [`Model`](crate::Model) except that [`view`](Component::view)
/// receives a [`Rect`]. Parents wrap the component's message in one of their
/// own variants and lift commands and subscriptions with `map`:
///
/// ```rust,ignore
/// Msg::Spinner(m) => self.spinner.update(m).map(Msg::Spinner),
/// ```
pub trait Component: Send + 'static {
    /// The component's own message type.
    type Message: Send + 'static;

    /// Apply a message.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area`. Implementations must stay inside it.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions this component needs right now.
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }
}
