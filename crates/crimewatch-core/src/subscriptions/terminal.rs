use crate::event::TerminalEvent;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;

/// Subscribe to terminal input, mapping each event through `map`.
///
/// Return `None` from `map` to drop an event. The crossterm
/// [`EventStream`] is only opened once the runtime starts polling, so
/// rebuilding this subscription on every update does not touch the
/// terminal.
///
/// ```rust,ignore
/// terminal_events(|ev| match ev {
///     TerminalEvent::Key(key) if key.code == KeyCode::Char('q') => Some(Msg::Quit),
///     _ => None,
/// })
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let stream = futures::stream::once(async { EventStream::new() })
        .flatten()
        .filter_map(move |result| {
            let msg = match result {
                Ok(event) => TerminalEvent::from_crossterm(event).and_then(&map),
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event stream error");
                    None
                }
            };
            futures::future::ready(msg)
        });
    Subscription::from_stream(SubscriptionId::named("terminal"), stream.boxed())
}
