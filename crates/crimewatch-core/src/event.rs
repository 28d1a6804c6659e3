use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal input delivered through the
/// [`terminal_events`](crate::subscriptions::terminal_events) subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press (releases and repeats are dropped on conversion).
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

impl TerminalEvent {
    /// Convert a crossterm event, keeping only what the feed reacts to.
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(k) if k.kind == KeyEventKind::Press => {
                Some(TerminalEvent::Key(k))
            }
            crossterm::event::Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            _ => None,
        }
    }

    /// `true` for Ctrl-C.
    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            TerminalEvent::Key(KeyEvent { code: KeyCode::Char('c'), modifiers, .. })
                if modifiers.contains(KeyModifiers::CONTROL)
        )
    }
}
