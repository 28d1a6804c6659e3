//! Built-in subscription sources: terminal input ([`terminal_events`]) and
//! the repeating [`Every`] timer that animates the loading spinner.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
