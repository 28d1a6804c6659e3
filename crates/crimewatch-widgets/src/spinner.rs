//! Animated loading indicator shown while the incident fetch is outstanding.

use crimewatch_core::command::Command;
use crimewatch_core::component::Component;
use crimewatch_core::subscription::{subscribe, Subscription};
use crimewatch_core::subscriptions::Every;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(80);

/// Braille dot frames.
pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Plain ASCII frames for terminals without braille glyphs.
pub const LINE: &[&str] = &["|", "/", "-", "\\"];

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
}

/// Cycles through a frame set at a fixed interval, followed by a label.
pub struct Spinner {
    frames: &'static [&'static str],
    frame_index: usize,
    label: String,
    style: Style,
    id: &'static str,
}

impl Spinner {
    /// `id` names the timer subscription; keep it unique per spinner.
    pub fn new(id: &'static str) -> Self {
        Self {
            frames: DOTS,
            frame_index: 0,
            label: String::new(),
            style: Style::default().fg(Color::Yellow),
            id,
        }
    }

    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = frames;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The glyph currently shown.
    pub fn frame(&self) -> &'static str {
        self.frames.get(self.frame_index).copied().unwrap_or("")
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Tick => {
                if !self.frames.is_empty() {
                    self.frame_index = (self.frame_index + 1) % self.frames.len();
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(self.frame(), self.style),
            Span::raw(" "),
            Span::raw(self.label.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        vec![subscribe(Every::new(INTERVAL, self.id)).map(|_| Message::Tick)]
    }
}
