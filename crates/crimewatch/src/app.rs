//! The incident feed application model.

use crate::keys::{self, Action};
use crimewatch_core::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use crimewatch_feed::{FeedMode, FeedState, FetchError, Incident, IncidentSource};
use crimewatch_widgets::spinner;
use crimewatch_widgets::{loading_spinner, FeedView, Spinner};
use ratatui::layout::Margin;
use ratatui::Frame;
use std::sync::Arc;

/// Cards moved by PageUp / PageDown.
const PAGE: usize = 5;

/// Startup data for [`FeedApp`].
#[derive(Clone)]
pub struct Flags {
    pub source: Arc<dyn IncidentSource>,
}

impl Flags {
    pub fn new(source: impl IncidentSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    /// The one fetch issued at startup has finished.
    Settled(Result<Vec<Incident>, FetchError>),
    Spinner(spinner::Message),
    Key(Action),
}

/// Fetches once at startup, then shows the settled feed.
pub struct FeedApp {
    state: FeedState,
    spinner: Spinner,
    offset: usize,
}

impl FeedApp {
    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Index of the first visible card.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn scroll(&mut self, action: Action) {
        let last = self.state.records().len().saturating_sub(1);
        self.offset = match action {
            Action::Up => self.offset.saturating_sub(1),
            Action::Down => self.offset + 1,
            Action::PageUp => self.offset.saturating_sub(PAGE),
            Action::PageDown => self.offset + PAGE,
            Action::Top => 0,
            Action::Bottom => last,
            Action::Quit => self.offset,
        }
        .min(last);
    }
}

impl Model for FeedApp {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let source = flags.source;
        tracing::info!(source = %source.describe(), "fetching incidents");
        let fetch = async move { source.fetch().await };
        (
            FeedApp {
                state: FeedState::new(),
                spinner: loading_spinner(),
                offset: 0,
            },
            Command::perform(fetch, Msg::Settled),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Settled(outcome) => {
                self.state.settle(outcome);
                Command::none()
            }
            Msg::Spinner(tick) => self.spinner.update(tick).map(Msg::Spinner),
            Msg::Key(Action::Quit) => Command::quit(),
            Msg::Key(action) => {
                if self.state.mode() == FeedMode::Populated {
                    self.scroll(action);
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area().inner(Margin::new(1, 0));
        FeedView::new(&self.state, &self.spinner)
            .offset(self.offset)
            .view(frame, area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| {
            if ev.is_interrupt() {
                return Some(Msg::Key(Action::Quit));
            }
            match ev {
                TerminalEvent::Key(key) => keys::action(key.code).map(Msg::Key),
                TerminalEvent::Resize(..) => None,
            }
        })];

        // Only animate while the fetch is outstanding.
        if self.state.is_loading() {
            subs.extend(
                self.spinner
                    .subscriptions()
                    .into_iter()
                    .map(|sub| sub.map(Msg::Spinner)),
            );
        }
        subs
    }
}
