//! The incident list: loading indicator, empty message, or stacked cards.
//!
//! [`FeedView`] borrows everything it draws and owns nothing, so building
//! one per frame is free and rendering is a pure function of its inputs.

use crate::incident_card::{or_na, truncate, IncidentCard};
use crate::spinner::Spinner;
use crimewatch_core::component::Component;
use crimewatch_feed::{
    counts_by_hour, counts_by_type, format_occurred, local_hour, EngagementSource, FeedMode,
    FeedState, OccurredAt, PlaceholderEngagement,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Label shown beside the spinner while the fetch is outstanding.
pub const LOADING_MESSAGE: &str = "Loading incidents...";
/// Shown after settling with no records, including after a failed fetch.
pub const EMPTY_MESSAGE: &str = "No incidents found.";

/// Subscription id of the loading spinner's timer.
pub const SPINNER_ID: &str = "feed-loading";

/// The spinner [`FeedView`] expects in [`FeedMode::Loading`].
pub fn loading_spinner() -> Spinner {
    Spinner::new(SPINNER_ID).with_label(LOADING_MESSAGE)
}

static PLACEHOLDER: PlaceholderEngagement = PlaceholderEngagement;

pub struct FeedView<'a> {
    state: &'a FeedState,
    spinner: &'a Spinner,
    engagement: &'a dyn EngagementSource,
    time_format: fn(&OccurredAt) -> String,
    hour_of: fn(&OccurredAt) -> Option<u32>,
    offset: usize,
}

impl<'a> FeedView<'a> {
    pub fn new(state: &'a FeedState, spinner: &'a Spinner) -> Self {
        Self {
            state,
            spinner,
            engagement: &PLACEHOLDER,
            time_format: format_occurred,
            hour_of: local_hour,
            offset: 0,
        }
    }

    /// Replace the placeholder vote and comment numbers.
    pub fn engagement(mut self, engagement: &'a dyn EngagementSource) -> Self {
        self.engagement = engagement;
        self
    }

    /// Override timestamp formatting. Defaults to local time.
    pub fn time_format(mut self, format: fn(&OccurredAt) -> String) -> Self {
        self.time_format = format;
        self
    }

    /// Override how the per-hour summary reads the hour. Defaults to local
    /// time, matching the default `time_format`.
    pub fn hour_of(mut self, hour_of: fn(&OccurredAt) -> Option<u32>) -> Self {
        self.hour_of = hour_of;
        self
    }

    /// Index of the first card drawn. Clamped to the last record.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn mode(&self) -> FeedMode {
        self.state.mode()
    }

    /// One card per record, in received order. Empty unless populated.
    pub fn cards(&self) -> Vec<IncidentCard<'a>> {
        if self.state.is_loading() {
            return Vec::new();
        }
        self.state
            .records()
            .iter()
            .map(|incident| {
                IncidentCard::new(
                    incident,
                    (self.time_format)(&incident.occurred),
                    self.engagement.metrics(incident),
                )
            })
            .collect()
    }

    /// Render keys of the cards, in order. Duplicates are passed through.
    pub fn keys(&self) -> Vec<u64> {
        self.cards().iter().map(IncidentCard::key).collect()
    }

    pub fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        match self.mode() {
            FeedMode::Loading => self.spinner.view(frame, Rect { height: 1, ..area }),
            FeedMode::Empty => frame.render_widget(
                Paragraph::new(EMPTY_MESSAGE)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                Rect { height: 1, ..area },
            ),
            FeedMode::Populated => self.view_cards(frame, area),
        }
    }

    /// Title plus the by-type and by-hour counts. The hour row is left out
    /// when no record has a readable time.
    fn summary_lines(&self, width: usize) -> Vec<Line<'static>> {
        let records = self.state.records();
        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::styled(
            truncate(&format!("Recent Incidents ({})", records.len()), width),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        let by_type: Vec<String> = counts_by_type(records)
            .into_iter()
            .map(|(kind, n)| format!("{} ({n})", or_na(kind)))
            .collect();
        lines.push(Line::styled(truncate(&by_type.join(" · "), width), dim));

        let by_hour: Vec<String> = counts_by_hour(records, self.hour_of)
            .into_iter()
            .map(|(hour, n)| format!("{hour:02}:00 ({n})"))
            .collect();
        if !by_hour.is_empty() {
            let text = format!("By hour: {}", by_hour.join(" · "));
            lines.push(Line::styled(truncate(&text, width), dim));
        }
        lines
    }

    fn view_cards(&self, frame: &mut Frame, area: Rect) {
        let summary = self.summary_lines(area.width as usize);
        let summary_height = (summary.len() as u16).min(area.height);
        frame.render_widget(
            Paragraph::new(summary),
            Rect {
                height: summary_height,
                ..area
            },
        );

        let cards = self.cards();
        let start = self.offset.min(cards.len().saturating_sub(1));
        let mut y = area.y + summary_height;
        let bottom = area.bottom();
        for card in &cards[start..] {
            if y >= bottom {
                break;
            }
            let height = card.height().min(bottom - y);
            frame.render_widget(
                card,
                Rect {
                    y,
                    height,
                    ..area
                },
            );
            y += height;
        }
    }
}
