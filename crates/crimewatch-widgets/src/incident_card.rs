//! One incident rendered as a bordered card.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │Theft (PC)                    │
//! │1/1/2024, 10:00:00 AM         │
//! │Block of Shattuck Ave         │
//! │Case #24-0001                 │
//! │Bike taken from rack          │  <- only when there is a description
//! │[▲ 1]  [2 comments]           │
//! └──────────────────────────────┘
//! ```

use crimewatch_feed::{EngagementMetrics, Incident};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shown instead of a blank type or address.
pub const NOT_AVAILABLE: &str = "N/A";

/// Card rows excluding the optional description.
const BASE_HEIGHT: u16 = 7;

/// Display-ready view of one [`Incident`]. Does no formatting of its own
/// beyond layout: the caller supplies the timestamp text and the
/// engagement numbers.
#[derive(Debug, Clone)]
pub struct IncidentCard<'a> {
    incident: &'a Incident,
    occurred: String,
    metrics: EngagementMetrics,
}

impl<'a> IncidentCard<'a> {
    pub fn new(incident: &'a Incident, occurred: String, metrics: EngagementMetrics) -> Self {
        Self {
            incident,
            occurred,
            metrics,
        }
    }

    /// Render key: the incident id.
    pub fn key(&self) -> u64 {
        self.incident.id
    }

    pub fn metrics(&self) -> EngagementMetrics {
        self.metrics
    }

    /// Rows the card needs, borders included.
    pub fn height(&self) -> u16 {
        BASE_HEIGHT + u16::from(self.incident.description.is_some())
    }

    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let incident = self.incident;
        let heading = or_na(&incident.incident_type);
        let mut heading_spans = vec![Span::styled(
            truncate(heading, width),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(statute) = &incident.statute_type {
            let used = heading.width();
            if used + 3 < width {
                heading_spans.push(Span::styled(
                    truncate(&format!(" ({statute})"), width - used),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        let mut lines = vec![
            Line::from(heading_spans),
            Line::styled(truncate(&self.occurred, width), Style::default().fg(Color::Cyan)),
            Line::raw(truncate(or_na(&incident.block_address), width)),
            Line::raw(truncate(&format!("Case #{}", incident.case_number), width)),
        ];
        if let Some(description) = &incident.description {
            lines.push(Line::styled(
                truncate(description, width),
                Style::default().fg(Color::Gray),
            ));
        }
        lines.push(self.affordances(width));
        lines
    }

    /// Vote and comment controls. Decorative: nothing handles them.
    fn affordances(&self, width: usize) -> Line<'static> {
        let comments = match self.metrics.comments {
            1 => "1 comment".to_string(),
            n => format!("{n} comments"),
        };
        let text = format!("[▲ {}]  [{}]", self.metrics.upvotes, comments);
        Line::styled(truncate(&text, width), Style::default().fg(Color::DarkGray))
    }
}

impl Widget for &IncidentCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        Paragraph::new(self.lines(inner.width as usize)).render(inner, buf);
    }
}

pub(crate) fn or_na(text: &str) -> &str {
    if text.is_empty() {
        NOT_AVAILABLE
    } else {
        text
    }
}

/// Cut `text` to at most `width` columns, ending in `…` when shortened.
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crimewatch_core::testing::buffer_to_string;
    use crimewatch_feed::placeholder_metrics;

    fn scenario_a() -> Incident {
        Incident::new(
            1,
            "Theft",
            "2024-01-01T10:00:00Z".into(),
            "Block of Shattuck Ave",
            "24-0001",
        )
    }

    fn draw(card: &IncidentCard, width: u16) -> String {
        let area = Rect::new(0, 0, width, card.height());
        let mut buf = Buffer::empty(area);
        card.render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn renders_every_field() {
        let incident = scenario_a();
        let card = IncidentCard::new(
            &incident,
            "1/1/2024, 10:00:00 AM".into(),
            placeholder_metrics(incident.id),
        );
        let text = draw(&card, 40);
        assert!(text.contains("Theft"));
        assert!(text.contains("1/1/2024, 10:00:00 AM"));
        assert!(text.contains("Block of Shattuck Ave"));
        assert!(text.contains("Case #24-0001"));
        assert!(text.contains("[▲ 1]"));
        assert!(text.contains("[2 comments]"));
    }

    #[test]
    fn description_adds_a_row_only_when_present() {
        let plain = scenario_a();
        let described = scenario_a().with_description("Bike taken from rack");
        let metrics = placeholder_metrics(1);

        let card = IncidentCard::new(&plain, String::new(), metrics);
        assert_eq!(card.height(), BASE_HEIGHT);

        let card = IncidentCard::new(&described, String::new(), metrics);
        assert_eq!(card.height(), BASE_HEIGHT + 1);
        assert!(draw(&card, 40).contains("Bike taken from rack"));
    }

    #[test]
    fn blank_fields_show_not_available() {
        let incident = Incident::new(5, "", "".into(), "", "24-9");
        let card = IncidentCard::new(&incident, "Invalid Date".into(), placeholder_metrics(5));
        let text = draw(&card, 30);
        assert_eq!(text.matches(NOT_AVAILABLE).count(), 2);
        assert!(text.contains("Invalid Date"));
        assert!(text.contains("[1 comment]"));
    }

    #[test]
    fn statute_type_follows_heading() {
        let mut incident = scenario_a();
        incident.statute_type = Some("PC".into());
        let card = IncidentCard::new(&incident, String::new(), placeholder_metrics(1));
        assert!(draw(&card, 40).contains("Theft (PC)"));
    }

    #[test]
    fn long_text_is_truncated_to_width() {
        let incident = Incident::new(
            1,
            "Theft",
            "x".into(),
            "2100 Block of a Very Long Street Name That Does Not Fit",
            "1",
        );
        let card = IncidentCard::new(&incident, String::new(), placeholder_metrics(1));
        let text = draw(&card, 20);
        assert!(text.contains('…'));
        assert!(text.lines().all(|l| l.width() <= 20));
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn key_is_incident_id() {
        let incident = Incident::new(42, "Theft", "x".into(), "a", "b");
        assert_eq!(IncidentCard::new(&incident, String::new(), placeholder_metrics(42)).key(), 42);
    }
}
