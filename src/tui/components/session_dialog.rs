//! # Session Dialog
//!
//! Modal shown while a session is active. Enter or Esc ends it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::content::topic_description;
use crate::core::setup::ActiveSession;
use crate::tui::component::Component;
use crate::tui::components::centered_rect;

pub struct SessionDialog<'a> {
    pub session: &'a ActiveSession,
}

impl<'a> SessionDialog<'a> {
    pub fn new(session: &'a ActiveSession) -> Self {
        Self { session }
    }
}

impl Component for SessionDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 50, area);
        frame.render_widget(Clear, overlay);

        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::styled("Advisor:  ", label),
                Span::styled(self.session.avatar.advisor_name(), value),
            ]),
            Line::from(vec![
                Span::styled("Topic:    ", label),
                Span::styled(self.session.topic.label(), value),
            ]),
            Line::from(vec![
                Span::styled("Duration: ", label),
                Span::styled(format!("{} minutes", self.session.duration.minutes()), value),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                topic_description(self.session.topic),
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Session in Progress ")
            .title_alignment(Alignment::Center)
            .title_bottom(Line::from(" Enter End session ").centered())
            .padding(Padding::horizontal(1));
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            overlay,
        );
    }
}
