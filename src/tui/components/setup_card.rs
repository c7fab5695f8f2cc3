//! # SetupCard Component
//!
//! The three-stage session wizard: pick an advisor, pick a topic, set the
//! duration. Which stage is drawn comes entirely from `SetupFlow`; the card
//! only remembers where its cursors are.
//!
//! While a fade is pending the current stage is drawn dimmed and input is
//! still forwarded; the core ignores it until the fade completes.
//!
//! The topic taxonomy is taller than the card on a small terminal, so it is a
//! `List` whose selection follows the topic cursor.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::content::{avatar_profile, topic_description};
use crate::core::setup::{Avatar, SetupFlow, Stage, Topic, TopicCategory};
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Cursor positions, kept across stage changes.
#[derive(Debug, Default)]
pub struct SetupCardState {
    pub avatar_cursor: usize,
    pub topic_cursor: usize,
    /// Scroll position of the topic list. Rows include category headers.
    pub topic_list: ListState,
}

impl SetupCardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint(stage: Stage) -> &'static str {
        match stage {
            Stage::SelectingAvatar => "←→ advisor  Enter choose  p voice sample",
            Stage::ChoosingTopic => "↑↓ topic  Enter choose  Backspace back  Esc exit",
            Stage::ConfiguringSession => "←→ duration  Enter start  Backspace back  Esc exit",
        }
    }
}

impl EventHandler for SetupCardState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        match app.flow.stage() {
            Stage::SelectingAvatar => match event {
                TuiEvent::Left | TuiEvent::Up => {
                    self.avatar_cursor = 0;
                    None
                }
                TuiEvent::Right | TuiEvent::Down => {
                    self.avatar_cursor = Avatar::ALL.len() - 1;
                    None
                }
                TuiEvent::Enter => Some(Action::SelectAvatar(Avatar::ALL[self.avatar_cursor])),
                TuiEvent::Char('p') | TuiEvent::Char(' ') => {
                    Some(Action::ToggleVoiceSample(Avatar::ALL[self.avatar_cursor]))
                }
                _ => None,
            },
            Stage::ChoosingTopic => match event {
                TuiEvent::Up => {
                    self.topic_cursor = self.topic_cursor.saturating_sub(1);
                    None
                }
                TuiEvent::Down => {
                    self.topic_cursor = (self.topic_cursor + 1).min(Topic::ALL.len() - 1);
                    None
                }
                TuiEvent::Enter => Some(Action::ChooseTopic(Topic::ALL[self.topic_cursor])),
                TuiEvent::Backspace => Some(Action::Back),
                TuiEvent::Escape => Some(Action::ExitSetup),
                _ => None,
            },
            Stage::ConfiguringSession => match event {
                TuiEvent::Left | TuiEvent::Char('-') => Some(Action::DecreaseDuration),
                TuiEvent::Right | TuiEvent::Char('+') | TuiEvent::Char('=') => {
                    Some(Action::IncreaseDuration)
                }
                TuiEvent::Enter => Some(Action::StartSession),
                TuiEvent::Backspace => Some(Action::Back),
                TuiEvent::Escape => Some(Action::ExitSetup),
                _ => None,
            },
        }
    }
}

/// Row of `Topic::ALL[index]` in the topic list, counting category headers.
fn topic_row(index: usize) -> usize {
    let mut row = 0;
    for category in TopicCategory::ALL {
        row += 1;
        for topic in category.topics() {
            if Topic::ALL.get(index) == Some(&topic) {
                return row;
            }
            row += 1;
        }
    }
    0
}

/// Transient render wrapper.
pub struct SetupCard<'a> {
    state: &'a mut SetupCardState,
    flow: &'a SetupFlow,
    playing: Option<Avatar>,
    focused: bool,
}

impl<'a> SetupCard<'a> {
    pub fn new(
        state: &'a mut SetupCardState,
        flow: &'a SetupFlow,
        playing: Option<Avatar>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            flow,
            playing,
            focused,
        }
    }

    fn title(stage: Stage) -> &'static str {
        match stage {
            Stage::SelectingAvatar => "Choose your advisor",
            Stage::ChoosingTopic => "What would you like to talk about?",
            Stage::ConfiguringSession => "Configure your session",
        }
    }

    fn render_avatars(&self, frame: &mut Frame, area: Rect, base: Style) {
        let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .spacing(1)
            .split(area);

        for (i, avatar) in Avatar::ALL.iter().enumerate() {
            let profile = avatar_profile(*avatar);
            let is_cursor = i == self.state.avatar_cursor;
            let border = if is_cursor && self.focused {
                base.fg(Color::Magenta)
            } else {
                base.fg(Color::DarkGray)
            };
            let sample = if self.playing == Some(*avatar) {
                Span::styled("⏸ Pause sample", base.fg(Color::Yellow))
            } else {
                Span::styled("▶ Play voice sample", base.fg(Color::Cyan))
            };
            let lines = vec![
                Line::from(Span::styled(profile.description, base)),
                Line::raw(""),
                Line::from(Span::styled(profile.specialty, base.fg(Color::Gray))),
                Line::raw(""),
                Line::from(sample),
            ];
            let card = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border)
                        .title(Span::styled(
                            format!(" {} ", profile.name),
                            base.add_modifier(Modifier::BOLD),
                        )),
                );
            frame.render_widget(card, columns[i]);
        }
    }

    fn render_topics(&mut self, frame: &mut Frame, area: Rect, base: Style) {
        let with_height = u16::from(self.flow.setup.avatar.is_some());
        let [with_area, list_area, description_area] = Layout::vertical([
            Constraint::Length(with_height),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .areas(area);

        if let Some(avatar) = self.flow.setup.avatar {
            frame.render_widget(
                Span::styled(format!("With {}", avatar.advisor_name()), base.fg(Color::DarkGray)),
                with_area,
            );
        }

        let mut items = Vec::new();
        for category in TopicCategory::ALL {
            items.push(ListItem::new(Span::styled(
                category.label(),
                base.add_modifier(Modifier::BOLD),
            )));
            for topic in category.topics() {
                items.push(ListItem::new(Span::styled(format!("  {}", topic.label()), base)));
            }
        }
        let highlight = if self.focused {
            base.fg(Color::Magenta).add_modifier(Modifier::REVERSED)
        } else {
            base
        };
        let list = List::new(items).highlight_style(highlight).scroll_padding(1);

        let cursor = self.state.topic_cursor.min(Topic::ALL.len() - 1);
        self.state.topic_list.select(Some(topic_row(cursor)));
        frame.render_stateful_widget(list, list_area, &mut self.state.topic_list);

        let description = Paragraph::new(Span::styled(
            topic_description(Topic::ALL[cursor]),
            base.fg(Color::Gray).add_modifier(Modifier::ITALIC),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(description, description_area);
    }

    fn render_configure(&self, frame: &mut Frame, area: Rect, base: Style) {
        let advisor = self
            .flow
            .setup
            .avatar
            .map(|a| a.advisor_name())
            .unwrap_or("-");
        let topic = self.flow.setup.topic;
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Advisor: ", base.fg(Color::DarkGray)),
                Span::styled(advisor, base.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled("Topic:   ", base.fg(Color::DarkGray)),
                Span::styled(
                    topic.map(|t| t.label()).unwrap_or("-"),
                    base.add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        if let Some(topic) = topic {
            lines.push(Line::from(Span::styled(
                topic_description(topic),
                base.fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Duration: ", base.fg(Color::DarkGray)),
            Span::styled("◀ ", base.fg(Color::Cyan)),
            Span::styled(
                format!("{} min", self.flow.duration.minutes()),
                base.add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ▶", base.fg(Color::Cyan)),
        ]));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Start session",
            base.fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}

impl Component for SetupCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let stage = self.flow.stage();
        let base = if self.flow.is_transitioning() {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let border = if self.focused {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" Step {} of 3 · {} ", stage.number(), Self::title(stage)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match stage {
            Stage::SelectingAvatar => self.render_avatars(frame, inner, base),
            Stage::ChoosingTopic => self.render_topics(frame, inner, base),
            Stage::ConfiguringSession => self.render_configure(frame, inner, base),
        }
    }
}
