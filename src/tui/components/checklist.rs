//! # Checklist Component
//!
//! "Between sessions" task list. Space or Enter toggles the item under the
//! cursor; completing one may trigger a confetti burst from the loop.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::core::action::Action;
use crate::core::checklist::{Checklist, ChecklistKey};
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct ChecklistState {
    pub cursor: usize,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    pub const HINT: &'static str = "↑↓ move  Space toggle";
}

impl EventHandler for ChecklistState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent, _app: &App) -> Option<Action> {
        match event {
            TuiEvent::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::Down => {
                self.cursor = (self.cursor + 1).min(ChecklistKey::ALL.len() - 1);
                None
            }
            TuiEvent::Enter | TuiEvent::Char(' ') => {
                Some(Action::ToggleTask(ChecklistKey::ALL[self.cursor]))
            }
            _ => None,
        }
    }
}

pub struct ChecklistCard<'a> {
    state: &'a ChecklistState,
    checklist: &'a Checklist,
    focused: bool,
}

impl<'a> ChecklistCard<'a> {
    pub fn new(state: &'a ChecklistState, checklist: &'a Checklist, focused: bool) -> Self {
        Self {
            state,
            checklist,
            focused,
        }
    }
}

impl Component for ChecklistCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for (i, item) in self.checklist.items().iter().enumerate() {
            let mark = if item.completed { "[x] " } else { "[ ] " };
            let mut title_style = if item.completed {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            if i == self.state.cursor && self.focused {
                title_style = title_style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(vec![
                Span::styled(mark, title_style),
                Span::styled(item.key.title(), title_style),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", item.key.benefits()),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let border = if self.focused {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = format!(
            " Between sessions ({}/{}) ",
            self.checklist.completed_count(),
            self.checklist.items().len()
        );
        let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        );
        frame.render_widget(card, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(checklist: &Checklist, state: &ChecklistState) -> String {
        let backend = TestBackend::new(60, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ChecklistCard::new(state, checklist, true).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_items_and_progress() {
        let mut checklist = Checklist::default();
        checklist.toggle(ChecklistKey::TimeManagement);
        let text = rendered(&checklist, &ChecklistState::new());
        assert!(text.contains("(1/3)"));
        assert!(text.contains("[x] Implement time management"));
        assert!(text.contains("[ ] Practice mindfulness"));
    }

    #[test]
    fn test_space_toggles_item_under_cursor() {
        let app = test_app();
        let mut state = ChecklistState::new();
        state.handle_event(&TuiEvent::Down, &app);
        state.handle_event(&TuiEvent::Down, &app);
        state.handle_event(&TuiEvent::Down, &app);
        assert_eq!(state.cursor, 2);
        assert_eq!(
            state.handle_event(&TuiEvent::Char(' '), &app),
            Some(Action::ToggleTask(ChecklistKey::CommunicationSkills))
        );
    }
}
