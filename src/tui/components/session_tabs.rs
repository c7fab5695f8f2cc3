//! # SessionTabs Component
//!
//! Stateless strip of the four detail tabs. The selected tab comes in as a
//! prop; changing it is the history panel's job.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;

use crate::core::history::Tab;
use crate::tui::component::Component;

pub fn tab_title(tab: Tab) -> &'static str {
    match tab {
        Tab::Overview => "Overview",
        Tab::Transcript => "Transcript",
        Tab::LevelUp => "Level Up",
        Tab::YourNotes => "Your Notes",
    }
}

pub struct SessionTabs {
    pub selected: Tab,
    pub focused: bool,
}

impl SessionTabs {
    pub fn new(selected: Tab, focused: bool) -> Self {
        Self { selected, focused }
    }

    /// The tab strip as a widget, for drawing into a scroll view.
    pub fn widget(&self) -> Tabs<'static> {
        let highlight = if self.focused {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Tabs::new(Tab::ALL.iter().map(|t| tab_title(*t)))
            .select(self.selected.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(highlight)
            .divider("│")
    }
}

impl Component for SessionTabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.widget(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_all_four_tabs() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tabs = SessionTabs::new(Tab::LevelUp, true);
        terminal.draw(|f| tabs.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        for tab in Tab::ALL {
            assert!(text.contains(tab_title(tab)), "missing {}", tab_title(tab));
        }
    }

    #[test]
    fn test_selected_tab_is_highlighted() {
        let backend = TestBackend::new(60, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tabs = SessionTabs::new(Tab::Transcript, true);
        terminal.draw(|f| tabs.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        let byte_idx = text.find("Transcript").unwrap();
        let col = text[..byte_idx].chars().count() as u16;
        assert_eq!(buffer[(col, 0)].fg, Color::Magenta);
    }
}
