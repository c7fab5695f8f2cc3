//! # StatusBar Component
//!
//! Bottom line showing the latest status message and the keys that apply to
//! the focused panel.
//!
//! ## Conditional Formatting
//!
//! 1. **Audio error**: `"Advisor | Failed to play audio. Please try again."` in red
//! 2. **Status message**: `"Advisor | Notes saved | ↑↓ move  Enter select"`
//! 3. **No status**: `"Advisor | ↑↓ move  Enter select"`
//!
//! The hint is dropped first when the terminal is too narrow.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::Component;

pub struct StatusBar<'a> {
    pub status_message: &'a str,
    pub audio_error: Option<&'a str>,
    pub hint: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(status_message: &'a str, audio_error: Option<&'a str>, hint: &'a str) -> Self {
        Self {
            status_message,
            audio_error,
            hint,
        }
    }

    fn text(&self, width: usize) -> (String, bool) {
        if let Some(error) = self.audio_error {
            return (format!("Advisor | {error}"), true);
        }
        let base = if self.status_message.is_empty() {
            "Advisor".to_string()
        } else {
            format!("Advisor | {}", self.status_message)
        };
        let full = format!("{base} | {}", self.hint);
        if self.hint.is_empty() || full.width() > width {
            (base, false)
        } else {
            (full, false)
        }
    }
}

impl Component for StatusBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (text, is_error) = self.text(area.width as usize);
        let style = if is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(Line::from(Span::styled(text, style)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(bar: &mut StatusBar, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_status_and_hint() {
        let mut bar = StatusBar::new("Notes saved", None, "Enter select");
        let text = rendered(&mut bar, 80);
        assert!(text.contains("Advisor | Notes saved | Enter select"));
    }

    #[test]
    fn test_audio_error_takes_priority() {
        let mut bar = StatusBar::new(
            "Welcome back!",
            Some("Failed to play audio. Please try again."),
            "p play",
        );
        let text = rendered(&mut bar, 80);
        assert!(text.contains("Failed to play audio"));
        assert!(!text.contains("Welcome back!"));
    }

    #[test]
    fn test_hint_dropped_when_narrow() {
        let mut bar = StatusBar::new("Welcome back!", None, "Tab next panel  q quit");
        let text = rendered(&mut bar, 30);
        assert!(text.contains("Advisor | Welcome back!"));
        assert!(!text.contains("q quit"));
    }

    #[test]
    fn test_empty_status() {
        let mut bar = StatusBar::new("", None, "");
        let text = rendered(&mut bar, 40);
        assert!(text.contains("Advisor"));
        assert!(!text.contains('|'));
    }
}
