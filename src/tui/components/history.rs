//! # History Panel
//!
//! Past sessions with sorting, "view more", and one expandable row. The
//! expanded row shows the tab strip and the selected tab's content.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryState` lives in `TuiState` (row cursor, scroll offset)
//! - `HistoryPanel` is created each frame with borrowed state and props
//!
//! ## Layout
//!
//! Content is pre-wrapped with `textwrap` so every block's height is known
//! before drawing, then laid out top to bottom inside a `ScrollView`:
//!
//! ```text
//! ▸ Oct 16, 2026  Stress Management · Marcus
//!   Overview │ Transcript │ Level Up │ Your Notes     ← only on the expanded row
//!   15 minutes with Marcus
//!   ...
//! ▸ Oct 15, 2026  Work-Life Balance · Sarah
//! ```

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::action::Action;
use crate::core::content::{TabContent, tab_content};
use crate::core::history::{HistoryView, Session, SortOrder, Tab};
use crate::core::notes::NotesEditor;
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::SessionTabs;
use crate::tui::event::TuiEvent;

const INDENT: &str = "  ";
const SCROLL_STEP: u16 = 3;

#[derive(Debug, Default)]
pub struct HistoryState {
    pub cursor: usize,
    pub scroll: ScrollViewState,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hint(app: &App) -> &'static str {
        if app.notes.editing {
            "type to edit  Esc save"
        } else if app.history.expanded_session().is_some()
            && app.history.selected_tab == Tab::YourNotes
        {
            "←→ tab  e edit notes  Enter collapse  s sort"
        } else if app.history.expanded_session().is_some() {
            "←→ tab  Enter collapse  s sort  v more/less"
        } else {
            "↑↓ move  Enter expand  s sort  v more/less"
        }
    }

    fn handle_notes(event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Char(c) => Some(Action::NotesInput(*c)),
            TuiEvent::Enter => Some(Action::NotesInput('\n')),
            TuiEvent::Paste(text) => Some(Action::NotesPaste(text.clone())),
            TuiEvent::Backspace => Some(Action::NotesBackspace),
            TuiEvent::Escape => Some(Action::ToggleNotesEditing),
            _ => None,
        }
    }
}

impl EventHandler for HistoryState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        if app.notes.editing {
            return Self::handle_notes(event);
        }
        let visible = app.history.visible_sessions();
        let expanded = app.history.expanded_session().is_some();
        match event {
            TuiEvent::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::Down => {
                self.cursor = (self.cursor + 1).min(visible.len().saturating_sub(1));
                None
            }
            TuiEvent::Enter | TuiEvent::Char(' ') => visible
                .get(self.cursor)
                .map(|session| Action::ToggleSession(session.id)),
            TuiEvent::Char('s') => Some(Action::ToggleSort),
            TuiEvent::Char('v') if app.history.can_expand_list() => {
                Some(Action::ToggleVisibleSessions)
            }
            TuiEvent::Left if expanded => Some(Action::SelectTab(app.history.selected_tab.prev())),
            TuiEvent::Right if expanded => {
                Some(Action::SelectTab(app.history.selected_tab.next()))
            }
            TuiEvent::Char(c @ '1'..='4') if expanded => {
                let index = c.to_digit(10).unwrap_or(1) as usize - 1;
                Tab::ALL.get(index).copied().map(Action::SelectTab)
            }
            TuiEvent::Char('e') if expanded && app.history.selected_tab == Tab::YourNotes => {
                Some(Action::ToggleNotesEditing)
            }
            TuiEvent::ScrollUp => {
                for _ in 0..SCROLL_STEP {
                    self.scroll.scroll_up();
                }
                None
            }
            TuiEvent::ScrollDown => {
                for _ in 0..SCROLL_STEP {
                    self.scroll.scroll_down();
                }
                None
            }
            _ => None,
        }
    }
}

/// One vertically stacked piece of the scroll content.
enum Piece {
    Text(Vec<Line<'static>>),
    Tabs(Tab),
}

impl Piece {
    fn height(&self) -> u16 {
        match self {
            Piece::Text(lines) => u16::try_from(lines.len()).unwrap_or(u16::MAX),
            Piece::Tabs(_) => 1,
        }
    }
}

/// Height of `pieces` stacked, pinned at `u16::MAX` for very long notes.
fn stacked_height(pieces: &[Piece]) -> u16 {
    pieces
        .iter()
        .fold(0u16, |total, piece| total.saturating_add(piece.height()))
}

/// Wrap `text` to `width`, prefixing every line with `indent`.
fn wrapped(text: &str, width: usize, indent: &str, style: Style) -> Vec<Line<'static>> {
    let options = textwrap::Options::new(width.max(indent.len() + 1))
        .initial_indent(indent)
        .subsequent_indent(indent);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| Line::from(Span::styled(line.into_owned(), style)))
        .collect()
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{INDENT}{text}"),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn tab_lines(
    tab: Tab,
    session: &Session,
    notes: &NotesEditor,
    width: usize,
) -> Vec<Line<'static>> {
    let body = Style::default();
    let muted = Style::default().fg(Color::Gray);
    let nested = format!("{INDENT}  ");
    let mut lines = Vec::new();

    match tab_content(tab, Some(session)) {
        TabContent::Overview {
            headline,
            advisor_notes,
            points,
        } => {
            lines.push(heading(&headline));
            lines.extend(wrapped(advisor_notes, width, INDENT, muted));
            lines.push(Line::raw(""));
            for point in points {
                lines.extend(wrapped(&format!("• {point}"), width, INDENT, body));
            }
        }
        TabContent::Transcript { key_moments, lines: transcript } => {
            lines.push(heading("Key moments"));
            for moment in key_moments {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{INDENT}{:>5}  ", moment.timestamp),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(moment.title, Style::default().add_modifier(Modifier::BOLD)),
                ]));
                lines.extend(wrapped(moment.summary, width, &format!("{INDENT}       "), muted));
            }
            lines.push(Line::raw(""));
            lines.push(heading("Call transcript"));
            for line in transcript {
                lines.extend(wrapped(
                    &format!("{}: {}", line.speaker.label(), line.text),
                    width,
                    INDENT,
                    body,
                ));
            }
        }
        TabContent::LevelUp {
            recommendation,
            items,
        } => {
            lines.extend(wrapped(
                &format!("Recommended: {recommendation}"),
                width,
                INDENT,
                Style::default().fg(Color::Green),
            ));
            lines.push(Line::raw(""));
            for item in items {
                let mark = if item.completed { "[x]" } else { "[ ]" };
                lines.push(heading(&format!("{mark} {}", item.problem)));
                lines.extend(wrapped(item.solution, width, &nested, muted));
            }
        }
        TabContent::Notes => {
            let (text, is_placeholder) = notes.display_text();
            let style = if is_placeholder {
                muted.add_modifier(Modifier::ITALIC)
            } else {
                body
            };
            if notes.editing {
                lines.extend(wrapped(&format!("{text}▏"), width, INDENT, body));
            } else {
                lines.extend(wrapped(text, width, INDENT, style));
            }
            lines.push(Line::raw(""));
            let key = if notes.editing { "Esc" } else { "e" };
            lines.push(Line::from(Span::styled(
                format!("{INDENT}[{key}] {}", notes.toggle_label()),
                Style::default().fg(Color::Cyan),
            )));
        }
    }
    lines.push(Line::raw(""));
    lines
}

pub struct HistoryPanel<'a> {
    state: &'a mut HistoryState,
    history: &'a HistoryView,
    notes: &'a NotesEditor,
    focused: bool,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(
        state: &'a mut HistoryState,
        history: &'a HistoryView,
        notes: &'a NotesEditor,
        focused: bool,
    ) -> Self {
        Self {
            state,
            history,
            notes,
            focused,
        }
    }

    /// Build the stacked content and note where the cursor row starts.
    fn pieces(&self, width: usize) -> (Vec<Piece>, u16) {
        let mut pieces = Vec::new();
        let mut cursor_y = 0;
        let mut y: u16 = 0;

        for (i, session) in self.history.visible_sessions().into_iter().enumerate() {
            let is_expanded = self.history.expanded == Some(session.id);
            let is_cursor = i == self.state.cursor;
            if is_cursor {
                cursor_y = y;
            }
            let mut style = Style::default();
            if is_expanded {
                style = style.fg(Color::Magenta);
            }
            if is_cursor && self.focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let marker = if is_expanded { "▾" } else { "▸" };
            let header = Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(
                    session.date.format("%b %-d, %Y").to_string(),
                    style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {}", session.topic), style),
                Span::styled(
                    format!(" · {}", session.advisor),
                    style.fg(Color::DarkGray),
                ),
            ]);
            pieces.push(Piece::Text(vec![header]));
            y = y.saturating_add(1);

            if is_expanded {
                pieces.push(Piece::Tabs(self.history.selected_tab));
                let body = Piece::Text(tab_lines(
                    self.history.selected_tab,
                    session,
                    self.notes,
                    width,
                ));
                y = y.saturating_add(1).saturating_add(body.height());
                pieces.push(body);
            }
        }

        if self.history.can_expand_list() {
            let label = if self.history.is_showing_all() {
                "[v] Show less".to_string()
            } else {
                format!("[v] View more ({} total)", self.history.len())
            };
            pieces.push(Piece::Text(vec![
                Line::raw(""),
                Line::from(Span::styled(label, Style::default().fg(Color::Cyan))),
            ]));
        }
        (pieces, cursor_y)
    }

    /// Keep the cursor row inside the viewport.
    fn follow_cursor(&mut self, cursor_y: u16, viewport: u16) {
        let offset = self.state.scroll.offset().y;
        let target = if cursor_y < offset {
            cursor_y
        } else if viewport > 0 && cursor_y >= offset.saturating_add(viewport) {
            cursor_y.saturating_add(1) - viewport
        } else {
            return;
        };
        self.state.scroll.set_offset(Position { x: 0, y: target });
    }
}

impl Component for HistoryPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible_count = self.history.visible_sessions().len();
        self.state.cursor = self.state.cursor.min(visible_count.saturating_sub(1));

        let sort_label = match self.history.sort_order {
            SortOrder::Descending => "newest first",
            SortOrder::Ascending => "oldest first",
        };
        let border = if self.focused {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Session History ")
            .title_bottom(Line::from(format!(" [s] Sort: {sort_label} ")).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let (pieces, cursor_y) = self.pieces(content_width as usize);
        let total_height = stacked_height(&pieces);

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y = 0;
        for piece in pieces {
            let height = piece.height();
            match piece {
                Piece::Text(lines) => {
                    let rect = Rect::new(0, y, content_width, height);
                    scroll_view.render_widget(Paragraph::new(lines), rect);
                }
                Piece::Tabs(tab) => {
                    let rect = Rect::new(2, y, content_width.saturating_sub(2), 1);
                    scroll_view.render_widget(SessionTabs::new(tab, self.focused).widget(), rect);
                }
            }
            y = y.saturating_add(height);
        }

        self.follow_cursor(cursor_y, inner.height);
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::update;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(app: &App, state: &mut HistoryState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                HistoryPanel::new(state, &app.history, &app.notes, true).render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press(app: &mut App, state: &mut HistoryState, event: TuiEvent) {
        if let Some(action) = state.handle_event(&event, app) {
            update(app, action);
        }
    }

    #[test]
    fn test_collapsed_list_shows_five_rows() {
        let app = test_app();
        let text = rendered(&app, &mut HistoryState::new(), 80, 20);
        assert!(text.contains("Oct 16, 2026"));
        assert!(text.contains("Communication Skills"));
        // Sixth (oldest) session hidden until "view more"
        assert!(!text.contains("Oct 11, 2026"));
        assert!(text.contains("View more (6 total)"));
        assert!(text.contains("Sort: newest first"));
    }

    #[test]
    fn test_view_more_and_sort() {
        let mut app = test_app();
        let mut state = HistoryState::new();
        press(&mut app, &mut state, TuiEvent::Char('v'));
        let text = rendered(&app, &mut state, 80, 20);
        assert!(text.contains("Oct 11, 2026"));
        assert!(text.contains("Show less"));

        press(&mut app, &mut state, TuiEvent::Char('s'));
        assert_eq!(app.history.sort_order, SortOrder::Ascending);
        assert!(rendered(&app, &mut state, 80, 20).contains("oldest first"));
    }

    #[test]
    fn test_expand_shows_overview() {
        let mut app = test_app();
        let mut state = HistoryState::new();
        press(&mut app, &mut state, TuiEvent::Enter);
        assert_eq!(app.history.expanded, Some(1));

        let text = rendered(&app, &mut state, 100, 40);
        assert!(text.contains("Overview"));
        assert!(text.contains("Your Notes"));
        assert!(text.contains("15 minutes with Marcus"));
        assert!(text.contains("progress in stress management"));
    }

    #[test]
    fn test_tab_switching_with_arrows_and_digits() {
        let mut app = test_app();
        let mut state = HistoryState::new();
        press(&mut app, &mut state, TuiEvent::Enter);
        press(&mut app, &mut state, TuiEvent::Right);
        assert_eq!(app.history.selected_tab, Tab::Transcript);
        assert!(rendered(&app, &mut state, 100, 60).contains("Key moments"));

        press(&mut app, &mut state, TuiEvent::Char('3'));
        assert_eq!(app.history.selected_tab, Tab::LevelUp);
        assert!(rendered(&app, &mut state, 100, 60).contains("Procrastination"));

        press(&mut app, &mut state, TuiEvent::Left);
        press(&mut app, &mut state, TuiEvent::Left);
        press(&mut app, &mut state, TuiEvent::Left);
        assert_eq!(app.history.selected_tab, Tab::YourNotes);
    }

    #[test]
    fn test_tabs_ignored_when_collapsed() {
        let app = test_app();
        let mut state = HistoryState::new();
        assert_eq!(state.handle_event(&TuiEvent::Right, &app), None);
        assert_eq!(state.handle_event(&TuiEvent::Char('2'), &app), None);
    }

    #[test]
    fn test_notes_edit_cycle() {
        let mut app = test_app();
        let mut state = HistoryState::new();
        press(&mut app, &mut state, TuiEvent::Enter);
        press(&mut app, &mut state, TuiEvent::Char('4'));
        assert!(rendered(&app, &mut state, 100, 40).contains("[e] Edit Notes"));

        press(&mut app, &mut state, TuiEvent::Char('e'));
        assert!(app.notes.editing);
        // Keys that normally navigate are now typed
        press(&mut app, &mut state, TuiEvent::Char('s'));
        assert_eq!(app.history.sort_order, SortOrder::Descending);
        assert!(app.notes.text.ends_with('s'));
        assert!(rendered(&app, &mut state, 100, 40).contains("[Esc] Save Notes"));

        press(&mut app, &mut state, TuiEvent::Escape);
        assert!(!app.notes.editing);
    }

    #[test]
    fn test_very_long_notes_pin_height() {
        let mut app = test_app();
        app.history.toggle_expanded(1);
        app.history.select_tab(Tab::YourNotes);
        app.notes.toggle();
        app.notes.set_text("line\n".repeat(70_000));
        let mut state = HistoryState::new();
        state.cursor = 1;

        let panel = HistoryPanel::new(&mut state, &app.history, &app.notes, true);
        let (pieces, cursor_y) = panel.pieces(60);
        assert_eq!(stacked_height(&pieces), u16::MAX);
        assert_eq!(cursor_y, u16::MAX);
    }

    #[test]
    fn test_cursor_clamped_to_visible_rows() {
        let app = test_app();
        let mut state = HistoryState::new();
        for _ in 0..10 {
            state.handle_event(&TuiEvent::Down, &app);
        }
        assert_eq!(state.cursor, 4);
        assert_eq!(
            state.handle_event(&TuiEvent::Enter, &app),
            Some(Action::ToggleSession(5))
        );
    }
}
