//! # ProgressBar Component
//!
//! "Next session" banner plus its reschedule dialog.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ProgressBarState` lives in `TuiState` and holds the picker cursors
//! - `ProgressBar` draws the banner, `RescheduleDialogView` draws the overlay
//!
//! The tentative date itself is core state (`Reminder::dialog`); the picker
//! only tracks which day and time slot the cursor is on.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::core::action::Action;
use crate::core::reminder::{Reminder, ScheduledReminder, TimeSlot, time_slots};
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

/// Default time cursor (09:00) when the tentative value is off-grid.
const DEFAULT_SLOT: usize = 36;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFocus {
    Calendar,
    Times,
}

#[derive(Debug)]
pub struct ProgressBarState {
    pub cursor: NaiveDate,
    pub focus: PickerFocus,
    pub time_cursor: usize,
    pub time_list: ListState,
    slots: Vec<TimeSlot>,
}

impl ProgressBarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cursor: today,
            focus: PickerFocus::Calendar,
            time_cursor: DEFAULT_SLOT,
            time_list: ListState::default().with_selected(Some(DEFAULT_SLOT)),
            slots: time_slots(),
        }
    }

    pub const BANNER_HINT: &'static str = "Enter reschedule  a add to calendar";
    pub const DIALOG_HINT: &'static str =
        "Enter pick  Tab switch  </> month  x clear  c confirm  Esc cancel";

    /// Point the cursors at the value the dialog opens with.
    fn sync_to(&mut self, value: NaiveDateTime) {
        self.cursor = value.date();
        self.focus = PickerFocus::Calendar;
        self.time_cursor = TimeSlot::of(&value)
            .and_then(|slot| slot.index())
            .unwrap_or(DEFAULT_SLOT);
        self.time_list.select(Some(self.time_cursor));
    }

    fn move_days(&mut self, forward: bool, days: u64) {
        let moved = if forward {
            self.cursor.checked_add_days(Days::new(days))
        } else {
            self.cursor.checked_sub_days(Days::new(days))
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    fn move_months(&mut self, forward: bool) {
        let moved = if forward {
            self.cursor.checked_add_months(Months::new(1))
        } else {
            self.cursor.checked_sub_months(Months::new(1))
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    fn move_time(&mut self, down: bool) {
        self.time_cursor = if down {
            (self.time_cursor + 1).min(self.slots.len() - 1)
        } else {
            self.time_cursor.saturating_sub(1)
        };
        self.time_list.select(Some(self.time_cursor));
    }

    fn handle_dialog(&mut self, event: &TuiEvent) -> Option<Action> {
        match event {
            TuiEvent::Escape => return Some(Action::CancelReschedule),
            TuiEvent::Char('c') => return Some(Action::ConfirmReschedule),
            TuiEvent::Char('x') => return Some(Action::ClearTentativeDate),
            TuiEvent::NextPanel | TuiEvent::PrevPanel => {
                self.focus = match self.focus {
                    PickerFocus::Calendar => PickerFocus::Times,
                    PickerFocus::Times => PickerFocus::Calendar,
                };
                return None;
            }
            _ => {}
        }
        match self.focus {
            PickerFocus::Calendar => match event {
                TuiEvent::Left => self.move_days(false, 1),
                TuiEvent::Right => self.move_days(true, 1),
                TuiEvent::Up => self.move_days(false, 7),
                TuiEvent::Down => self.move_days(true, 7),
                TuiEvent::Char('<') | TuiEvent::ScrollUp => self.move_months(false),
                TuiEvent::Char('>') | TuiEvent::ScrollDown => self.move_months(true),
                TuiEvent::Enter | TuiEvent::Char(' ') => {
                    return Some(Action::PickDate(self.cursor));
                }
                _ => {}
            },
            PickerFocus::Times => match event {
                TuiEvent::Up | TuiEvent::ScrollUp => self.move_time(false),
                TuiEvent::Down | TuiEvent::ScrollDown => self.move_time(true),
                TuiEvent::Enter | TuiEvent::Char(' ') => {
                    return self.slots.get(self.time_cursor).copied().map(Action::PickTime);
                }
                _ => {}
            },
        }
        None
    }
}

impl EventHandler for ProgressBarState {
    type Event = Action;

    fn handle_event(&mut self, event: &TuiEvent, app: &App) -> Option<Action> {
        if app.reminder.is_dialog_open() {
            return self.handle_dialog(event);
        }
        match event {
            TuiEvent::Enter | TuiEvent::Char('r') => {
                self.sync_to(app.reminder.confirmed.date);
                Some(Action::OpenReschedule)
            }
            TuiEvent::Char('a') => Some(Action::AddToCalendar),
            _ => None,
        }
    }
}

/// The banner line.
pub struct ProgressBar<'a> {
    reminder: &'a ScheduledReminder,
    calendar_pending: bool,
    focused: bool,
}

impl<'a> ProgressBar<'a> {
    pub fn new(reminder: &'a ScheduledReminder, calendar_pending: bool, focused: bool) -> Self {
        Self {
            reminder,
            calendar_pending,
            focused,
        }
    }
}

impl Component for ProgressBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let calendar = if self.calendar_pending {
            Span::styled("Adding to calendar...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("[a] Add to Calendar", Style::default().fg(Color::Cyan))
        };
        let line = Line::from(vec![
            Span::styled("Next session: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                self.reminder.display(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[r] Reschedule", Style::default().fg(Color::Cyan)),
            Span::raw("   "),
            calendar,
        ]);
        let banner = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Your Progress "),
        );
        frame.render_widget(banner, area);
    }
}

/// Overlay for picking a new date and time.
pub struct RescheduleDialogView<'a> {
    state: &'a mut ProgressBarState,
    reminder: &'a Reminder,
    today: NaiveDate,
}

impl<'a> RescheduleDialogView<'a> {
    pub fn new(state: &'a mut ProgressBarState, reminder: &'a Reminder, today: NaiveDate) -> Self {
        Self {
            state,
            reminder,
            today,
        }
    }

    fn tentative(&self) -> Option<NaiveDateTime> {
        self.reminder.dialog.and_then(|d| d.tentative)
    }

    fn month_lines(&self) -> Vec<Line<'static>> {
        let cursor = self.state.cursor;
        let tentative = self.tentative().map(|dt| dt.date());
        let calendar_focused = self.state.focus == PickerFocus::Calendar;

        let Some(first) = NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), 1) else {
            return Vec::new();
        };
        let days_in_month = first
            .checked_add_months(Months::new(1))
            .map(|next| (next - first).num_days() as u32)
            .unwrap_or(28);
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut lines = vec![
            Line::from(Span::styled(
                first.format("%B %Y").to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(
                "Mo Tu We Th Fr Sa Su",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let mut spans: Vec<Span<'static>> = vec![Span::raw("   "); offset];
        let mut column = offset;
        for day in 1..=days_in_month {
            let Some(date) = first.with_day(day) else {
                continue;
            };
            let mut style = Style::default();
            if tentative == Some(date) {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            }
            if date == self.today {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if date == cursor && calendar_focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{day:>2}"), style));
            spans.push(Span::raw(" "));
            column += 1;
            if column == 7 {
                lines.push(Line::from(std::mem::take(&mut spans)));
                column = 0;
            }
        }
        if !spans.is_empty() {
            lines.push(Line::from(spans));
        }
        lines
    }
}

impl Component for RescheduleDialogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let confirm_style = if self.tentative().is_some() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Reschedule next session ")
            .title_bottom(
                Line::from(vec![
                    Span::raw(" Enter pick  Tab switch  x clear  "),
                    Span::styled("c confirm", confirm_style),
                    Span::raw("  Esc cancel "),
                ])
                .centered(),
            );
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [summary_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
        let summary = match self.tentative() {
            Some(value) => Line::from(vec![
                Span::styled("Selected: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    ScheduledReminder { date: value }.display(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                "No date selected",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(summary), summary_area);

        let [calendar_area, times_area] =
            Layout::horizontal([Constraint::Length(24), Constraint::Min(10)])
                .spacing(2)
                .areas(body_area);
        frame.render_widget(Paragraph::new(self.month_lines()), calendar_area);

        let tentative_slot = self.tentative().and_then(|dt| TimeSlot::of(&dt));
        let items: Vec<ListItem> = self
            .state
            .slots
            .iter()
            .map(|slot| {
                let mark = if Some(*slot) == tentative_slot { "✓ " } else { "  " };
                ListItem::new(format!("{mark}{}", slot.label()))
            })
            .collect();
        let highlight = if self.state.focus == PickerFocus::Times {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let list = List::new(items).highlight_style(highlight).block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Time "),
        );
        frame.render_stateful_widget(list, times_area, &mut self.state.time_list);
    }
}
