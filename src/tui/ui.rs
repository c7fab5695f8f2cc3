//! Top-level layout. Splits the frame into the banner, the two dashboard
//! columns and the status line, then stacks overlays on top.
//!
//! ```text
//! ┌ Your Progress ───────────────────────────────────────────┐
//! │ Next session: Oct 23, 2026 at 9:00 AM   [r] Reschedule   │
//! └──────────────────────────────────────────────────────────┘
//! ┌ Step 1 of 3 ─────────────────┐┌ Session History ─────────┐
//! │                              ││ ▸ Oct 16, 2026 ...       │
//! └──────────────────────────────┘│                          │
//! ┌ Between sessions (0/3) ──────┐│                          │
//! └──────────────────────────────┘└──────────────────────────┘
//! Advisor | Welcome back! | ←→ advisor  Enter choose
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    ChecklistCard, ChecklistState, Confetti, HistoryPanel, HistoryState, ProgressBar,
    ProgressBarState, RescheduleDialogView, SessionDialog, SetupCard, SetupCardState, StatusBar,
};
use crate::tui::{Panel, TuiState};

const CHECKLIST_HEIGHT: u16 = 12;

pub struct DashboardAreas {
    pub banner: Rect,
    pub setup: Rect,
    pub checklist: Rect,
    pub history: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> DashboardAreas {
    use Constraint::{Length, Min, Percentage};
    let [banner, main, status] = Layout::vertical([Length(3), Min(0), Length(1)]).areas(area);
    let [left, history] = Layout::horizontal([Percentage(55), Percentage(45)]).areas(main);
    let [setup, checklist] = Layout::vertical([Min(0), Length(CHECKLIST_HEIGHT)]).areas(left);
    DashboardAreas {
        banner,
        setup,
        checklist,
        history,
        status,
    }
}

/// Key hints for whatever currently receives input.
pub fn hint(app: &App, tui: &TuiState) -> &'static str {
    if app.active_session.is_some() {
        return "Enter end session";
    }
    if app.reminder.is_dialog_open() {
        return ProgressBarState::DIALOG_HINT;
    }
    match tui.focus {
        Panel::Reminder => ProgressBarState::BANNER_HINT,
        Panel::Setup => SetupCardState::hint(app.flow.stage()),
        Panel::Checklist => ChecklistState::HINT,
        Panel::History => HistoryState::hint(app),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let areas = layout(frame.area());
    let focus = tui.focus;

    ProgressBar::new(
        &app.reminder.confirmed,
        app.calendar_pending,
        focus == Panel::Reminder,
    )
    .render(frame, areas.banner);

    SetupCard::new(&mut tui.setup, &app.flow, app.playing, focus == Panel::Setup)
        .render(frame, areas.setup);

    ChecklistCard::new(&tui.checklist, &app.checklist, focus == Panel::Checklist)
        .render(frame, areas.checklist);

    HistoryPanel::new(
        &mut tui.history,
        &app.history,
        &app.notes,
        focus == Panel::History,
    )
    .render(frame, areas.history);

    StatusBar::new(
        &app.status_message,
        app.audio_error.as_deref(),
        hint(app, tui),
    )
    .render(frame, areas.status);

    if app.reminder.is_dialog_open() {
        RescheduleDialogView::new(&mut tui.reschedule, &app.reminder, app.today)
            .render(frame, frame.area());
    }

    if let Some(session) = &app.active_session {
        SessionDialog::new(session).render(frame, frame.area());
    }

    if tui.confetti.is_active() {
        Confetti::new(&tui.confetti).render(frame, frame.area());
    }
}
