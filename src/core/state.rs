//! # Application State
//!
//! Core dashboard state. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── today: NaiveDate              // clock reading taken at startup
//! ├── flow: SetupFlow               // avatar → topic → duration wizard
//! ├── active_session: Option        // the "Session in Progress" modal
//! ├── history: HistoryView          // past sessions, sort, paging, expansion, tab
//! ├── checklist: Checklist          // between-session tasks
//! ├── notes: NotesEditor            // personal notes
//! ├── reminder: Reminder            // next session + reschedule dialog
//! ├── playing: Option<Avatar>       // voice sample currently playing
//! ├── audio_error: Option<String>   // last audio failure, user-facing
//! ├── calendar_pending: bool        // "add to calendar" in flight
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::core::checklist::Checklist;
use crate::core::config::ResolvedConfig;
use crate::core::history::{HistoryView, seed_sessions};
use crate::core::notes::NotesEditor;
use crate::core::reminder::{Reminder, ScheduledReminder};
use crate::core::setup::{ActiveSession, Avatar, SetupFlow};

pub struct App {
    pub today: NaiveDate,
    pub flow: SetupFlow,
    pub active_session: Option<ActiveSession>,
    pub history: HistoryView,
    pub checklist: Checklist,
    pub notes: NotesEditor,
    pub reminder: Reminder,
    pub playing: Option<Avatar>,
    pub audio_error: Option<String>,
    pub calendar_pending: bool,
    pub status_message: String,
    /// Length of the fade between setup stages.
    pub transition_delay: Duration,
    /// Fire a confetti burst when a task is completed.
    pub celebrate: bool,
    /// Clear avatar/topic when the active session is closed.
    pub reset_on_session_end: bool,
}

impl App {
    pub fn new(today: NaiveDate, config: &ResolvedConfig) -> Self {
        Self {
            today,
            flow: SetupFlow::new(config.default_duration),
            active_session: None,
            history: HistoryView::new(seed_sessions(today)),
            checklist: Checklist::default(),
            notes: NotesEditor::default(),
            reminder: Reminder::new(ScheduledReminder::default_from(today)),
            playing: None,
            audio_error: None,
            calendar_pending: false,
            status_message: String::from("Welcome back!"),
            transition_delay: config.transition_delay,
            celebrate: config.celebrate,
            reset_on_session_end: config.reset_on_session_end,
        }
    }

    /// App dated from the local clock.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(Local::now().date_naive(), config)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::history::Tab;
    use crate::core::setup::Stage;
    use crate::test_support::{test_app, test_today};

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome back!");
        assert_eq!(app.flow.stage(), Stage::SelectingAvatar);
        assert_eq!(app.flow.duration.minutes(), 30);
        assert!(app.active_session.is_none());
        assert_eq!(app.history.len(), 6);
        assert_eq!(app.history.selected_tab, Tab::Overview);
        assert_eq!(app.history.expanded, None);
        assert!(app.playing.is_none());
        assert_eq!(app.reminder.confirmed.date.date(), test_today() + chrono::Days::new(7));
    }
}
