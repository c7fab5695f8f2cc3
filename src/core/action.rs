//! # Actions
//!
//! Everything that can happen on the dashboard becomes an `Action`.
//! User picks Sarah? That's `Action::SelectAvatar(Avatar::Female)`.
//! The fade timer fires? That's `Action::TransitionElapsed(id)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! adapter should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(&mut app, action), expected)`.

use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::core::checklist::ChecklistKey;
use crate::core::history::Tab;
use crate::core::reminder::{ScheduledReminder, TimeSlot};
use crate::core::setup::{Avatar, Topic};
use crate::core::state::App;
use crate::services::{AudioError, Burst};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,

    // Setup flow
    SelectAvatar(Avatar),
    ChooseTopic(Topic),
    Back,
    ExitSetup,
    TransitionElapsed(u64),
    IncreaseDuration,
    DecreaseDuration,
    StartSession,
    EndSession,

    // Voice samples
    ToggleVoiceSample(Avatar),
    AudioFailed(AudioError),
    AudioFinished(Avatar),

    // Session history
    ToggleSort,
    ToggleVisibleSessions,
    ToggleSession(u32),
    SelectTab(Tab),

    // Checklist
    ToggleTask(ChecklistKey),

    // Notes
    ToggleNotesEditing,
    NotesInput(char),
    NotesPaste(String),
    NotesBackspace,

    // Reminder
    OpenReschedule,
    PickDate(NaiveDate),
    PickTime(TimeSlot),
    ClearTentativeDate,
    ConfirmReschedule,
    CancelReschedule,
    AddToCalendar,
    CalendarAdded,
    CalendarFailed(String),
}

/// I/O requested by `update()`, carried out by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Send `Action::TransitionElapsed(id)` after `delay`.
    ScheduleTransition { id: u64, delay: Duration },
    /// The setup flow was left: abort any pending fade timer and release audio.
    LeaveSetup,
    PlayAudio(Avatar),
    StopAudio,
    Celebrate(Burst),
    AddToCalendar(ScheduledReminder),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Quit => Effect::Quit,

        Action::SelectAvatar(avatar) => match app.flow.select_avatar(avatar) {
            Some(t) => Effect::ScheduleTransition {
                id: t.id,
                delay: app.transition_delay,
            },
            None => Effect::None,
        },
        Action::ChooseTopic(topic) => match app.flow.choose_topic(topic) {
            Some(t) => Effect::ScheduleTransition {
                id: t.id,
                delay: app.transition_delay,
            },
            None => Effect::None,
        },
        Action::Back => match app.flow.back() {
            Some(t) => Effect::ScheduleTransition {
                id: t.id,
                delay: app.transition_delay,
            },
            None => Effect::None,
        },
        Action::TransitionElapsed(id) => {
            if !app.flow.complete_transition(id) {
                debug!("Ignoring stale transition {}", id);
            }
            Effect::None
        }
        Action::ExitSetup => {
            if app.flow.exit() {
                app.playing = None;
                Effect::LeaveSetup
            } else {
                Effect::None
            }
        }
        Action::IncreaseDuration => {
            app.flow.duration.increment();
            Effect::None
        }
        Action::DecreaseDuration => {
            app.flow.duration.decrement();
            Effect::None
        }
        Action::StartSession => match app.flow.start() {
            Some(active) => {
                info!(
                    "Session started with {} about {} ({} min)",
                    active.avatar.advisor_name(),
                    active.topic.label(),
                    active.duration.minutes()
                );
                app.active_session = Some(active);
                app.playing = None;
                Effect::LeaveSetup
            }
            None => Effect::None,
        },
        Action::EndSession => {
            if app.active_session.take().is_some() {
                info!("Session ended");
                if app.reset_on_session_end {
                    app.flow.setup.clear();
                }
            }
            Effect::None
        }

        Action::ToggleVoiceSample(avatar) => {
            app.audio_error = None;
            if app.playing == Some(avatar) {
                app.playing = None;
                Effect::StopAudio
            } else {
                app.playing = Some(avatar);
                Effect::PlayAudio(avatar)
            }
        }
        Action::AudioFailed(err) => {
            warn!("Voice sample failed: {}", err);
            app.playing = None;
            app.audio_error = Some(err.user_message());
            Effect::None
        }
        Action::AudioFinished(avatar) => {
            if app.playing == Some(avatar) {
                app.playing = None;
            }
            Effect::None
        }

        Action::ToggleSort => {
            app.history.toggle_sort();
            Effect::None
        }
        Action::ToggleVisibleSessions => {
            if app.history.can_expand_list() {
                app.history.toggle_visible();
            }
            Effect::None
        }
        Action::ToggleSession(id) => {
            app.history.toggle_expanded(id);
            Effect::None
        }
        Action::SelectTab(tab) => {
            app.history.select_tab(tab);
            Effect::None
        }

        Action::ToggleTask(key) => {
            let completed = app.checklist.toggle(key);
            if completed && app.celebrate {
                Effect::Celebrate(Burst::task_completed())
            } else {
                Effect::None
            }
        }

        Action::ToggleNotesEditing => {
            app.notes.toggle();
            app.status_message = if app.notes.editing {
                "Editing notes".to_string()
            } else {
                "Notes saved".to_string()
            };
            Effect::None
        }
        Action::NotesInput(c) => {
            app.notes.insert(c);
            Effect::None
        }
        Action::NotesPaste(text) => {
            app.notes.insert_str(&text);
            Effect::None
        }
        Action::NotesBackspace => {
            app.notes.backspace();
            Effect::None
        }

        Action::OpenReschedule => {
            app.reminder.open();
            Effect::None
        }
        Action::PickDate(date) => {
            app.reminder.pick_date(date);
            Effect::None
        }
        Action::PickTime(slot) => {
            app.reminder.pick_time(slot, app.today);
            Effect::None
        }
        Action::ClearTentativeDate => {
            app.reminder.clear_tentative();
            Effect::None
        }
        Action::ConfirmReschedule => {
            if app.reminder.confirm() {
                app.status_message =
                    format!("Next session moved to {}", app.reminder.confirmed.display());
            }
            Effect::None
        }
        Action::CancelReschedule => {
            app.reminder.cancel();
            Effect::None
        }
        Action::AddToCalendar => {
            if app.calendar_pending {
                return Effect::None;
            }
            app.calendar_pending = true;
            app.status_message = "Adding to calendar...".to_string();
            Effect::AddToCalendar(app.reminder.confirmed)
        }
        Action::CalendarAdded => {
            app.calendar_pending = false;
            app.status_message = "Added to calendar".to_string();
            Effect::None
        }
        Action::CalendarFailed(msg) => {
            app.calendar_pending = false;
            app.status_message = format!("Calendar: {msg}");
            Effect::None
        }
    }
}
