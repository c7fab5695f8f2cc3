//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the dashboard,
//! translates keyboard events into `core::Action` values and carries out the
//! `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Timers and the calendar stub run as tokio tasks that only ever send an
//! `Action` back over an `mpsc` channel; all state changes still happen on
//! the loop thread. Every task's `AbortHandle` is kept so teardown can cancel
//! it, and the audio slot is dropped before the terminal is restored.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (confetti, fade pending, calendar in flight, sample
//!   playing): draws every ~50ms.
//! - **Idle**: sleeps up to 250ms, only redraws on events or resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use chrono::NaiveDate;
use ratatui::layout::Rect;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::services::{AudioSlot, CalendarService, CommandAudioBackend, StubCalendar};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ChecklistState, ConfettiState, HistoryState, ProgressBarState, SetupCardState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which dashboard panel receives keys. Tab cycles in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Setup,
    Checklist,
    Reminder,
    History,
}

impl Panel {
    const ORDER: [Panel; 4] = [Panel::Setup, Panel::Checklist, Panel::Reminder, Panel::History];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Panel {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Panel {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Panel,
    pub setup: SetupCardState,
    pub checklist: ChecklistState,
    pub history: HistoryState,
    pub reschedule: ProgressBarState,
    pub confetti: ConfettiState,
}

impl TuiState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focus: Panel::Setup,
            setup: SetupCardState::new(),
            checklist: ChecklistState::new(),
            history: HistoryState::new(),
            reschedule: ProgressBarState::new(today),
            confetti: ConfettiState::new(),
        }
    }
}

/// Decide who gets `event`. Modals first, then notes editing, then the
/// focused panel. Only focus changes are applied here; everything else is
/// returned as an `Action`.
pub fn route_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if app.active_session.is_some() {
        return matches!(event, TuiEvent::Enter | TuiEvent::Escape).then_some(Action::EndSession);
    }
    if app.reminder.is_dialog_open() {
        return tui.reschedule.handle_event(event, app);
    }
    if app.notes.editing {
        return tui.history.handle_event(event, app);
    }
    match event {
        TuiEvent::NextPanel => {
            tui.focus = tui.focus.next();
            return None;
        }
        TuiEvent::PrevPanel => {
            tui.focus = tui.focus.prev();
            return None;
        }
        TuiEvent::Char('q') => return Some(Action::Quit),
        _ => {}
    }
    match tui.focus {
        Panel::Setup => tui.setup.handle_event(event, app),
        Panel::Checklist => tui.checklist.handle_event(event, app),
        Panel::Reminder => tui.reschedule.handle_event(event, app),
        Panel::History => tui.history.handle_event(event, app),
    }
}

/// Carries out effects. Owns the audio slot and every background task handle.
struct Runtime {
    tx: mpsc::Sender<Action>,
    config: ResolvedConfig,
    audio: AudioSlot,
    calendar: Arc<dyn CalendarService>,
    transition: Option<AbortHandle>,
    background: Vec<AbortHandle>,
}

impl Runtime {
    fn new(config: ResolvedConfig, tx: mpsc::Sender<Action>) -> Self {
        let backend = Arc::new(CommandAudioBackend::new(&config.audio_player));
        let calendar = Arc::new(StubCalendar::new(config.calendar_delay));
        info!(
            "Runtime ready (audio: {}, calendar: {})",
            config.audio_player,
            calendar.name()
        );
        Self {
            tx,
            audio: AudioSlot::new(backend),
            calendar,
            config,
            transition: None,
            background: Vec::new(),
        }
    }

    fn send(&self, action: Action) {
        if self.tx.send(action).is_err() {
            warn!("Failed to send action: receiver dropped");
        }
    }

    fn cancel_transition(&mut self) {
        if let Some(handle) = self.transition.take() {
            debug!("Aborting pending transition timer");
            handle.abort();
        }
    }

    /// Returns true when the loop should exit.
    fn execute(&mut self, effect: Effect, tui: &mut TuiState, area: Rect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::ScheduleTransition { id, delay } => {
                self.cancel_transition();
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if tx.send(Action::TransitionElapsed(id)).is_err() {
                        warn!("Failed to send transition {}: receiver dropped", id);
                    }
                });
                self.transition = Some(handle.abort_handle());
            }
            Effect::LeaveSetup => {
                self.cancel_transition();
                self.audio.stop();
            }
            Effect::PlayAudio(avatar) => {
                let path = self.config.sample_path(avatar).to_path_buf();
                match self.audio.play(avatar, &path) {
                    Ok(()) => info!("Playing {} sample from {}", avatar.id(), path.display()),
                    Err(e) => {
                        warn!("Could not play {}: {}", path.display(), e);
                        self.send(Action::AudioFailed(e));
                    }
                }
            }
            Effect::StopAudio => self.audio.stop(),
            Effect::Celebrate(burst) => {
                tui.confetti.launch(&burst, area, &mut rand::rng());
            }
            Effect::AddToCalendar(reminder) => {
                let calendar = self.calendar.clone();
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    let action = match calendar.add_event(reminder).await {
                        Ok(()) => Action::CalendarAdded,
                        Err(e) => {
                            warn!("Calendar failed: {}", e);
                            Action::CalendarFailed(e.to_string())
                        }
                    };
                    if tx.send(action).is_err() {
                        warn!("Failed to send calendar result: receiver dropped");
                    }
                });
                self.background.retain(|h| !h.is_finished());
                self.background.push(handle.abort_handle());
            }
        }
        false
    }

    /// Turn a sample that stopped on its own into the matching action.
    fn poll_audio(&mut self) -> Option<Action> {
        let (avatar, outcome) = self.audio.poll_finished()?;
        match outcome {
            Ok(()) => {
                debug!("{} sample finished", avatar.id());
                Some(Action::AudioFinished(avatar))
            }
            Err(e) => {
                warn!("{} sample failed: {}", avatar.id(), e);
                Some(Action::AudioFailed(e))
            }
        }
    }

    /// Cancel every pending task and release audio.
    fn shutdown(&mut self) {
        self.cancel_transition();
        for handle in self.background.drain(..) {
            handle.abort();
        }
        self.audio.stop();
        info!("Runtime shut down");
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Hide,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Show
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(app.today);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runtime = Runtime::new(config, tx);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut app, &mut tui, &mut runtime, &rx);

    runtime.shutdown();
    drop(runtime);
    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    runtime: &mut Runtime,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame
    let mut last_frame = Instant::now();

    loop {
        let area = terminal.get_frame().area();

        let animating = tui.confetti.is_active()
            || app.flow.is_transitioning()
            || app.calendar_pending
            || app.playing.is_some();

        if tui.confetti.is_active() {
            let dt = last_frame.elapsed().as_secs_f32();
            tui.confetti.tick(dt, area);
            needs_redraw = true;
        }
        last_frame = Instant::now();

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout)?;

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        let mut pending = first_event;
        while let Some(event) = pending.take() {
            needs_redraw = true;
            if event != TuiEvent::Resize
                && let Some(action) = route_event(&event, app, tui)
            {
                debug!("Dispatching {:?}", action);
                let effect = update(app, action);
                should_quit |= runtime.execute(effect, tui, area);
            }
            if should_quit {
                break;
            }
            pending = poll_event_immediate()?;
        }
        if should_quit {
            break;
        }

        if let Some(action) = runtime.poll_audio() {
            update(app, action);
            needs_redraw = true;
        }

        // Handle background task actions (timers, calendar, audio failures)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(app, action);
            if runtime.execute(effect, tui, area) {
                return Ok(());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checklist::ChecklistKey;
    use crate::core::setup::{Avatar, Stage};
    use crate::services::AudioError;
    use crate::test_support::test_app;

    fn drive(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> Vec<Effect> {
        let mut effects = Vec::new();
        for event in events {
            if let Some(action) = route_event(event, app, tui) {
                let effect = update(app, action);
                if let Effect::ScheduleTransition { id, .. } = effect {
                    update(app, Action::TransitionElapsed(id));
                }
                effects.push(effect);
            }
        }
        effects
    }

    #[test]
    fn test_panel_cycle() {
        assert_eq!(Panel::Setup.next(), Panel::Checklist);
        assert_eq!(Panel::History.next(), Panel::Setup);
        assert_eq!(Panel::Setup.prev(), Panel::History);
    }

    #[test]
    fn test_force_quit_always_quits() {
        let mut app = test_app();
        app.notes.toggle();
        let mut tui = TuiState::new(app.today);
        assert_eq!(
            route_event(&TuiEvent::ForceQuit, &app, &mut tui),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_q_types_while_editing_notes() {
        let mut app = test_app();
        app.notes.toggle();
        let mut tui = TuiState::new(app.today);
        assert_eq!(
            route_event(&TuiEvent::Char('q'), &app, &mut tui),
            Some(Action::NotesInput('q'))
        );
    }

    #[test]
    fn test_tab_moves_focus_to_checklist() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.today);
        let effects = drive(
            &mut app,
            &mut tui,
            &[TuiEvent::NextPanel, TuiEvent::Char(' ')],
        );
        assert_eq!(tui.focus, Panel::Checklist);
        assert!(matches!(effects.as_slice(), [Effect::Celebrate(_)]));
        assert!(app.checklist.is_completed(ChecklistKey::PracticeMindfulness));
    }

    #[test]
    fn test_session_modal_swallows_other_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.today);
        drive(
            &mut app,
            &mut tui,
            &[TuiEvent::Enter, TuiEvent::Enter, TuiEvent::Enter],
        );
        assert!(app.active_session.is_some());
        assert_eq!(route_event(&TuiEvent::NextPanel, &app, &mut tui), None);
        assert_eq!(
            route_event(&TuiEvent::Escape, &app, &mut tui),
            Some(Action::EndSession)
        );
    }

    #[test]
    fn test_voice_sample_effect_from_setup_panel() {
        let mut app = test_app();
        let mut tui = TuiState::new(app.today);
        let effects = drive(&mut app, &mut tui, &[TuiEvent::Right, TuiEvent::Char('p')]);
        assert_eq!(effects, vec![Effect::PlayAudio(Avatar::Female)]);
        assert_eq!(app.flow.stage(), Stage::SelectingAvatar);
    }

    #[tokio::test]
    async fn test_runtime_transition_timer_sends_action() {
        let (tx, rx) = mpsc::channel();
        let config = ResolvedConfig {
            transition_delay: Duration::from_millis(5),
            ..ResolvedConfig::default()
        };
        let mut runtime = Runtime::new(config, tx);
        let mut tui = TuiState::new(crate::test_support::test_today());

        let quit = runtime.execute(
            Effect::ScheduleTransition {
                id: 7,
                delay: Duration::from_millis(5),
            },
            &mut tui,
            Rect::new(0, 0, 80, 24),
        );
        assert!(!quit);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(rx.try_recv(), Ok(Action::TransitionElapsed(7)));
    }

    #[tokio::test]
    async fn test_runtime_leave_setup_cancels_timer() {
        let (tx, rx) = mpsc::channel();
        let mut runtime = Runtime::new(ResolvedConfig::default(), tx);
        let mut tui = TuiState::new(crate::test_support::test_today());
        let area = Rect::new(0, 0, 80, 24);

        runtime.execute(
            Effect::ScheduleTransition {
                id: 1,
                delay: Duration::from_millis(20),
            },
            &mut tui,
            area,
        );
        runtime.execute(Effect::LeaveSetup, &mut tui, area);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_runtime_missing_sample_reports_failure() {
        let (tx, rx) = mpsc::channel();
        let config = ResolvedConfig {
            male_sample: "/definitely/not/here.mp3".into(),
            ..ResolvedConfig::default()
        };
        let mut runtime = Runtime::new(config, tx);
        let mut tui = TuiState::new(crate::test_support::test_today());
        runtime.execute(
            Effect::PlayAudio(Avatar::Male),
            &mut tui,
            Rect::new(0, 0, 80, 24),
        );
        assert!(matches!(rx.try_recv(), Ok(Action::AudioFailed(_))));
        assert_eq!(runtime.audio.playing(), None);
    }

    #[tokio::test]
    async fn test_runtime_failed_player_becomes_audio_failure() {
        let (tx, _rx) = mpsc::channel();
        let config = ResolvedConfig {
            audio_player: "false".to_string(),
            male_sample: std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
            ..ResolvedConfig::default()
        };
        let mut runtime = Runtime::new(config, tx);
        let mut tui = TuiState::new(crate::test_support::test_today());
        let mut app = test_app();

        let effect = update(&mut app, Action::ToggleVoiceSample(Avatar::Male));
        runtime.execute(effect, &mut tui, Rect::new(0, 0, 80, 24));
        assert_eq!(runtime.audio.playing(), Some(Avatar::Male));

        let mut action = None;
        for _ in 0..200 {
            action = runtime.poll_audio();
            if action.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let Some(action) = action else {
            panic!("player never exited");
        };
        assert!(matches!(action, Action::AudioFailed(AudioError::Load(Some(_)))));

        update(&mut app, action);
        assert_eq!(app.playing, None);
        assert!(app.audio_error.as_deref().is_some_and(|m| m.starts_with("Failed to load audio")));
    }

    #[tokio::test]
    async fn test_runtime_celebrate_launches_confetti() {
        let (tx, _rx) = mpsc::channel();
        let mut runtime = Runtime::new(ResolvedConfig::default(), tx);
        let mut tui = TuiState::new(crate::test_support::test_today());
        runtime.execute(
            Effect::Celebrate(crate::services::Burst::task_completed()),
            &mut tui,
            Rect::new(0, 0, 80, 24),
        );
        assert_eq!(tui.confetti.particle_count(), 100);
        runtime.shutdown();
    }
}
