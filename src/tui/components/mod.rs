//! # TUI Components
//!
//! This module contains all UI components for the dashboard.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `StatusBar`: Bottom line with the status message and key hints
//! - `SessionTabs`: The four-tab strip of an expanded session
//! - `SessionDialog`: "Session in Progress" modal
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! A `XState` lives in `TuiState` and handles events; an `X<'a>` wrapper is
//! built each frame from borrowed state and props:
//! - `SetupCardState` / `SetupCard`: three-stage session wizard
//! - `ChecklistState` / `ChecklistCard`: between-session tasks
//! - `HistoryState` / `HistoryPanel`: scrollable session history
//! - `ProgressBarState` / `ProgressBar` + `RescheduleDialogView`
//! - `ConfettiState` / `Confetti`: celebration particles
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`
//! while rendering. Event handlers may read `App` but only return `Action`s.
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! ChecklistCard::new(&tui.checklist, &app.checklist, focused).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── status_bar.rs      (bottom status line)
//! ├── progress_bar.rs    (next-session banner + reschedule dialog)
//! ├── setup_card.rs      (avatar → topic → duration)
//! ├── checklist.rs       (between-session tasks)
//! ├── history.rs         (session history with tabs)
//! ├── session_tabs.rs    (tab strip)
//! ├── session_dialog.rs  (active session modal)
//! └── confetti.rs        (celebration overlay)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod checklist;
pub mod confetti;
pub mod history;
pub mod progress_bar;
pub mod session_dialog;
pub mod session_tabs;
pub mod setup_card;
pub mod status_bar;

pub use checklist::{ChecklistCard, ChecklistState};
pub use confetti::{Confetti, ConfettiState};
pub use history::{HistoryPanel, HistoryState};
pub use progress_bar::{ProgressBar, ProgressBarState, RescheduleDialogView};
pub use session_dialog::SessionDialog;
pub use session_tabs::SessionTabs;
pub use setup_card::{SetupCard, SetupCardState};
pub use status_bar::StatusBar;

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
