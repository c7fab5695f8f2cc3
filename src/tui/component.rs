use ratatui::Frame;
use ratatui::layout::Rect;

use crate::core::state::App;
use crate::tui::event::TuiEvent;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields borrowed from `App`).
/// - They may hold presentation state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` so components can keep scroll
/// offsets and cursor clamps in step with what was actually drawn.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Presentation state that reacts to terminal events.
///
/// Handlers read the core state but never mutate it. Anything that changes
/// the dashboard comes back as `Self::Event` for the loop to dispatch.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &TuiEvent, app: &App) -> Option<Self::Event>;
}
