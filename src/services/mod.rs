//! # Injected Capabilities
//!
//! Side-effecting collaborators the dashboard talks to through traits:
//!
//! - [`audio`]: voice sample playback (`AudioBackend`, `AudioSlot`)
//! - [`calendar`]: "add to calendar" (`CalendarService`, currently a stub)
//! - [`celebration`]: parameters for the confetti burst
//!
//! The core never calls these directly. It returns an `Effect` and the TUI
//! adapter invokes the capability.

pub mod audio;
pub mod calendar;
pub mod celebration;

pub use audio::{AudioBackend, AudioError, AudioSlot, CommandAudioBackend, Playback};
pub use calendar::{CalendarError, CalendarService, StubCalendar};
pub use celebration::{Burst, Rgb};
