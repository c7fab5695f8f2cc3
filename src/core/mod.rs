//! # Core Application Logic
//!
//! This module contains the advisor dashboard's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   Audio    │      │  Calendar  │
//!     │  Adapter   │      │  backend   │      │   (stub)   │
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all dashboard state in one place
//! - [`action`]: The `Action` enum, `Effect` enum and `update()` reducer
//! - [`setup`]: Avatar → topic → duration wizard
//! - [`history`]: Past sessions with sorting, paging and tabs
//! - [`content`]: Static copy shown in cards and tabs
//! - [`checklist`], [`notes`], [`reminder`]: the smaller cards
//! - [`config`]: Config file, env and CLI resolution

pub mod action;
pub mod checklist;
pub mod config;
pub mod content;
pub mod history;
pub mod notes;
pub mod reminder;
pub mod setup;
pub mod state;

pub use action::{Action, Effect, update};
pub use state::App;
