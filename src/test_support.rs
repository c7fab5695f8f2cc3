//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::services::{AudioBackend, AudioError, Playback};

/// Fixed "today" so seeded dates and reminders are deterministic.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// Creates a test App with default configuration, dated [`test_today`].
pub fn test_app() -> App {
    App::new(test_today(), &ResolvedConfig::default())
}

#[derive(Default)]
struct Recorder {
    started: AtomicUsize,
    live: AtomicUsize,
    /// Playbacks with an index below this report finished.
    finished_below: AtomicUsize,
}

/// Backend that plays nothing but counts what it was asked to do.
#[derive(Default)]
pub struct RecordingAudio {
    recorder: Arc<Recorder>,
}

impl RecordingAudio {
    /// Samples currently started and not yet paused.
    pub fn live(&self) -> usize {
        self.recorder.live.load(Ordering::SeqCst)
    }

    /// Samples started over the backend's lifetime.
    pub fn started(&self) -> usize {
        self.recorder.started.load(Ordering::SeqCst)
    }

    /// Make every sample started so far reach its end.
    pub fn finish_all(&self) {
        let started = self.started();
        self.recorder.finished_below.store(started, Ordering::SeqCst);
    }
}

impl AudioBackend for RecordingAudio {
    fn name(&self) -> &str {
        "recording"
    }

    fn load(&self, _path: &Path) -> Result<Box<dyn Playback>, AudioError> {
        Ok(Box::new(RecordedPlayback {
            recorder: self.recorder.clone(),
            index: None,
        }))
    }
}

struct RecordedPlayback {
    recorder: Arc<Recorder>,
    index: Option<usize>,
}

impl Playback for RecordedPlayback {
    fn play(&mut self) -> Result<(), AudioError> {
        let index = self.recorder.started.fetch_add(1, Ordering::SeqCst);
        self.recorder.live.fetch_add(1, Ordering::SeqCst);
        self.index = Some(index);
        Ok(())
    }

    fn pause(&mut self) {
        if self.index.take().is_some() {
            self.recorder.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn poll_end(&mut self) -> Option<Result<(), AudioError>> {
        match self.index {
            Some(index) if index >= self.recorder.finished_below.load(Ordering::SeqCst) => None,
            _ => Some(Ok(())),
        }
    }
}

impl Drop for RecordedPlayback {
    fn drop(&mut self) {
        self.pause();
    }
}

/// Backend that fails at a chosen step.
pub struct FailingAudio {
    error: AudioError,
    at_load: bool,
}

impl FailingAudio {
    pub fn on_load() -> Self {
        Self {
            error: AudioError::Load(None),
            at_load: true,
        }
    }

    pub fn on_play() -> Self {
        Self {
            error: AudioError::Play("device busy".to_string()),
            at_load: false,
        }
    }
}

impl AudioBackend for FailingAudio {
    fn name(&self) -> &str {
        "failing"
    }

    fn load(&self, _path: &Path) -> Result<Box<dyn Playback>, AudioError> {
        if self.at_load {
            return Err(self.error.clone());
        }
        Ok(Box::new(FailedPlayback(self.error.clone())))
    }
}

struct FailedPlayback(AudioError);

impl Playback for FailedPlayback {
    fn play(&mut self) -> Result<(), AudioError> {
        Err(self.0.clone())
    }

    fn pause(&mut self) {}

    fn poll_end(&mut self) -> Option<Result<(), AudioError>> {
        Some(Ok(()))
    }
}
