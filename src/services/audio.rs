//! # Voice Sample Playback
//!
//! Audio is an injected capability: an [`AudioBackend`] turns a file path into a
//! [`Playback`] handle. The dashboard never holds more than one handle; that
//! rule lives in [`AudioSlot`], which stops the previous sample before starting
//! the next and stops whatever is playing when it is dropped.
//!
//! The shipped backend shells out to a player command (`ffplay` by default),
//! one child process per sample.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::setup::Avatar;

/// Why a sample could not be heard. Both variants are recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// The sample could not be loaded. Carries the reason when one is known.
    Load(Option<String>),
    /// The sample loaded but playback could not start.
    Play(String),
}

impl AudioError {
    /// Short message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AudioError::Load(Some(reason)) => format!("Failed to load audio: {reason}"),
            AudioError::Load(None) => {
                "Failed to load audio. Please check the file path and try again.".to_string()
            }
            AudioError::Play(_) => "Failed to play audio. Please try again.".to_string(),
        }
    }
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::Load(Some(reason)) => write!(f, "audio load error: {reason}"),
            AudioError::Load(None) => write!(f, "audio load error"),
            AudioError::Play(reason) => write!(f, "audio playback error: {reason}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// A loaded sample.
pub trait Playback: Send {
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stop and release the underlying resource. Idempotent.
    fn pause(&mut self);

    /// `None` while the sample is still playing. Once it has stopped on its own,
    /// `Some(Ok(()))` for a clean end and `Some(Err(_))` when the player failed.
    /// A sample that was never started reports a clean end.
    fn poll_end(&mut self) -> Option<Result<(), AudioError>>;
}

pub trait AudioBackend: Send + Sync {
    fn name(&self) -> &str;

    fn load(&self, path: &Path) -> Result<Box<dyn Playback>, AudioError>;
}

/// Plays samples through an external command, e.g. `ffplay -nodisp -autoexit`.
pub struct CommandAudioBackend {
    program: String,
    args: Vec<String>,
}

impl CommandAudioBackend {
    /// Build from a whitespace-separated command line. The sample path is
    /// appended as the last argument.
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }
}

impl AudioBackend for CommandAudioBackend {
    fn name(&self) -> &str {
        &self.program
    }

    fn load(&self, path: &Path) -> Result<Box<dyn Playback>, AudioError> {
        let metadata =
            std::fs::metadata(path).map_err(|e| AudioError::Load(Some(e.to_string())))?;
        if !metadata.is_file() {
            return Err(AudioError::Load(None));
        }
        if self.program.is_empty() {
            return Err(AudioError::Load(Some("no audio player configured".to_string())));
        }
        debug!("Loaded sample {}", path.display());
        Ok(Box::new(CommandPlayback {
            program: self.program.clone(),
            args: self.args.clone(),
            path: path.to_path_buf(),
            child: None,
        }))
    }
}

struct CommandPlayback {
    program: String,
    args: Vec<String>,
    path: PathBuf,
    child: Option<Child>,
}

impl Playback for CommandPlayback {
    fn play(&mut self) -> Result<(), AudioError> {
        self.pause();
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AudioError::Play(format!("{}: {}", self.program, e)))?;
        info!("Playing {} via {} (pid {})", self.path.display(), self.program, child.id());
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("Player already exited: {}", e);
            }
            if let Err(e) = child.wait() {
                warn!("Failed to reap audio player: {}", e);
            }
        }
    }

    fn poll_end(&mut self) -> Option<Result<(), AudioError>> {
        let Some(child) = self.child.as_mut() else {
            return Some(Ok(()));
        };
        match child.try_wait() {
            Ok(None) => None,
            Ok(Some(status)) if status.success() => Some(Ok(())),
            Ok(Some(status)) => Some(Err(AudioError::Load(Some(format!(
                "{} exited with {}",
                self.program, status
            ))))),
            Err(e) => Some(Err(AudioError::Play(format!("{}: {}", self.program, e)))),
        }
    }
}

impl Drop for CommandPlayback {
    fn drop(&mut self) {
        self.pause();
    }
}

/// Holds at most one playing sample.
pub struct AudioSlot {
    backend: Arc<dyn AudioBackend>,
    current: Option<(Avatar, Box<dyn Playback>)>,
}

impl AudioSlot {
    pub fn new(backend: Arc<dyn AudioBackend>) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    pub fn playing(&self) -> Option<Avatar> {
        self.current.as_ref().map(|(avatar, _)| *avatar)
    }

    /// Stop whatever is playing, then load and start `path` for `avatar`.
    pub fn play(&mut self, avatar: Avatar, path: &Path) -> Result<(), AudioError> {
        self.stop();
        let mut playback = self.backend.load(path)?;
        playback.play()?;
        self.current = Some((avatar, playback));
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some((avatar, mut playback)) = self.current.take() {
            debug!("Stopping {} sample", avatar.id());
            playback.pause();
        }
    }

    /// Release a sample that stopped on its own, reporting whose it was and
    /// whether the player exited cleanly.
    pub fn poll_finished(&mut self) -> Option<(Avatar, Result<(), AudioError>)> {
        let (avatar, playback) = self.current.as_mut()?;
        let outcome = playback.poll_end()?;
        let avatar = *avatar;
        self.current = None;
        Some((avatar, outcome))
    }
}

impl Drop for AudioSlot {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingAudio, RecordingAudio};

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AudioError::Load(Some("not found".into())).user_message(),
            "Failed to load audio: not found"
        );
        assert_eq!(
            AudioError::Load(None).user_message(),
            "Failed to load audio. Please check the file path and try again."
        );
        assert_eq!(
            AudioError::Play("boom".into()).user_message(),
            "Failed to play audio. Please try again."
        );
    }

    #[test]
    fn test_command_backend_missing_file_is_load_error() {
        let backend = CommandAudioBackend::new("ffplay -nodisp");
        let result = backend.load(Path::new("/definitely/not/here.mp3"));
        assert!(matches!(result, Err(AudioError::Load(Some(_)))));
    }

    #[test]
    fn test_command_backend_directory_is_load_error() {
        let backend = CommandAudioBackend::new("ffplay");
        let result = backend.load(Path::new(env!("CARGO_MANIFEST_DIR")));
        assert!(matches!(result, Err(AudioError::Load(None))));
    }

    #[test]
    fn test_command_backend_unknown_program_is_play_error() {
        let backend = CommandAudioBackend::new("advisor-no-such-player --flag");
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let mut playback = backend.load(&manifest).unwrap();
        assert!(matches!(playback.play(), Err(AudioError::Play(_))));
        assert_eq!(playback.poll_end(), Some(Ok(())));
    }

    /// Wait for the player child to exit, polling like the event loop does.
    fn wait_for_end(slot: &mut AudioSlot) -> Option<(Avatar, Result<(), AudioError>)> {
        for _ in 0..200 {
            if let Some(end) = slot.poll_finished() {
                return Some(end);
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_player_exit_failure_is_reported() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let mut slot = AudioSlot::new(Arc::new(CommandAudioBackend::new("false")));
        slot.play(Avatar::Male, &manifest).unwrap();

        let (avatar, outcome) = wait_for_end(&mut slot).expect("player never exited");
        assert_eq!(avatar, Avatar::Male);
        assert!(matches!(outcome, Err(AudioError::Load(Some(_)))));
        assert_eq!(slot.playing(), None);
    }

    #[test]
    fn test_player_clean_exit_is_normal_end() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let mut slot = AudioSlot::new(Arc::new(CommandAudioBackend::new("true")));
        slot.play(Avatar::Female, &manifest).unwrap();

        assert_eq!(wait_for_end(&mut slot), Some((Avatar::Female, Ok(()))));
    }

    #[test]
    fn test_slot_replaces_previous_sample() {
        let backend = Arc::new(RecordingAudio::default());
        let mut slot = AudioSlot::new(backend.clone());

        slot.play(Avatar::Male, Path::new("male.mp3")).unwrap();
        slot.play(Avatar::Female, Path::new("female.mp3")).unwrap();

        assert_eq!(slot.playing(), Some(Avatar::Female));
        // The first sample was paused before the second started
        assert_eq!(backend.live(), 1);
        assert_eq!(backend.started(), 2);
    }

    #[test]
    fn test_slot_releases_on_drop() {
        let backend = Arc::new(RecordingAudio::default());
        {
            let mut slot = AudioSlot::new(backend.clone());
            slot.play(Avatar::Male, Path::new("male.mp3")).unwrap();
            assert_eq!(backend.live(), 1);
        }
        assert_eq!(backend.live(), 0);
    }

    #[test]
    fn test_slot_failure_leaves_nothing_playing() {
        let mut slot = AudioSlot::new(Arc::new(FailingAudio::on_play()));
        assert!(slot.play(Avatar::Female, Path::new("female.mp3")).is_err());
        assert_eq!(slot.playing(), None);
    }

    #[test]
    fn test_poll_finished_reports_once() {
        let backend = Arc::new(RecordingAudio::default());
        let mut slot = AudioSlot::new(backend.clone());
        slot.play(Avatar::Male, Path::new("male.mp3")).unwrap();
        assert_eq!(slot.poll_finished(), None);

        backend.finish_all();
        assert_eq!(slot.poll_finished(), Some((Avatar::Male, Ok(()))));
        assert_eq!(slot.poll_finished(), None);
        assert_eq!(slot.playing(), None);
    }
}
