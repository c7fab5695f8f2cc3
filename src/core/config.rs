//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.advisor/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::setup::{Avatar, SessionDuration};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AdvisorConfig {
    #[serde(default)]
    pub setup: SetupConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub celebration: CelebrationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SetupConfig {
    pub default_duration: Option<u32>,
    pub transition_ms: Option<u64>,
    pub reset_on_session_end: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AudioConfig {
    pub player: Option<String>,
    pub male_sample: Option<String>,
    pub female_sample: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CalendarConfig {
    pub delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CelebrationConfig {
    pub enabled: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSITION_MS: u64 = 300;
pub const DEFAULT_CALENDAR_DELAY_MS: u64 = 1000;
pub const DEFAULT_AUDIO_PLAYER: &str = "ffplay -nodisp -autoexit -loglevel quiet";
pub const DEFAULT_MALE_SAMPLE: &str = "audio/male-voice-sample.mp3";
pub const DEFAULT_FEMALE_SAMPLE: &str = "audio/female-voice-sample.mp3";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub default_duration: SessionDuration,
    pub transition_delay: Duration,
    pub reset_on_session_end: bool,
    pub audio_player: String,
    pub male_sample: PathBuf,
    pub female_sample: PathBuf,
    pub calendar_delay: Duration,
    pub celebrate: bool,
}

impl ResolvedConfig {
    pub fn sample_path(&self, avatar: Avatar) -> &Path {
        match avatar {
            Avatar::Male => &self.male_sample,
            Avatar::Female => &self.female_sample,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve_with(&AdvisorConfig::default(), &CliOverrides::default(), |_| None, None)
    }
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub duration: Option<u32>,
    pub no_celebrate: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.advisor/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".advisor"))
}

/// Returns the path to `~/.advisor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.advisor/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AdvisorConfig::default()`.
pub fn load_config() -> Result<AdvisorConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path, true),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(AdvisorConfig::default())
        }
    }
}

/// Load config from an explicit path. A missing file yields the defaults;
/// with `generate` set, a commented-out template is written there first.
pub fn load_config_from(path: &Path, generate: bool) -> Result<AdvisorConfig, ConfigError> {
    if !path.exists() {
        if generate {
            info!("No config file found, generating default at {}", path.display());
            generate_default_config(path);
        }
        return Ok(AdvisorConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AdvisorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Advisor Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [setup]
# default_duration = 30              # minutes, 5..=60 in steps of 5
# transition_ms = 300                # fade between setup stages
# reset_on_session_end = false       # clear avatar/topic when a session ends

# [audio]
# player = "ffplay -nodisp -autoexit -loglevel quiet"
# male_sample = "audio/male-voice-sample.mp3"     # relative to ~/.advisor/
# female_sample = "audio/female-voice-sample.mp3"

# [calendar]
# delay_ms = 1000                    # simulated "add to calendar" latency

# [celebration]
# enabled = true                     # confetti when a task is completed
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AdvisorConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(
        config,
        cli,
        |name| std::env::var(name).ok(),
        config_dir().as_deref(),
    )
}

/// Resolution with an injectable environment lookup and sample base directory.
fn resolve_with(
    config: &AdvisorConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    base_dir: Option<&Path>,
) -> ResolvedConfig {
    let env_u64 = |name: &str| env(name).and_then(|v| v.trim().parse::<u64>().ok());

    // Duration: CLI → env → config → default
    let duration = cli
        .duration
        .or_else(|| env_u64("ADVISOR_DURATION").map(|v| v as u32))
        .or(config.setup.default_duration)
        .unwrap_or(SessionDuration::DEFAULT as u32);

    let transition_ms = env_u64("ADVISOR_TRANSITION_MS")
        .or(config.setup.transition_ms)
        .unwrap_or(DEFAULT_TRANSITION_MS);

    let calendar_delay_ms = env_u64("ADVISOR_CALENDAR_DELAY_MS")
        .or(config.calendar.delay_ms)
        .unwrap_or(DEFAULT_CALENDAR_DELAY_MS);

    let audio_player = env("ADVISOR_AUDIO_PLAYER")
        .or_else(|| config.audio.player.clone())
        .unwrap_or_else(|| DEFAULT_AUDIO_PLAYER.to_string());

    // Celebration: CLI can only switch it off
    let celebrate = !cli.no_celebrate
        && env("ADVISOR_CELEBRATE")
            .map(|v| parse_flag(&v))
            .or(config.celebration.enabled)
            .unwrap_or(true);

    let sample = |configured: &Option<String>, default: &str| {
        let raw = configured.as_deref().unwrap_or(default);
        resolve_sample_path(raw, base_dir)
    };

    ResolvedConfig {
        default_duration: SessionDuration::new(duration),
        transition_delay: Duration::from_millis(transition_ms),
        reset_on_session_end: config.setup.reset_on_session_end.unwrap_or(false),
        audio_player,
        male_sample: sample(&config.audio.male_sample, DEFAULT_MALE_SAMPLE),
        female_sample: sample(&config.audio.female_sample, DEFAULT_FEMALE_SAMPLE),
        calendar_delay: Duration::from_millis(calendar_delay_ms),
        celebrate,
    }
}

/// Relative sample paths are taken from the config directory.
fn resolve_sample_path(raw: &str, base_dir: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(raw);
    match base_dir {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
