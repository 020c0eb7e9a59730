use serde::Deserialize;

use crate::session::RepeatMode;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/quaver/config.toml` or `~/.config/quaver/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `QUAVER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub ingest: IngestSettings,
    pub controls: ControlsSettings,
    pub engine: EngineSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackSettings::default(),
            ingest: IngestSettings::default(),
            controls: ControlsSettings::default(),
            engine: EngineSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Default repeat mode.
    pub repeat_mode: RepeatModeSetting,
    /// Initial volume in `[0.0, 1.0]`.
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            repeat_mode: RepeatModeSetting::Off,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatModeSetting {
    #[serde(alias = "none", alias = "no-repeat", alias = "no_repeat")]
    Off,
    #[serde(alias = "repeat-one", alias = "repeat_one")]
    One,
    #[serde(alias = "repeat-all", alias = "repeat_all")]
    All,
}

impl RepeatModeSetting {
    pub fn to_mode(self) -> RepeatMode {
        match self {
            RepeatModeSetting::Off => RepeatMode::Off,
            RepeatModeSetting::One => RepeatMode::One,
            RepeatModeSetting::All => RepeatMode::All,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Largest file accepted into the playlist, in megabytes.
    pub max_file_size_mb: u64,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl IngestSettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "aac".into(),
                "m4a".into(),
            ],
            max_file_size_mb: 50,
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied per `+` / `-` press, in `[0.0, 1.0]`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Interval between engine position reports (milliseconds, floor 50).
    pub tick_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self { tick_ms: 250 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the library list cursor follows the playing track.
    pub follow_playback: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ quaver ~ ".to_string(),
            follow_playback: true,
        }
    }
}
