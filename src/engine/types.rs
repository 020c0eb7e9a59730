use std::path::PathBuf;

use crate::track::TrackId;

/// Commands accepted by the playback thread.
#[derive(Debug)]
pub enum EngineCmd {
    /// Swap the loaded source. Supersedes any previous load.
    Load { track: TrackId, path: PathBuf },
    Play,
    Pause,
    /// Absolute position in seconds.
    Seek(f64),
    /// Effective volume in `[0, 1]` (already mute-adjusted by the caller).
    SetVolume(f32),
    /// Release the engine's hold on the current source.
    Unload,
    Quit,
}

/// Events emitted by the playback thread, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MetadataReady { track: TrackId, duration: f64 },
    TimeUpdate { track: TrackId, position: f64 },
    Ended { track: TrackId },
    Error { track: Option<TrackId>, message: String },
    BufferingStart { track: TrackId },
    BufferingEnd { track: TrackId },
}

/// Failures reported synchronously by engine primitives. Asynchronous
/// failures (decode errors, device loss) arrive as `EngineEvent::Error`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no track loaded")]
    NothingLoaded,
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}", path.display())]
    Decode { path: PathBuf },
    #[error("no audio output device: {0}")]
    Device(String),
}

/// Clamp a volume value into `[0, 1]`.
pub fn clamp_unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}
