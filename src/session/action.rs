use crate::track::{TrackDescriptor, TrackId};

use super::state::RepeatMode;

/// Everything that can change session state: user intents and engine events
/// alike flow through this one channel, in dispatch order.
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Replace the playlist wholesale; the first track becomes current.
    SetPlaylist(Vec<TrackDescriptor>),
    /// Append a track; no-op when its id is already present.
    AddTrack(TrackDescriptor),
    /// Remove the entry at an index; see the reducer for current-track rules.
    RemoveTrack(usize),
    /// Make the track with this id current and restart from zero.
    SelectTrack(TrackId),
    Play,
    Pause,
    TogglePlayPause,
    /// Absolute position in seconds; no-op until a duration is known.
    Seek(f64),
    /// Clamped to `[0, 1]`; zero also mutes.
    SetVolume(f32),
    ToggleMute,
    ToggleShuffle,
    SetRepeatMode(RepeatMode),
    Next,
    /// Restarts the current track when more than three seconds in, otherwise
    /// moves to the prior index with wraparound.
    Previous,

    // Engine-originated actions, dispatched by the controller after stale
    // events have been discarded.
    MetadataReady(f64),
    TimeUpdate(f64),
    Ended,
    EngineError(String),
    BufferingStart,
    BufferingEnd,
}
