use crate::track::TrackDescriptor;

/// Transport state of the session.
///
/// `loading` lives as a separate flag on `SessionState`: the play intent has
/// to survive a source swap (load, then play once the engine confirms ready),
/// so buffering must not overwrite it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    /// No track playing and none requested.
    Idle,
    /// Playback requested or running.
    Playing,
    /// Playback suspended at the current position.
    Paused,
    /// The last track finished and nothing follows it.
    Ended,
    /// The engine reported a failure; selecting a track or retrying play recovers.
    Errored,
}

impl Default for Transport {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    /// Repeat the current track when it ends.
    One,
    /// Wrap around to the start of the playlist.
    All,
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Off
    }
}

impl RepeatMode {
    /// Cycle `Off -> One -> All -> Off`.
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::One,
            RepeatMode::One => RepeatMode::All,
            RepeatMode::All => RepeatMode::Off,
        }
    }
}

/// The single shared playback session state.
///
/// Invariants maintained by the reducer:
/// - `current_index` is `None` iff `playlist` is empty, and in bounds otherwise.
/// - `position_seconds` stays within `[0, duration_seconds]` once a duration
///   is known.
/// - `transport == Playing` implies a current track exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Insertion order is playback order for sequential traversal.
    pub playlist: Vec<TrackDescriptor>,
    pub current_index: Option<usize>,
    pub transport: Transport,
    /// True between a source swap and the engine's metadata confirmation.
    pub loading: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    /// Stored volume in `[0, 1]`; muting does not alter it.
    pub volume: f32,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// Cleared whenever a new track is selected or play succeeds.
    pub last_error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            playlist: Vec::new(),
            current_index: None,
            transport: Transport::Idle,
            loading: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume: 1.0,
            muted: false,
            shuffle: false,
            repeat: RepeatMode::Off,
            last_error: None,
        }
    }
}

impl SessionState {
    /// The current track, derived from `current_index`. There is no
    /// independently settable track field, so index and track cannot diverge.
    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.current_index.and_then(|i| self.playlist.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.transport == Transport::Playing
    }

    /// Volume as the engine should hear it: zero while muted.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }
}
