use rand::RngExt;

use super::action::SessionAction;
use super::state::{RepeatMode, SessionState, Transport};

/// Seam for the only randomized decision in the core: which index shuffle
/// traversal picks next. Production uses `RandomPicker`; tests script it.
pub trait NextIndexPicker {
    /// Pick an index in `0..len`, avoiding `exclude` when `len > 1`.
    fn pick(&mut self, len: usize, exclude: Option<usize>) -> usize;
}

/// Uniform pick among all indices except the current one.
pub struct RandomPicker;

impl NextIndexPicker for RandomPicker {
    fn pick(&mut self, len: usize, exclude: Option<usize>) -> usize {
        debug_assert!(len > 0);
        let mut rng = rand::rng();
        match exclude {
            Some(cur) if len > 1 && cur < len => {
                // Draw from the remaining len-1 slots and shift past `cur`.
                let i = rng.random_range(0..len - 1);
                if i >= cur { i + 1 } else { i }
            }
            _ => rng.random_range(0..len),
        }
    }
}

/// Pure state transition: `(state, action) -> state`. Never panics and never
/// touches the engine; abnormal conditions are encoded as state so the
/// surfaces can render them.
pub fn reduce(
    state: &SessionState,
    action: SessionAction,
    picker: &mut dyn NextIndexPicker,
) -> SessionState {
    let mut next = state.clone();

    match action {
        SessionAction::SetPlaylist(tracks) => {
            next.playlist = dedupe_by_id(tracks);
            if next.playlist.is_empty() {
                next.current_index = None;
                next.transport = Transport::Idle;
                next.loading = false;
            } else {
                next.current_index = Some(0);
            }
            reset_position(&mut next);
        }

        SessionAction::AddTrack(track) => {
            if next.playlist.iter().any(|t| t.id == track.id) {
                return next;
            }
            next.playlist.push(track);
            if next.current_index.is_none() {
                next.current_index = Some(0);
                reset_position(&mut next);
            }
        }

        SessionAction::RemoveTrack(index) => {
            if index >= next.playlist.len() {
                return next;
            }
            next.playlist.remove(index);

            match next.current_index {
                Some(cur) if index == cur => {
                    // Removing the current entry stops playback and selects
                    // the track that slid into its slot (or the new last
                    // entry when the removed one occupied the last slot).
                    next.transport = Transport::Idle;
                    next.loading = false;
                    if next.playlist.is_empty() {
                        next.current_index = None;
                    } else {
                        next.current_index = Some(index.min(next.playlist.len() - 1));
                    }
                    reset_position(&mut next);
                }
                Some(cur) if index < cur => {
                    next.current_index = Some(cur - 1);
                }
                _ => {}
            }
        }

        SessionAction::SelectTrack(id) => {
            if let Some(index) = next.playlist.iter().position(|t| t.id == id) {
                set_current(&mut next, index);
            }
        }

        SessionAction::Play => {
            if next.current_index.is_some() {
                next.transport = Transport::Playing;
                next.last_error = None;
            }
        }

        SessionAction::Pause => {
            if next.current_index.is_some() {
                next.transport = Transport::Paused;
            }
        }

        SessionAction::TogglePlayPause => {
            if next.current_index.is_some() {
                if next.transport == Transport::Playing {
                    next.transport = Transport::Paused;
                } else {
                    next.transport = Transport::Playing;
                    next.last_error = None;
                }
            }
        }

        SessionAction::Seek(seconds) => {
            if next.duration_seconds > 0.0 {
                next.position_seconds = seconds.clamp(0.0, next.duration_seconds);
            }
        }

        SessionAction::SetVolume(v) => {
            next.volume = v.clamp(0.0, 1.0);
            next.muted = next.volume == 0.0;
        }

        SessionAction::ToggleMute => {
            next.muted = !next.muted;
        }

        SessionAction::ToggleShuffle => {
            next.shuffle = !next.shuffle;
        }

        SessionAction::SetRepeatMode(mode) => {
            next.repeat = mode;
        }

        SessionAction::Next => {
            if let Some(index) = advance_index(&next, picker) {
                set_current(&mut next, index);
            }
        }

        SessionAction::Previous => {
            if next.playlist.is_empty() {
                return next;
            }
            // Scrub-to-start affordance: more than three seconds in, Previous
            // restarts the current track instead of moving.
            if next.position_seconds > 3.0 {
                next.position_seconds = 0.0;
            } else {
                let len = next.playlist.len();
                let index = match next.current_index {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                set_current(&mut next, index);
            }
        }

        SessionAction::MetadataReady(duration) => {
            next.duration_seconds = duration.max(0.0);
            next.loading = false;
            if next.duration_seconds > 0.0 {
                next.position_seconds = next.position_seconds.clamp(0.0, next.duration_seconds);
            }
            // The engine now knows this track's real length; remember it on
            // the descriptor too so the library list can show it.
            if let Some(i) = next.current_index {
                if let Some(track) = next.playlist.get_mut(i) {
                    track.duration_seconds = next.duration_seconds;
                }
            }
        }

        SessionAction::TimeUpdate(position) => {
            next.position_seconds = if next.duration_seconds > 0.0 {
                position.clamp(0.0, next.duration_seconds)
            } else {
                position.max(0.0)
            };
        }

        SessionAction::Ended => {
            match next.repeat {
                RepeatMode::One => {
                    next.position_seconds = 0.0;
                }
                _ => {
                    let has_next = next
                        .current_index
                        .map(|i| i + 1 < next.playlist.len())
                        .unwrap_or(false);
                    if next.repeat == RepeatMode::All || has_next {
                        if let Some(index) = advance_index(&next, picker) {
                            set_current(&mut next, index);
                        }
                    } else {
                        next.transport = Transport::Ended;
                        next.position_seconds = 0.0;
                    }
                }
            }
        }

        SessionAction::EngineError(message) => {
            next.last_error = Some(message);
            next.transport = Transport::Errored;
            next.loading = false;
        }

        SessionAction::BufferingStart => {
            next.loading = true;
        }

        SessionAction::BufferingEnd => {
            next.loading = false;
        }
    }

    next
}

/// Next-traversal: random among the other indices when shuffled, sequential
/// wraparound otherwise. `None` when the playlist is empty.
fn advance_index(state: &SessionState, picker: &mut dyn NextIndexPicker) -> Option<usize> {
    let len = state.playlist.len();
    if len == 0 {
        return None;
    }
    let index = if state.shuffle && len > 1 {
        picker.pick(len, state.current_index)
    } else {
        match state.current_index {
            Some(i) => (i + 1) % len,
            None => 0,
        }
    };
    Some(index)
}

/// Move `current_index` and reset per-track fields. Selecting a track is a
/// successful transition, so the last error clears here.
fn set_current(state: &mut SessionState, index: usize) {
    state.current_index = Some(index);
    state.last_error = None;
    reset_position(state);
}

/// Reset position to zero and seed the duration from what ingestion read out
/// of the tags; the engine's metadata report overwrites it.
fn reset_position(state: &mut SessionState) {
    state.position_seconds = 0.0;
    state.duration_seconds = state
        .current_track()
        .map(|t| t.duration_seconds)
        .unwrap_or(0.0);
}

fn dedupe_by_id(tracks: Vec<crate::track::TrackDescriptor>) -> Vec<crate::track::TrackDescriptor> {
    let mut seen = Vec::with_capacity(tracks.len());
    let mut out = Vec::with_capacity(tracks.len());
    for track in tracks {
        if !seen.contains(&track.id) {
            seen.push(track.id);
            out.push(track);
        }
    }
    out
}
