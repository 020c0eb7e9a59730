use std::sync::mpsc::Receiver;

use crate::engine::{EngineEvent, PlaybackEngine};
use crate::track::{TrackDescriptor, TrackId};

use super::action::SessionAction;
use super::reducer::{NextIndexPicker, RandomPicker, reduce};
use super::state::{RepeatMode, SessionState, Transport};

/// Stateful orchestrator around the pure reducer.
///
/// Holds the live session state and the single engine instance. User intents
/// and engine events both dispatch through the reducer; after every dispatch
/// the controller diffs old against new state and issues the engine
/// side-effects the transition implies. No other component may talk to the
/// engine.
pub struct SessionController {
    state: SessionState,
    engine: Box<dyn PlaybackEngine>,
    events: Receiver<EngineEvent>,
    picker: Box<dyn NextIndexPicker>,
    /// Mirror of the last play/pause the engine was told about; redundant
    /// requests are dropped instead of racing the decoder.
    engine_playing: bool,
}

impl SessionController {
    pub fn new(engine: Box<dyn PlaybackEngine>, events: Receiver<EngineEvent>) -> Self {
        Self::with_picker(engine, events, Box::new(RandomPicker))
    }

    /// Construct with an explicit traversal picker (tests script this to make
    /// shuffle deterministic).
    pub fn with_picker(
        engine: Box<dyn PlaybackEngine>,
        events: Receiver<EngineEvent>,
        picker: Box<dyn NextIndexPicker>,
    ) -> Self {
        Self {
            state: SessionState::default(),
            engine,
            events,
            picker,
            engine_playing: false,
        }
    }

    /// Read-only view of the session for the rendering surfaces.
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    // Intent API, mirroring the reducer's action table.

    pub fn set_playlist(&mut self, tracks: Vec<TrackDescriptor>) {
        self.dispatch(SessionAction::SetPlaylist(tracks));
    }

    pub fn add_track(&mut self, track: TrackDescriptor) {
        self.dispatch(SessionAction::AddTrack(track));
    }

    pub fn remove_track(&mut self, index: usize) {
        self.dispatch(SessionAction::RemoveTrack(index));
    }

    pub fn select_track(&mut self, id: TrackId) {
        self.dispatch(SessionAction::SelectTrack(id));
    }

    pub fn play(&mut self) {
        self.dispatch(SessionAction::Play);
    }

    pub fn pause(&mut self) {
        self.dispatch(SessionAction::Pause);
    }

    pub fn toggle_play_pause(&mut self) {
        self.dispatch(SessionAction::TogglePlayPause);
    }

    pub fn next(&mut self) {
        self.dispatch(SessionAction::Next);
    }

    pub fn previous(&mut self) {
        self.dispatch(SessionAction::Previous);
    }

    pub fn seek(&mut self, seconds: f64) {
        self.dispatch(SessionAction::Seek(seconds));
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.dispatch(SessionAction::SetVolume(volume));
    }

    pub fn toggle_mute(&mut self) {
        self.dispatch(SessionAction::ToggleMute);
    }

    pub fn toggle_shuffle(&mut self) {
        self.dispatch(SessionAction::ToggleShuffle);
    }

    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.dispatch(SessionAction::SetRepeatMode(mode));
    }

    /// Drain pending engine events and fold them into the session, in the
    /// order the engine emitted them. Events tagged with a track other than
    /// the current one are stale (the user moved on before the engine caught
    /// up) and are discarded.
    pub fn pump_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn shutdown(&mut self) {
        self.engine.shutdown();
    }

    fn handle_event(&mut self, event: EngineEvent) {
        let current = self.state.current_track().map(|t| t.id);
        match event {
            EngineEvent::MetadataReady { track, duration } if Some(track) == current => {
                self.dispatch(SessionAction::MetadataReady(duration));
                // Ready confirmation: a pending play intent fires now.
                if self.state.transport == Transport::Playing {
                    self.engine_play();
                }
            }
            EngineEvent::TimeUpdate { track, position } if Some(track) == current => {
                self.dispatch(SessionAction::TimeUpdate(position));
            }
            EngineEvent::Ended { track } if Some(track) == current => {
                self.engine_playing = false;
                self.dispatch(SessionAction::Ended);
            }
            EngineEvent::Error { track, message }
                if track.is_none() || track == current =>
            {
                self.engine_playing = false;
                self.dispatch(SessionAction::EngineError(message));
            }
            EngineEvent::BufferingStart { track } if Some(track) == current => {
                self.dispatch(SessionAction::BufferingStart);
            }
            EngineEvent::BufferingEnd { track } if Some(track) == current => {
                self.dispatch(SessionAction::BufferingEnd);
            }
            _ => {
                // Stale: carries the identity of a track that is no longer
                // current. Applying it would corrupt the new track's state.
            }
        }
    }

    fn dispatch(&mut self, action: SessionAction) {
        // Previous can reposition without changing tracks (the scrub-to-start
        // affordance); that restart has to reach the engine like any seek.
        let user_seek = matches!(action, SessionAction::Seek(_) | SessionAction::Previous);
        let was_ended = matches!(action, SessionAction::Ended);

        let prev = std::mem::take(&mut self.state);
        self.state = reduce(&prev, action, self.picker.as_mut());
        self.apply_effects(&prev, user_seek, was_ended);
    }

    /// Diff `prev` against the new state and drive the engine accordingly.
    fn apply_effects(&mut self, prev: &SessionState, user_seek: bool, was_ended: bool) {
        let prev_id = prev.current_track().map(|t| t.id);
        let next_id = self.state.current_track().map(|t| t.id);

        if next_id != prev_id {
            // Track identity changed: swap the engine source. Loading
            // releases the hold on the old one; play waits for the engine's
            // metadata confirmation.
            self.engine_playing = false;
            match self.state.current_track() {
                Some(track) => {
                    let track = track.clone();
                    self.engine.load(&track);
                }
                None => self.engine.unload(),
            }
        } else if was_ended && next_id.is_some() && self.state.is_playing() {
            // Same track, still playing after an end: repeat-one, or a
            // single-entry playlist wrapping on repeat-all. Restart it.
            self.engine.seek(0.0);
            self.engine_play();
        } else if prev.transport != self.state.transport {
            match self.state.transport {
                Transport::Playing if next_id.is_some() => self.engine_play(),
                Transport::Paused | Transport::Idle | Transport::Ended | Transport::Errored => {
                    self.engine_pause();
                }
                _ => {}
            }
        }

        if user_seek
            && next_id == prev_id
            && self.state.position_seconds != prev.position_seconds
        {
            self.engine.seek(self.state.position_seconds);
        }

        if self.state.effective_volume() != prev.effective_volume() {
            self.engine.set_volume(self.state.effective_volume());
        }
    }

    /// Issue a play unless one is already in effect. A synchronous rejection
    /// becomes an `EngineError` action; it never escapes the controller.
    fn engine_play(&mut self) {
        if self.engine_playing {
            return;
        }
        match self.engine.play() {
            Ok(()) => self.engine_playing = true,
            Err(e) => {
                self.engine_playing = false;
                self.dispatch(SessionAction::EngineError(e.to_string()));
            }
        }
    }

    fn engine_pause(&mut self) {
        if !self.engine_playing {
            return;
        }
        self.engine.pause();
        self.engine_playing = false;
    }
}
