use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::config::EngineSettings;
use crate::track::{TrackDescriptor, TrackId};

use super::adapter::PlaybackEngine;
use super::thread::spawn_engine_thread;
use super::types::{EngineCmd, EngineError, EngineEvent};

/// Handle to the rodio playback thread. Implements `PlaybackEngine` by
/// forwarding commands over a channel; the paired event receiver is handed
/// out once at spawn time.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    /// Mirror of what the thread currently holds; lets `play` reject
    /// synchronously when nothing was ever loaded.
    loaded: Option<TrackId>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    /// Spawn the playback thread and return the command handle plus the
    /// one-time event stream.
    pub fn spawn(settings: EngineSettings) -> (Self, Receiver<EngineEvent>) {
        let (tx, cmd_rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        let handle = spawn_engine_thread(cmd_rx, event_tx, settings);

        (
            Self {
                tx,
                loaded: None,
                join: Mutex::new(Some(handle)),
            },
            event_rx,
        )
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, track: &TrackDescriptor) {
        self.loaded = Some(track.id);
        let _ = self.tx.send(EngineCmd::Load {
            track: track.id,
            path: track.source.clone(),
        });
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if self.loaded.is_none() {
            return Err(EngineError::NothingLoaded);
        }
        let _ = self.tx.send(EngineCmd::Play);
        Ok(())
    }

    fn pause(&mut self) {
        let _ = self.tx.send(EngineCmd::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        let _ = self.tx.send(EngineCmd::Seek(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.tx.send(EngineCmd::SetVolume(volume));
    }

    fn unload(&mut self) {
        self.loaded = None;
        let _ = self.tx.send(EngineCmd::Unload);
    }

    fn shutdown(&mut self) {
        let _ = self.tx.send(EngineCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}
