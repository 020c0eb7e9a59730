use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::session::{SessionState, Transport};

#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    SetVolume(f64),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Default)]
struct SharedState {
    status: PlaybackStatus,
    title: Option<String>,
    artist: Vec<String>,
    album: Option<String>,
    url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
    volume: f64,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    /// Mirror a session snapshot into the state the bus interfaces read.
    pub fn sync(&self, session: &SessionState) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };

        s.status = if session.loading {
            PlaybackStatus::Playing
        } else {
            match session.transport {
                Transport::Playing => PlaybackStatus::Playing,
                Transport::Paused => PlaybackStatus::Paused,
                Transport::Idle | Transport::Ended | Transport::Errored => PlaybackStatus::Stopped,
            }
        };
        s.volume = f64::from(session.effective_volume());

        match (session.current_index, session.current_track()) {
            (Some(index), Some(track)) => {
                s.title = Some(track.title.clone());
                s.artist = track.artist.clone().into_iter().collect();
                s.album = track.album.clone();
                s.url = Some(format!("file://{}", track.source.display()));
                s.length_micros = (track.duration_seconds > 0.0)
                    .then(|| (track.duration_seconds * 1_000_000.0) as i64);
                s.track_id =
                    ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{index}"))
                        .ok()
                        .map(|p| p.into());
            }
            _ => {
                s.title = None;
                s.artist = Vec::new();
                s.album = None;
                s.url = None;
                s.length_micros = None;
                s.track_id = None;
            }
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "quaver"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![
            "audio/mpeg".to_string(),
            "audio/wav".to_string(),
            "audio/ogg".to_string(),
            "audio/flac".to_string(),
            "audio/aac".to_string(),
            "audio/mp4".to_string(),
        ]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.status {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(0.0)
    }

    #[zbus(property)]
    fn set_volume(&self, volume: f64) {
        let _ = self.tx.send(ControlCmd::SetVolume(volume.clamp(0.0, 1.0)));
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = &s.track_id {
            insert_value(&mut map, "mpris:trackid", Value::from(ObjectPath::from(id.clone())));
        }
        if let Some(title) = &s.title {
            insert_value(&mut map, "xesam:title", Value::from(title.clone()));
        }
        if !s.artist.is_empty() {
            let artists = zvariant::Array::from(s.artist.clone());
            insert_value(&mut map, "xesam:artist", Value::from(artists));
        }
        if let Some(album) = &s.album {
            insert_value(&mut map, "xesam:album", Value::from(album.clone()));
        }
        if let Some(url) = &s.url {
            insert_value(&mut map, "xesam:url", Value::from(url.clone()));
        }
        if let Some(length) = s.length_micros {
            insert_value(&mut map, "mpris:length", Value::from(length));
        }
        map
    }
}

fn insert_value(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
    if let Ok(owned) = OwnedValue::try_from(value) {
        map.insert(key.to_string(), owned);
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.quaver")
                .await
            {
                eprintln!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                eprintln!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                eprintln!("MPRIS: failed to register player iface: {e}");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
