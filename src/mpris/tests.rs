use super::*;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::session::SessionState;
use crate::track::{TrackDescriptor, TrackId};

fn make_track() -> TrackDescriptor {
    TrackDescriptor {
        id: TrackId::next(),
        title: "Test Title".to_string(),
        artist: Some("Test Artist".to_string()),
        album: Some("Test Album".to_string()),
        source: PathBuf::from("/tmp/music/test.mp3"),
        duration_seconds: 1.234567,
        size_bytes: 1024,
        mime_type: "audio/mpeg".to_string(),
        added_at: std::time::SystemTime::UNIX_EPOCH,
    }
}

fn session_with_track() -> SessionState {
    SessionState {
        playlist: vec![make_track()],
        current_index: Some(0),
        ..SessionState::default()
    }
}

#[test]
fn sync_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    let session = session_with_track();
    handle.sync(&session);

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist, vec!["Test Artist".to_string()]);
        assert_eq!(s.album.as_deref(), Some("Test Album"));
        assert!(s.url.as_deref().unwrap().contains("/tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/0")
        );
    }

    handle.sync(&SessionState::default());
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.album, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn playback_status_maps_transport_to_bus_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    let handle = MprisHandle {
        state: state.clone(),
    };

    let mut session = session_with_track();
    handle.sync(&session);
    assert_eq!(iface.playback_status(), "Stopped");

    session.transport = Transport::Playing;
    handle.sync(&session);
    assert_eq!(iface.playback_status(), "Playing");

    session.transport = Transport::Paused;
    handle.sync(&session);
    assert_eq!(iface.playback_status(), "Paused");

    // A track still loading reports as playing so controls stay live.
    session.transport = Transport::Playing;
    session.loading = true;
    handle.sync(&session);
    assert_eq!(iface.playback_status(), "Playing");
}

#[test]
fn sync_reports_muted_sessions_as_silent() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    let handle = MprisHandle {
        state: state.clone(),
    };

    let mut session = session_with_track();
    session.volume = 0.7;
    handle.sync(&session);
    assert!((iface.volume() - 0.7).abs() < 1e-6);

    session.muted = true;
    handle.sync(&session);
    assert_eq!(iface.volume(), 0.0);
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.sync(&session_with_track());

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "xesam:url",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}
