use super::*;
use std::time::SystemTime;

fn track(title: &str) -> TrackDescriptor {
    TrackDescriptor {
        id: TrackId::next(),
        title: title.into(),
        artist: Some("Artist".into()),
        album: None,
        source: PathBuf::from(format!("/music/{title}.mp3")),
        duration_seconds: 123.0,
        size_bytes: 4096,
        mime_type: "audio/mpeg".into(),
        added_at: SystemTime::UNIX_EPOCH,
    }
}

#[test]
fn save_then_load_round_trips_the_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("playlist.toml");
    let tracks = vec![track("one"), track("two")];

    save_playlist(&path, &tracks).unwrap();
    let loaded = load_playlist(&path).unwrap();
    assert_eq!(loaded, tracks);
}

#[test]
fn missing_file_loads_as_an_empty_playlist() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = load_playlist(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_empty());
}

#[test]
fn malformed_file_is_reported_not_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlist.toml");
    std::fs::write(&path, "tracks = 3").unwrap();

    assert!(matches!(
        load_playlist(&path),
        Err(PersistError::Parse { .. })
    ));
}

#[test]
fn loading_reserves_restored_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("playlist.toml");
    let tracks = vec![track("one"), track("two")];
    save_playlist(&path, &tracks).unwrap();

    let loaded = load_playlist(&path).unwrap();
    let fresh = TrackId::next();
    assert!(loaded.iter().all(|t| t.id != fresh));
}

#[test]
fn default_playlist_path_lands_under_the_data_dir() {
    if let Some(p) = default_playlist_path() {
        assert!(p.ends_with(PathBuf::from("quaver").join("playlist.toml")));
    }
}
