use super::*;
use crate::config::IngestSettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn track_ids_are_unique_and_reservable() {
    let a = TrackId::next();
    let b = TrackId::next();
    assert_ne!(a, b);

    TrackId::reserve_through(b);
    let c = TrackId::next();
    assert_ne!(c, a);
    assert_ne!(c, b);
}

#[test]
fn mime_type_recognizes_supported_formats_case_insensitive() {
    assert_eq!(mime_type_for_path(Path::new("a.mp3")), Some("audio/mpeg"));
    assert_eq!(mime_type_for_path(Path::new("a.MP3")), Some("audio/mpeg"));
    assert_eq!(mime_type_for_path(Path::new("a.flac")), Some("audio/flac"));
    assert_eq!(mime_type_for_path(Path::new("a.m4a")), Some("audio/mp4"));
    assert_eq!(mime_type_for_path(Path::new("a.txt")), None);
    assert_eq!(mime_type_for_path(Path::new("a")), None);
}

#[test]
fn display_title_prefers_artist_dash_title() {
    let mut track = descriptor_for_test("Song");
    assert_eq!(track.display_title(), "Song");

    track.artist = Some("Artist".into());
    assert_eq!(track.display_title(), "Artist - Song");

    track.artist = Some("   ".into());
    assert_eq!(track.display_title(), "Song");
}

#[test]
fn unknown_fallbacks_for_missing_metadata() {
    let track = descriptor_for_test("Song");
    assert_eq!(track.artist_or_unknown(), "Unknown Artist");
    assert_eq!(track.album_or_unknown(), "Unknown Album");
}

#[test]
fn format_duration_renders_minutes_and_padded_seconds() {
    assert_eq!(format_duration(0.0), "0:00");
    assert_eq!(format_duration(7.9), "0:07");
    assert_eq!(format_duration(65.0), "1:05");
    assert_eq!(format_duration(600.0), "10:00");
    assert_eq!(format_duration(f64::NAN), "0:00");
    assert_eq!(format_duration(-3.0), "0:00");
}

#[test]
fn format_size_scales_units() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(512), "512 B");
    assert_eq!(format_size(2048), "2.0 KB");
    assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
}

#[test]
fn descriptor_from_path_rejects_unsupported_and_oversized_files() {
    let dir = tempdir().unwrap();
    let settings = IngestSettings::default();

    let text = dir.path().join("notes.txt");
    fs::write(&text, b"hello").unwrap();
    assert!(matches!(
        descriptor_from_path(&text, &settings),
        Err(IngestError::UnsupportedFormat(_))
    ));

    let big = dir.path().join("big.mp3");
    fs::write(&big, b"fake audio").unwrap();
    let tiny_cap = IngestSettings {
        max_file_size_mb: 0,
        ..IngestSettings::default()
    };
    assert!(matches!(
        descriptor_from_path(&big, &tiny_cap),
        Err(IngestError::TooLarge { .. })
    ));
}

#[test]
fn descriptor_from_path_accepts_untagged_audio_with_stem_title() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("My Song.mp3");
    fs::write(&path, b"not a real mp3").unwrap();

    let track = descriptor_from_path(&path, &IngestSettings::default()).unwrap();
    assert_eq!(track.title, "My Song");
    assert_eq!(track.mime_type, "audio/mpeg");
    assert_eq!(track.duration_seconds, 0.0);
    assert_eq!(track.size_bytes, 14);
}

#[test]
fn scan_dir_filters_and_sorts_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not real").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not real").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let tracks = scan_dir(dir.path(), &IngestSettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[1].title, "b");

    let ids: Vec<TrackId> = tracks.iter().map(|t| t.id).collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn scan_dir_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let settings = IngestSettings {
        include_hidden: false,
        ..IngestSettings::default()
    };
    let tracks = scan_dir(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "visible");
}

#[test]
fn scan_dir_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = IngestSettings {
        recursive: false,
        ..IngestSettings::default()
    };
    let tracks = scan_dir(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "root");
}

#[test]
fn scan_new_files_skips_already_ingested_sources() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("old.mp3"), b"not real").unwrap();

    let settings = IngestSettings::default();
    let existing = scan_dir(dir.path(), &settings);
    assert_eq!(existing.len(), 1);

    fs::write(dir.path().join("new.mp3"), b"not real").unwrap();
    let fresh = scan_new_files(dir.path(), &settings, &existing);
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].title, "new");
}

fn descriptor_for_test(title: &str) -> TrackDescriptor {
    TrackDescriptor {
        id: TrackId::next(),
        title: title.into(),
        artist: None,
        album: None,
        source: std::path::PathBuf::from("/tmp/none.mp3"),
        duration_seconds: 0.0,
        size_bytes: 0,
        mime_type: "audio/mpeg".into(),
        added_at: std::time::SystemTime::UNIX_EPOCH,
    }
}
