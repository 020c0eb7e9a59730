use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a track, unique within the process and stable for
/// the lifetime of the track in the playlist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(u64);

impl TrackId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Bump the allocator past `id`. Called when a persisted playlist is
    /// restored so freshly ingested tracks cannot collide with loaded ones.
    pub fn reserve_through(id: TrackId) {
        NEXT_TRACK_ID.fetch_max(id.0 + 1, Ordering::Relaxed);
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "track-{}", self.0)
    }
}

/// Normalized representation of an audio item in the playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub id: TrackId,
    /// Display name; falls back to the file stem when tags carry no title.
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Engine-resolvable locator for the decodable bytes. Must remain valid
    /// for as long as the track is reachable from the playlist.
    pub source: PathBuf,
    /// Zero until the engine reports metadata for this track.
    pub duration_seconds: f64,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Set once at creation, never mutated.
    pub added_at: SystemTime,
}

impl TrackDescriptor {
    pub fn artist_or_unknown(&self) -> &str {
        self.artist
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown Artist")
    }

    pub fn album_or_unknown(&self) -> &str {
        self.album
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown Album")
    }

    /// "Artist - Title" when an artist is known, plain title otherwise.
    pub fn display_title(&self) -> String {
        match self.artist.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(artist) => format!("{} - {}", artist, self.title),
            None => self.title.clone(),
        }
    }
}

/// Map a file extension to a recognized audio mime type.
///
/// Returns `None` for anything the player does not decode.
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|s| s.to_str())?;
    match ext.to_ascii_lowercase().as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        "flac" => Some("audio/flac"),
        "aac" => Some("audio/aac"),
        "m4a" => Some("audio/mp4"),
        _ => None,
    }
}

/// Format a duration in seconds as `M:SS`. Non-finite and negative values
/// render as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a byte count as a short human-readable size.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}
