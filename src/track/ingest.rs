use std::path::{Path, PathBuf};
use std::time::SystemTime;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::IngestSettings;

use super::model::{TrackDescriptor, TrackId, mime_type_for_path};

/// Rejection reasons for files offered to the ingestion path.
///
/// The session core never sees these: a file either becomes a valid
/// `TrackDescriptor` or it never reaches the playlist.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("not a recognized audio file: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("{}: {size} bytes exceeds the {max} byte limit", path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_allowed_extension(path: &Path, settings: &IngestSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Validate a single file against the ingestion rules and build a descriptor
/// for it. Tag metadata comes from lofty; a file whose tags are unreadable is
/// still accepted with its file stem as title.
pub fn descriptor_from_path(
    path: &Path,
    settings: &IngestSettings,
) -> Result<TrackDescriptor, IngestError> {
    if !has_allowed_extension(path, settings) {
        return Err(IngestError::UnsupportedFormat(path.to_path_buf()));
    }
    let Some(mime_type) = mime_type_for_path(path) else {
        return Err(IngestError::UnsupportedFormat(path.to_path_buf()));
    };

    let meta = std::fs::metadata(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let size = meta.len();
    let max = settings.max_file_size_bytes();
    if size > max {
        return Err(IngestError::TooLarge {
            path: path.to_path_buf(),
            size,
            max,
        });
    }

    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration_seconds = 0.0;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration_seconds = tagged.properties().duration().as_secs_f64();

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    album = Some(v.to_string());
                }
            }
        }
    }

    Ok(TrackDescriptor {
        id: TrackId::next(),
        title,
        artist,
        album,
        source: path.to_path_buf(),
        duration_seconds,
        size_bytes: size,
        mime_type: mime_type.to_string(),
        added_at: SystemTime::now(),
    })
}

/// Scan `dir` for playable audio files and produce descriptors in a
/// deterministic order (case-insensitive by display title, ties broken by
/// path). Files that fail validation are skipped.
pub fn scan_dir(dir: &Path, settings: &IngestSettings) -> Vec<TrackDescriptor> {
    let mut tracks: Vec<TrackDescriptor> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && (settings.include_hidden || !is_hidden(path)) {
            if let Ok(track) = descriptor_from_path(path, settings) {
                tracks.push(track);
            }
        }
    }

    tracks.sort_by(|a, b| {
        a.display_title()
            .to_lowercase()
            .cmp(&b.display_title().to_lowercase())
            .then_with(|| a.source.cmp(&b.source))
    });
    tracks
}

/// Scan `dir` and return descriptors for files that are not already present
/// in `existing` (compared by source path). Used by the rescan intent to pick
/// up files that appeared after startup.
pub fn scan_new_files(
    dir: &Path,
    settings: &IngestSettings,
    existing: &[TrackDescriptor],
) -> Vec<TrackDescriptor> {
    scan_dir(dir, settings)
        .into_iter()
        .filter(|t| !existing.iter().any(|e| e.source == t.source))
        .collect()
}
