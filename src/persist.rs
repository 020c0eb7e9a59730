//! Playlist persistence.
//!
//! The playlist is written as TOML under the XDG data directory so a
//! session can be restored on the next launch.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::track::{TrackDescriptor, TrackId};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed playlist file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not encode playlist: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    tracks: Vec<TrackDescriptor>,
}

/// Compute the default playlist path under `$XDG_DATA_HOME/quaver/playlist.toml`
/// or `~/.local/share/quaver/playlist.toml` when `XDG_DATA_HOME` is not set.
pub fn default_playlist_path() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("quaver").join("playlist.toml"))
}

/// Write the playlist to `path`, creating parent directories as needed.
pub fn save_playlist(path: &Path, tracks: &[TrackDescriptor]) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PersistError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = PlaylistFile {
        tracks: tracks.to_vec(),
    };
    let body = toml::to_string_pretty(&file)?;
    fs::write(path, body).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the playlist back from `path`.
///
/// A missing file is an empty playlist, not an error. Loaded track ids are
/// reserved so freshly ingested tracks never collide with restored ones.
pub fn load_playlist(path: &Path) -> Result<Vec<TrackDescriptor>, PersistError> {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(PersistError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let file: PlaylistFile = toml::from_str(&body).map_err(|source| PersistError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(max) = file.tracks.iter().map(|t| t.id).max() {
        TrackId::reserve_through(max);
    }
    Ok(file.tracks)
}

#[cfg(test)]
mod tests;
