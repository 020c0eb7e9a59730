use std::path::Path;

use crate::config;
use crate::engine::RodioEngine;
use crate::persist;
use crate::session::SessionController;
use crate::track::scan_new_files;

/// Build the playback session: spawn the engine, restore the persisted
/// playlist, merge in freshly scanned files and apply playback defaults.
pub fn build_session(
    settings: &config::Settings,
    scan_dir: Option<&Path>,
    playlist_path: Option<&Path>,
) -> SessionController {
    let (engine, events) = RodioEngine::spawn(settings.engine.clone());
    let mut controller = SessionController::new(Box::new(engine), events);

    let mut tracks = match playlist_path {
        Some(path) => match persist::load_playlist(path) {
            Ok(tracks) => tracks,
            Err(e) => {
                eprintln!("quaver: failed to restore playlist: {e}");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    // Entries whose files vanished since the last session are dropped.
    tracks.retain(|t| t.source.exists());

    if let Some(dir) = scan_dir {
        let fresh = scan_new_files(dir, &settings.ingest, &tracks);
        tracks.extend(fresh);
    }

    controller.set_playlist(tracks);

    if settings.playback.shuffle {
        controller.toggle_shuffle();
    }
    controller.set_repeat_mode(settings.playback.repeat_mode.to_mode());
    controller.set_volume(settings.playback.volume);

    controller
}
