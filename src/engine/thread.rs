use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::prelude::*;
use rodio::{OutputStreamBuilder, Sink};

use crate::config::EngineSettings;
use crate::track::TrackId;

use super::sink::create_sink_at;
use super::types::{EngineCmd, EngineEvent, clamp_unit};

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    settings: EngineSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                // No output device is a session-level error, not a crash:
                // report it and let the controller mark the session errored.
                let _ = events.send(EngineEvent::Error {
                    track: None,
                    message: format!("no audio output device: {e}"),
                });
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut current: Option<(TrackId, PathBuf)> = None;
        let mut paused = true;
        let mut volume: f32 = 1.0;

        // Wall-clock position tracking: accumulated elapsed while paused plus
        // time since the last unpause.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        let tick = Duration::from_millis(settings.tick_ms.max(50));

        loop {
            match rx.recv_timeout(tick) {
                Ok(EngineCmd::Load { track, path }) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    paused = true;
                    started_at = None;
                    accumulated = Duration::ZERO;
                    current = Some((track, path.clone()));

                    let _ = events.send(EngineEvent::BufferingStart { track });
                    match create_sink_at(&stream, &path, Duration::ZERO) {
                        Ok((new_sink, decoder_duration)) => {
                            new_sink.set_volume(volume);
                            sink = Some(new_sink);

                            // Some decoders cannot report a total duration;
                            // fall back to what the tags say.
                            let duration = decoder_duration
                                .or_else(|| {
                                    lofty::read_from_path(&path)
                                        .ok()
                                        .map(|t| t.properties().duration())
                                })
                                .map(|d| d.as_secs_f64())
                                .unwrap_or(0.0);

                            let _ = events.send(EngineEvent::MetadataReady { track, duration });
                            let _ = events.send(EngineEvent::BufferingEnd { track });
                        }
                        Err(e) => {
                            let _ = events.send(EngineEvent::Error {
                                track: Some(track),
                                message: e.to_string(),
                            });
                        }
                    }
                }
                Ok(EngineCmd::Play) => {
                    // After a natural end the sink is gone but the source is
                    // retained; rebuild it so play can restart the track.
                    if sink.is_none() {
                        if let Some((track, ref path)) = current {
                            match create_sink_at(&stream, path, accumulated) {
                                Ok((new_sink, _)) => {
                                    new_sink.set_volume(volume);
                                    sink = Some(new_sink);
                                }
                                Err(e) => {
                                    let _ = events.send(EngineEvent::Error {
                                        track: Some(track),
                                        message: e.to_string(),
                                    });
                                }
                            }
                        }
                    }
                    if let Some(ref s) = sink {
                        s.play();
                        if paused {
                            started_at = Some(Instant::now());
                            paused = false;
                        }
                    }
                }
                Ok(EngineCmd::Pause) => {
                    if let Some(ref s) = sink {
                        s.pause();
                    }
                    if !paused {
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        paused = true;
                    }
                }
                Ok(EngineCmd::Seek(seconds)) => {
                    // Scrubbing: rebuild the sink and skip into the file.
                    let Some((track, ref path)) = current else {
                        continue;
                    };
                    let target = Duration::from_secs_f64(seconds.max(0.0));

                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    match create_sink_at(&stream, path, target) {
                        Ok((new_sink, _)) => {
                            new_sink.set_volume(volume);
                            if paused {
                                new_sink.pause();
                                started_at = None;
                            } else {
                                new_sink.play();
                                started_at = Some(Instant::now());
                            }
                            sink = Some(new_sink);
                            accumulated = target;
                            let _ = events.send(EngineEvent::TimeUpdate {
                                track,
                                position: target.as_secs_f64(),
                            });
                        }
                        Err(e) => {
                            let _ = events.send(EngineEvent::Error {
                                track: Some(track),
                                message: e.to_string(),
                            });
                        }
                    }
                }
                Ok(EngineCmd::SetVolume(v)) => {
                    volume = clamp_unit(v);
                    if let Some(ref s) = sink {
                        s.set_volume(volume);
                    }
                }
                Ok(EngineCmd::Unload) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    current = None;
                    paused = true;
                    started_at = None;
                    accumulated = Duration::ZERO;
                }
                Ok(EngineCmd::Quit) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let Some((track, _)) = current else {
                        continue;
                    };
                    let Some(ref s) = sink else {
                        continue;
                    };
                    if paused {
                        continue;
                    }

                    if s.empty() {
                        // End of track. Keep `current` so a restart (seek 0 +
                        // play) can rebuild the sink from the same source.
                        sink = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        let _ = events.send(EngineEvent::Ended { track });
                    } else {
                        let elapsed =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        let _ = events.send(EngineEvent::TimeUpdate {
                            track,
                            position: elapsed.as_secs_f64(),
                        });
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
