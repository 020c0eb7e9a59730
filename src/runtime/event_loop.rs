use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::sync_if_changed;
use crate::session::{SessionController, SessionState};
use crate::track::scan_new_files;
use crate::ui::{self, View};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Which main surface is on screen.
    pub view: View,
    /// Library cursor position, independent of the playing track.
    pub selected: usize,
    /// Whether the cursor tracks the playing index.
    pub follow_playback: bool,
    /// Last snapshot pushed to MPRIS.
    last_synced: SessionState,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings, snapshot: &SessionState) -> Self {
        Self {
            view: View::default(),
            selected: snapshot.current_index.unwrap_or(0),
            follow_playback: settings.ui.follow_playback,
            last_synced: snapshot.clone(),
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, engine event
/// pumping and MPRIS sync. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut SessionController,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    scan_dir: Option<&Path>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Engine callbacks (metadata, position, track end) apply first so
        // the frame below renders the reconciled state.
        controller.pump_events();

        if state.follow_playback {
            if let Some(idx) = controller.snapshot().current_index {
                state.selected = idx;
            }
        }
        let track_count = controller.snapshot().playlist.len();
        state.selected = state.selected.min(track_count.saturating_sub(1));

        sync_if_changed(mpris, controller.snapshot(), &mut state.last_synced);

        terminal.draw(|f| {
            ui::draw(
                f,
                controller.snapshot(),
                state.view,
                state.selected,
                &settings.ui,
                &settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, controller, state) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, controller, scan_dir, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply a media-control command coming in over the bus. Returns `true`
/// when shutdown was requested.
fn handle_control_cmd(
    cmd: ControlCmd,
    controller: &mut SessionController,
    state: &mut EventLoopState,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            state.follow_playback = true;
            controller.play();
        }
        ControlCmd::Pause => controller.pause(),
        ControlCmd::PlayPause => {
            state.follow_playback = true;
            controller.toggle_play_pause();
        }
        ControlCmd::Stop => {
            controller.pause();
            controller.seek(0.0);
        }
        ControlCmd::Next => {
            state.follow_playback = true;
            controller.next();
        }
        ControlCmd::Prev => {
            state.follow_playback = true;
            controller.previous();
        }
        ControlCmd::SetVolume(v) => controller.set_volume(v as f32),
    }
    false
}

/// Apply a key press. Returns `true` when shutdown was requested.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut SessionController,
    scan_dir: Option<&Path>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            state.view = state.view.toggled();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.follow_playback = false;
            let len = controller.snapshot().playlist.len();
            if len > 0 {
                state.selected = (state.selected + 1).min(len - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.follow_playback = false;
            state.selected = state.selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            let id = controller.snapshot().playlist.get(state.selected).map(|t| t.id);
            if let Some(id) = id {
                state.follow_playback = true;
                controller.select_track(id);
                controller.play();
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.follow_playback = true;
            controller.toggle_play_pause();
        }
        KeyCode::Char('h') => {
            state.follow_playback = true;
            controller.previous();
        }
        KeyCode::Char('l') => {
            state.follow_playback = true;
            controller.next();
        }
        KeyCode::Char('H') => {
            let target = controller.snapshot().position_seconds
                - settings.controls.scrub_seconds as f64;
            controller.seek(target.max(0.0));
        }
        KeyCode::Char('L') => {
            let target = controller.snapshot().position_seconds
                + settings.controls.scrub_seconds as f64;
            controller.seek(target);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let v = controller.snapshot().volume + settings.controls.volume_step;
            controller.set_volume(v);
        }
        KeyCode::Char('-') => {
            let v = controller.snapshot().volume - settings.controls.volume_step;
            controller.set_volume(v);
        }
        KeyCode::Char('m') => controller.toggle_mute(),
        KeyCode::Char('s') => controller.toggle_shuffle(),
        KeyCode::Char('r') => {
            let next = controller.snapshot().repeat.cycle();
            controller.set_repeat_mode(next);
        }
        KeyCode::Char('x') => {
            if state.selected < controller.snapshot().playlist.len() {
                controller.remove_track(state.selected);
            }
        }
        KeyCode::Char('a') => {
            if let Some(dir) = scan_dir {
                let fresh =
                    scan_new_files(dir, &settings.ingest, &controller.snapshot().playlist);
                for track in fresh {
                    controller.add_track(track);
                }
            }
        }
        _ => {}
    }

    false
}
