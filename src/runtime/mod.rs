use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::mpris::ControlCmd;
use crate::persist;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let scan_dir = env::args().nth(1).map(PathBuf::from).or_else(|| {
        std::env::current_dir().ok()
    });

    let playlist_path = persist::default_playlist_path();
    let mut controller =
        startup::build_session(&settings, scan_dir.as_deref(), playlist_path.as_deref());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());
    mpris.sync(controller.snapshot());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new(&settings, controller.snapshot());
        event_loop::run(
            &mut terminal,
            &settings,
            &mut controller,
            &mpris,
            &control_rx,
            scan_dir.as_deref(),
            &mut state,
        )
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(path) = &playlist_path {
        if let Err(e) = persist::save_playlist(path, &controller.snapshot().playlist) {
            eprintln!("quaver: failed to save playlist: {e}");
        }
    }
    controller.shutdown();

    run_result
}
