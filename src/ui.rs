//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. Every
//! surface renders from a [`SessionState`] snapshot; nothing here mutates
//! the session.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Tabs, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::session::{RepeatMode, SessionState, Transport};
use crate::track::format_duration;

/// Which main surface is on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Library,
    Player,
}

impl View {
    pub fn toggled(self) -> Self {
        match self {
            View::Library => View::Player,
            View::Player => View::Library,
        }
    }
}

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(controls: &ControlsSettings) -> String {
    let fixed = [
        ("j/k", "up/down".to_string()),
        ("enter", "play selected".to_string()),
        ("space/p", "play/pause".to_string()),
        ("h/l", "prev/next".to_string()),
        (
            "H/L",
            format!("scrub -/+{}s", controls.scrub_seconds),
        ),
        ("-/+", "volume".to_string()),
        ("m", "mute".to_string()),
        ("s", "shuffle".to_string()),
        ("r", "repeat".to_string()),
        ("x", "remove".to_string()),
        ("a", "rescan".to_string()),
        ("tab", "view".to_string()),
        ("q", "quit".to_string()),
    ];
    fixed
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn transport_label(session: &SessionState) -> &'static str {
    if session.loading {
        return "Loading";
    }
    match session.transport {
        Transport::Idle => "Stopped",
        Transport::Playing => "Playing",
        Transport::Paused => "Paused",
        Transport::Ended => "Ended",
        Transport::Errored => "Error",
    }
}

/// Build the shuffle/repeat/mute badge row.
fn badges(session: &SessionState) -> String {
    let mut parts: Vec<String> = Vec::new();
    parts.push(if session.shuffle {
        "Shuffle: ON".to_string()
    } else {
        "Shuffle: OFF".to_string()
    });
    parts.push(match session.repeat {
        RepeatMode::Off => "Repeat: off".to_string(),
        RepeatMode::One => "Repeat: one".to_string(),
        RepeatMode::All => "Repeat: all".to_string(),
    });
    if session.muted {
        parts.push("Muted".to_string());
    } else {
        parts.push(format!("Vol: {}%", (session.volume * 100.0).round() as u32));
    }
    parts.join(" \u{2022} ")
}

fn progress_ratio(session: &SessionState) -> f64 {
    if session.duration_seconds > 0.0 {
        (session.position_seconds / session.duration_seconds).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    session: &SessionState,
    view: View,
    selected: usize,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header with view tabs
    let tabs = Tabs::new(vec![" library ", " player "])
        .select(match view {
            View::Library => 0,
            View::Player => 1,
        })
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", ui_settings.header_text.trim()))
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(tabs, chunks[0]);

    match view {
        View::Library => draw_library(frame, session, selected, chunks[1]),
        View::Player => draw_player(frame, session, chunks[1]),
    }

    draw_mini_player(frame, session, chunks[2]);

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

/// Render the playlist as a scrollable list with the cursor centered.
fn draw_library(
    frame: &mut Frame,
    session: &SessionState,
    selected: usize,
    area: ratatui::layout::Rect,
) {
    let total = session.playlist.len();
    let selected = selected.min(total.saturating_sub(1));
    let list_height = area.height.saturating_sub(2) as usize;

    // Only build ListItems for the visible window.
    let (start, end, selected_in_window) = if total <= list_height || list_height == 0 {
        (0, total, selected)
    } else {
        let half = list_height / 2;
        let mut start = selected.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, selected - start)
    };

    let items: Vec<ListItem> = session.playlist[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let marker = if session.current_index == Some(start + offset) {
                "\u{266a} "
            } else {
                "  "
            };
            let line = format!(
                "{}{}  [{}]",
                marker,
                track.display_title(),
                format_duration(track.duration_seconds)
            );
            ListItem::new(line)
        })
        .collect();

    let title = format!(" playlist ({total}) ");
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the fullscreen player view for the current track.
fn draw_player(frame: &mut Frame, session: &SessionState, area: ratatui::layout::Rect) {
    let block = Block::default().borders(Borders::ALL).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let details = match session.current_track() {
        Some(track) => format!(
            "{}\n{}\n{}",
            track.title,
            track.artist_or_unknown(),
            track.album_or_unknown()
        ),
        None => "Nothing queued.\nAdd tracks to the playlist to get started.".to_string(),
    };
    let details = Paragraph::new(details).alignment(Alignment::Center);
    frame.render_widget(details, rows[0]);

    let time_label = format!(
        "{} / {}",
        format_duration(session.position_seconds),
        format_duration(session.duration_seconds)
    );
    let gauge = Gauge::default()
        .ratio(progress_ratio(session))
        .label(time_label)
        .use_unicode(true);
    frame.render_widget(gauge, rows[1]);

    let status = Paragraph::new(format!("{} \u{2022} {}", transport_label(session), badges(session)))
        .alignment(Alignment::Center);
    frame.render_widget(status, rows[2]);

    if let Some(error) = &session.last_error {
        let error_line = Paragraph::new(format!("! {}", error))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(error_line, rows[3]);
    }
}

/// Render the persistent one-line player bar under the main surface.
fn draw_mini_player(frame: &mut Frame, session: &SessionState, area: ratatui::layout::Rect) {
    let line = match session.current_track() {
        Some(track) => format!(
            "{} {} [{} / {}] \u{2022} {}",
            transport_label(session),
            track.display_title(),
            format_duration(session.position_seconds),
            format_duration(session.duration_seconds),
            badges(session)
        ),
        None => format!("Stopped \u{2022} {}", badges(session)),
    };

    let bar = Paragraph::new(line)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" player "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(bar, area);
}
