//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Sparkline, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::Settings;
use crate::library::format_duration;
use crate::registry::{PlayState, Registry, Track};
use crate::spectrum::{BAND_COUNT, BandProfile};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("space", "play/pause");
    map.insert("a", "play all");
    map.insert("x", "pause all");
    map.insert("m", "mute");
    map.insert("s", "solo");
    // +/- , [/] and h/l are filled dynamically from config.
    map.insert("0", "restart");
    map.insert("r", "loop");
    map.insert("d", "remove");
    map.insert("c", "clear");
    map.insert("w", "save");
    map.insert("o", "reload playlist");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(volume_step: u8, seek_step: u8) -> String {
    let order = [
        "j/k", "space", "a", "x", "m", "s", "+/-", "[/]", "h/l", "0", "r", "d", "c", "w", "o", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "+/-" => Some(format!("[+/-] volume {volume_step}%")),
            "[/]" => Some(format!("[[/]] master {volume_step}%")),
            "h/l" => Some(format!("[h/l] seek {seek_step}%")),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Downsample the band profile to `width` columns, keeping each column's peak.
fn spectrum_columns(profile: &BandProfile, width: usize) -> Vec<u64> {
    let bands = profile.bands();
    if width == 0 {
        return Vec::new();
    }
    let per_column = BAND_COUNT.div_ceil(width).max(1);
    bands
        .chunks(per_column)
        .map(|chunk| {
            let peak = chunk.iter().copied().fold(0.0f32, f32::max);
            (peak * 100.0).round() as u64
        })
        .collect()
}

fn track_line<'a>(track: &'a Track, app: &App) -> Line<'a> {
    let audible = app.audibility.is_audible(track.id());
    let state = match track.state {
        PlayState::Playing => "▶",
        PlayState::Ended => "■",
        PlayState::Stopped => " ",
    };
    let flags = format!(
        "{}{}",
        if track.muted { "M" } else { "-" },
        if track.solo { "S" } else { "-" },
    );
    let name_style = if audible {
        Style::default()
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    Line::from(vec![
        Span::raw(format!("{state} ")),
        Span::raw(format!("[{flags}] ")),
        Span::raw(format!("{:>3}% ", (track.volume() * 100.0).round() as u32)),
        Span::raw(format!("{} ", format_duration(track.duration_secs))),
        Span::styled(track.name.as_str(), name_style),
    ])
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, app: &App, registry: &Registry, settings: &Settings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" polymix ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();
        parts.push(format!(
            "LOOP: {}",
            if registry.loop_enabled { "On" } else { "Off" }
        ));
        parts.push(format!(
            "MASTER: {}%",
            (registry.master_volume() * 100.0).round() as u32
        ));
        let playing = registry.iter().filter(|t| t.is_playing()).count();
        parts.push(format!("PLAYING: {playing}/{}", registry.len()));
        let audible = app.audibility.audible_count();
        if app.audibility.solo_active() {
            parts.push(format!("SOLO: {audible} audible"));
        } else {
            parts.push(format!("AUDIBLE: {audible}"));
        }
        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Master transport
    let ratio = app.progress.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(Block::bordered().title(" master "))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, chunks[2]);

    // Track list
    {
        let items: Vec<ListItem> = registry
            .iter()
            .map(|t| ListItem::new(track_line(t, app)))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if !registry.is_empty() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Spectrum
    {
        let area = chunks[4];
        let inner_width = area.width.saturating_sub(2) as usize;
        let bars = app
            .spectrum
            .as_ref()
            .map(|p| spectrum_columns(p, inner_width))
            .unwrap_or_default();
        let sparkline = Sparkline::default()
            .block(Block::bordered().title(" spectrum "))
            .data(bars)
            .max(100)
            .cyan();
        frame.render_widget(sparkline, area);
    }

    let footer_text = controls_text(
        settings.controls.volume_step_percent,
        settings.sync.seek_step_percent,
    );
    let footer = Paragraph::new(footer_text)
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

    frame.render_widget(footer, chunks[5]);
}
