use std::time::{Duration, Instant};

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::analysis::{AnalysisWorker, JobQueue};
use crate::app::App;
use crate::config;
use crate::media::{MediaBackend, RodioMedia};
use crate::playlist;
use crate::session::{Event, Session};
use crate::ui;

/// Main terminal event loop: feeds analysis completions and timer ticks to
/// the session, redraws, and maps keys to session events. Returns `Ok(())`
/// when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<RodioMedia, AnalysisWorker>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.sync.progress_tick_ms);
    let mut last_tick = Instant::now();

    loop {
        for completion in session.jobs().try_completions() {
            session.handle(Event::Analysis(completion));
        }

        if last_tick.elapsed() >= tick {
            session.handle(Event::Tick);
            last_tick = Instant::now();
        }

        for notice in session.drain_notices() {
            app.apply(notice);
        }
        app.clamp_selection(session.registry().len());

        terminal.draw(|f| ui::draw(f, app, session.registry(), settings))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Translate one key press into session events. Returns `true` on quit.
fn handle_key_event<M: MediaBackend, Q: JobQueue>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<M, Q>,
) -> bool {
    let volume_step = f32::from(settings.controls.volume_step_percent) / 100.0;
    let seek_step = f64::from(settings.sync.seek_step_percent) / 100.0;
    let selected = app.selected_id(session.registry());

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') => app.next(session.registry().len()),
        KeyCode::Char('k') => app.prev(),
        KeyCode::Char(' ') => {
            if let Some(id) = selected {
                session.handle(Event::PlayPauseToggled(id));
            }
        }
        KeyCode::Char('a') => session.handle(Event::PlayAll),
        KeyCode::Char('x') => session.handle(Event::PauseAll),
        KeyCode::Char('m') => {
            if let Some(id) = selected {
                session.handle(Event::MuteToggled(id));
            }
        }
        KeyCode::Char('s') => {
            if let Some(id) = selected {
                session.handle(Event::SoloToggled(id));
            }
        }
        KeyCode::Char(c @ ('+' | '=' | '-')) => {
            let Some(id) = selected else {
                return false;
            };
            let Some(current) = session.registry().find(id).map(|t| t.volume()) else {
                return false;
            };
            let delta = if c == '-' { -volume_step } else { volume_step };
            session.handle(Event::VolumeChanged {
                id,
                volume: current + delta,
            });
        }
        KeyCode::Char(c @ (']' | '[')) => {
            let delta = if c == '[' { -volume_step } else { volume_step };
            let master = session.registry().master_volume();
            session.handle(Event::MasterVolumeChanged(master + delta));
        }
        KeyCode::Char(c @ ('l' | 'h')) => {
            let delta = if c == 'h' { -seek_step } else { seek_step };
            session.handle(Event::SeekRequested(session.progress() + delta));
        }
        KeyCode::Char('0') => session.handle(Event::SeekRequested(0.0)),
        KeyCode::Char('r') => {
            session.handle(Event::LoopToggled);
            let state = if session.registry().loop_enabled { "on" } else { "off" };
            app.set_status(format!("loop {state}"));
        }
        KeyCode::Char('d') => {
            if let Some(id) = selected {
                session.handle(Event::Remove(id));
                app.clamp_selection(session.registry().len());
            }
        }
        KeyCode::Char('c') => {
            session.handle(Event::Clear);
            app.selected = 0;
        }
        KeyCode::Char('w') => match playlist::save(&app.playlist_path, session.registry()) {
            Ok(()) => {
                let msg = format!("saved {}", app.playlist_path.display());
                app.set_status(msg);
            }
            Err(e) => {
                warn!("{e}");
                app.set_status(e.to_string());
            }
        },
        KeyCode::Char('o') => match playlist::load(&app.playlist_path) {
            Ok(items) => {
                let count = items.len();
                session.load_playlist(items);
                app.selected = 0;
                app.set_status(format!("loaded {count} track(s)"));
            }
            Err(e) => {
                warn!("{e}");
                app.set_status(e.to_string());
            }
        },
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalysisJob;
    use crate::media::{MediaError, MediaEvent};
    use crate::registry::TrackId;
    use crossterm::event::KeyModifiers;
    use std::path::{Path, PathBuf};

    /// Backend that accepts everything and produces no sound.
    struct Silent;

    impl MediaBackend for Silent {
        fn open(&mut self, _id: TrackId, _path: &Path) -> Result<(), MediaError> {
            Ok(())
        }
        fn is_open(&self, _id: TrackId) -> bool {
            true
        }
        fn release(&mut self, _id: TrackId) {}
        fn set_volume(&mut self, _id: TrackId, _volume: f32) {}
        fn set_muted(&mut self, _id: TrackId, _muted: bool) {}
        fn play(&mut self, _id: TrackId) {}
        fn pause(&mut self, _id: TrackId) {}
        fn seek(&mut self, _id: TrackId, _secs: f64) {}
        fn current_time(&self, _id: TrackId) -> Option<f64> {
            None
        }
        fn duration(&self, _id: TrackId) -> Option<f64> {
            None
        }
        fn poll_events(&mut self) -> Vec<MediaEvent> {
            Vec::new()
        }
    }

    fn press(app: &mut App, session: &mut Session<Silent, Vec<AnalysisJob>>, c: char) -> bool {
        let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        handle_key_event(key, &config::Settings::default(), app, session)
    }

    fn setup() -> (App, Session<Silent, Vec<AnalysisJob>>) {
        let playlist = std::env::temp_dir().join("polymix-keys.json");
        let mut session = Session::new(Silent, Vec::new(), &config::Settings::default());
        session.add(PathBuf::from("/a.wav"), "a.wav".into(), 0.5);
        session.add(PathBuf::from("/b.wav"), "b.wav".into(), 1.0);
        (App::new(playlist), session)
    }

    #[test]
    fn volume_keys_step_the_selected_track() {
        let (mut app, mut session) = setup();
        press(&mut app, &mut session, '+');
        assert!((session.registry().get(0).unwrap().volume() - 0.55).abs() < 1e-6);
        press(&mut app, &mut session, 'j');
        press(&mut app, &mut session, '+');
        assert_eq!(session.registry().get(1).unwrap().volume(), 1.0);
    }

    #[test]
    fn master_keys_step_and_clamp() {
        let (mut app, mut session) = setup();
        press(&mut app, &mut session, ']');
        assert_eq!(session.registry().master_volume(), 1.0);
        press(&mut app, &mut session, '[');
        assert!((session.registry().master_volume() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn remove_keeps_the_cursor_on_a_row() {
        let (mut app, mut session) = setup();
        press(&mut app, &mut session, 'j');
        press(&mut app, &mut session, 'd');
        assert_eq!(session.registry().len(), 1);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn quit_and_unknown_keys() {
        let (mut app, mut session) = setup();
        assert!(!press(&mut app, &mut session, 'z'));
        assert!(press(&mut app, &mut session, 'q'));
    }
}
