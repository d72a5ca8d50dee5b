use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::analysis::AnalysisWorker;
use crate::app::App;
use crate::media::RodioMedia;
use crate::session::Session;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    settings::restore_state(&mut settings);
    let inputs: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let media = RodioMedia::open_default()?;
    let worker = AnalysisWorker::spawn(settings.spectrum.clone());
    let mut session = Session::new(media, worker, &settings);

    let loaded = startup::admit(&inputs, &settings.library, &mut session);
    let playlist_path = loaded.unwrap_or_else(|| PathBuf::from(&settings.controls.playlist_path));
    let mut app = App::new(playlist_path);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut session);
    settings::remember_state(session.registry().master_volume());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
