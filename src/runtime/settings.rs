use log::warn;

use crate::config::{self, SavedState, Settings};

/// Load and validate settings. A missing, unreadable or invalid config never
/// stops start-up; the defaults are used instead.
pub fn load_settings() -> Settings {
    Settings::load()
        .map_err(|e| format!("failed to load config: {e}"))
        .and_then(|s| s.validate().map(|()| s).map_err(|msg| format!("invalid config: {msg}")))
        .unwrap_or_else(|msg| {
            warn!("{msg}; using defaults");
            Settings::default()
        })
}

/// Let the master volume saved by the previous run win over the config value.
pub fn restore_state(settings: &mut Settings) {
    if let Some(volume) = config::load_state().master_volume {
        settings.mix.master_volume = volume;
    }
}

/// Remember the master volume for the next run. Failure is only logged.
pub fn remember_state(master_volume: f32) {
    let state = SavedState {
        master_volume: Some(master_volume),
    };
    if let Err(e) = config::save_state(&state) {
        warn!("{e}");
    }
}
