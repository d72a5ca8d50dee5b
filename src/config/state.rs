use std::{fs, io, path::PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::load::resolve_config_path;

/// Values remembered between runs. Written on shutdown, read on start-up,
/// and preferred over the matching config defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedState {
    pub master_volume: Option<f32>,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("no config directory to keep state in")]
    NoDirectory,
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode state: {0}")]
    Json(#[from] serde_json::Error),
}

/// `state.json` beside the resolved config file.
pub fn state_path() -> Option<PathBuf> {
    resolve_config_path().and_then(|p| p.parent().map(|dir| dir.join("state.json")))
}

/// Read the saved state. A missing or unreadable file yields the default.
pub fn load_state() -> SavedState {
    let Some(path) = state_path() else {
        return SavedState::default();
    };
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no saved state at {}", path.display());
            return SavedState::default();
        }
        Err(e) => {
            warn!("failed to read {}: {e}", path.display());
            return SavedState::default();
        }
    };
    match serde_json::from_str::<SavedState>(&text) {
        Ok(mut state) => {
            state.master_volume = state.master_volume.map(crate::registry::clamp_unit);
            state
        }
        Err(e) => {
            warn!("ignoring malformed {}: {e}", path.display());
            SavedState::default()
        }
    }
}

pub fn save_state(state: &SavedState) -> Result<(), StateError> {
    let path = state_path().ok_or(StateError::NoDirectory)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| StateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(&path, json).map_err(|source| StateError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("saved state to {}", path.display());
    Ok(())
}
