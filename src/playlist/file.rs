use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::registry::{Registry, clamp_unit};

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    #[error("the playlist is empty; nothing to save")]
    Empty,
    #[error("failed to access playlist {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid playlist {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub path: PathBuf,
    pub name: String,
    #[serde(default = "full_volume")]
    pub volume: f32,
}

fn full_volume() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistFile {
    #[serde(default)]
    pub saved_at: String,
    pub items: Vec<PlaylistItem>,
}

impl PlaylistFile {
    /// Snapshot the registry in playlist order.
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            saved_at: chrono::Utc::now().to_rfc3339(),
            items: registry
                .iter()
                .map(|t| PlaylistItem {
                    path: t.path.clone(),
                    name: t.name.clone(),
                    volume: t.volume(),
                })
                .collect(),
        }
    }
}

/// Write the registry as pretty JSON. Refuses an empty playlist.
pub fn save(path: &Path, registry: &Registry) -> Result<(), PlaylistError> {
    if registry.is_empty() {
        return Err(PlaylistError::Empty);
    }
    let file = PlaylistFile::from_registry(registry);
    let json = serde_json::to_string_pretty(&file).map_err(|source| PlaylistError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| PlaylistError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!("saved {} track(s) to {}", file.items.len(), path.display());
    Ok(())
}

/// Read a playlist file. Volumes are clamped into `[0, 1]`.
pub fn load(path: &Path) -> Result<Vec<PlaylistItem>, PlaylistError> {
    let json = fs::read_to_string(path).map_err(|source| PlaylistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut file: PlaylistFile =
        serde_json::from_str(&json).map_err(|source| PlaylistError::Json {
            path: path.display().to_string(),
            source,
        })?;

    for item in &mut file.items {
        item.volume = clamp_unit(item.volume);
    }

    info!("loaded {} track(s) from {}", file.items.len(), path.display());
    Ok(file.items)
}
