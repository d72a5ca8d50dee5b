use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/polymix/config.toml` or `~/.config/polymix/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `POLYMIX__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub mix: MixSettings,
    pub sync: SyncSettings,
    pub spectrum: SpectrumSettings,
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MixSettings {
    /// Initial master volume in `[0, 1]`; out-of-range values are clamped.
    pub master_volume: f32,
    /// Whether tracks restart when they reach the end.
    pub loop_enabled: bool,
}

impl Default for MixSettings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            loop_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// How often playing tracks are polled for position and end-of-media.
    pub progress_tick_ms: u64,
    /// How long progress reporting stays quiet after a master seek.
    pub seek_grace_ms: u64,
    /// Master progress step for `h` / `l`, in percent.
    pub seek_step_percent: u8,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            progress_tick_ms: 100,
            seek_grace_ms: 100,
            seek_step_percent: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpectrumSettings {
    /// Multiplier applied to each band's RMS before clamping.
    pub gain: f32,
    /// Extensions decoded for analysis; other media has no profile.
    pub extensions: Vec<String>,
}

impl Default for SpectrumSettings {
    fn default() -> Self {
        Self {
            gain: crate::spectrum::DEFAULT_GAIN,
            extensions: vec!["mp3".into(), "wav".into(), "ogg".into(), "flac".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions admitted to the playlist (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when expanding directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: ["mp3", "wav", "ogg", "flac", "mp4", "webm", "mov", "avi", "wmv"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change for `+` / `-` / `[` / `]`, in percent.
    pub volume_step_percent: u8,
    /// Where `w` saves the playlist when none was loaded.
    pub playlist_path: String,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step_percent: 5,
            playlist_path: "playlist.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ every stem, one timeline ~ ".to_string(),
        }
    }
}
