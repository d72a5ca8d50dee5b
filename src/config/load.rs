use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `POLYMIX__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("POLYMIX")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        settings.mix.master_volume = crate::registry::clamp_unit(settings.mix.master_volume);
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.sync.progress_tick_ms == 0 {
            return Err("sync.progress_tick_ms must be >= 1".to_string());
        }
        if self.sync.seek_grace_ms == 0 {
            return Err("sync.seek_grace_ms must be >= 1".to_string());
        }
        if !(self.spectrum.gain.is_finite() && self.spectrum.gain > 0.0) {
            return Err("spectrum.gain must be a positive number".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `POLYMIX_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("POLYMIX_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/polymix/config.toml`
/// or `~/.config/polymix/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("polymix").join("config.toml"))
}
