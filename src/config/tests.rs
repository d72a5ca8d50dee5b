use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use super::state::{SavedState, load_state, save_state, state_path};
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_polymix_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", "/tmp/polymix-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/polymix-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("polymix")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("polymix")
            .join("config.toml")
    );
}

#[test]
fn defaults_start_with_loop_on_and_full_master_volume() {
    let s = Settings::default();
    assert!(s.mix.loop_enabled);
    assert_eq!(s.mix.master_volume, 1.0);
    assert_eq!(s.sync.seek_grace_ms, 100);
    assert_eq!(s.spectrum.gain, 10.0);
    assert!(s.library.extensions.iter().any(|e| e == "webm"));
    assert!(!s.spectrum.extensions.iter().any(|e| e == "webm"));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[mix]
master_volume = 0.4
loop_enabled = false

[sync]
progress_tick_ms = 50
seek_grace_ms = 250
seek_step_percent = 10

[spectrum]
gain = 4.5
extensions = ["wav"]

[controls]
volume_step_percent = 2
playlist_path = "/tmp/mix.json"

[ui]
header_text = "hello"

[library]
extensions = ["wav", "mp4"]
recursive = false
include_hidden = false
follow_links = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("POLYMIX__MIX__MASTER_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.mix.master_volume, 0.4);
    assert!(!s.mix.loop_enabled);
    assert_eq!(s.sync.progress_tick_ms, 50);
    assert_eq!(s.sync.seek_grace_ms, 250);
    assert_eq!(s.sync.seek_step_percent, 10);
    assert_eq!(s.spectrum.gain, 4.5);
    assert_eq!(s.spectrum.extensions, vec!["wav".to_string()]);
    assert_eq!(s.controls.volume_step_percent, 2);
    assert_eq!(s.controls.playlist_path, "/tmp/mix.json");
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.library.extensions, vec!["wav".to_string(), "mp4".to_string()]);
    assert!(!s.library.recursive);
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[sync]
seek_grace_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("POLYMIX__SYNC__SEEK_GRACE_MS", "40");

    let s = Settings::load().unwrap();
    assert_eq!(s.sync.seek_grace_ms, 40);
}

#[test]
fn master_volume_is_clamped_on_load() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[mix]\nmaster_volume = 3.0\n").unwrap();

    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("POLYMIX__MIX__MASTER_VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.mix.master_volume, 1.0);
}

#[test]
fn validate_rejects_zero_windows_and_bad_gain() {
    let mut s = Settings::default();
    s.sync.seek_grace_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.sync.progress_tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.spectrum.gain = 0.0;
    assert!(s.validate().is_err());
    s.spectrum.gain = f32::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn state_file_sits_beside_the_config_file() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", "/tmp/polymix-dir/config.toml");
    assert_eq!(
        state_path().unwrap(),
        std::path::PathBuf::from("/tmp/polymix-dir/state.json")
    );
}

#[test]
fn master_volume_survives_a_restart() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("polymix").join("config.toml");
    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());

    assert_eq!(load_state(), SavedState::default());

    save_state(&SavedState {
        master_volume: Some(0.35),
    })
    .unwrap();

    let raw: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("polymix").join("state.json")).unwrap(),
    )
    .unwrap();
    assert!(raw.get("masterVolume").is_some());
    assert_eq!(load_state().master_volume, Some(0.35));
}

#[test]
fn saved_state_is_clamped_and_malformed_files_are_ignored() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    let _g1 = EnvGuard::set("POLYMIX_CONFIG_PATH", cfg_path.to_str().unwrap());
    let state = dir.path().join("state.json");

    std::fs::write(&state, r#"{"masterVolume": 4.0}"#).unwrap();
    assert_eq!(load_state().master_volume, Some(1.0));

    std::fs::write(&state, "not json").unwrap();
    assert_eq!(load_state(), SavedState::default());
}
