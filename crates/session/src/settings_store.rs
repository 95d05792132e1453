//! Settings persistence.
//!
//! A single JSON file under the app config directory. Missing or corrupt
//! data falls back to defaults; partial data merges over defaults field by
//! field (the `Settings` serde defaults do the merging).

use std::path::{Path, PathBuf};

use redpen_core::Settings;
use tracing::warn;

const SETTINGS_FILE: &str = "settings.json";

fn default_path() -> PathBuf {
    redpen_config::AppConfig::config_dir().join(SETTINGS_FILE)
}

/// Load settings from the default location.
pub fn load_settings() -> Settings {
    load_settings_from(&default_path())
}

/// Load settings from a specific path, defaulting on any failure.
pub fn load_settings_from(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        // A missing file is the normal first-run case.
        Err(_) => return Settings::default(),
    };

    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Corrupt settings file, using defaults");
            Settings::default()
        }
    }
}

/// Save settings to the default location.
pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    save_settings_to(&default_path(), settings)
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}
