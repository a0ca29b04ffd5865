use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "cops_info";
const SETTINGS_FILE: &str = "settings.json";

/// Named string settings owned by the caller layer. The fetchers never read
/// these; the nickname reaches them as a plain parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub elo: String,
}

pub fn load_settings() -> Settings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => Settings::default(),
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let Some(path) = settings_path() else {
        return Ok(());
    };
    save_settings_to(&path, settings)
}

/// Missing or unreadable files load as defaults; settings are best-effort.
pub fn load_settings_from(path: &Path) -> Settings {
    let Ok(raw) = fs::read_to_string(path) else {
        return Settings::default();
    };
    serde_json::from_str(&raw).unwrap_or_default()
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(settings).context("serialize settings")?;
    fs::write(&tmp, json).context("write settings")?;
    fs::rename(&tmp, &path).context("swap settings")?;
    Ok(())
}

fn settings_path() -> Option<PathBuf> {
    // Prefer XDG config.
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CONFIG_DIR).join(SETTINGS_FILE));
        }
    }
    // Fallback to ~/.config on linux-like systems.
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(CONFIG_DIR)
            .join(SETTINGS_FILE),
    )
}
