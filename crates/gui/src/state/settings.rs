//! Application settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::EffectSettings;

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    /// Initial chat panel size in points
    pub chat_size: [f32; 2],
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            chat_size: [340.0, 420.0],
        }
    }
}

/// All application settings. Read once at startup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
    /// Glass effect settings
    #[serde(default)]
    pub effect: EffectSettings,
}

impl AppSettings {
    /// Location of `settings.json` in the platform config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "floatchat", "floatchat")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`. A missing file yields the defaults; an
    /// unreadable or malformed one is logged and also yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read settings from {}: {e}", path.display());
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings from {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
