//! Persisted application settings (TOML preferred, JSON accepted).

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::history;
use crate::model::GridConfig;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse settings {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("could not encode settings: {0}")]
    Encode(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Directory holding one `{venue}.json` per venue.
    pub data_dir: PathBuf,
    /// Last path used by Save As / Open.
    pub export_path: String,
    pub grid_size: f64,
    pub grid_enabled: bool,
    pub snap_to_grid: bool,
    pub grid_subdivisions: u32,
    /// Undo depth; 0 keeps every step.
    pub history_limit: usize,
    pub nudge_step: f64,
    pub nudge_step_fast: f64,
    pub show_rulers: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        let grid = GridConfig::default();
        Self {
            data_dir: PathBuf::from("layouts"),
            export_path: "layout.json".to_string(),
            grid_size: grid.size,
            grid_enabled: grid.enabled,
            snap_to_grid: grid.snap,
            grid_subdivisions: grid.subdivisions,
            history_limit: history::DEFAULT_LIMIT,
            nudge_step: 1.0,
            nudge_step_fast: 10.0,
            show_rulers: true,
        }
    }
}

impl AppSettings {
    /// Initial grid for a fresh store.
    pub fn grid(&self) -> GridConfig {
        GridConfig {
            size: self.grid_size,
            enabled: self.grid_enabled,
            snap: self.snap_to_grid,
            subdivisions: self.grid_subdivisions,
        }
    }

    /// Remember `grid` as the default for the next session.
    pub fn remember_grid(&mut self, grid: &GridConfig) {
        self.grid_size = grid.size;
        self.grid_enabled = grid.enabled;
        self.snap_to_grid = grid.snap;
        self.grid_subdivisions = grid.subdivisions;
    }
}

/// Settings file to use: `explicit`, else `~/.config/seatplan.toml`, else
/// `./settings.toml`.
pub fn settings_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(home) = std::env::var_os("HOME") {
        let path = PathBuf::from(home).join(".config").join("seatplan.toml");
        if path.exists() {
            return path;
        }
    }
    PathBuf::from("settings.toml")
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "toml")
}

fn parse(path: &Path, text: &str) -> Result<AppSettings, SettingsError> {
    let from_toml = || toml::from_str::<AppSettings>(text).map_err(|e| e.to_string());
    let from_json = || serde_json::from_str::<AppSettings>(text).map_err(|e| e.to_string());
    let result = if is_toml(path) {
        from_toml().or_else(|_| from_json())
    } else {
        from_json().or_else(|_| from_toml())
    };
    result.map_err(|message| SettingsError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Load settings from `path`. A missing file is `Ok(None)`.
pub fn load_settings(path: &Path) -> Result<Option<AppSettings>, SettingsError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse(path, &text).map(Some)
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    let text = if is_toml(path) {
        toml::to_string_pretty(settings).map_err(|e| SettingsError::Encode(e.to_string()))?
    } else {
        serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Encode(e.to_string()))?
    };
    std::fs::write(path, text).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
