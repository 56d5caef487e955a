//! Engine settings loaded from an optional TOML sidecar file.
//!
//! Missing files and missing keys fall back to defaults so a bare data
//! directory always works.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SETTINGS_FILE: &str = "questline.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// World content file, relative to the data directory.
    #[serde(default = "default_world_file")]
    pub world_file: String,
    /// Whether terminal output uses color.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_file: default_world_file(),
            color: default_color(),
        }
    }
}

fn default_world_file() -> String {
    "world.ron".to_string()
}

fn default_color() -> bool {
    true
}

/// Load settings from `path`, falling back to defaults when the file is
/// absent or malformed.
pub fn load_settings(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("failed to parse settings file {}: {err}", path.display());
                Settings::default()
            },
        },
        Err(_) => Settings::default(),
    }
}
