use anyhow::Result;
use pointercast_pointer::PointerConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "config/pointer.toml";

/// Settings file for a headless replay: `[pointer]` and `[run]` tables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub pointer: PointerConfig,
    pub run: RunSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunSettings {
    /// Ticks to replay when `--ticks` is not given.
    pub ticks: u64,
    /// Activate the pointer before the first scripted step.
    pub start_active: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            ticks: 120,
            start_active: true,
        }
    }
}

impl Settings {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Settings>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    Settings::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_SETTINGS_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Pointer config not found at {}. Using defaults",
                        path.display()
                    );
                }
                Settings::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
