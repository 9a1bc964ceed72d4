use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::{GroundConfig, MovementConfig, PitchLimits};

/// Default location of the controller settings, relative to the working directory.
pub const SETTINGS_PATH: &str = "assets/controller.json";

/// Tuning for the keyboard and mouse input provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Multiplier from raw mouse motion to look input.
    pub look_scale: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self { look_scale: 0.1 }
    }
}

/// Everything needed to spawn and drive a first-person character.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    pub movement: MovementConfig,
    pub ground: GroundConfig,
    pub camera: PitchLimits,
    pub input: InputSettings,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ControllerSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&data).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Loads settings, falling back to the defaults if the file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}, using default controller settings", e);
                Self::default()
            }
        }
    }
}

/// Inserts [`ControllerSettings`] loaded from `path`.
pub struct SettingsPlugin {
    pub path: PathBuf,
}

impl Default for SettingsPlugin {
    fn default() -> Self {
        Self {
            path: PathBuf::from(SETTINGS_PATH),
        }
    }
}

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = ControllerSettings::load_or_default(&self.path);
        info!("Controller settings: {:?}", settings);
        app.insert_resource(settings);
    }
}
