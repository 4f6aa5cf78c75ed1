use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rendering::Color;
use crate::sync::SyncError;
use crate::utils::math::{Dimension, OrientationComponents, Position};
use crate::world::physics::DEFAULT_GRAVITY;
use crate::world::BodyKind;

const SIMULATION_CONFIG_FILE: &str = "simulation.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid orientation for body {index}: {source}")]
    Orientation { index: usize, source: SyncError },

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// World
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub gravity: [f32; 3],
    /// Fixed step length in seconds
    pub timestep: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            timestep: 1.0 / 60.0,
        }
    }
}

// =============================================================================
// Bodies
// =============================================================================

fn default_debug() -> bool {
    true
}

fn default_color() -> Color {
    Color::RED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSettings {
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default = "default_debug")]
    pub debug: bool,
    #[serde(default)]
    pub body: BodyKind,
    pub dimension: Dimension,
    #[serde(default)]
    pub position: Position,
    /// Quaternion components; either all four or none
    #[serde(default)]
    pub orientation: OrientationComponents,
}

impl Default for BoxSettings {
    fn default() -> Self {
        // Flat red slab at the origin
        Self {
            color: default_color(),
            debug: default_debug(),
            body: BodyKind::Fixed,
            dimension: Dimension::new(10.0, 0.1, 10.0),
            position: Position::zero(),
            orientation: OrientationComponents {
                x: Some(0.0),
                y: Some(0.0),
                z: Some(0.0),
                w: Some(1.0),
            },
        }
    }
}

// =============================================================================
// Simulation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Frames the demo runs for
    #[serde(default = "SimulationSettings::default_frames")]
    pub frames: u32,
    #[serde(default)]
    pub world: WorldSettings,
    #[serde(default, rename = "body")]
    pub bodies: Vec<BoxSettings>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            frames: Self::default_frames(),
            world: WorldSettings::default(),
            bodies: vec![BoxSettings::default()],
        }
    }
}

impl SimulationSettings {
    fn default_frames() -> u32 {
        120
    }

    pub fn from_toml_str(data: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(data)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from_path(path: &Path) -> ConfigResult<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_toml_str(&data)
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects bodies whose orientation names only some quaternion components
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, body) in self.bodies.iter().enumerate() {
            body.orientation
                .resolve()
                .map_err(|source| ConfigError::Orientation { index, source })?;
        }
        Ok(())
    }
}

fn simulation_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "rigid-sync", "rigid-sync")
        .map(|proj| proj.config_dir().join(SIMULATION_CONFIG_FILE))
}

pub fn save_simulation_settings(settings: &SimulationSettings) -> ConfigResult<PathBuf> {
    let path = simulation_config_path().ok_or(ConfigError::NoConfigDir)?;
    save_simulation_settings_to(&path, settings)?;
    Ok(path)
}

/// Writes `settings` to `path`, creating missing parent directories
pub fn save_simulation_settings_to(path: &Path, settings: &SimulationSettings) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, settings.to_toml_string()?)?;
    tracing::info!("Simulation settings saved to {:?}", path);
    Ok(())
}

pub fn load_simulation_settings() -> Option<SimulationSettings> {
    let path = simulation_config_path()?;
    load_simulation_settings_from(&path)
}

/// Missing or unreadable files give `None`; an invalid file is logged and ignored
pub fn load_simulation_settings_from(path: &Path) -> Option<SimulationSettings> {
    let data = fs::read_to_string(path).ok()?;
    match SimulationSettings::from_toml_str(&data) {
        Ok(settings) => {
            tracing::info!("Simulation settings loaded from {:?}", path);
            Some(settings)
        }
        Err(e) => {
            tracing::warn!("Ignoring {:?}: {}", path, e);
            None
        }
    }
}
