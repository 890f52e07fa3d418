// init_config.rs
// Handles loading and parsing the start-up configuration from wheel_config.toml

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::{self, RecordingConfig, RotationConfig, WheelConfig};
use crate::error::WheelResult;
use crate::parameters::ParameterSnapshot;
use crate::scene::SceneProperties;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InitConfig {
    pub parameters: Option<ParametersConfig>,
    pub scene: Option<SceneProperties>,
    pub rotation: Option<RotationConfig>,
    pub recording: Option<RecordingConfig>,
}

/// Initial control panel values. Any field left out keeps its default.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParametersConfig {
    pub angular_velocity_rps: Option<f64>,
    pub distance_from_axis_um: Option<f64>,
    pub particle_diameter_um: Option<f64>,
    pub particle_density_g_cm3: Option<f64>,
    pub fluid_viscosity_mpa_s: Option<f64>,
}

impl ParametersConfig {
    pub fn to_snapshot(&self) -> ParameterSnapshot {
        let default = ParameterSnapshot::default();
        ParameterSnapshot {
            angular_velocity_rps: self
                .angular_velocity_rps
                .unwrap_or(default.angular_velocity_rps),
            distance_from_axis_um: self
                .distance_from_axis_um
                .unwrap_or(default.distance_from_axis_um),
            particle_diameter_um: self
                .particle_diameter_um
                .unwrap_or(default.particle_diameter_um),
            particle_density_g_cm3: self
                .particle_density_g_cm3
                .unwrap_or(default.particle_density_g_cm3),
            fluid_viscosity_mpa_s: self
                .fluid_viscosity_mpa_s
                .unwrap_or(default.fluid_viscosity_mpa_s),
        }
    }
}

impl InitConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> WheelResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> WheelResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path` if it exists, otherwise start from the defaults. A file that
    /// exists but does not parse is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> WheelResult<Self> {
        let path = path.as_ref();
        if path.is_file() {
            info!("Loading configuration from {}", path.display());
            Self::load_from_file(path)
        } else {
            warn!("{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(config::DEFAULT_CONFIG_FILE)
    }

    /// Fill every missing section with its defaults and validate the result.
    pub fn resolve(self) -> WheelResult<WheelConfig> {
        let resolved = WheelConfig {
            parameters: self
                .parameters
                .map(|p| p.to_snapshot())
                .unwrap_or_default(),
            scene: self.scene.unwrap_or_default(),
            rotation: self.rotation.unwrap_or_default(),
            recording: self.recording.unwrap_or_default(),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}
