// Centralized configuration for the wheel: compile-time defaults plus the
// runtime configuration resolved from wheel_config.toml.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WheelError, WheelResult};
use crate::parameters::ParameterSnapshot;
use crate::scene::SceneProperties;

// ====================
// Control panel start values
// ====================
pub const DEFAULT_ANGULAR_VELOCITY_RPS: f64 = 1.0;
pub const DEFAULT_DISTANCE_UM: f64 = 50.0;
pub const DEFAULT_DIAMETER_UM: f64 = 10.0;
pub const DEFAULT_DENSITY_G_CM3: f64 = 1.05;
pub const DEFAULT_VISCOSITY_MPA_S: f64 = 1.0;

// ====================
// Rotation
// ====================
/// Length of one rotation tick in seconds.
pub const DEFAULT_UNIT_DURATION_S: f64 = 0.1;
/// Longest accepted tick. Larger values cannot be scheduled against `Instant`.
pub const MAX_UNIT_DURATION_S: f64 = 3600.0;

// ====================
// Scene
// ====================
/// Outer ring radius in pixels. Not user adjustable.
pub const OUTER_RADIUS_PX: f32 = 100.0;
pub const DEFAULT_INNER_RADIUS_PX: f32 = 50.0;
pub const DEFAULT_THICKNESS: f32 = 1.0;
pub const DEFAULT_SCALE: f32 = 1.0;

// ====================
// Files
// ====================
pub const DEFAULT_CONFIG_FILE: &str = "wheel_config.toml";
pub const DEFAULT_RECORDING_DIR: &str = ".";
pub const READING_LOG_SUFFIX: &str = "_WheelTest.dat";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Duration of one rotation tick in seconds
    pub unit_duration_s: f64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            unit_duration_s: DEFAULT_UNIT_DURATION_S,
        }
    }
}

impl RotationConfig {
    /// Tick length, or an error when `unit_duration_s` is not in
    /// (0, [`MAX_UNIT_DURATION_S`]].
    pub fn try_unit_duration(&self) -> WheelResult<Duration> {
        let unit = self.unit_duration_s;
        let out_of_range = || {
            WheelError::InvalidConfig(format!(
                "rotation.unit_duration_s must be in (0, {}] seconds, got {}",
                MAX_UNIT_DURATION_S, unit
            ))
        };
        if !(unit > 0.0 && unit <= MAX_UNIT_DURATION_S) {
            return Err(out_of_range());
        }
        Duration::try_from_secs_f64(unit).map_err(|_| out_of_range())
    }

    /// Tick length for an already validated config. Out-of-range values fall
    /// back to the default instead of panicking.
    pub fn unit_duration(&self) -> Duration {
        self.try_unit_duration()
            .unwrap_or_else(|_| Duration::from_secs_f64(DEFAULT_UNIT_DURATION_S))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Directory the reading log is created in
    pub output_dir: PathBuf,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_RECORDING_DIR),
        }
    }
}

/// Fully resolved runtime configuration handed to [`crate::wheel::Wheel::new`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WheelConfig {
    pub parameters: ParameterSnapshot,
    pub scene: SceneProperties,
    pub rotation: RotationConfig,
    pub recording: RecordingConfig,
}

impl WheelConfig {
    pub fn validate(&self) -> WheelResult<()> {
        self.parameters.validate()?;
        self.scene.validate()?;
        self.rotation.try_unit_duration()?;
        Ok(())
    }
}
