//! The parameter snapshot read by the evaluator and the rotation scheduler.

use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::{WheelError, WheelResult};

/// Physical inputs from the control surface, in laboratory units.
///
/// Re-derived on every change; nothing caches it except the [`crate::wheel::Wheel`]
/// that holds the live copy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSnapshot {
    /// Revolutions per second
    pub angular_velocity_rps: f64,
    /// Micrometers
    pub distance_from_axis_um: f64,
    /// Micrometers
    pub particle_diameter_um: f64,
    /// g/cm³
    pub particle_density_g_cm3: f64,
    /// mPa·s
    pub fluid_viscosity_mpa_s: f64,
}

impl ParameterSnapshot {
    pub fn new(
        angular_velocity_rps: f64,
        distance_from_axis_um: f64,
        particle_diameter_um: f64,
        particle_density_g_cm3: f64,
        fluid_viscosity_mpa_s: f64,
    ) -> Self {
        Self {
            angular_velocity_rps,
            distance_from_axis_um,
            particle_diameter_um,
            particle_density_g_cm3,
            fluid_viscosity_mpa_s,
        }
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::AngularVelocity => self.angular_velocity_rps,
            Parameter::Distance => self.distance_from_axis_um,
            Parameter::Diameter => self.particle_diameter_um,
            Parameter::Density => self.particle_density_g_cm3,
            Parameter::Viscosity => self.fluid_viscosity_mpa_s,
        }
    }

    /// Copy of this snapshot with one field replaced.
    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        match parameter {
            Parameter::AngularVelocity => self.angular_velocity_rps = value,
            Parameter::Distance => self.distance_from_axis_um = value,
            Parameter::Diameter => self.particle_diameter_um = value,
            Parameter::Density => self.particle_density_g_cm3 = value,
            Parameter::Viscosity => self.fluid_viscosity_mpa_s = value,
        }
        self
    }

    /// Every field must be finite and non-negative. Reports the first offender.
    pub fn validate(&self) -> WheelResult<()> {
        for parameter in Parameter::ALL {
            let value = self.get(parameter);
            if !value.is_finite() || value < 0.0 {
                return Err(WheelError::InvalidParameter {
                    name: parameter.field_name(),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            angular_velocity_rps: config::DEFAULT_ANGULAR_VELOCITY_RPS,
            distance_from_axis_um: config::DEFAULT_DISTANCE_UM,
            particle_diameter_um: config::DEFAULT_DIAMETER_UM,
            particle_density_g_cm3: config::DEFAULT_DENSITY_G_CM3,
            fluid_viscosity_mpa_s: config::DEFAULT_VISCOSITY_MPA_S,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    AngularVelocity,
    Distance,
    Diameter,
    Density,
    Viscosity,
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::AngularVelocity,
        Parameter::Distance,
        Parameter::Diameter,
        Parameter::Density,
        Parameter::Viscosity,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            Parameter::AngularVelocity => "angular_velocity_rps",
            Parameter::Distance => "distance_from_axis_um",
            Parameter::Diameter => "particle_diameter_um",
            Parameter::Density => "particle_density_g_cm3",
            Parameter::Viscosity => "fluid_viscosity_mpa_s",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::AngularVelocity => "rps",
            Parameter::Distance | Parameter::Diameter => "um",
            Parameter::Density => "g/cm3",
            Parameter::Viscosity => "mPa s",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

impl FromStr for Parameter {
    type Err = String;

    /// Accepts the field name or the short console alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "omega" | "velocity" | "angular_velocity_rps" => Ok(Parameter::AngularVelocity),
            "distance" | "distance_from_axis_um" => Ok(Parameter::Distance),
            "diameter" | "particle_diameter_um" => Ok(Parameter::Diameter),
            "density" | "particle_density_g_cm3" => Ok(Parameter::Density),
            "viscosity" | "fluid_viscosity_mpa_s" => Ok(Parameter::Viscosity),
            _ => Err(format!("Unknown parameter: {}", s)),
        }
    }
}
