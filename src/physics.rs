//! Closed-form single-particle physics for the spinning wheel.

use std::f64::consts::PI;

use crate::parameters::ParameterSnapshot;
use crate::profile_scope;
use crate::units;

/// Derived quantities for one parameter snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsResult {
    /// Tangential speed at the particle's radius, µm/s
    pub linear_velocity_um_s: f64,
    /// Stokes drag at that speed, pN. At constant velocity this is taken to equal
    /// the dielectrophoretic force needed to hold the particle in place.
    pub drag_force_pn: f64,
    /// pN
    pub centripetal_force_pn: f64,
}

/// Evaluate linear velocity, drag-equivalent (DEP) force and centripetal force.
///
/// Pure and total over finite non-negative input. Negative or non-finite fields
/// are not rejected here and propagate into the result; validate the snapshot
/// first (see [`ParameterSnapshot::validate`]).
pub fn evaluate(snapshot: &ParameterSnapshot) -> PhysicsResult {
    profile_scope!("evaluate");

    // Linear velocity
    let omega = units::rps_to_rad_per_s(snapshot.angular_velocity_rps); // rad/s
    let linear_velocity_um_s = omega * snapshot.distance_from_axis_um;

    // Drag (Stokes) in SI
    let viscosity = units::mpa_s_to_pa_s(snapshot.fluid_viscosity_mpa_s); // Pa s
    let radius = units::um_to_m(snapshot.particle_diameter_um / 2.0); // m
    let linear_velocity = units::um_to_m(linear_velocity_um_s); // m/s
    let drag = 6.0 * PI * viscosity * radius * linear_velocity; // N

    // Centripetal force
    let distance = units::um_to_m(snapshot.distance_from_axis_um); // m
    let density = units::g_cm3_to_kg_m3(snapshot.particle_density_g_cm3); // kg/m3
    let volume = 4.0 * PI * radius.powi(3) / 3.0; // m3
    let mass = density * volume; // kg
    let centripetal = mass * omega.powi(2) * distance; // N

    PhysicsResult {
        linear_velocity_um_s,
        drag_force_pn: units::n_to_pn(drag),
        centripetal_force_pn: units::n_to_pn(centripetal),
    }
}
