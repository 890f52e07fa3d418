//! Physical unit definitions and conversions.
//!
//! The control surface works in laboratory units:
//! - Length: micrometer (µm)
//! - Viscosity: millipascal-second (mPa·s)
//! - Density: gram per cubic centimeter (g/cm³)
//! - Force: piconewton (pN)
//! - Angular velocity: revolutions per second (rps)
//!
//! Everything is converted to SI before any force is computed.

use std::f64::consts::TAU;

/// Micrometer in meters.
pub const MICROMETER: f64 = 1.0e-6;
/// Millipascal-second in pascal-seconds.
pub const MILLIPASCAL_SECOND: f64 = 1.0e-3;
/// g/cm³ in kg/m³.
pub const GRAM_PER_CM3: f64 = 1.0e3;
/// Newtons to piconewtons.
pub const NEWTON_TO_PICONEWTON: f64 = 1.0e12;
/// Degrees in one revolution.
pub const DEGREES_PER_REVOLUTION: f64 = 360.0;

/// Revolutions per second to rad/s.
#[inline]
pub fn rps_to_rad_per_s(rps: f64) -> f64 {
    rps * TAU
}

#[inline]
pub fn um_to_m(um: f64) -> f64 {
    um * MICROMETER
}

#[inline]
pub fn mpa_s_to_pa_s(mpa_s: f64) -> f64 {
    mpa_s * MILLIPASCAL_SECOND
}

#[inline]
pub fn g_cm3_to_kg_m3(g_cm3: f64) -> f64 {
    g_cm3 * GRAM_PER_CM3
}

#[inline]
pub fn n_to_pn(newtons: f64) -> f64 {
    newtons * NEWTON_TO_PICONEWTON
}
