//! Reference frames and low-precision astronomy
//!
//! Every function here is a pure function of an explicit instant. Physical
//! vectors (km, ECI/ECF with Z as the polar axis) use nalgebra; scene vectors
//! use glam with Y up, obtained by the (x, z, y) axis permutation.

use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::{DateTime, Utc};
use glam::Vec3;
use nalgebra::{Rotation3, Vector3};

/// Julian date of the Unix epoch
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of J2000.0
pub const J2000_JD: f64 = 2_451_545.0;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Julian date (UTC) of an instant
pub fn julian_date(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// Days elapsed since J2000.0
pub fn j2000_days(at: DateTime<Utc>) -> f64 {
    julian_date(at) - J2000_JD
}

/// Obliquity of the ecliptic (radians) for a J2000 day count
pub fn axial_tilt_from_days(days: f64) -> f64 {
    (23.439 - 4.0e-7 * days).to_radians()
}

/// Obliquity of the ecliptic (radians)
pub fn earth_axial_tilt(at: DateTime<Utc>) -> f64 {
    axial_tilt_from_days(j2000_days(at))
}

/// Sun right ascension and declination (radians) for a J2000 day count
pub fn sun_equatorial_from_days(days: f64) -> (f64, f64) {
    let mean_longitude = 280.460 + 0.985_647_4 * days;
    let mean_anomaly = ((357.528 + 0.985_600_3 * days) % 360.0).to_radians();
    let epsilon = axial_tilt_from_days(days);

    let lambda = (mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();

    let right_ascension = (epsilon.cos() * lambda.sin()).atan2(lambda.cos());
    let declination = (epsilon.sin() * lambda.sin()).asin();
    (right_ascension, declination)
}

/// Sun right ascension and declination (radians)
pub fn sun_equatorial_position(at: DateTime<Utc>) -> (f64, f64) {
    sun_equatorial_from_days(j2000_days(at))
}

/// Unit vector toward the Sun in ECI
pub fn sun_direction_eci(at: DateTime<Utc>) -> Vector3<f64> {
    let (ra, dec) = sun_equatorial_position(at);
    Vector3::new(dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin())
}

/// Greenwich Mean Sidereal Time (radians, [0, 2π)), IAU 1982 polynomial with UT1 ≈ UTC
pub fn gmst(at: DateTime<Utc>) -> f64 {
    let t = j2000_days(at) / DAYS_PER_JULIAN_CENTURY;
    let seconds = -6.2e-6 * t * t * t
        + 0.093104 * t * t
        + (876_600.0 * 3600.0 + 8_640_184.812866) * t
        + 67_310.54841;
    // 240 sidereal seconds per degree
    (seconds.to_radians() / 240.0).rem_euclid(TAU)
}

/// Scene rotation of the Earth mesh that aligns Greenwich with the vernal equinox
pub fn earth_rotation_angle(gmst: f64) -> f64 {
    -gmst - FRAC_PI_2
}

/// Rotate an inertial vector into the Earth-fixed frame
pub fn eci_to_ecf(pos_eci: &Vector3<f64>, gmst: f64) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst) * pos_eci
}

/// Inverse of [`eci_to_ecf`]
pub fn ecf_to_eci(pos_ecf: &Vector3<f64>, gmst: f64) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), gmst) * pos_ecf
}

/// Permute a physical vector into scene axes (x, z, y) and scale it
pub fn to_scene(v: &Vector3<f64>, scale: f64) -> Vec3 {
    Vec3::new(
        (v.x * scale) as f32,
        (v.z * scale) as f32,
        (v.y * scale) as f32,
    )
}

/// Time-dependent quantities a render tick needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub gmst: f64,
    /// Rotation about the scene's vertical axis to apply to the Earth mesh
    pub earth_rotation: f64,
    pub axial_tilt: f64,
    /// Unit vector toward the Sun in scene axes
    pub sun_direction: Vec3,
}

impl FrameSnapshot {
    pub fn at(at: DateTime<Utc>) -> Self {
        Self::with_gmst(at, gmst(at))
    }

    /// Build a snapshot with a GMST supplied by the propagator's time utilities
    pub fn with_gmst(at: DateTime<Utc>, gmst: f64) -> Self {
        Self {
            gmst,
            earth_rotation: earth_rotation_angle(gmst),
            axial_tilt: earth_axial_tilt(at),
            sun_direction: to_scene(&sun_direction_eci(at), 1.0),
        }
    }
}
