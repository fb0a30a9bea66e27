//! Orbit ellipse geometry from mean elements

use glam::{DMat3, DVec3, Vec3};

use crate::data::OrbitalElements;
use crate::error::CatalogError;
use crate::renderer::OrbitVertex;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Closed orbit ellipse in scene units
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitGeometry {
    pub semi_major: f64,
    pub semi_minor: f64,
    /// Distance from ellipse center to the focus holding the central body
    pub focus_offset: f64,
    /// `resolution + 1` points; first and last coincide
    pub path: Vec<Vec3>,
}

impl OrbitGeometry {
    pub fn resolution(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Closest distance to the central body (scene units)
    pub fn periapsis(&self) -> f64 {
        self.semi_major - self.focus_offset
    }

    /// Farthest distance from the central body (scene units)
    pub fn apoapsis(&self) -> f64 {
        self.semi_major + self.focus_offset
    }
}

/// Semi-major axis in km for a mean motion in revolutions per day
pub fn semi_major_axis_km(mean_motion_rev_day: f64, mu: f64) -> Result<f64, CatalogError> {
    if !mean_motion_rev_day.is_finite() || mean_motion_rev_day <= 0.0 {
        return Err(CatalogError::invalid_orbit(format!(
            "mean motion must be > 0, got {}",
            mean_motion_rev_day
        )));
    }
    let n_rad_s = mean_motion_rev_day * std::f64::consts::TAU / SECONDS_PER_DAY;
    let a_km = (mu / (n_rad_s * n_rad_s)).cbrt();
    if !a_km.is_finite() || a_km <= 0.0 {
        return Err(CatalogError::invalid_orbit("semi-major axis is not finite"));
    }
    Ok(a_km)
}

/// Build the sampled orbit ellipse with the central body at the origin.
///
/// The plane is sampled as `(a cos θ, 0, -b sin θ)`, oriented by the node,
/// inclination and perigee rotations, then shifted by the focal offset along
/// the rotated periapsis axis.
pub fn build_orbit(
    elements: &OrbitalElements,
    mu: f64,
    scale: f64,
    resolution: u32,
) -> Result<OrbitGeometry, CatalogError> {
    let e = elements.eccentricity;
    if !e.is_finite() || !(0.0..1.0).contains(&e) {
        return Err(CatalogError::invalid_orbit(format!(
            "eccentricity must be in [0, 1), got {}",
            e
        )));
    }
    if resolution == 0 {
        return Err(CatalogError::invalid_orbit("resolution must be at least 1"));
    }
    for (name, angle) in [
        ("inclination", elements.inclination),
        ("right ascension", elements.raan),
        ("argument of perigee", elements.arg_perigee),
    ] {
        if !angle.is_finite() {
            return Err(CatalogError::invalid_orbit(format!("{} is not finite", name)));
        }
    }

    let a = semi_major_axis_km(elements.mean_motion, mu)? * scale;
    let b = a * (1.0 - e * e).sqrt();
    let c = (a * a - b * b).max(0.0).sqrt();
    if !a.is_finite() || !b.is_finite() || !c.is_finite() {
        return Err(CatalogError::invalid_orbit("scaled axes are not finite"));
    }

    let rotation = orientation(elements);
    let shift = rotation * DVec3::new(c, 0.0, 0.0);

    let path = (0..=resolution)
        .map(|j| {
            let theta = std::f64::consts::TAU * j as f64 / resolution as f64;
            let local = DVec3::new(a * theta.cos(), 0.0, -b * theta.sin());
            (rotation * local - shift).as_vec3()
        })
        .collect();

    Ok(OrbitGeometry {
        semi_major: a,
        semi_minor: b,
        focus_offset: c,
        path,
    })
}

/// Node, then inclination, then perigee, each about the rotated frame's own axis.
///
/// Scene axes are the inertial (x, z, y), a left-handed swap, so every angle is
/// negated to keep the rotations right-handed in the inertial frame.
fn orientation(elements: &OrbitalElements) -> DMat3 {
    DMat3::from_rotation_y(-elements.raan)
        * DMat3::from_rotation_x(-elements.inclination)
        * DMat3::from_rotation_y(-elements.arg_perigee)
}

/// Line-strip vertices for handing an orbit path to the render host
pub fn orbit_vertices(geometry: &OrbitGeometry, color: [f32; 4]) -> Vec<OrbitVertex> {
    geometry
        .path
        .iter()
        .map(|p| OrbitVertex {
            position: p.to_array(),
            color,
        })
        .collect()
}
