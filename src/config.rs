//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Mean Earth radius used for the default scene scale (km)
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// Earth gravitational parameter (km^3/s^2)
pub const MU_EARTH_KM3_S2: f64 = 398600.4418;

/// Default number of ellipse samples per orbit
pub const DEFAULT_ORBIT_RESOLUTION: u32 = 80;

/// Options recognized by the dataset engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// km -> scene unit multiplier
    pub scale_factor: f64,
    /// Ellipse samples per orbit path (path holds one extra closing point)
    pub orbit_resolution: u32,
    /// Gravitational parameter of the central body (km^3/s^2)
    pub central_body_mu: f64,
    /// Color points near the prime-meridian and equatorial planes
    pub debug_coloring: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scale_factor: 1.0 / EARTH_RADIUS_KM,
            orbit_resolution: DEFAULT_ORBIT_RESOLUTION,
            central_body_mu: MU_EARTH_KM3_S2,
            debug_coloring: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(CatalogError::InvalidConfig {
                message: format!("scale_factor must be > 0, got {}", self.scale_factor),
            });
        }
        if !self.central_body_mu.is_finite() || self.central_body_mu <= 0.0 {
            return Err(CatalogError::InvalidConfig {
                message: format!(
                    "central_body_mu must be > 0, got {}",
                    self.central_body_mu
                ),
            });
        }
        if self.orbit_resolution == 0 {
            return Err(CatalogError::InvalidConfig {
                message: "orbit_resolution must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
