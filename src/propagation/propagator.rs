//! Propagator contract and the SGP4 implementation using satkit

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Timelike, Utc};
use nalgebra::Vector3;
use parking_lot::RwLock;
use satkit::sgp4::{sgp4, SGP4Error};

use crate::frames;

/// Columns up to the revolution number, the last field satkit reads
const TLE_LINE_MIN_LEN: usize = 68;

/// Propagation output for one record at one instant
///
/// Positions are ECI (TEME) in km, velocities in km/s. A missing position means
/// the record could not be propagated at that instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropagatedState {
    pub position: Option<Vector3<f64>>,
    pub velocity: Option<Vector3<f64>>,
}

impl PropagatedState {
    pub fn failed() -> Self {
        Self::default()
    }
}

/// External orbit propagator
pub trait Propagate {
    fn propagate(&self, line1: &str, line2: &str, at: DateTime<Utc>) -> PropagatedState;

    /// Greenwich Mean Sidereal Time (radians) from the propagator's time utilities
    fn gmst(&self, at: DateTime<Utc>) -> f64 {
        frames::gmst(at)
    }
}

/// SGP4 propagation with a cache of parsed element sets
pub struct Sgp4Propagator {
    /// Parsed TLEs keyed by their two element lines
    tles: RwLock<HashMap<(String, String), satkit::TLE>>,
}

impl Sgp4Propagator {
    pub fn new() -> Self {
        Self {
            tles: RwLock::new(HashMap::new()),
        }
    }

    /// Number of element sets parsed so far
    pub fn cached_count(&self) -> usize {
        self.tles.read().len()
    }

    fn load_tle(&self, line1: &str, line2: &str) -> Option<satkit::TLE> {
        let key = (line1.to_string(), line2.to_string());
        if let Some(tle) = self.tles.read().get(&key) {
            return Some(tle.clone());
        }

        if !is_element_line(line1) || !is_element_line(line2) {
            log::trace!("Element lines too short to parse");
            return None;
        }

        match satkit::TLE::load_2line(line1, line2) {
            Ok(tle) => {
                self.tles.write().insert(key, tle.clone());
                Some(tle)
            }
            Err(e) => {
                log::trace!("Failed to parse TLE: {}", e);
                None
            }
        }
    }
}

impl Default for Sgp4Propagator {
    fn default() -> Self {
        Self::new()
    }
}

impl Propagate for Sgp4Propagator {
    fn propagate(&self, line1: &str, line2: &str, at: DateTime<Utc>) -> PropagatedState {
        let Some(mut tle) = self.load_tle(line1, line2) else {
            return PropagatedState::failed();
        };

        let (pos, vel, errors) = sgp4(&mut tle, &[to_satkit_instant(at)]);
        if errors.first() != Some(&SGP4Error::SGP4Success) {
            log::trace!("SGP4 failed for {}: {:?}", line1, errors.first());
            return PropagatedState::failed();
        }

        // TEME position in meters, velocity in m/s
        let pos = pos.column(0);
        let vel = vel.column(0);
        let position = Vector3::new(pos[0], pos[1], pos[2]) / 1000.0;
        let velocity = Vector3::new(vel[0], vel[1], vel[2]) / 1000.0;

        if !position.iter().all(|c| c.is_finite()) {
            return PropagatedState::failed();
        }

        PropagatedState {
            position: Some(position),
            velocity: velocity.iter().all(|c| c.is_finite()).then_some(velocity),
        }
    }
}

/// satkit slices fixed columns, so anything shorter than a full element line
/// or containing multi-byte characters is rejected up front
fn is_element_line(line: &str) -> bool {
    line.is_ascii() && line.len() >= TLE_LINE_MIN_LEN
}

fn to_satkit_instant(at: DateTime<Utc>) -> satkit::Instant {
    let seconds = at.second() as f64 + at.nanosecond() as f64 * 1.0e-9;
    satkit::Instant::from_datetime(
        at.year(),
        at.month() as i32,
        at.day() as i32,
        at.hour() as i32,
        at.minute() as i32,
        seconds,
    )
}
