//! Test doubles for the propagator, render host and display binding

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use crate::propagation::{PropagatedState, Propagate};
use crate::renderer::{OrbitVertex, RenderHost, SatelliteInstance, VisualHandle};
use crate::ui::{CursorIntent, DisplayBinding, SelectionEvent};

pub const ISS_LINE1: &str =
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
pub const ISS_LINE2: &str =
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

/// Fixed-column element lines (checksums are not valid)
pub fn tle_lines(catalog_number: u32, inc_deg: f64, ecc: f64, mean_motion: f64) -> (String, String) {
    let line1 = format!(
        "1 {:05}U 98067A   24061.50000000  .00000000  00000-0  00000-0 0  9990",
        catalog_number
    );
    let line2 = format!(
        "2 {:05} {:8.4} {:8.4} {:07} {:8.4} {:8.4} {:11.8}    10",
        catalog_number,
        inc_deg,
        45.0,
        (ecc * 1.0e7).round() as u64,
        90.0,
        0.0,
        mean_motion
    );
    (line1, line2)
}

pub fn catalog_text<S: AsRef<str>>(records: &[(&str, S, S)]) -> String {
    let mut text = String::new();
    for (name, line1, line2) in records {
        text.push_str(name);
        text.push('\n');
        text.push_str(line1.as_ref());
        text.push('\n');
        text.push_str(line2.as_ref());
        text.push('\n');
    }
    text
}

/// Returns canned positions keyed by line 1; anything else fails
#[derive(Default)]
pub struct ScriptedPropagator {
    positions: HashMap<String, Vector3<f64>>,
    gmst: Option<f64>,
}

impl ScriptedPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, line1: &str, position_km: Vector3<f64>) -> Self {
        self.positions.insert(line1.to_string(), position_km);
        self
    }

    pub fn with_gmst(mut self, gmst: f64) -> Self {
        self.gmst = Some(gmst);
        self
    }

    pub fn set(&mut self, line1: &str, position_km: Option<Vector3<f64>>) {
        match position_km {
            Some(p) => self.positions.insert(line1.to_string(), p),
            None => self.positions.remove(line1),
        };
    }
}

impl Propagate for ScriptedPropagator {
    fn propagate(&self, line1: &str, _line2: &str, _at: DateTime<Utc>) -> PropagatedState {
        PropagatedState {
            position: self.positions.get(line1).copied(),
            velocity: None,
        }
    }

    fn gmst(&self, at: DateTime<Utc>) -> f64 {
        self.gmst.unwrap_or_else(|| crate::frames::gmst(at))
    }
}

/// Render host that records every call
#[derive(Debug, Default)]
pub struct RecordingHost {
    next: u64,
    pub points: HashMap<VisualHandle, SatelliteInstance>,
    pub paths: HashMap<VisualHandle, Vec<OrbitVertex>>,
    pub visible: HashMap<VisualHandle, bool>,
    pub removed: Vec<VisualHandle>,
}

impl RecordingHost {
    pub fn is_visible(&self, handle: VisualHandle) -> bool {
        self.visible.get(&handle).copied().unwrap_or(false)
    }

    pub fn live_count(&self) -> usize {
        self.points.len() + self.paths.len()
    }
}

impl RenderHost for RecordingHost {
    fn add_point(&mut self, instance: &SatelliteInstance) -> VisualHandle {
        self.next += 1;
        let handle = VisualHandle(self.next);
        self.points.insert(handle, *instance);
        self.visible.insert(handle, true);
        handle
    }

    fn add_path(&mut self, vertices: &[OrbitVertex]) -> VisualHandle {
        self.next += 1;
        let handle = VisualHandle(self.next);
        self.paths.insert(handle, vertices.to_vec());
        self.visible.insert(handle, false);
        handle
    }

    fn remove(&mut self, handle: VisualHandle) {
        self.points.remove(&handle);
        self.paths.remove(&handle);
        self.visible.remove(&handle);
        self.removed.push(handle);
    }

    fn set_color(&mut self, handle: VisualHandle, color: [f32; 4]) {
        if let Some(point) = self.points.get_mut(&handle) {
            point.color = color;
        }
    }

    fn set_scale(&mut self, handle: VisualHandle, scale: f32) {
        if let Some(point) = self.points.get_mut(&handle) {
            point.size = scale;
        }
    }

    fn set_visible(&mut self, handle: VisualHandle, visible: bool) {
        if self.visible.contains_key(&handle) {
            self.visible.insert(handle, visible);
        }
    }

    fn set_position(&mut self, handle: VisualHandle, position: [f32; 3]) {
        if let Some(point) = self.points.get_mut(&handle) {
            point.position = position;
        }
    }
}

/// Display binding that keeps every notification
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<(String, SelectionEvent)>,
    pub cursors: Vec<CursorIntent>,
}

impl DisplayBinding for RecordingDisplay {
    fn notify(&mut self, id: &str, kind: SelectionEvent) {
        self.events.push((id.to_string(), kind));
    }

    fn set_cursor(&mut self, intent: CursorIntent) {
        self.cursors.push(intent);
    }
}
