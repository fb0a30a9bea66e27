//! Satellite visuals - point instances, orbit vertices and the color palette

use bytemuck::{Pod, Zeroable};

use crate::ui::SelectionState;

/// Instance data for each satellite point
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SatelliteInstance {
    /// Position in scene space
    pub position: [f32; 3],
    /// Color (RGBA)
    pub color: [f32; 4],
    /// Size multiplier
    pub size: f32,
}

/// Orbit path vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OrbitVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

pub const NEUTRAL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const HOVER_COLOR: [f32; 4] = [0.2, 0.8, 1.0, 1.0];
pub const CLICK_COLOR: [f32; 4] = [1.0, 0.65, 0.0, 1.0];
pub const ORBIT_COLOR: [f32; 4] = [0.4, 0.6, 1.0, 0.6];

/// Debug palette: near the prime-meridian plane
pub const MERIDIAN_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Debug palette: near the equatorial plane
pub const EQUATOR_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Half-width of the debug bands around each reference plane (scene units)
pub const DEBUG_BAND: f32 = 0.05;

pub const BASE_POINT_SIZE: f32 = 1.0;
pub const CLICKED_POINT_SIZE: f32 = 2.0;

/// Idle color for a point given its scene-space Earth-fixed position
pub fn base_color(position_ecf: [f32; 3], debug_coloring: bool) -> [f32; 4] {
    if !debug_coloring {
        return NEUTRAL_COLOR;
    }
    // Scene axes are (x, z, y): scene z is ECF y, scene y is ECF z
    if position_ecf[2].abs() < DEBUG_BAND {
        MERIDIAN_COLOR
    } else if position_ecf[1].abs() < DEBUG_BAND {
        EQUATOR_COLOR
    } else {
        NEUTRAL_COLOR
    }
}

/// Color for a point in the given selection state; clicked wins over hovered
pub fn selection_color(state: SelectionState, base: [f32; 4]) -> [f32; 4] {
    match state {
        SelectionState::Clicked => CLICK_COLOR,
        SelectionState::Hovered => HOVER_COLOR,
        SelectionState::Idle => base,
    }
}

pub fn selection_size(state: SelectionState) -> f32 {
    match state {
        SelectionState::Clicked => CLICKED_POINT_SIZE,
        _ => BASE_POINT_SIZE,
    }
}
