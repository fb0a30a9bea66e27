//! Render host contract
//!
//! The scene graph, camera and render loop live outside the engine. The engine
//! only creates visuals through this trait and keeps the returned handles.

use std::collections::HashMap;

use super::{OrbitVertex, SatelliteInstance};

/// Opaque reference to a visual owned by the render host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

pub trait RenderHost {
    /// Add a point visual to the scene
    fn add_point(&mut self, instance: &SatelliteInstance) -> VisualHandle;

    /// Add an orbit path (closed line strip), initially hidden
    fn add_path(&mut self, vertices: &[OrbitVertex]) -> VisualHandle;

    fn remove(&mut self, handle: VisualHandle);

    fn set_color(&mut self, handle: VisualHandle, color: [f32; 4]);

    fn set_scale(&mut self, handle: VisualHandle, scale: f32);

    fn set_visible(&mut self, handle: VisualHandle, visible: bool);

    fn set_position(&mut self, handle: VisualHandle, position: [f32; 3]);
}

/// Scene-less host that only tracks visual state, for batch tools
#[derive(Debug, Default)]
pub struct HeadlessHost {
    next: u64,
    points: HashMap<VisualHandle, SatelliteInstance>,
    paths: HashMap<VisualHandle, (usize, bool)>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn visible_path_count(&self) -> usize {
        self.paths.values().filter(|(_, visible)| *visible).count()
    }

    pub fn point(&self, handle: VisualHandle) -> Option<&SatelliteInstance> {
        self.points.get(&handle)
    }

    fn allocate(&mut self) -> VisualHandle {
        self.next += 1;
        VisualHandle(self.next)
    }
}

impl RenderHost for HeadlessHost {
    fn add_point(&mut self, instance: &SatelliteInstance) -> VisualHandle {
        let handle = self.allocate();
        self.points.insert(handle, *instance);
        handle
    }

    fn add_path(&mut self, vertices: &[OrbitVertex]) -> VisualHandle {
        let handle = self.allocate();
        self.paths.insert(handle, (vertices.len(), false));
        handle
    }

    fn remove(&mut self, handle: VisualHandle) {
        self.points.remove(&handle);
        self.paths.remove(&handle);
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
        if let Some(path) = self.paths.get_mut(&handle) {
            path.1 = visible;
        }
    }

    fn set_position(&mut self, handle: VisualHandle, position: [f32; 3]) {
        if let Some(point) = self.points.get_mut(&handle) {
            point.position = position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_host_tracks_visuals() {
        let mut host = HeadlessHost::new();
        let point = host.add_point(&SatelliteInstance {
            position: [1.0, 0.0, 0.0],
            color: [1.0; 4],
            size: 1.0,
        });
        let path = host.add_path(&[OrbitVertex {
            position: [0.0; 3],
            color: [1.0; 4],
        }]);
        assert_ne!(point, path);
        assert_eq!(host.visible_path_count(), 0);

        host.set_visible(path, true);
        host.set_scale(point, 2.0);
        assert_eq!(host.visible_path_count(), 1);
        assert_eq!(host.point(point).unwrap().size, 2.0);

        host.remove(point);
        host.remove(path);
        assert_eq!(host.point_count(), 0);
        assert_eq!(host.path_count(), 0);
    }
}
