//! Satellite dataset engine
//!
//! Owns the configuration, the propagator and the catalog store. The host
//! drives it with dataset loads, render ticks and pointer events; the engine
//! registers no listeners of its own.

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::data::{build_catalog, CatalogEntry, CatalogStore, EntryId, LoadReport};
use crate::error::CatalogError;
use crate::frames::{self, FrameSnapshot};
use crate::propagation::{orbit_vertices, Propagate};
use crate::renderer::{
    base_color, RenderHost, SatelliteInstance, VisualHandle, BASE_POINT_SIZE, ORBIT_COLOR,
};
use crate::ui::{apply_visuals, DisplayBinding, SelectionTracker};

pub struct SatelliteEngine<P: Propagate> {
    config: EngineConfig,
    propagator: P,
    store: CatalogStore,
    selection: SelectionTracker,
}

impl<P: Propagate> SatelliteEngine<P> {
    pub fn new(config: EngineConfig, propagator: P) -> Result<Self, CatalogError> {
        config.validate()?;
        Ok(Self {
            config,
            propagator,
            store: CatalogStore::new(),
            selection: SelectionTracker::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }

    pub fn propagator_mut(&mut self) -> &mut P {
        &mut self.propagator
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Replace the dataset with the records in `raw_text`, propagated to `at`.
    ///
    /// Visuals of the previous dataset are removed from the host. A
    /// dataset-level failure leaves the store empty.
    pub fn load(
        &mut self,
        raw_text: &str,
        at: DateTime<Utc>,
        host: &mut dyn RenderHost,
    ) -> Result<LoadReport, CatalogError> {
        let (entries, report) = match build_catalog(raw_text, at, &self.propagator, &self.config)
        {
            Ok(built) => built,
            Err(e) => {
                log::warn!("Dataset rejected: {}", e);
                self.clear(host);
                return Err(e);
            }
        };

        let previous = self.store.replace_all(entries);
        teardown(&previous, host);
        self.selection.reset();
        self.attach_visuals(host);

        log::info!(
            "Loaded {} of {} records ({} skipped, {} without orbit, {} duplicate ids)",
            report.stored,
            report.parsed,
            report.skipped.len(),
            report.without_orbit.len(),
            report.duplicates.len()
        );
        Ok(report)
    }

    /// Drop the dataset and its visuals
    pub fn clear(&mut self, host: &mut dyn RenderHost) {
        let previous = self.store.clear();
        teardown(&previous, host);
        self.selection.reset();
    }

    /// Time-dependent scene quantities for one render frame
    pub fn tick(&self, at: DateTime<Utc>) -> FrameSnapshot {
        FrameSnapshot::with_gmst(at, self.propagator.gmst(at))
    }

    pub fn handle_pointer_move(
        &mut self,
        picks: &[VisualHandle],
        host: &mut dyn RenderHost,
        display: &mut dyn DisplayBinding,
    ) {
        self.selection
            .pointer_move(&mut self.store, picks, host, display);
    }

    pub fn handle_pointer_press(
        &mut self,
        picks: &[VisualHandle],
        host: &mut dyn RenderHost,
        display: &mut dyn DisplayBinding,
    ) {
        self.selection
            .pointer_press(&mut self.store, picks, host, display);
    }

    /// Press on the point of a named entry. Returns false if the entry is unknown.
    pub fn toggle_click(
        &mut self,
        id: &str,
        host: &mut dyn RenderHost,
        display: &mut dyn DisplayBinding,
    ) -> bool {
        let Some(point) = self.store.get(id).and_then(|entry| entry.point_handle) else {
            return false;
        };
        self.handle_pointer_press(&[point], host, display);
        true
    }

    /// Re-derive every entry's position at `at` and move its point.
    ///
    /// Entries whose propagation now fails keep their previous position; their
    /// ids are returned.
    pub fn repropagate(&mut self, at: DateTime<Utc>, host: &mut dyn RenderHost) -> Vec<String> {
        let gmst = self.propagator.gmst(at);
        let scale = self.config.scale_factor;
        let slots: Vec<EntryId> = self.store.iter().map(|(slot, _)| slot).collect();
        let mut failed = Vec::new();

        for slot in slots {
            let Some(entry) = self.store.entry_mut(slot) else {
                continue;
            };
            let state = self
                .propagator
                .propagate(&entry.record.line1, &entry.record.line2, at);
            let Some(pos_km) = state.position else {
                log::debug!("'{}' has no position at {}, keeping last", entry.id, at);
                failed.push(entry.id.clone());
                continue;
            };

            entry.position_eci = frames::to_scene(&pos_km, scale);
            entry.position_ecf = frames::to_scene(&frames::eci_to_ecf(&pos_km, gmst), scale);
            entry.velocity_eci = state.velocity;
            entry.base_color = base_color(entry.position_ecf.to_array(), self.config.debug_coloring);

            if let Some(point) = entry.point_handle {
                host.set_position(point, entry.position_eci.to_array());
            }
            apply_visuals(entry, host);
        }

        if !failed.is_empty() {
            log::warn!("{} entries failed to repropagate", failed.len());
        }
        failed
    }

    fn attach_visuals(&mut self, host: &mut dyn RenderHost) {
        let mut attached = Vec::with_capacity(self.store.len());
        for (slot, entry) in self.store.iter() {
            let point = host.add_point(&SatelliteInstance {
                position: entry.position_eci.to_array(),
                color: entry.base_color,
                size: BASE_POINT_SIZE,
            });
            let path = entry
                .orbit
                .as_ref()
                .map(|orbit| host.add_path(&orbit_vertices(orbit, ORBIT_COLOR)));
            attached.push((slot, point, path));
        }

        let paths = attached.iter().filter(|(_, _, path)| path.is_some()).count();
        for (slot, point, path) in attached {
            self.store.attach_visuals(slot, point, path);
        }
        log::debug!("Attached {} points and {} orbit paths", self.store.len(), paths);
    }
}

/// Remove the visuals owned by entries that left the store
fn teardown(entries: &[CatalogEntry], host: &mut dyn RenderHost) {
    for entry in entries {
        if let Some(point) = entry.point_handle {
            host.remove(point);
        }
        if let Some(path) = entry.path_handle {
            host.remove(path);
        }
    }
}
