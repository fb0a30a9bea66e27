//! Catalog store - the arena of derived per-object entries
//!
//! Entries live in insertion order and are addressed by [`EntryId`]. A name
//! index maps TLE names to slots and a handle index maps point visuals back to
//! their entry for pick resolution. The store is the only place entries are
//! mutated.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use glam::Vec3;
use nalgebra::Vector3;
use serde::Serialize;

use super::tle::{parse_catalog, OrbitalElements, TleRecord};
use crate::config::EngineConfig;
use crate::error::CatalogError;
use crate::frames;
use crate::propagation::{build_orbit, OrbitGeometry, Propagate};
use crate::renderer::{base_color, VisualHandle};
use crate::ui::{SelectionFlags, SelectionState};

/// Stable slot of an entry inside one loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

/// Everything derived for one catalog record
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// TLE name line
    pub id: String,
    pub record: TleRecord,
    /// Absent when the element columns could not be read
    pub elements: Option<OrbitalElements>,
    /// Inertial position in scene units (Y up)
    pub position_eci: Vec3,
    /// Earth-fixed position in scene units (Y up)
    pub position_ecf: Vec3,
    /// Inertial velocity (km/s) when the propagator supplied one
    pub velocity_eci: Option<Vector3<f64>>,
    /// Absent when the elements do not describe a closed ellipse
    pub orbit: Option<OrbitGeometry>,
    /// Idle color of the point
    pub base_color: [f32; 4],
    pub point_handle: Option<VisualHandle>,
    pub path_handle: Option<VisualHandle>,
    pub selection: SelectionFlags,
}

impl CatalogEntry {
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn has_orbit(&self) -> bool {
        self.orbit.is_some()
    }
}

/// Outcome of building one dataset
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    /// Records found in the catalog text
    pub parsed: usize,
    /// Entries kept after duplicate collapse
    pub stored: usize,
    /// Records dropped because the propagator returned no position
    pub skipped: Vec<(String, CatalogError)>,
    /// Records kept as points only because no orbit could be built
    pub without_orbit: Vec<(String, CatalogError)>,
    /// Identifiers that appeared more than once; the last record won
    pub duplicates: Vec<String>,
}

/// Derive entries for every record that propagates at `at`
pub fn build_entries(
    records: Vec<TleRecord>,
    at: DateTime<Utc>,
    propagator: &impl Propagate,
    config: &EngineConfig,
) -> (Vec<CatalogEntry>, LoadReport) {
    let mut report = LoadReport {
        parsed: records.len(),
        ..Default::default()
    };
    let gmst = propagator.gmst(at);
    let mut entries = Vec::with_capacity(records.len());
    let mut seen = HashSet::with_capacity(records.len());

    for record in records {
        let state = propagator.propagate(&record.line1, &record.line2, at);
        let Some(pos_km) = state.position else {
            log::debug!("Skipping '{}': no position at {}", record.name, at);
            report.skipped.push((
                record.name.clone(),
                CatalogError::PropagationFailure {
                    id: record.name.clone(),
                },
            ));
            continue;
        };

        let position_eci = frames::to_scene(&pos_km, config.scale_factor);
        let position_ecf =
            frames::to_scene(&frames::eci_to_ecf(&pos_km, gmst), config.scale_factor);

        let elements = OrbitalElements::from_record(&record);
        let orbit = elements.as_ref().map_err(Clone::clone).and_then(|elements| {
            build_orbit(
                elements,
                config.central_body_mu,
                config.scale_factor,
                config.orbit_resolution,
            )
        });
        let orbit = match orbit {
            Ok(orbit) => Some(orbit),
            Err(e) => {
                log::debug!("No orbit path for '{}': {}", record.name, e);
                report.without_orbit.push((record.name.clone(), e));
                None
            }
        };

        if !seen.insert(record.name.clone()) {
            let duplicate = CatalogError::DuplicateIdentifier {
                id: record.name.clone(),
            };
            log::warn!("{}", duplicate);
            report.duplicates.push(record.name.clone());
        }

        entries.push(CatalogEntry {
            id: record.name.clone(),
            elements: elements.ok(),
            position_eci,
            position_ecf,
            velocity_eci: state.velocity,
            orbit,
            base_color: base_color(position_ecf.to_array(), config.debug_coloring),
            point_handle: None,
            path_handle: None,
            selection: SelectionFlags::default(),
            record,
        });
    }

    report.stored = seen.len();
    (entries, report)
}

/// Parse catalog text and derive its entries
pub fn build_catalog(
    raw_text: &str,
    at: DateTime<Utc>,
    propagator: &impl Propagate,
    config: &EngineConfig,
) -> Result<(Vec<CatalogEntry>, LoadReport), CatalogError> {
    let records = parse_catalog(raw_text)?;
    Ok(build_entries(records, at, propagator, config))
}

/// Insertion-ordered mapping from identifier to entry
#[derive(Debug, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    by_id: HashMap<String, EntryId>,
    by_handle: HashMap<VisualHandle, EntryId>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry; an existing entry with the same id is overwritten in
    /// its original slot and returned
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        if let Some(&slot) = self.by_id.get(&entry.id) {
            let old = std::mem::replace(&mut self.entries[slot.0], entry);
            self.unindex_handles(&old);
            self.index_handles(slot);
            return Some(old);
        }

        let slot = EntryId(self.entries.len());
        self.by_id.insert(entry.id.clone(), slot);
        self.entries.push(entry);
        self.index_handles(slot);
        None
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.lookup(id).map(|slot| &self.entries[slot.0])
    }

    pub fn lookup(&self, id: &str) -> Option<EntryId> {
        self.by_id.get(id).copied()
    }

    pub fn entry(&self, slot: EntryId) -> Option<&CatalogEntry> {
        self.entries.get(slot.0)
    }

    pub(crate) fn entry_mut(&mut self, slot: EntryId) -> Option<&mut CatalogEntry> {
        self.entries.get_mut(slot.0)
    }

    /// Entry owning a point visual
    pub fn resolve_handle(&self, handle: VisualHandle) -> Option<EntryId> {
        self.by_handle.get(&handle).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (EntryId(i), entry))
    }

    pub fn for_each(&self, mut f: impl FnMut(&CatalogEntry)) {
        for entry in &self.entries {
            f(entry);
        }
    }

    /// Swap in a whole new dataset, returning the previous entries for teardown
    pub fn replace_all(&mut self, entries: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
        let mut next = CatalogStore::new();
        for entry in entries {
            next.insert(entry);
        }
        std::mem::replace(self, next).entries
    }

    pub fn clear(&mut self) -> Vec<CatalogEntry> {
        std::mem::take(self).entries
    }

    /// Record the visuals the render host created for an entry
    pub(crate) fn attach_visuals(
        &mut self,
        slot: EntryId,
        point: VisualHandle,
        path: Option<VisualHandle>,
    ) {
        let Some(entry) = self.entries.get_mut(slot.0) else {
            return;
        };
        entry.point_handle = Some(point);
        entry.path_handle = path;
        self.by_handle.insert(point, slot);
    }

    fn index_handles(&mut self, slot: EntryId) {
        if let Some(point) = self.entries[slot.0].point_handle {
            self.by_handle.insert(point, slot);
        }
    }

    fn unindex_handles(&mut self, entry: &CatalogEntry) {
        if let Some(point) = entry.point_handle {
            self.by_handle.remove(&point);
        }
    }
}

/// Flattened entry for JSON export
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    pub id: String,
    pub position_eci: [f32; 3],
    pub position_ecf: [f32; 3],
    pub elements: Option<OrbitalElements>,
    pub semi_major: Option<f64>,
    pub semi_minor: Option<f64>,
    pub focus_offset: Option<f64>,
    pub path: Vec<[f32; 3]>,
}

impl From<&CatalogEntry> for EntrySummary {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            position_eci: entry.position_eci.to_array(),
            position_ecf: entry.position_ecf.to_array(),
            elements: entry.elements,
            semi_major: entry.orbit.as_ref().map(|o| o.semi_major),
            semi_minor: entry.orbit.as_ref().map(|o| o.semi_minor),
            focus_offset: entry.orbit.as_ref().map(|o| o.focus_offset),
            path: entry
                .orbit
                .as_ref()
                .map(|o| o.path.iter().map(|p| p.to_array()).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{catalog_text, tle_lines, ScriptedPropagator};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_failed_propagation_drops_only_that_record() {
        let (ok1, ok2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let (bad1, bad2) = tle_lines(10002, 98.0, 0.001, 14.2);
        let text = catalog_text(&[("GOOD", &ok1, &ok2), ("DECAYED", &bad1, &bad2)]);
        let propagator = ScriptedPropagator::new().with(&ok1, Vector3::new(6778.0, 0.0, 0.0));

        let (entries, report) =
            build_catalog(&text, at(), &propagator, &EngineConfig::default()).unwrap();
        let mut store = CatalogStore::new();
        store.replace_all(entries);

        assert_eq!(store.len(), 1);
        assert!(store.get("GOOD").is_some());
        assert!(store.get("DECAYED").is_none());
        assert_eq!(report.parsed, 2);
        assert_eq!(report.stored, 1);
        assert_eq!(
            report.skipped,
            vec![(
                "DECAYED".to_string(),
                CatalogError::PropagationFailure {
                    id: "DECAYED".to_string()
                }
            )]
        );
    }

    #[test]
    fn test_malformed_catalog_aborts() {
        let (l1, l2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let text = format!("A\n{}\n{}\nB\n{}\n", l1, l2, l1);
        let propagator = ScriptedPropagator::new().with(&l1, Vector3::new(7000.0, 0.0, 0.0));
        let result = build_catalog(&text, at(), &propagator, &EngineConfig::default());
        assert!(matches!(result, Err(CatalogError::MalformedCatalog { .. })));
    }

    #[test]
    fn test_positions_are_scaled_and_permuted() {
        let (l1, l2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let text = catalog_text(&[("SAT", &l1, &l2)]);
        let propagator = ScriptedPropagator::new()
            .with(&l1, Vector3::new(1000.0, 2000.0, 3000.0))
            .with_gmst(std::f64::consts::FRAC_PI_2);
        let config = EngineConfig {
            scale_factor: 0.001,
            ..Default::default()
        };

        let (entries, _) = build_catalog(&text, at(), &propagator, &config).unwrap();
        let entry = &entries[0];
        assert!(entry.position_eci.abs_diff_eq(Vec3::new(1.0, 3.0, 2.0), 1e-6));
        // ECF rotates by -gmst about the pole: (x, y) -> (y, -x)
        assert!(entry.position_ecf.abs_diff_eq(Vec3::new(2.0, 3.0, -1.0), 1e-6));
        assert!(entry.has_orbit());
        assert_eq!(entry.orbit.as_ref().unwrap().path.len(), 81);
    }

    #[test]
    fn test_invalid_orbit_keeps_point() {
        let (l1, _) = tle_lines(10001, 51.6, 0.0005, 15.5);
        // Mean motion columns blanked out
        let l2 = "2 10001  51.6000   0.0000 0005000   0.0000   0.0000".to_string();
        let text = catalog_text(&[("NO ORBIT", &l1, &l2)]);
        let propagator = ScriptedPropagator::new().with(&l1, Vector3::new(7000.0, 0.0, 0.0));

        let (entries, report) =
            build_catalog(&text, at(), &propagator, &EngineConfig::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].orbit.is_none());
        assert!(entries[0].elements.is_none());
        assert_eq!(report.without_orbit.len(), 1);
        assert!(matches!(
            report.without_orbit[0].1,
            CatalogError::InvalidOrbit { .. }
        ));
    }

    #[test]
    fn test_duplicate_ids_last_wins_in_first_slot() {
        let (a1, a2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let (b1, b2) = tle_lines(10002, 51.6, 0.0005, 15.5);
        let (c1, c2) = tle_lines(10003, 51.6, 0.0005, 15.5);
        let text = catalog_text(&[("DUP", &a1, &a2), ("OTHER", &b1, &b2), ("DUP", &c1, &c2)]);
        let propagator = ScriptedPropagator::new()
            .with(&a1, Vector3::new(7000.0, 0.0, 0.0))
            .with(&b1, Vector3::new(0.0, 7000.0, 0.0))
            .with(&c1, Vector3::new(0.0, 0.0, 7000.0));

        let (entries, report) =
            build_catalog(&text, at(), &propagator, &EngineConfig::default()).unwrap();
        assert_eq!(report.duplicates, vec!["DUP".to_string()]);
        assert_eq!(report.stored, 2);

        let mut store = CatalogStore::new();
        store.replace_all(entries);
        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("DUP"), Some(EntryId(0)));
        assert_eq!(store.get("DUP").unwrap().record.line1, c1);

        let order: Vec<&str> = store.iter().map(|(_, e)| e.id.as_str()).collect();
        assert_eq!(order, vec!["DUP", "OTHER"]);
    }

    #[test]
    fn test_replace_all_returns_previous_entries() {
        let (l1, l2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let text = catalog_text(&[("ONE", &l1, &l2)]);
        let propagator = ScriptedPropagator::new().with(&l1, Vector3::new(7000.0, 0.0, 0.0));
        let (entries, _) =
            build_catalog(&text, at(), &propagator, &EngineConfig::default()).unwrap();

        let mut store = CatalogStore::new();
        assert!(store.replace_all(entries.clone()).is_empty());
        store.attach_visuals(EntryId(0), VisualHandle(7), None);
        assert_eq!(store.resolve_handle(VisualHandle(7)), Some(EntryId(0)));

        let old = store.replace_all(Vec::new());
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].point_handle, Some(VisualHandle(7)));
        assert!(store.is_empty());
        assert_eq!(store.resolve_handle(VisualHandle(7)), None);
    }

    #[test]
    fn test_for_each_visits_in_insertion_order() {
        let (l1, l2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let text = catalog_text(&[("Z", &l1, &l2), ("A", &l1, &l2), ("M", &l1, &l2)]);
        let propagator = ScriptedPropagator::new().with(&l1, Vector3::new(7000.0, 0.0, 0.0));
        let (entries, _) =
            build_catalog(&text, at(), &propagator, &EngineConfig::default()).unwrap();
        let mut store = CatalogStore::new();
        store.replace_all(entries);

        let mut seen = Vec::new();
        store.for_each(|entry| seen.push(entry.id.clone()));
        assert_eq!(seen, vec!["Z", "A", "M"]);
    }

    #[test]
    fn test_summary_export() {
        let (l1, l2) = tle_lines(10001, 51.6, 0.0005, 15.5);
        let text = catalog_text(&[("SAT", &l1, &l2)]);
        let propagator = ScriptedPropagator::new().with(&l1, Vector3::new(7000.0, 0.0, 0.0));
        let (entries, _) =
            build_catalog(&text, at(), &propagator, &EngineConfig::default()).unwrap();

        let summary = EntrySummary::from(&entries[0]);
        assert_eq!(summary.path.len(), 81);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "SAT");
        assert!(json["semi_major"].as_f64().unwrap() > 1.0);
    }
}
