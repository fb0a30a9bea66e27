//! Hover/click selection driven by pointer pick results
//!
//! Each entry carries two independent flags. Pointer moves set and clear
//! `hovered`, pointer presses toggle `clicked`, and the visible state combines
//! them with clicked taking precedence. Every transition restyles the entry's
//! visuals through the render host before the display binding is notified.

use super::{CursorIntent, DisplayBinding, SelectionEvent};
use crate::data::{CatalogEntry, CatalogStore, EntryId};
use crate::renderer::{selection_color, selection_size, RenderHost, VisualHandle};

/// Visible selection state of one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    Hovered,
    Clicked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionFlags {
    pub hovered: bool,
    pub clicked: bool,
}

impl SelectionFlags {
    pub fn state(&self) -> SelectionState {
        if self.clicked {
            SelectionState::Clicked
        } else if self.hovered {
            SelectionState::Hovered
        } else {
            SelectionState::Idle
        }
    }
}

/// Pointer-side selection bookkeeping for one loaded dataset
#[derive(Debug, Default)]
pub struct SelectionTracker {
    /// Entries hovered by the last pointer move, in pick order
    hovered: Vec<EntryId>,
    /// First hit of the last pointer move
    first_hit: Option<EntryId>,
    /// Last cursor intent sent to the display
    cursor: CursorIntent,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> &[EntryId] {
        &self.hovered
    }

    pub fn cursor(&self) -> CursorIntent {
        self.cursor
    }

    /// Apply a pointer move with the handles currently under the pointer
    pub fn pointer_move(
        &mut self,
        store: &mut CatalogStore,
        picks: &[VisualHandle],
        host: &mut dyn RenderHost,
        display: &mut dyn DisplayBinding,
    ) {
        let hits = resolve_picks(store, picks);

        for &slot in &self.hovered {
            if hits.contains(&slot) {
                continue;
            }
            if let Some(entry) = store.entry_mut(slot) {
                entry.selection.hovered = false;
                log::trace!("Hover left '{}'", entry.id);
                apply_visuals(entry, host);
            }
        }

        for &slot in &hits {
            if self.hovered.contains(&slot) {
                continue;
            }
            if let Some(entry) = store.entry_mut(slot) {
                entry.selection.hovered = true;
                log::trace!("Hover entered '{}'", entry.id);
                apply_visuals(entry, host);
            }
        }

        let first = hits.first().copied();
        if first.is_some() && first != self.first_hit {
            if let Some(entry) = first.and_then(|slot| store.entry(slot)) {
                display.notify(&entry.id, SelectionEvent::Hover);
            }
        }
        self.first_hit = first;
        self.hovered = hits;

        let intent = if self.hovered.is_empty() {
            CursorIntent::Default
        } else {
            CursorIntent::Pointer
        };
        if intent != self.cursor {
            self.cursor = intent;
            display.set_cursor(intent);
        }
    }

    /// Toggle `clicked` on every entry under the pointer
    pub fn pointer_press(
        &mut self,
        store: &mut CatalogStore,
        picks: &[VisualHandle],
        host: &mut dyn RenderHost,
        display: &mut dyn DisplayBinding,
    ) {
        for slot in resolve_picks(store, picks) {
            let Some(entry) = store.entry_mut(slot) else {
                continue;
            };
            entry.selection.clicked = !entry.selection.clicked;
            apply_visuals(entry, host);

            let kind = if entry.selection.clicked {
                SelectionEvent::ClickAdd
            } else {
                SelectionEvent::ClickRemove
            };
            log::debug!("{} '{}'", kind, entry.id);
            display.notify(&entry.id, kind);
        }
    }

    /// Forget hover bookkeeping after the dataset was replaced. The cursor
    /// intent is kept so the next move still reports a change back to default.
    pub fn reset(&mut self) {
        self.hovered.clear();
        self.first_hit = None;
    }
}

/// Map picked handles to named entries, dropping unknown handles and repeats
fn resolve_picks(store: &CatalogStore, picks: &[VisualHandle]) -> Vec<EntryId> {
    let mut hits: Vec<EntryId> = Vec::with_capacity(picks.len());
    for &handle in picks {
        let Some(slot) = store.resolve_handle(handle) else {
            continue;
        };
        let named = store.entry(slot).is_some_and(|entry| !entry.id.is_empty());
        if named && !hits.contains(&slot) {
            hits.push(slot);
        }
    }
    hits
}

/// Restyle an entry's visuals for its current state
pub fn apply_visuals(entry: &CatalogEntry, host: &mut dyn RenderHost) {
    let state = entry.selection_state();
    if let Some(point) = entry.point_handle {
        host.set_color(point, selection_color(state, entry.base_color));
        host.set_scale(point, selection_size(state));
    }
    if let Some(path) = entry.path_handle {
        host.set_visible(path, state != SelectionState::Idle);
    }
}
