//! Window record storage: per-id records, the open set, and the active id.

use std::collections::HashMap;

use crate::model::{WindowDefaults, WindowId, WindowRecord, WindowStatePatch};

/// Mapping from [`WindowId`] to [`WindowRecord`], plus the ordered open set
/// and the active-window pointer.
///
/// The store is deliberately dumb: `upsert` merges fields and nothing else.
/// Invariants (single active window, unique stacking orders) are the
/// reducer's responsibility.
#[derive(Debug, Clone)]
pub struct WindowStore {
    defaults: WindowDefaults,
    records: HashMap<WindowId, WindowRecord>,
    open: Vec<WindowId>,
    active: Option<WindowId>,
}

impl WindowStore {
    /// Creates a store pre-seeded with the application's default records, all
    /// closed.
    pub fn new(defaults: WindowDefaults) -> Self {
        let records = defaults.records().clone();
        Self {
            defaults,
            records,
            open: Vec::new(),
            active: None,
        }
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.records.get(id)
    }

    /// Merges `patch` into the record for `id`, materializing the record from
    /// the defaults registry when absent. Closing a window does not evict its
    /// record, so geometry survives a close/reopen cycle.
    pub fn upsert(&mut self, id: &WindowId, patch: WindowStatePatch) {
        let record = self.record_or_default(id);
        patch.apply_to(record);
    }

    /// Replaces the whole record for `id` (hydration path).
    pub fn insert_record(&mut self, id: WindowId, record: WindowRecord) {
        self.records.insert(id, record);
    }

    pub fn is_open(&self, id: &WindowId) -> bool {
        self.open.contains(id)
    }

    /// Open window ids in insertion order; drives taskbar rendering.
    pub fn list_open(&self) -> &[WindowId] {
        &self.open
    }

    pub fn active_window(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub(crate) fn record_or_default(&mut self, id: &WindowId) -> &mut WindowRecord {
        self.records
            .entry(id.clone())
            .or_insert_with(|| self.defaults.record_for(id))
    }

    pub(crate) fn push_open(&mut self, id: WindowId) {
        if !self.open.contains(&id) {
            self.open.push(id);
        }
    }

    pub(crate) fn remove_open(&mut self, id: &WindowId) -> bool {
        let before = self.open.len();
        self.open.retain(|open_id| open_id != id);
        self.open.len() != before
    }

    pub(crate) fn set_open(&mut self, open: Vec<WindowId>) {
        self.open = open;
    }

    pub(crate) fn set_active(&mut self, active: Option<WindowId>) {
        self.active = active;
    }
}
