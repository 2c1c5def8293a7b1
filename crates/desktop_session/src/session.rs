//! The per-application desktop session: store, stacking allocator, and shell
//! flags under one owner.

use std::collections::BTreeMap;

use crate::codec::SessionSnapshot;
use crate::model::WindowDefaults;
use crate::stacking::{StackingAllocator, INITIAL_STACK_ORDER};
use crate::store::WindowStore;

/// Owns all window-manager state for one desktop instance.
///
/// Created once per application instance and torn down with it; never a
/// process-wide singleton. All mutations go through
/// [`reduce_desktop`](crate::reducer::reduce_desktop).
#[derive(Debug, Clone)]
pub struct DesktopSession {
    pub store: WindowStore,
    pub stacking: StackingAllocator,
    /// Whether the start menu is showing. Shell-local; never serialized.
    pub start_menu_open: bool,
    rng: fastrand::Rng,
}

impl DesktopSession {
    /// Creates a session seeded with the application's window defaults.
    pub fn new(defaults: WindowDefaults) -> Self {
        Self::with_rng(defaults, fastrand::Rng::new())
    }

    /// Creates a session with a fixed randomness seed (deterministic
    /// un-maximize positions; used by tests and replay tooling).
    pub fn with_rng_seed(defaults: WindowDefaults, seed: u64) -> Self {
        Self::with_rng(defaults, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(defaults: WindowDefaults, rng: fastrand::Rng) -> Self {
        Self {
            store: WindowStore::new(defaults),
            stacking: StackingAllocator::new(),
            start_menu_open: false,
            rng,
        }
    }

    /// Captures the serializable subset of session state: open ids, active
    /// id, records for open windows only, and the stacking counter.
    pub fn snapshot(&self) -> SessionSnapshot {
        let window_states: BTreeMap<_, _> = self
            .store
            .list_open()
            .iter()
            .filter_map(|id| {
                self.store
                    .get(id)
                    .map(|record| (id.clone(), record.clone()))
            })
            .collect();
        SessionSnapshot {
            open_windows: self.store.list_open().to_vec(),
            active_window: self.store.active_window().cloned(),
            window_states,
            next_stack_order: self.stacking.peek(),
        }
    }

    /// Applies a decoded snapshot: decoded records replace their slots (other
    /// defaults stay), the open set and active id are taken verbatim, and the
    /// stacking counter resumes from the token's value so ordering continuity
    /// survives a reload.
    pub fn hydrate(&mut self, snapshot: SessionSnapshot) {
        for (id, record) in snapshot.window_states {
            self.store.insert_record(id, record);
        }
        self.store.set_open(snapshot.open_windows);
        self.store.set_active(snapshot.active_window);
        let seed = if snapshot.next_stack_order == 0 {
            INITIAL_STACK_ORDER
        } else {
            snapshot.next_stack_order
        };
        self.stacking.seed(seed);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut fastrand::Rng {
        &mut self.rng
    }
}
