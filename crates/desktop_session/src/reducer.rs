//! Lifecycle actions and the transition engine for the desktop session.

use crate::codec::SessionSnapshot;
use crate::geometry;
use crate::model::{
    InteractionState, Point, PointerPosition, ResizeSession, Size, Viewport, WindowId,
    WindowStatePatch,
};
use crate::session::DesktopSession;

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate a [`DesktopSession`].
pub enum DesktopAction {
    /// Taskbar/start-menu toggle for a window: opens it when closed, restores
    /// it when minimized, closes it otherwise.
    ToggleWindow {
        /// Window the toggle targets.
        window_id: WindowId,
    },
    /// Close a window by id. A no-op for windows that are already closed.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Minimize a window, handing active status to the first other open,
    /// non-minimized window.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Toggle a window between maximized and windowed geometry. Hosts also
    /// deliver title-bar double-clicks as this action.
    MaximizeWindow {
        /// Window to toggle.
        window_id: WindowId,
        /// Viewport to maximize into.
        viewport: Viewport,
    },
    /// Make a window active and raise it above all others.
    BringToFront {
        /// Window to raise.
        window_id: WindowId,
    },
    /// Raw field merge into a window's record; no stacking or focus effects.
    UpdateWindowState {
        /// Window whose record is patched.
        window_id: WindowId,
        /// Fields to merge.
        patch: WindowStatePatch,
    },
    /// Begin dragging a window by its title region.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Update an in-progress drag with the current pointer position.
    UpdateMove {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Current viewport, for edge clamping.
        viewport: Viewport,
    },
    /// End the active drag gesture.
    EndMove,
    /// Begin resizing a window from its south-east handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Update an in-progress resize with the current pointer position.
    UpdateResize {
        /// Current pointer position.
        pointer: PointerPosition,
        /// Current viewport, for edge clamping.
        viewport: Viewport,
    },
    /// End the active resize gesture.
    EndResize,
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Replace session state from a decoded session token.
    HydrateSnapshot {
        /// Snapshot to apply.
        snapshot: SessionSnapshot,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the host to execute.
pub enum RuntimeEffect {
    /// Re-serialize the session into the page URL (debounced by the host's
    /// [`SessionUrlSync`](crate::sync::SessionUrlSync)).
    SyncSessionUrl,
}

/// Applies a [`DesktopAction`] to the session and collects resulting effects.
///
/// This is the authoritative transition engine for window lifecycle state.
/// It is total: actions referencing an id with no prior record simply
/// materialize one from the defaults registry, and no action can fail.
pub fn reduce_desktop(
    session: &mut DesktopSession,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Vec<RuntimeEffect> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::ToggleWindow { window_id } => {
            session.start_menu_open = false;
            if session.store.is_open(&window_id) {
                let minimized = session
                    .store
                    .get(&window_id)
                    .map(|record| record.is_minimized)
                    .unwrap_or(false);
                if minimized {
                    restore_minimized(session, &window_id);
                } else {
                    close_window(session, &window_id);
                }
            } else {
                open_window(session, &window_id);
            }
            effects.push(RuntimeEffect::SyncSessionUrl);
        }
        DesktopAction::CloseWindow { window_id } => {
            if close_window(session, &window_id) {
                effects.push(RuntimeEffect::SyncSessionUrl);
            }
        }
        DesktopAction::MinimizeWindow { window_id } => {
            session.store.upsert(
                &window_id,
                WindowStatePatch {
                    is_minimized: Some(true),
                    ..Default::default()
                },
            );
            if session.store.active_window() == Some(&window_id) {
                let next_active = session
                    .store
                    .list_open()
                    .iter()
                    .find(|open_id| {
                        *open_id != &window_id
                            && !session
                                .store
                                .get(open_id)
                                .map(|record| record.is_minimized)
                                .unwrap_or(false)
                    })
                    .cloned();
                session.store.set_active(next_active);
            }
            effects.push(RuntimeEffect::SyncSessionUrl);
        }
        DesktopAction::MaximizeWindow {
            window_id,
            viewport,
        } => {
            let currently_maximized = session
                .store
                .get(&window_id)
                .map(|record| record.is_maximized)
                .unwrap_or(false);
            let (position, size) = if currently_maximized {
                geometry::restored_geometry(session.rng_mut())
            } else {
                geometry::maximized_geometry(viewport)
            };
            session.store.upsert(
                &window_id,
                WindowStatePatch {
                    position: Some(position),
                    size: Some(size),
                    is_maximized: Some(!currently_maximized),
                    ..Default::default()
                },
            );
            bring_to_front(session, &window_id);
            effects.push(RuntimeEffect::SyncSessionUrl);
        }
        DesktopAction::BringToFront { window_id } => {
            if bring_to_front(session, &window_id) {
                effects.push(RuntimeEffect::SyncSessionUrl);
            }
        }
        DesktopAction::UpdateWindowState { window_id, patch } => {
            session.store.upsert(&window_id, patch);
            effects.push(RuntimeEffect::SyncSessionUrl);
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            let record = session.store.record_or_default(&window_id).clone();
            if record.is_maximized {
                return effects;
            }
            interaction.dragging = Some(crate::model::DragSession {
                window_id: window_id.clone(),
                pointer_start: pointer,
                position_start: record.position,
            });
            if bring_to_front(session, &window_id) {
                effects.push(RuntimeEffect::SyncSessionUrl);
            }
        }
        DesktopAction::UpdateMove { pointer, viewport } => {
            if let Some(drag) = interaction.dragging.clone() {
                let record = session.store.record_or_default(&drag.window_id).clone();
                if !record.is_maximized {
                    let candidate = Point {
                        x: drag.position_start.x + (pointer.x - drag.pointer_start.x),
                        y: drag.position_start.y + (pointer.y - drag.pointer_start.y),
                    };
                    let position =
                        geometry::clamp_drag_position(candidate, record.size, viewport);
                    session.store.upsert(
                        &drag.window_id,
                        WindowStatePatch {
                            position: Some(position),
                            ..Default::default()
                        },
                    );
                    effects.push(RuntimeEffect::SyncSessionUrl);
                }
            }
        }
        DesktopAction::EndMove => {
            interaction.dragging = None;
        }
        DesktopAction::BeginResize { window_id, pointer } => {
            let record = session.store.record_or_default(&window_id).clone();
            if record.is_maximized {
                return effects;
            }
            interaction.resizing = Some(ResizeSession {
                window_id: window_id.clone(),
                pointer_start: pointer,
                size_start: record.size,
            });
            if bring_to_front(session, &window_id) {
                effects.push(RuntimeEffect::SyncSessionUrl);
            }
        }
        DesktopAction::UpdateResize { pointer, viewport } => {
            if let Some(resize) = interaction.resizing.clone() {
                let record = session.store.record_or_default(&resize.window_id).clone();
                if !record.is_maximized {
                    let candidate = Size {
                        width: resize.size_start.width + (pointer.x - resize.pointer_start.x),
                        height: resize.size_start.height + (pointer.y - resize.pointer_start.y),
                    };
                    let size =
                        geometry::clamp_resize_size(candidate, record.position, viewport);
                    session.store.upsert(
                        &resize.window_id,
                        WindowStatePatch {
                            size: Some(size),
                            ..Default::default()
                        },
                    );
                    effects.push(RuntimeEffect::SyncSessionUrl);
                }
            }
        }
        DesktopAction::EndResize => {
            interaction.resizing = None;
        }
        DesktopAction::ToggleStartMenu => {
            session.start_menu_open = !session.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            session.start_menu_open = false;
        }
        DesktopAction::HydrateSnapshot { snapshot } => {
            session.hydrate(snapshot);
            effects.push(RuntimeEffect::SyncSessionUrl);
        }
    }
    effects
}

/// Opens a closed window: appends it to the open set with a fresh stacking
/// order and makes it active. Retained geometry (including a retained
/// maximized flag) applies as-is.
pub(crate) fn open_window(session: &mut DesktopSession, window_id: &WindowId) {
    session.store.push_open(window_id.clone());
    session.store.set_active(Some(window_id.clone()));
    let stack_order = session.stacking.next();
    session.store.upsert(
        window_id,
        WindowStatePatch {
            is_minimized: Some(false),
            stack_order: Some(stack_order),
            ..Default::default()
        },
    );
}

fn restore_minimized(session: &mut DesktopSession, window_id: &WindowId) {
    let stack_order = session.stacking.next();
    session.store.upsert(
        window_id,
        WindowStatePatch {
            is_minimized: Some(false),
            stack_order: Some(stack_order),
            ..Default::default()
        },
    );
    session.store.set_active(Some(window_id.clone()));
}

/// Removes `window_id` from the open set. When it was the active window, the
/// first remaining open id in insertion order becomes active (not the
/// topmost by stacking order; share links observe this tie-break).
fn close_window(session: &mut DesktopSession, window_id: &WindowId) -> bool {
    let removed = session.store.remove_open(window_id);
    if !removed {
        return false;
    }
    if session.store.active_window() == Some(window_id) {
        let next_active = session.store.list_open().first().cloned();
        session.store.set_active(next_active);
    }
    true
}

fn bring_to_front(session: &mut DesktopSession, window_id: &WindowId) -> bool {
    let minimized = session
        .store
        .get(window_id)
        .map(|record| record.is_minimized)
        .unwrap_or(false);
    if minimized {
        return false;
    }
    session.store.set_active(Some(window_id.clone()));
    let stack_order = session.stacking.next();
    session.store.upsert(
        window_id,
        WindowStatePatch {
            stack_order: Some(stack_order),
            ..Default::default()
        },
    );
    true
}
