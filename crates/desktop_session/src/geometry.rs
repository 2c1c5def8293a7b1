//! Geometry transforms for drag, resize, and maximize toggles.
//!
//! Pure functions over points, sizes, and the viewport; the reducer commits
//! their results into the store. Nothing here knows about stacking.

use crate::model::{Point, Size, Viewport, DEFAULT_RESTORE_HEIGHT, DEFAULT_RESTORE_WIDTH};

/// Minimum interactive window width.
pub const MIN_WINDOW_WIDTH: f64 = 400.0;
/// Minimum interactive window height.
pub const MIN_WINDOW_HEIGHT: f64 = 300.0;
/// Vertical band at the bottom of the viewport reserved for the taskbar;
/// windows are kept above it.
pub const TASKBAR_RESERVED_PX: f64 = 100.0;

/// Clamps a dragged window position so the window stays inside the viewport
/// and above the taskbar band.
pub fn clamp_drag_position(candidate: Point, size: Size, viewport: Viewport) -> Point {
    Point {
        x: candidate.x.min(viewport.width - size.width).max(0.0),
        y: candidate.y.min(viewport.height - TASKBAR_RESERVED_PX).max(0.0),
    }
}

/// Clamps a resized window size between the interactive minimums and the
/// space remaining between the window origin and the viewport edges.
pub fn clamp_resize_size(candidate: Size, origin: Point, viewport: Viewport) -> Size {
    Size {
        width: candidate
            .width
            .min(viewport.width - origin.x)
            .max(MIN_WINDOW_WIDTH),
        height: candidate
            .height
            .min(viewport.height - origin.y - TASKBAR_RESERVED_PX)
            .max(MIN_WINDOW_HEIGHT),
    }
}

/// Geometry a window takes when maximized: full viewport width, full height
/// minus the taskbar band, anchored at the origin.
pub fn maximized_geometry(viewport: Viewport) -> (Point, Size) {
    (
        Point { x: 0.0, y: 0.0 },
        Size {
            width: viewport.width,
            height: viewport.height - TASKBAR_RESERVED_PX,
        },
    )
}

/// Geometry a window takes when leaving the maximized state.
///
/// The pre-maximize geometry is not restored: the position is re-randomized
/// within a fixed band and the size reset to the restore default, matching
/// the long-standing observable behavior share links depend on.
pub fn restored_geometry(rng: &mut fastrand::Rng) -> (Point, Size) {
    (
        Point {
            x: 100.0 + rng.f64() * 200.0,
            y: 80.0 + rng.f64() * 100.0,
        },
        Size {
            width: DEFAULT_RESTORE_WIDTH,
            height: DEFAULT_RESTORE_HEIGHT,
        },
    )
}
