use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Default width a window restores to when leaving the maximized state.
pub const DEFAULT_RESTORE_WIDTH: f64 = 600.0;
/// Default height a window restores to when leaving the maximized state.
pub const DEFAULT_RESTORE_HEIGHT: f64 = 500.0;

/// Stable opaque identifier for a window slot (e.g. `"about"`, `"calculator"`).
///
/// Ids are assigned by the hosting application and never generated per
/// instance; the same id refers to the same slot across close/reopen cycles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-left corner of a window in viewport pixels.
///
/// Coordinates are `f64` because un-maximize randomization produces fractional
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Window extent in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Browser inner size the desktop is laid out against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Measures the current browser viewport (a conventional fallback size
    /// off-browser).
    pub fn detect() -> Self {
        let (width, height) = browser_host::inner_size();
        Self { width, height }
    }
}

/// Per-window state tracked by the window manager.
///
/// Wire names follow the session-token JSON format (`isMinimized`, `zIndex`,
/// ...), so encoded tokens stay readable by existing share links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub position: Point,
    pub size: Size,
    pub is_minimized: bool,
    pub is_maximized: bool,
    /// Stacking order; higher renders above. Unique among open windows.
    #[serde(rename = "zIndex")]
    pub stack_order: u32,
}

impl Default for WindowRecord {
    fn default() -> Self {
        Self {
            position: Point { x: 100.0, y: 80.0 },
            size: Size {
                width: DEFAULT_RESTORE_WIDTH,
                height: DEFAULT_RESTORE_HEIGHT,
            },
            is_minimized: false,
            is_maximized: false,
            stack_order: 0,
        }
    }
}

/// Partial [`WindowRecord`] merged field-by-field by `upsert`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowStatePatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub is_minimized: Option<bool>,
    pub is_maximized: Option<bool>,
    pub stack_order: Option<u32>,
}

impl WindowStatePatch {
    /// Applies every present field onto `record`.
    pub fn apply_to(&self, record: &mut WindowRecord) {
        if let Some(position) = self.position {
            record.position = position;
        }
        if let Some(size) = self.size {
            record.size = size;
        }
        if let Some(is_minimized) = self.is_minimized {
            record.is_minimized = is_minimized;
        }
        if let Some(is_maximized) = self.is_maximized {
            record.is_maximized = is_maximized;
        }
        if let Some(stack_order) = self.stack_order {
            record.stack_order = stack_order;
        }
    }
}

/// Application-supplied initial geometry per window slot.
///
/// The hosting application registers a record per known id (position, size,
/// initial stacking); ids it never registered fall back to
/// [`WindowRecord::default`]. This is the only configuration surface the
/// window manager exposes.
#[derive(Debug, Clone, Default)]
pub struct WindowDefaults {
    records: HashMap<WindowId, WindowRecord>,
}

impl WindowDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the initial record for `id`.
    pub fn with_window(mut self, id: impl Into<WindowId>, record: WindowRecord) -> Self {
        self.records.insert(id.into(), record);
        self
    }

    /// Returns the registered record for `id`, or the framework fallback.
    pub fn record_for(&self, id: &WindowId) -> WindowRecord {
        self.records.get(id).cloned().unwrap_or_default()
    }

    pub(crate) fn records(&self) -> &HashMap<WindowId, WindowRecord> {
        &self.records
    }
}

/// Pointer position in viewport pixels, as reported by the host's input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Live window-drag gesture: pointer origin plus the window's starting
/// position.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub position_start: Point,
}

/// Live window-resize gesture: pointer origin plus the window's starting size.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub size_start: Size,
}

/// Transient pointer-gesture state. Lives outside the serialized session; a
/// gesture never survives a reload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}
