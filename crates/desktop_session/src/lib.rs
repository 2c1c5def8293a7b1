//! Window-manager core for the portfolio web desktop.
//!
//! Tracks open windows, their geometry and stacking order, and the
//! minimize/maximize/focus state machine, and serializes the lot into a
//! shareable URL token. App content is opaque to this crate: panels integrate
//! only through the [`bus`] commands and the per-id defaults registry.

pub mod bus;
pub mod codec;
pub mod geometry;
pub mod model;
pub mod reducer;
pub mod session;
pub mod stacking;
pub mod store;
pub mod sync;

pub use bus::{apply_commands, CommandBus, DesktopCommand, SECRET_WINDOW_ID};
pub use codec::{
    decode, encode, encode_session, hydrate_from_current_url, hydrate_from_search, share_url,
    SessionDecodeError, SessionSnapshot,
};
pub use model::{
    InteractionState, Point, PointerPosition, Size, Viewport, WindowDefaults, WindowId,
    WindowRecord, WindowStatePatch,
};
pub use reducer::{reduce_desktop, DesktopAction, RuntimeEffect};
pub use session::DesktopSession;
pub use stacking::{StackingAllocator, INITIAL_STACK_ORDER};
pub use store::WindowStore;
pub use sync::{SessionUrlSync, UrlSyncScheduler};
