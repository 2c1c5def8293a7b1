//! Browser host boundary for the desktop session runtime.
//!
//! Everything that touches the actual browser environment lives here: wall-clock
//! time, viewport measurement, timers, and the address-bar session parameter.
//! Browser access is confined to `#[cfg(target_arch = "wasm32")]` branches with
//! native fallbacks so the session core stays testable off-browser.

pub mod time;
pub mod timer;
pub mod url;
pub mod viewport;

pub use time::unix_time_ms_now;
pub use timer::{clear_timeout, schedule_timeout, TimeoutHandle};
pub use url::{
    current_state_param, replace_state_param, search_with_state_param, state_param_from_search,
    STATE_QUERY_PARAM,
};
pub use viewport::inner_size;
