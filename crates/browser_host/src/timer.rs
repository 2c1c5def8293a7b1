//! One-shot browser timers for deferred host work.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Identifier for a scheduled one-shot timer, usable with [`clear_timeout`].
///
/// Wraps the raw browser timer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutHandle(pub i32);

/// Schedules `callback` to run once after `delay_ms`.
///
/// Returns `None` when no browser environment is available (native targets and
/// detached workers); callers are expected to drive their schedulers directly
/// in that case.
pub fn schedule_timeout(delay_ms: u32, callback: impl FnOnce() + 'static) -> Option<TimeoutHandle> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let callback = Closure::once_into_js(callback);
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref(),
                delay_ms as i32,
            )
            .ok()
            .map(TimeoutHandle)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (delay_ms, &callback);
        None
    }
}

/// Cancels a timer previously returned by [`schedule_timeout`].
pub fn clear_timeout(handle: TimeoutHandle) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle.0);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = handle;
}
