//! Browser viewport measurement.

const FALLBACK_WIDTH: f64 = 1024.0;
const FALLBACK_HEIGHT: f64 = 768.0;

/// Returns the inner size of the browser window in CSS pixels.
///
/// Falls back to a conventional desktop size off-browser so geometry code has
/// something sane to clamp against in tests and native tooling.
pub fn inner_size() -> (f64, f64) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let width = window
                .inner_width()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(FALLBACK_WIDTH);
            let height = window
                .inner_height()
                .ok()
                .and_then(|value| value.as_f64())
                .unwrap_or(FALLBACK_HEIGHT);
            return (width.max(1.0), height.max(1.0));
        }
    }

    (FALLBACK_WIDTH, FALLBACK_HEIGHT)
}
