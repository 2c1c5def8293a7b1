//! Address-bar access for the shareable session parameter.
//!
//! The session token travels as a single `state` query parameter. Reads parse
//! the raw query string directly; writes rebuild the URL and commit it through
//! history-replace semantics so the page never navigates.

/// Query parameter carrying the encoded desktop session.
pub const STATE_QUERY_PARAM: &str = "state";

/// Extracts the raw `state` parameter value from a query string.
///
/// Accepts the string with or without its leading `?`. Other parameters are
/// ignored; the first `state` pair wins.
pub fn state_param_from_search(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == STATE_QUERY_PARAM && !value.is_empty()).then(|| value.to_string())
        })
}

/// Reads the `state` parameter from the current page URL.
///
/// Returns `None` off-browser.
pub fn current_state_param() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let search = web_sys::window()?.location().search().ok()?;
        state_param_from_search(&search)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Rewrites the query string of `search`, replacing (or removing) the `state`
/// parameter while leaving every other pair untouched.
///
/// Returns the new query string including its leading `?`, or an empty string
/// when no parameters remain.
pub fn search_with_state_param(search: &str, token: Option<&str>) -> String {
    let mut pairs: Vec<String> = search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split_once('=').map_or(*pair, |(key, _)| key);
            key != STATE_QUERY_PARAM
        })
        .map(str::to_string)
        .collect();
    if let Some(token) = token {
        pairs.push(format!("{STATE_QUERY_PARAM}={token}"));
    }
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// Replaces the `state` parameter on the current page URL without navigating.
///
/// `None` removes the parameter. Uses `history.replaceState`, so no reload and
/// no new history entry. A no-op off-browser.
pub fn replace_state_param(token: Option<&str>) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let (Ok(pathname), Ok(search), Ok(hash)) =
            (location.pathname(), location.search(), location.hash())
        else {
            return;
        };
        let url = format!(
            "{pathname}{}{hash}",
            search_with_state_param(&search, token)
        );
        let Ok(history) = window.history() else {
            return;
        };
        if let Err(err) = history.replace_state_with_url(
            &wasm_bindgen::JsValue::NULL,
            "",
            Some(&url),
        ) {
            log::warn!("session url replace failed: {err:?}");
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = token;
}
