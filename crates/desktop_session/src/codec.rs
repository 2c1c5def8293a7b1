//! Session token encode/decode and URL hydration.
//!
//! The token is the JSON snapshot in URL-safe base64 (no padding), carried as
//! the single `state` query parameter. Decoding is strict; the boundary
//! policy on failure is to log and leave state untouched, so a broken share
//! link opens an empty desktop instead of an error.

use std::collections::BTreeMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WindowId, WindowRecord};
use crate::session::DesktopSession;
use crate::stacking::INITIAL_STACK_ORDER;

pub use browser_host::STATE_QUERY_PARAM;

/// Serializable subset of session state embedded in share links.
///
/// Wire names are fixed; every field tolerates absence so older or truncated
/// tokens still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Open window ids in insertion order.
    #[serde(default)]
    pub open_windows: Vec<WindowId>,
    /// The active window, when any.
    #[serde(default)]
    pub active_window: Option<WindowId>,
    /// Records for open windows only, keyed by id.
    #[serde(default)]
    pub window_states: BTreeMap<WindowId, WindowRecord>,
    /// Stacking counter to resume from.
    #[serde(rename = "nextZIndex", default = "initial_stack_order")]
    pub next_stack_order: u32,
}

fn initial_stack_order() -> u32 {
    INITIAL_STACK_ORDER
}

#[derive(Debug, Error)]
/// Why a session token failed to decode.
pub enum SessionDecodeError {
    /// The token is not valid URL-safe base64.
    #[error("session token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded bytes are not a valid snapshot document.
    #[error("session token payload is not a valid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes a snapshot into a URL-safe session token.
///
/// Deterministic for identical input: window states are keyed through an
/// ordered map, so equal snapshots produce equal tokens.
pub fn encode(snapshot: &SessionSnapshot) -> String {
    let json = serde_json::to_vec(snapshot).expect("session snapshot serializes");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a session token back into a snapshot.
pub fn decode(token: &str) -> Result<SessionSnapshot, SessionDecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Encodes the session for URL embedding, or `None` when no windows are open
/// (the parameter is removed rather than carrying an empty snapshot).
pub fn encode_session(session: &DesktopSession) -> Option<String> {
    if session.store.list_open().is_empty() {
        return None;
    }
    Some(encode(&session.snapshot()))
}

/// Hydrates the session from a raw query string, applying the fail-silent
/// decode policy: a missing parameter leaves the default empty desktop, and a
/// malformed token logs a warning and changes nothing.
pub fn hydrate_from_search(session: &mut DesktopSession, search: &str) {
    if let Some(token) = browser_host::state_param_from_search(search) {
        apply_token(session, &token);
    }
}

/// Hydrates the session from the current page URL. A no-op off-browser.
pub fn hydrate_from_current_url(session: &mut DesktopSession) {
    if let Some(token) = browser_host::current_state_param() {
        apply_token(session, &token);
    }
}

fn apply_token(session: &mut DesktopSession, token: &str) {
    match decode(token) {
        Ok(snapshot) => session.hydrate(snapshot),
        Err(err) => log::warn!("failed to restore desktop session from url: {err}"),
    }
}

/// Builds a shareable URL for the current session on top of `base_url`.
///
/// Sets the `state` parameter when windows are open and strips it otherwise,
/// leaving every other query pair (and any fragment) in place.
pub fn share_url(base_url: &str, session: &DesktopSession) -> String {
    let token = encode_session(session);
    let (without_fragment, fragment) = match base_url.split_once('#') {
        Some((url, fragment)) => (url, Some(fragment)),
        None => (base_url, None),
    };
    let (origin_and_path, search) = match without_fragment.split_once('?') {
        Some((prefix, search)) => (prefix, search),
        None => (without_fragment, ""),
    };
    let search = browser_host::search_with_state_param(search, token.as_deref());
    match fragment {
        Some(fragment) => format!("{origin_and_path}{search}#{fragment}"),
        None => format!("{origin_and_path}{search}"),
    }
}
