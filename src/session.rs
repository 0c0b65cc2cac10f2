//! "Already played" marker
//!
//! Kept in sessionStorage so the hero plays once per tab. Read once on
//! mount, written once when a fresh run starts.

/// sessionStorage key
pub const SESSION_KEY: &str = "twinloop_hero_played";

/// Value stored under [`SESSION_KEY`]
const PLAYED: &str = "1";

/// Whether a stored value means the sequence already ran
pub fn is_played_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

#[cfg(target_arch = "wasm32")]
fn session_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.session_storage().ok())
        .flatten()
}

/// Read the marker (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn has_played() -> bool {
    let value = session_storage().and_then(|s| s.get_item(SESSION_KEY).ok().flatten());
    is_played_value(value.as_deref())
}

/// Write the marker (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn mark_played() {
    match session_storage() {
        Some(storage) => {
            if storage.set_item(SESSION_KEY, PLAYED).is_err() {
                log::warn!("Could not write session marker");
            }
        }
        None => log::warn!("sessionStorage unavailable; hero will replay"),
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn has_played() -> bool {
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn mark_played() {
    log::debug!("Session marker {}={} (no-op on native)", SESSION_KEY, PLAYED);
}
