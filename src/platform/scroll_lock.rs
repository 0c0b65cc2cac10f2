//! Body scroll lock
//!
//! Holding a [`ScrollLock`] keeps `overflow: hidden` on `<body>`. Dropping it
//! removes the property again, whatever path the drop comes from.

use web_sys::HtmlElement;

pub struct ScrollLock {
    body: HtmlElement,
}

impl ScrollLock {
    /// Lock the body. None if there is no body or the style write failed.
    pub fn acquire() -> Option<Self> {
        let body = web_sys::window()?.document()?.body()?;
        if let Err(e) = body.style().set_property("overflow", "hidden") {
            log::warn!("Could not lock body scroll: {:?}", e);
            return None;
        }
        log::info!("Body scroll locked");
        Some(Self { body })
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        if let Err(e) = self.body.style().remove_property("overflow") {
            log::error!("Could not restore body scroll: {:?}", e);
            return;
        }
        log::info!("Body scroll restored");
    }
}
