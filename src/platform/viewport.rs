//! Measurements and time

use web_sys::Element;

use crate::sequencer::TickInput;

/// Sample the hero container and the window for this frame
pub fn measure(container: &Element) -> TickInput {
    let window = web_sys::window();
    TickInput {
        container: Some((
            container.client_width() as f32,
            container.client_height() as f32,
        )),
        viewport_width: window
            .as_ref()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64()),
        scroll_y: window.as_ref().and_then(|w| w.scroll_y().ok()),
    }
}

/// Milliseconds on the same time origin as event and frame timestamps
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
