//! Wheel and swipe interception
//!
//! While the sequence holds the page, downward wheel turns and upward finger
//! drags are swallowed and turned into throttled "advance" requests. This
//! module only decides; the platform layer owns the real listeners.

use serde::{Deserialize, Serialize};

use super::layout::Breakpoint;
use super::phase::SequencePhase;

/// Whether the page should be held by the sequence.
///
/// Mobile viewports are never held, and a visitor who is already past the
/// scroll threshold is left alone.
pub fn should_intercept(
    phase: SequencePhase,
    breakpoint: Breakpoint,
    scroll_y: f64,
    scroll_threshold_px: f64,
) -> bool {
    !phase.is_terminal() && !breakpoint.is_mobile() && scroll_y <= scroll_threshold_px
}

/// DOM events that end a drag and clear the touch origin
pub const TOUCH_RELEASE_EVENTS: [&str; 2] = ["touchend", "touchcancel"];

/// How the held lock and listeners must change to match the guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldChange {
    Engage,
    Release,
    Keep,
}

impl HoldChange {
    pub fn between(wanted: bool, held: bool) -> Self {
        match (wanted, held) {
            (true, false) => HoldChange::Engage,
            (false, true) => HoldChange::Release,
            _ => HoldChange::Keep,
        }
    }
}

/// What the platform should do with one raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureResponse {
    /// Suppress the browser's native scroll for this event
    pub prevent_default: bool,
    /// One advance step was granted
    pub advance: bool,
}

impl GestureResponse {
    pub const IGNORED: Self = Self {
        prevent_default: false,
        advance: false,
    };
}

/// Throttle and touch tracking state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputInterceptor {
    last_advance_at: Option<f64>,
    touch_origin_y: Option<f64>,
}

impl InputInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wheel turn; positive `delta_y` scrolls down
    pub fn wheel(&mut self, delta_y: f64, now: f64, throttle_ms: f64) -> GestureResponse {
        if delta_y <= 0.0 {
            return GestureResponse::IGNORED;
        }
        GestureResponse {
            prevent_default: true,
            advance: self.try_advance(now, throttle_ms),
        }
    }

    pub fn touch_start(&mut self, client_y: f64) {
        self.touch_origin_y = Some(client_y);
    }

    /// Drag finished or was cancelled by the browser
    pub fn touch_end(&mut self) {
        self.touch_origin_y = None;
    }

    /// Finger moved to `client_y`. Dragging up past the threshold is one
    /// swipe; the origin then resets so a long drag needs to travel the
    /// threshold again for the next one.
    pub fn touch_move(
        &mut self,
        client_y: f64,
        now: f64,
        threshold_px: f64,
        throttle_ms: f64,
    ) -> GestureResponse {
        let Some(origin) = self.touch_origin_y else {
            return GestureResponse::IGNORED;
        };
        let travel = origin - client_y;
        if travel <= 0.0 {
            return GestureResponse::IGNORED;
        }
        if travel < threshold_px {
            return GestureResponse {
                prevent_default: true,
                advance: false,
            };
        }
        self.touch_origin_y = Some(client_y);
        GestureResponse {
            prevent_default: true,
            advance: self.try_advance(now, throttle_ms),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn try_advance(&mut self, now: f64, throttle_ms: f64) -> bool {
        if let Some(last) = self.last_advance_at {
            if now - last < throttle_ms {
                return false;
            }
        }
        self.last_advance_at = Some(now);
        true
    }
}
