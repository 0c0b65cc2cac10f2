//! Hero sequence tuning
//!
//! Timings and gesture thresholds. The page can override any field through a
//! JSON `data-config` attribute on the hero element; missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};

/// Timings (milliseconds) and thresholds (CSS pixels) for the reveal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    // === Phase timings ===
    /// Title on screen before the pile starts
    pub title_hold_ms: f64,
    /// Interval between two cards landing on the pile
    pub pile_cadence_ms: f64,
    /// Pause after the last card before the add-on appears
    pub pile_settle_ms: f64,
    /// Add-on on screen before the subtitle and CTA
    pub addon_hold_ms: f64,
    /// Subtitle and CTA on screen before the page unlocks
    pub cta_hold_ms: f64,

    // === Layout ===
    /// Second layout pass after mount, once the viewport has settled
    pub relayout_delay_ms: f64,

    // === Input ===
    /// Scroll offset past which the visitor counts as already scrolled
    pub scroll_threshold_px: f64,
    /// Minimum spacing between two wheel-driven advances
    pub wheel_throttle_ms: f64,
    /// Minimum spacing between two swipe-driven advances
    pub touch_throttle_ms: f64,
    /// Downward drag distance that counts as a swipe
    pub touch_threshold_px: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title_hold_ms: 1000.0,
            pile_cadence_ms: 300.0,
            pile_settle_ms: 600.0,
            addon_hold_ms: 1800.0,
            cta_hold_ms: 1200.0,

            relayout_delay_ms: 150.0,

            scroll_threshold_px: 50.0,
            wheel_throttle_ms: 100.0,
            touch_throttle_ms: 150.0,
            touch_threshold_px: 10.0,
        }
    }
}

impl HeroConfig {
    /// Attribute on the hero element holding JSON overrides
    pub const CONFIG_ATTRIBUTE: &'static str = "data-config";

    /// Parse overrides, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed hero config: {}", e);
                Self::default()
            }
        }
    }

    /// Length of an uninterrupted run over a pile of `card_count` cards
    pub fn full_run_ms(&self, card_count: usize) -> f64 {
        self.title_hold_ms
            + self.pile_cadence_ms * card_count as f64
            + self.pile_settle_ms
            + self.addon_hold_ms
            + self.cta_hold_ms
    }

    /// Load overrides from the hero element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(hero_id: &str) -> Self {
        let attr = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(hero_id))
            .and_then(|el| el.get_attribute(Self::CONFIG_ATTRIBUTE));

        match attr {
            Some(json) => {
                log::info!("Loaded hero config overrides");
                Self::from_json(&json)
            }
            None => Self::default(),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(_hero_id: &str) -> Self {
        Self::default()
    }
}
