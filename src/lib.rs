//! Twinloop landing page core
//!
//! Core modules:
//! - `sequencer`: Deterministic hero reveal (layout, pile, phases, input)
//! - `platform`: Browser glue for the hero (WASM only)
//! - `contact`: Contact form endpoint (native only)
//! - `settings`: Hero timings and thresholds
//! - `session`: Once-per-tab marker
//! - `lifecycle`: Frame loop across page hide/show

#[cfg(not(target_arch = "wasm32"))]
pub mod contact;
pub mod lifecycle;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod sequencer;
pub mod session;
pub mod settings;

pub use sequencer::{SequencePhase, Sequencer};
pub use settings::HeroConfig;

/// Layout constants
pub mod consts {
    use glam::Vec2;

    /// Containers narrower than this use the mobile layout and are never
    /// scroll-locked
    pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

    /// Card scale when a card has no emphasis of its own
    pub const DESKTOP_FALLBACK_SCALE: f32 = 2.0;
    pub const MOBILE_FALLBACK_SCALE: f32 = 0.8;
    /// Emphasis is shrunk by this factor on mobile
    pub const MOBILE_EMPHASIS_FACTOR: f32 = 0.4;

    /// Slot offset multipliers; desktop spreads wider
    pub const DESKTOP_SPREAD: Vec2 = Vec2::new(1.2, 1.0);
    pub const MOBILE_SPREAD: Vec2 = Vec2::new(0.5, 0.6);

    /// Pile anchor sits this fraction of the container height above center
    pub const ANCHOR_LIFT: f32 = 0.1;
}
