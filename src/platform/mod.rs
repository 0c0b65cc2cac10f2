//! Browser glue for the hero
//!
//! Everything that touches web-sys lives here:
//! - Scroll lock on the document body
//! - Wheel/touch listeners while the sequence holds the page
//! - Viewport measurement and the clock
//! - Projection of sequencer state onto the hero markup

pub mod dom;
pub mod input;
pub mod scroll_lock;
pub mod viewport;

pub use dom::HeroDom;
pub use input::{GestureSink, Interception};
pub use scroll_lock::ScrollLock;
pub use viewport::{measure, now_ms};
