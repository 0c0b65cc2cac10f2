//! Authored pile data
//!
//! The deck and the slot table are fixed at build time. Nothing here is
//! mutated after construction.

use serde::{Deserialize, Serialize};

/// A decorative card shown in the hero pile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSpec {
    pub title: String,
    /// Image path relative to the site root
    pub image_ref: String,
    /// Overrides the breakpoint's fallback scale when present
    #[serde(default)]
    pub emphasis_scale: Option<f32>,
}

impl CardSpec {
    pub fn new(title: &str, image_ref: &str) -> Self {
        Self {
            title: title.to_string(),
            image_ref: image_ref.to_string(),
            emphasis_scale: None,
        }
    }

    pub fn with_emphasis(mut self, scale: f32) -> Self {
        self.emphasis_scale = Some(scale);
        self
    }
}

/// Offset of one pile position from the anchor, in unscaled pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSlot {
    pub offset_x: f32,
    pub offset_y: f32,
    pub rotation_degrees: f32,
}

impl LayoutSlot {
    pub const fn new(offset_x: f32, offset_y: f32, rotation_degrees: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            rotation_degrees,
        }
    }
}

/// Messy pile: alternating sides, drifting down, small tilts
pub const PILE_SLOTS: [LayoutSlot; 7] = [
    LayoutSlot::new(-180.0, -60.0, -8.0),
    LayoutSlot::new(150.0, -90.0, 6.0),
    LayoutSlot::new(-60.0, 40.0, 3.0),
    LayoutSlot::new(210.0, 30.0, -5.0),
    LayoutSlot::new(-230.0, 90.0, 9.0),
    LayoutSlot::new(40.0, -20.0, -2.0),
    LayoutSlot::new(120.0, 110.0, 4.0),
];

/// The Twinloop persona deck, in reveal order
pub fn twin_deck() -> Vec<CardSpec> {
    vec![
        CardSpec::new("Budget-conscious student", "/images/twins/student.png"),
        CardSpec::new("Busy working parent", "/images/twins/parent.png"),
        CardSpec::new("Early adopter", "/images/twins/early-adopter.png").with_emphasis(2.2),
        CardSpec::new("Skeptical CFO", "/images/twins/cfo.png"),
        CardSpec::new("Retired hobbyist", "/images/twins/hobbyist.png"),
        CardSpec::new("Small business owner", "/images/twins/owner.png"),
        CardSpec::new("Your next customer", "/images/twins/next-customer.png").with_emphasis(2.4),
    ]
}
