//! Deterministic pile layout
//!
//! Positions are a pure function of the deck and the container size, so the
//! same viewport always produces the same pile. Layouts are rebuilt from
//! scratch on every resize rather than patched.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cards::{CardSpec, LayoutSlot, PILE_SLOTS};
use crate::consts::*;

/// Layout branch chosen from the container width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_BREAKPOINT_PX {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Breakpoint::Mobile
    }

    /// Multiplier applied to slot offsets
    pub fn spread(self) -> Vec2 {
        match self {
            Breakpoint::Mobile => MOBILE_SPREAD,
            Breakpoint::Desktop => DESKTOP_SPREAD,
        }
    }

    pub fn card_scale(self, emphasis: Option<f32>) -> f32 {
        match (self, emphasis) {
            (Breakpoint::Mobile, Some(e)) => e * MOBILE_EMPHASIS_FACTOR,
            (Breakpoint::Mobile, None) => MOBILE_FALLBACK_SCALE,
            (Breakpoint::Desktop, Some(e)) => e,
            (Breakpoint::Desktop, None) => DESKTOP_FALLBACK_SCALE,
        }
    }
}

/// A card resolved against the current container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCard {
    /// Index in the deck; also the reveal order
    pub id: usize,
    pub spec: CardSpec,
    pub slot: LayoutSlot,
    /// Card center in container pixels
    pub pos: Vec2,
    pub scale: f32,
    pub z_index: usize,
}

/// Point the pile is arranged around: horizontally centered, lifted a bit
/// above the vertical middle.
pub fn pile_anchor(width: f32, height: f32) -> Vec2 {
    Vec2::new(width / 2.0, height / 2.0 - height * ANCHOR_LIFT)
}

/// Place every card of the deck for a container of the given size.
///
/// Slots are reused cyclically (`id % slot count`) when the deck is longer
/// than the slot table.
pub fn compute_layout(cards: &[CardSpec], width: f32, height: f32) -> Vec<PlacedCard> {
    compute_layout_with_slots(cards, &PILE_SLOTS, width, height)
}

/// Same as [`compute_layout`] with an explicit slot table.
pub fn compute_layout_with_slots(
    cards: &[CardSpec],
    slots: &[LayoutSlot],
    width: f32,
    height: f32,
) -> Vec<PlacedCard> {
    if slots.is_empty() {
        return Vec::new();
    }

    let breakpoint = Breakpoint::for_width(width);
    let anchor = pile_anchor(width, height);
    let spread = breakpoint.spread();

    cards
        .iter()
        .enumerate()
        .map(|(id, spec)| {
            let slot = slots[id % slots.len()];
            let offset = Vec2::new(slot.offset_x, slot.offset_y) * spread;
            PlacedCard {
                id,
                spec: spec.clone(),
                slot,
                pos: anchor + offset,
                scale: breakpoint.card_scale(spec.emphasis_scale),
                z_index: id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::cards::twin_deck;
    use proptest::prelude::*;

    #[test]
    fn test_desktop_layout() {
        let deck = twin_deck();
        let placed = compute_layout(&deck, 1280.0, 800.0);
        assert_eq!(placed.len(), deck.len());

        // First slot is (-180, -60) spread by (1.2, 1.0) around (640, 320)
        let first = &placed[0];
        assert!((first.pos.x - (640.0 - 216.0)).abs() < 1e-3);
        assert!((first.pos.y - (320.0 - 60.0)).abs() < 1e-3);
        assert_eq!(first.scale, DESKTOP_FALLBACK_SCALE);

        // Emphasized card keeps its own scale on desktop
        assert_eq!(placed[2].scale, 2.2);
    }

    #[test]
    fn test_mobile_layout() {
        let deck = twin_deck();
        let placed = compute_layout(&deck, 390.0, 844.0);
        let first = &placed[0];
        let anchor = pile_anchor(390.0, 844.0);
        assert!((first.pos.x - (anchor.x - 90.0)).abs() < 1e-3);
        assert!((first.pos.y - (anchor.y - 36.0)).abs() < 1e-3);
        assert_eq!(first.scale, MOBILE_FALLBACK_SCALE);
        assert!((placed[2].scale - 2.2 * MOBILE_EMPHASIS_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_breakpoint_edge() {
        assert_eq!(Breakpoint::for_width(767.9), Breakpoint::Mobile);
        assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Desktop);
    }

    #[test]
    fn test_slots_reused_cyclically() {
        let mut deck = twin_deck();
        deck.extend(twin_deck());
        let placed = compute_layout(&deck, 1024.0, 768.0);
        assert_eq!(placed.len(), 14);
        assert_eq!(placed[8].slot, PILE_SLOTS[1]);
        assert_eq!(placed[13].z_index, 13);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compute_layout(&[], 1024.0, 768.0).is_empty());
        assert!(compute_layout_with_slots(&twin_deck(), &[], 1024.0, 768.0).is_empty());
    }

    fn arb_card() -> impl Strategy<Value = CardSpec> {
        (any::<bool>(), 0.5f32..3.0).prop_map(|(emphasized, scale)| {
            let card = CardSpec::new("twin", "/t.png");
            if emphasized { card.with_emphasis(scale) } else { card }
        })
    }

    proptest! {
        #[test]
        fn prop_layout_is_deterministic(
            cards in prop::collection::vec(arb_card(), 0..20),
            width in 200.0f32..3000.0,
            height in 200.0f32..2000.0,
        ) {
            let a = compute_layout(&cards, width, height);
            let b = compute_layout(&cards, width, height);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_scale_follows_breakpoint(
            cards in prop::collection::vec(arb_card(), 1..20),
            width in 200.0f32..3000.0,
        ) {
            for card in compute_layout(&cards, width, 900.0) {
                let expected = if width < MOBILE_BREAKPOINT_PX {
                    card.spec.emphasis_scale.map(|e| e * MOBILE_EMPHASIS_FACTOR).unwrap_or(MOBILE_FALLBACK_SCALE)
                } else {
                    card.spec.emphasis_scale.unwrap_or(DESKTOP_FALLBACK_SCALE)
                };
                prop_assert_eq!(card.scale, expected);
                prop_assert_eq!(card.z_index, card.id);
            }
        }
    }
}
