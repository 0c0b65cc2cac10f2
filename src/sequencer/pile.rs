//! Pile revealer
//!
//! Counts how many cards of the pile are showing. The count only moves up
//! and stops at the deck size; the visible set is always the prefix of the
//! placed cards of that length.

use serde::{Deserialize, Serialize};

use super::layout::PlacedCard;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PileRevealer {
    index: usize,
    count: usize,
    /// Next cadence tick, in sequencer milliseconds
    next_tick_at: Option<f64>,
}

impl PileRevealer {
    pub fn new(count: usize) -> Self {
        Self {
            index: 0,
            count,
            next_tick_at: None,
        }
    }

    /// A pile that starts fully revealed (sequence skipped)
    pub fn revealed(count: usize) -> Self {
        Self {
            index: count,
            count,
            next_tick_at: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.count
    }

    /// Reveal the next card. Returns false at the ceiling.
    pub fn advance_one(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.index += 1;
        if self.is_complete() {
            self.next_tick_at = None;
        }
        true
    }

    pub fn next_tick_at(&self) -> Option<f64> {
        self.next_tick_at
    }

    /// Arm the cadence ticker; the first card shows one cadence after `now`
    pub fn start_ticking(&mut self, now: f64, cadence_ms: f64) {
        if !self.is_complete() {
            self.next_tick_at = Some(now + cadence_ms);
        }
    }

    pub fn stop_ticking(&mut self) {
        self.next_tick_at = None;
    }

    /// Fire the ticker scheduled at `at`. Re-arms itself until the pile is full.
    pub fn on_tick(&mut self, at: f64, cadence_ms: f64) -> bool {
        let advanced = self.advance_one();
        self.next_tick_at = if self.is_complete() {
            None
        } else {
            Some(at + cadence_ms)
        };
        advanced
    }

    /// Cards currently showing, in reveal order
    pub fn visible<'a>(&self, placed: &'a [PlacedCard]) -> &'a [PlacedCard] {
        &placed[..self.index.min(placed.len())]
    }
}
