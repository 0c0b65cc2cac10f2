//! Sequencer state
//!
//! Everything the hero needs for one page view lives in [`Sequencer`]. It is
//! created on mount, driven by [`tick`](super::tick::tick) and the gesture
//! methods below, and dropped on unmount.

use serde::{Deserialize, Serialize};

use super::cards::CardSpec;
use super::intercept::{GestureResponse, HoldChange, InputInterceptor, should_intercept};
use super::layout::{Breakpoint, PlacedCard, compute_layout};
use super::phase::{PhaseMachine, Reveal, SequencePhase};
use super::pile::PileRevealer;
use crate::settings::HeroConfig;

/// Something observable happened inside the sequencer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SequenceEvent {
    PhaseChanged {
        from: SequencePhase,
        to: SequencePhase,
    },
    /// Card `index` joined the pile
    CardRevealed { index: usize },
    LayoutComputed {
        cards: usize,
        breakpoint: Breakpoint,
    },
}

/// Why the sequence started already finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Session marker says the sequence already played in this tab
    AlreadyPlayed,
    /// The page was already scrolled past the threshold on mount
    ScrolledIn,
}

/// Page measurements taken at mount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountContext {
    pub container_width: f32,
    pub container_height: f32,
    pub viewport_width: f64,
    pub scroll_y: f64,
    pub already_played: bool,
    /// Clock reading at mount, in milliseconds
    pub now_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequencer {
    pub(super) config: HeroConfig,
    pub(super) deck: Vec<CardSpec>,
    pub(super) placed: Vec<PlacedCard>,
    pub(super) container: (f32, f32),
    pub(super) viewport_width: f64,
    pub(super) scroll_y: f64,
    pub(super) machine: PhaseMachine,
    pub(super) pile: PileRevealer,
    pub(super) interceptor: InputInterceptor,
    /// Milliseconds; only moves forward
    pub(super) clock_ms: f64,
    /// Delayed second layout pass
    pub(super) relayout_at: Option<f64>,
    pub(super) skipped: Option<SkipReason>,
    #[serde(skip)]
    pub(super) events: Vec<SequenceEvent>,
}

impl Sequencer {
    /// Build the sequencer for a freshly mounted hero.
    ///
    /// Visitors who arrive scrolled down, or who already saw the sequence in
    /// this session, start at `Unlocked` with the whole pile showing.
    pub fn mount(deck: Vec<CardSpec>, config: HeroConfig, ctx: MountContext) -> Self {
        let skipped = if ctx.already_played {
            Some(SkipReason::AlreadyPlayed)
        } else if ctx.scroll_y > config.scroll_threshold_px {
            Some(SkipReason::ScrolledIn)
        } else {
            None
        };

        let count = deck.len();
        let (machine, pile) = match skipped {
            Some(_) => (
                PhaseMachine::new(SequencePhase::Unlocked),
                PileRevealer::revealed(count),
            ),
            None => {
                let mut machine = PhaseMachine::new(SequencePhase::Title);
                machine.schedule(ctx.now_ms + config.title_hold_ms);
                (machine, PileRevealer::new(count))
            }
        };

        let placed = compute_layout(&deck, ctx.container_width, ctx.container_height);
        let events = vec![SequenceEvent::LayoutComputed {
            cards: placed.len(),
            breakpoint: Breakpoint::for_width(ctx.container_width),
        }];

        Self {
            relayout_at: Some(ctx.now_ms + config.relayout_delay_ms),
            config,
            deck,
            placed,
            container: (ctx.container_width, ctx.container_height),
            viewport_width: ctx.viewport_width,
            scroll_y: ctx.scroll_y,
            machine,
            pile,
            interceptor: InputInterceptor::new(),
            clock_ms: ctx.now_ms,
            skipped,
            events,
        }
    }

    pub fn phase(&self) -> SequencePhase {
        self.machine.phase()
    }

    pub fn reveal(&self) -> Reveal {
        self.phase().reveal()
    }

    pub fn pile_index(&self) -> usize {
        self.pile.index()
    }

    pub fn card_count(&self) -> usize {
        self.pile.count()
    }

    pub fn config(&self) -> &HeroConfig {
        &self.config
    }

    pub fn deck(&self) -> &[CardSpec] {
        &self.deck
    }

    pub fn placed_cards(&self) -> &[PlacedCard] {
        &self.placed
    }

    /// The revealed prefix of the pile
    pub fn visible_cards(&self) -> &[PlacedCard] {
        self.pile.visible(&self.placed)
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        self.skipped
    }

    /// True when the session marker should be written for this mount
    pub fn is_playing_fresh(&self) -> bool {
        self.skipped.is_none()
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn viewport_breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.viewport_width as f32)
    }

    /// Scroll lock and gesture listeners are wanted right now
    pub fn intercepting(&self) -> bool {
        should_intercept(
            self.phase(),
            self.viewport_breakpoint(),
            self.scroll_y,
            self.config.scroll_threshold_px,
        )
    }

    /// What the host must do with its interception, given whether it holds one
    pub fn hold_change(&self, held: bool) -> HoldChange {
        HoldChange::between(self.intercepting(), held)
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<SequenceEvent> {
        std::mem::take(&mut self.events)
    }

    // === Gestures ===

    pub fn wheel(&mut self, delta_y: f64, now_ms: f64) -> GestureResponse {
        self.advance_to(now_ms);
        if !self.intercepting() {
            return GestureResponse::IGNORED;
        }
        let response = self
            .interceptor
            .wheel(delta_y, self.clock_ms, self.config.wheel_throttle_ms);
        if response.advance {
            self.fast_forward();
        }
        response
    }

    pub fn touch_start(&mut self, client_y: f64) {
        self.interceptor.touch_start(client_y);
    }

    pub fn touch_end(&mut self) {
        self.interceptor.touch_end();
    }

    pub fn touch_move(&mut self, client_y: f64, now_ms: f64) -> GestureResponse {
        self.advance_to(now_ms);
        if !self.intercepting() {
            return GestureResponse::IGNORED;
        }
        let response = self.interceptor.touch_move(
            client_y,
            self.clock_ms,
            self.config.touch_threshold_px,
            self.config.touch_throttle_ms,
        );
        if response.advance {
            self.fast_forward();
        }
        response
    }

    /// Jump straight to the end with the whole pile showing
    pub fn finish(&mut self) {
        let now = self.clock_ms;
        while self.pile.advance_one() {
            self.events.push(SequenceEvent::CardRevealed {
                index: self.pile.index() - 1,
            });
        }
        self.transition(SequencePhase::Unlocked, now);
    }

    /// One gesture-driven step at the current clock
    fn fast_forward(&mut self) {
        let now = self.clock_ms;
        match self.phase() {
            SequencePhase::Title => self.transition(SequencePhase::Pile, now),
            SequencePhase::Pile => self.reveal_next(now),
            SequencePhase::Addon => self.transition(SequencePhase::SubtitleAndCta, now),
            SequencePhase::SubtitleAndCta => self.transition(SequencePhase::Unlocked, now),
            SequencePhase::Unlocked => {}
        }
    }
}
