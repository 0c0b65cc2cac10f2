//! Clock advancement
//!
//! Timers are stored as absolute deadlines and fired in timestamp order, so
//! a run looks the same whether the host calls in every 16 ms or once after
//! ten seconds.

use super::layout::{Breakpoint, compute_layout};
use super::phase::SequencePhase;
use super::state::{SequenceEvent, Sequencer};

/// Page measurements sampled by the host once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Hero container size in CSS pixels
    pub container: Option<(f32, f32)>,
    /// Window inner width, used for the mobile guard
    pub viewport_width: Option<f64>,
    /// Current vertical scroll offset
    pub scroll_y: Option<f64>,
}

/// Apply this frame's measurements, then run every timer due by `now_ms`
pub fn tick(seq: &mut Sequencer, input: &TickInput, now_ms: f64) {
    if let Some(width) = input.viewport_width {
        seq.viewport_width = width;
    }
    if let Some(scroll_y) = input.scroll_y {
        seq.scroll_y = scroll_y;
    }
    if let Some((width, height)) = input.container {
        if (width, height) != seq.container {
            seq.container = (width, height);
            seq.relayout();
        }
    }
    seq.advance_to(now_ms);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Relayout,
    PileTick,
    Phase,
}

impl Sequencer {
    /// Fire every timer due at or before `now_ms`. Earlier readings than the
    /// current clock are ignored.
    pub fn advance_to(&mut self, now_ms: f64) {
        let now = now_ms.max(self.clock_ms);
        while let Some((at, timer)) = self.next_timer() {
            if at > now {
                break;
            }
            self.clock_ms = at;
            self.fire(timer, at);
        }
        self.clock_ms = now;
    }

    /// Earliest armed timer; ties go relayout, pile, phase
    fn next_timer(&self) -> Option<(f64, Timer)> {
        let pile_tick = if self.phase() == SequencePhase::Pile {
            self.pile.next_tick_at()
        } else {
            None
        };
        [
            (self.relayout_at, Timer::Relayout),
            (pile_tick, Timer::PileTick),
            (self.machine.deadline_at(), Timer::Phase),
        ]
        .into_iter()
        .filter_map(|(at, timer)| at.map(|at| (at, timer)))
        .fold(None, |best: Option<(f64, Timer)>, candidate| match best {
            Some(b) if b.0 <= candidate.0 => Some(b),
            _ => Some(candidate),
        })
    }

    fn fire(&mut self, timer: Timer, at: f64) {
        match timer {
            Timer::Relayout => {
                self.relayout_at = None;
                self.relayout();
            }
            Timer::PileTick => {
                if self.pile.on_tick(at, self.config.pile_cadence_ms) {
                    self.on_card_revealed(at);
                }
            }
            Timer::Phase => {
                if self.machine.take_due(at).is_some() {
                    if let Some(next) = self.phase().next() {
                        self.transition(next, at);
                    }
                }
            }
        }
    }

    /// Rebuild the pile layout for the current container
    pub(super) fn relayout(&mut self) {
        let (width, height) = self.container;
        self.placed = compute_layout(&self.deck, width, height);
        self.events.push(SequenceEvent::LayoutComputed {
            cards: self.placed.len(),
            breakpoint: Breakpoint::for_width(width),
        });
    }

    /// Reveal one card out of cadence
    pub(super) fn reveal_next(&mut self, at: f64) {
        if self.pile.advance_one() {
            self.on_card_revealed(at);
        }
    }

    fn on_card_revealed(&mut self, at: f64) {
        self.events.push(SequenceEvent::CardRevealed {
            index: self.pile.index() - 1,
        });
        if self.pile.is_complete() {
            self.machine.schedule(at + self.config.pile_settle_ms);
        }
    }

    /// Move to `to` and arm whatever the new phase waits on
    pub(super) fn transition(&mut self, to: SequencePhase, at: f64) {
        let Some(from) = self.machine.enter(to) else {
            return;
        };
        self.events.push(SequenceEvent::PhaseChanged { from, to });

        match to {
            SequencePhase::Title => {}
            SequencePhase::Pile => {
                if self.pile.is_complete() {
                    self.machine.schedule(at + self.config.pile_settle_ms);
                } else {
                    self.pile.start_ticking(at, self.config.pile_cadence_ms);
                }
            }
            SequencePhase::Addon => {
                self.pile.stop_ticking();
                self.machine.schedule(at + self.config.addon_hold_ms);
            }
            SequencePhase::SubtitleAndCta => {
                self.machine.schedule(at + self.config.cta_hold_ms);
            }
            SequencePhase::Unlocked => {
                self.pile.stop_ticking();
                self.interceptor.reset();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::cards::twin_deck;
    use crate::sequencer::intercept::GestureResponse;
    use crate::sequencer::state::MountContext;
    use crate::settings::HeroConfig;
    use proptest::prelude::*;

    fn mount_desktop() -> Sequencer {
        Sequencer::mount(
            twin_deck(),
            HeroConfig::default(),
            MountContext {
                container_width: 1280.0,
                container_height: 800.0,
                viewport_width: 1280.0,
                scroll_y: 0.0,
                already_played: false,
                now_ms: 0.0,
            },
        )
    }

    fn phase_changes(events: &[SequenceEvent]) -> Vec<(SequencePhase, SequencePhase)> {
        events
            .iter()
            .filter_map(|e| match e {
                SequenceEvent::PhaseChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_uninterrupted_run() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();
        let input = TickInput::default();

        // Title holds until the first deadline
        tick(&mut seq, &input, config.title_hold_ms - 1.0);
        assert_eq!(seq.phase(), SequencePhase::Title);
        tick(&mut seq, &input, config.title_hold_ms);
        assert_eq!(seq.phase(), SequencePhase::Pile);

        // One card per cadence
        for n in 1..=7 {
            tick(&mut seq, &input, config.title_hold_ms + n as f64 * config.pile_cadence_ms);
            assert_eq!(seq.pile_index(), n);
            assert_eq!(seq.visible_cards().len(), n);
        }
        assert_eq!(seq.phase(), SequencePhase::Pile);

        let pile_done = config.title_hold_ms + 7.0 * config.pile_cadence_ms;
        tick(&mut seq, &input, pile_done + config.pile_settle_ms);
        assert_eq!(seq.phase(), SequencePhase::Addon);

        tick(&mut seq, &input, pile_done + config.pile_settle_ms + config.addon_hold_ms);
        assert_eq!(seq.phase(), SequencePhase::SubtitleAndCta);
        assert!(seq.intercepting());

        let end = config.full_run_ms(7);
        tick(&mut seq, &input, end - 1.0);
        assert_eq!(seq.phase(), SequencePhase::SubtitleAndCta);
        tick(&mut seq, &input, end);
        assert_eq!(seq.phase(), SequencePhase::Unlocked);
        assert!(!seq.intercepting());
    }

    #[test]
    fn test_one_big_step_matches_small_steps() {
        let end = HeroConfig::default().full_run_ms(7);

        let mut coarse = mount_desktop();
        tick(&mut coarse, &TickInput::default(), end);

        let mut fine = mount_desktop();
        let mut t = 0.0;
        while t < end {
            t += 16.0;
            tick(&mut fine, &TickInput::default(), t.min(end));
        }

        assert_eq!(coarse.phase(), SequencePhase::Unlocked);
        assert_eq!(fine.phase(), SequencePhase::Unlocked);
        assert_eq!(
            phase_changes(&coarse.drain_events()),
            phase_changes(&fine.drain_events())
        );
    }

    #[test]
    fn test_wheel_in_pile_reveals_exactly_one() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();
        let start = config.title_hold_ms;
        tick(&mut seq, &TickInput::default(), start);
        assert_eq!(seq.phase(), SequencePhase::Pile);

        let response = seq.wheel(60.0, start + 10.0);
        assert!(response.prevent_default);
        assert!(response.advance);
        assert_eq!(seq.pile_index(), 1);

        // Inside the throttle window nothing changes
        let response = seq.wheel(60.0, start + 60.0);
        assert!(response.prevent_default);
        assert!(!response.advance);
        assert_eq!(seq.pile_index(), 1);
    }

    #[test]
    fn test_wheel_walks_to_unlocked() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();
        let mut t = 0.0;
        let mut last_phase = seq.phase();
        while seq.phase() != SequencePhase::Unlocked {
            t += config.wheel_throttle_ms;
            seq.wheel(100.0, t);
            assert!(seq.phase() >= last_phase);
            last_phase = seq.phase();
            assert!(t < config.full_run_ms(7), "gestures should beat the timers");
        }
        assert_eq!(seq.pile_index(), 7);

        // Nothing is intercepted once unlocked
        assert_eq!(seq.wheel(100.0, t + 1000.0), GestureResponse::IGNORED);
    }

    #[test]
    fn test_fast_forward_cancels_stale_timer() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();

        // Skip the title hold by hand
        assert!(seq.wheel(40.0, 100.0).advance);
        assert_eq!(seq.phase(), SequencePhase::Pile);

        // The title deadline would have fired here; it must not push the
        // pile on to the add-on early
        tick(&mut seq, &TickInput::default(), config.title_hold_ms);
        assert_eq!(seq.phase(), SequencePhase::Pile);
        assert_eq!(seq.pile_index(), 3);
    }

    #[test]
    fn test_skip_addon_restarts_cta_hold() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();
        let addon_at = config.title_hold_ms + 7.0 * config.pile_cadence_ms + config.pile_settle_ms;
        tick(&mut seq, &TickInput::default(), addon_at);
        assert_eq!(seq.phase(), SequencePhase::Addon);

        assert!(seq.wheel(40.0, addon_at + 100.0).advance);
        assert_eq!(seq.phase(), SequencePhase::SubtitleAndCta);

        tick(&mut seq, &TickInput::default(), addon_at + 100.0 + config.cta_hold_ms - 1.0);
        assert_eq!(seq.phase(), SequencePhase::SubtitleAndCta);
        tick(&mut seq, &TickInput::default(), addon_at + 100.0 + config.cta_hold_ms);
        assert_eq!(seq.phase(), SequencePhase::Unlocked);
    }

    #[test]
    fn test_swipe_advances_pile() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();
        tick(&mut seq, &TickInput::default(), config.title_hold_ms);

        seq.touch_start(600.0);
        let response = seq.touch_move(560.0, config.title_hold_ms + 5.0);
        assert!(response.prevent_default);
        assert!(response.advance);
        assert_eq!(seq.pile_index(), 1);
    }

    #[test]
    fn test_resize_relays_out_pile() {
        let mut seq = mount_desktop();
        seq.drain_events();
        let input = TickInput {
            container: Some((390.0, 844.0)),
            viewport_width: Some(390.0),
            ..Default::default()
        };
        tick(&mut seq, &input, 10.0);
        assert!(seq.drain_events().iter().any(|e| matches!(
            e,
            SequenceEvent::LayoutComputed { breakpoint: Breakpoint::Mobile, .. }
        )));
        assert_eq!(seq.placed_cards()[0].scale, crate::consts::MOBILE_FALLBACK_SCALE);
        assert!(!seq.intercepting());
    }

    #[test]
    fn test_delayed_relayout_runs_once() {
        let config = HeroConfig::default();
        let mut seq = mount_desktop();
        seq.drain_events();
        tick(&mut seq, &TickInput::default(), config.relayout_delay_ms);
        tick(&mut seq, &TickInput::default(), config.relayout_delay_ms * 4.0);
        let layouts = seq
            .drain_events()
            .iter()
            .filter(|e| matches!(e, SequenceEvent::LayoutComputed { .. }))
            .count();
        assert_eq!(layouts, 1);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut seq = mount_desktop();
        tick(&mut seq, &TickInput::default(), 500.0);
        tick(&mut seq, &TickInput::default(), 200.0);
        assert_eq!(seq.clock_ms(), 500.0);
    }

    #[test]
    fn test_scrolling_away_on_mobile_releases_guard() {
        let mut seq = mount_desktop();
        let input = TickInput {
            viewport_width: Some(500.0),
            scroll_y: Some(400.0),
            ..Default::default()
        };
        tick(&mut seq, &input, 20.0);
        assert!(!seq.intercepting());
        // The animation itself keeps playing
        tick(&mut seq, &TickInput::default(), HeroConfig::default().title_hold_ms);
        assert_eq!(seq.phase(), SequencePhase::Pile);
    }

    proptest! {
        #[test]
        fn prop_phase_and_pile_never_regress(
            steps in prop::collection::vec((0u8..4, 0.0f64..400.0, -80.0f64..80.0), 1..120)
        ) {
            let mut seq = mount_desktop();
            let mut now = 0.0;
            let mut last_phase = seq.phase();
            let mut last_index = seq.pile_index();

            for (kind, dt, delta) in steps {
                now += dt;
                match kind {
                    0 => tick(&mut seq, &TickInput::default(), now),
                    1 => { seq.wheel(delta, now); }
                    2 => seq.touch_start(500.0),
                    _ => { seq.touch_move(500.0 + delta, now); }
                }
                prop_assert!(seq.phase() >= last_phase);
                prop_assert!(seq.pile_index() >= last_index);
                prop_assert!(seq.pile_index() <= seq.card_count());
                prop_assert_eq!(seq.visible_cards().len(), seq.pile_index());
                last_phase = seq.phase();
                last_index = seq.pile_index();
            }
        }
    }
}
