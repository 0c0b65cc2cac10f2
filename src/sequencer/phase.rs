//! Reveal phases and the deadline that moves between them

use serde::{Deserialize, Serialize};

/// Step of the introductory sequence, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SequencePhase {
    /// Headline fades in
    Title,
    /// Cards drop onto the pile one by one
    Pile,
    /// Add-on callout over the finished pile
    Addon,
    /// Subtitle and call-to-action buttons
    SubtitleAndCta,
    /// Sequence finished; page scrolls normally
    Unlocked,
}

impl SequencePhase {
    /// The phase a timer or gesture moves to, None at the end
    pub fn next(self) -> Option<Self> {
        match self {
            SequencePhase::Title => Some(SequencePhase::Pile),
            SequencePhase::Pile => Some(SequencePhase::Addon),
            SequencePhase::Addon => Some(SequencePhase::SubtitleAndCta),
            SequencePhase::SubtitleAndCta => Some(SequencePhase::Unlocked),
            SequencePhase::Unlocked => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == SequencePhase::Unlocked
    }

    /// Value written to the hero's `data-phase` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            SequencePhase::Title => "title",
            SequencePhase::Pile => "pile",
            SequencePhase::Addon => "addon",
            SequencePhase::SubtitleAndCta => "subtitle",
            SequencePhase::Unlocked => "unlocked",
        }
    }

    /// Which hero elements are shown in this phase
    pub fn reveal(self) -> Reveal {
        Reveal {
            title: true,
            pile: self >= SequencePhase::Pile,
            addon: self >= SequencePhase::Addon,
            subtitle: self >= SequencePhase::SubtitleAndCta,
            cta: self >= SequencePhase::SubtitleAndCta,
        }
    }
}

/// Per-element visibility derived from the phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reveal {
    pub title: bool,
    pub pile: bool,
    pub addon: bool,
    pub subtitle: bool,
    pub cta: bool,
}

/// A pending transition, valid only for the generation it was armed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    pub at: f64,
    generation: u32,
}

/// Current phase plus at most one pending timed transition.
///
/// Every phase change bumps the generation and drops the pending deadline,
/// so a timer armed for an earlier phase can never fire after a
/// fast-forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseMachine {
    phase: SequencePhase,
    generation: u32,
    deadline: Option<Deadline>,
}

impl PhaseMachine {
    pub fn new(phase: SequencePhase) -> Self {
        Self {
            phase,
            generation: 0,
            deadline: None,
        }
    }

    pub fn phase(&self) -> SequencePhase {
        self.phase
    }

    /// Move forward to `to`. Returns the previous phase, or None if `to`
    /// is not ahead of the current phase.
    pub fn enter(&mut self, to: SequencePhase) -> Option<SequencePhase> {
        if to <= self.phase {
            return None;
        }
        let from = self.phase;
        self.phase = to;
        self.generation = self.generation.wrapping_add(1);
        self.deadline = None;
        Some(from)
    }

    /// Arm the transition out of the current phase at `at`
    pub fn schedule(&mut self, at: f64) {
        if self.phase.is_terminal() {
            return;
        }
        self.deadline = Some(Deadline {
            at,
            generation: self.generation,
        });
    }

    pub fn deadline_at(&self) -> Option<f64> {
        self.live_deadline().map(|d| d.at)
    }

    /// Consume the deadline if it is due at `now`
    pub fn take_due(&mut self, now: f64) -> Option<Deadline> {
        match self.live_deadline() {
            Some(d) if d.at <= now => self.deadline.take(),
            Some(_) => None,
            None => {
                self.deadline = None;
                None
            }
        }
    }

    fn live_deadline(&self) -> Option<Deadline> {
        self.deadline.filter(|d| d.generation == self.generation)
    }
}
