//! Hero reveal sequencer
//!
//! The pure core of the hero. It must stay deterministic and free of
//! browser types:
//! - Time only enters through explicit millisecond readings
//! - Layout depends only on the deck and the container size
//! - Every deadline is tied to the phase that armed it

pub mod cards;
pub mod intercept;
pub mod layout;
pub mod phase;
pub mod pile;
pub mod state;
pub mod tick;

pub use cards::{CardSpec, LayoutSlot, PILE_SLOTS, twin_deck};
pub use intercept::{
    GestureResponse, HoldChange, InputInterceptor, TOUCH_RELEASE_EVENTS, should_intercept,
};
pub use layout::{Breakpoint, PlacedCard, compute_layout, pile_anchor};
pub use phase::{PhaseMachine, Reveal, SequencePhase};
pub use pile::PileRevealer;
pub use state::{MountContext, SequenceEvent, Sequencer, SkipReason};
pub use tick::{TickInput, tick};
