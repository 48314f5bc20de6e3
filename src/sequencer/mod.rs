//! Sequencer: timed playback of a fixed chat script.
//!
//! The state machine in [`advance`] is pure: it takes the current
//! [`PlaybackState`] and an event and returns the next state plus an
//! [`Effect`] telling the driver what to do. The [`Player`] actor is that
//! driver: it owns one playback, turns `Schedule` effects into cancellable
//! timers, and publishes every settled state.
//!
//! ```text
//!            Evaluate                     DelayElapsed(k)
//!   Idle ───────────────▶ AwaitingAgent ────────────────▶ Delivered(k+1)
//!     ▲      (agent turn)  (typing)                            │
//!     │                                                        │ Evaluate
//!     │      Evaluate                     DelayElapsed(k)      ▼
//!     │   ─────────────▶  AwaitingUser  ────────────────▶  ... ─▶ Complete
//!     │      (user turn)                                          │
//!     └──────────────────────────── Reset ────────────────────────┘
//! ```

mod delay;
mod player;
mod script;
mod state;

pub use delay::{DelayRange, DelaySource, FixedDelay, PlaybackTiming, RandomDelay};
pub use player::Player;
pub use script::{Script, Sender, Turn, LUNA_SCRIPT};
pub use state::{advance, Effect, Phase, PlaybackEvent, PlaybackState, WaitKind};

/// A settled [`PlaybackState`] as published by the [`Player`].
pub type PlaybackSnapshot = PlaybackState;
