//! Animation: style snapshots and the transitions between them.
//!
//! Wrappers never compute motion themselves. They pick an
//! [`AnimationVariant`], look up its `(initial, visible)` snapshot pair from
//! a static table, and let a [`RevealAnimation`] ease between the two whenever
//! the reveal flag flips.

mod easing;
mod reveal;
mod stagger;
mod variant;

pub use easing::{CubicBezier, Transition};
pub use reveal::RevealAnimation;
pub use stagger::Stagger;
pub use variant::{AnimationVariant, StyleProps, StyleSnapshot};
