//! Reveal: viewport-driven visibility triggers.
//!
//! A region is *revealed* once enough of it intersects the (margin-adjusted)
//! viewport. Each mounted wrapper owns a [`RevealHandle`] obtained from an
//! [`Observer`]; the handle exposes a boolean that renderers read every frame
//! and releases its observation when dropped.
//!
//! ```text
//!   scroll ──▶ Observer::set_root(viewport)
//!                   │  ratio = |target ∩ root±margin| / |target|
//!                   ▼
//!              RevealTrigger ──▶ RevealHandle::is_visible()
//! ```
//!
//! With `trigger_once` the first reveal latches: the observation is released
//! and the handle reports visible for the rest of its life. When the platform
//! cannot measure intersections at all, handles fail open and report visible
//! immediately so content is never hidden.

mod observer;
mod options;
mod trigger;

pub use observer::{Crossing, ObservationId, Observer, RevealHandle};
pub use options::{MarginValue, RevealOptions, RootMargin, Threshold};
pub use trigger::{intersection_entry, IntersectionEntry, RevealTrigger, TriggerState};
