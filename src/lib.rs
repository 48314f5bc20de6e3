//! # Luna
//!
//! The Luna companion landing page, staged in a terminal.
//!
//! Two pieces of logic carry the page:
//!
//! - **Reveal triggers** ([`reveal`]): a region reports visible once enough of
//!   it enters the viewport, optionally latching after the first reveal.
//!   When intersections cannot be measured, regions fail open.
//! - **Scripted playback** ([`sequencer`]): a fixed chat script is replayed
//!   turn by turn with a typing indicator, and can be restarted.
//!
//! Around them sits a small actor runtime: input, frame ticks and
//! presentation each run on their own thread, and the [`Stage`] loop owns
//! all page state.
//!
//! ## Example
//!
//! ```rust,no_run
//! use luna::{AnimationVariant, Block, Group, Landing, SectionSpec, Stage, StageConfig};
//!
//! let hero = SectionSpec::new("hero")
//!     .group(Group::reveal(AnimationVariant::FadeUp).block(Block::title("Meet ", "Luna")));
//!
//! Stage::run(Landing::new(vec![hero]), StageConfig::default())?;
//! # Ok::<(), luna::StageError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod animation;
pub mod canvas;
pub mod config;
pub mod error;
pub mod layout;
pub mod reveal;
pub mod sequencer;
pub mod stage;
pub mod view;

// Re-exports for convenience
pub use animation::{AnimationVariant, CubicBezier, RevealAnimation, Stagger, StyleSnapshot, Transition};
pub use config::{CellMetrics, StageConfig};
pub use error::{RevealError, StageError};
pub use layout::Rect;
pub use reveal::{Observer, RevealHandle, RevealOptions};
pub use sequencer::{advance, PlaybackSnapshot, PlaybackState, Player, Script, Sender, Turn, LUNA_SCRIPT};
pub use stage::{Block, Group, Landing, SectionSpec, Stage};
