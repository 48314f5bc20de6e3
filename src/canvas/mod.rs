//! Canvas: styled glyph frames and the diff between them.
//!
//! The stage paints a fresh [`Canvas`] every frame; the presenter diffs it
//! against the previous one and writes only what changed.

mod diff;
mod glyph;
mod grid;

pub use diff::{render_diff, render_full, DiffState, DiffStats};
pub use glyph::{Brush, Glyph, Modifiers, Rgb};
pub use grid::{text_width, Canvas};
