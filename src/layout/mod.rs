//! Layout module: page-space geometry for the landing page.
//!
//! The page is a single tall column of sections. Rectangles use signed
//! coordinates so a region scrolled above the viewport keeps a negative `y`
//! instead of being clamped.

mod rect;
mod stack;

pub use rect::{Insets, Rect};
pub use stack::{SectionId, SectionStack, Slot};
