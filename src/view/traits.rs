//! The `View` trait shared by every on-screen component.

use crate::actor::InputEvent;
use crate::canvas::Canvas;
use crate::layout::Rect;

/// A component that paints itself into a canvas region.
pub trait View {
    /// Get the current bounds of this view, in screen cells.
    fn bounds(&self) -> Rect;

    /// Set the bounds of this view.
    ///
    /// Called when the layout changes (e.g., terminal resize).
    fn set_bounds(&mut self, bounds: Rect);

    /// Paint this view. Only cells within the bounds are touched.
    fn render(&self, canvas: &mut Canvas);

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed.
    fn handle_input(&mut self, _event: &InputEvent) -> bool {
        false
    }

    /// Check if this view changed since it was last painted.
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after painting.
    fn clear_redraw(&mut self);
}
