//! Nav Bar: the fixed strip at the top of the page.
//!
//! Brand on the left, section links in the center, call to action and
//! scroll progress on the right.

use super::palette::Palette;
use super::traits::View;
use crate::canvas::{text_width, Brush, Canvas, Modifiers};
use crate::layout::Rect;

/// The fixed navigation strip.
#[derive(Debug)]
pub struct NavBar {
    brand: String,
    links: Vec<String>,
    action: String,
    /// Page scroll progress in `[0, 1]`.
    progress: f32,
    bounds: Rect,
    palette: Palette,
    dirty: bool,
}

impl NavBar {
    /// Create a nav bar with the brand name.
    pub fn new(bounds: Rect, brand: impl Into<String>, palette: Palette) -> Self {
        Self {
            brand: brand.into(),
            links: Vec::new(),
            action: String::new(),
            progress: 0.0,
            bounds,
            palette,
            dirty: true,
        }
    }

    /// Set the section links.
    pub fn set_links<I, S>(&mut self, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.links = links.into_iter().map(Into::into).collect();
        self.dirty = true;
    }

    /// Set the call-to-action label.
    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
        self.dirty = true;
    }

    /// Update scroll progress, clamped to `[0, 1]`.
    pub fn set_progress(&mut self, progress: f32) {
        let progress = progress.clamp(0.0, 1.0);
        if (progress - self.progress).abs() > f32::EPSILON {
            self.progress = progress;
            self.dirty = true;
        }
    }

    /// Current scroll progress.
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    /// Brand label.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    fn right_label(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.progress * 100.0).round() as u32;
        if self.action.is_empty() {
            format!("{percent:>3}%")
        } else {
            format!("{}  {percent:>3}%", self.action)
        }
    }
}

impl View for NavBar {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render(&self, canvas: &mut Canvas) {
        let p = &self.palette;
        let b = self.bounds;
        if b.is_empty() {
            return;
        }
        canvas.fill(b, p.surface);

        let brand = format!(" ☾ {}", self.brand);
        let brand_brush = Brush::fg(p.primary).with(Modifiers::BOLD);
        let brand_end = canvas.draw_text(b.x, b.y, &brand, brand_brush, b);

        let right = self.right_label();
        let right_x = b.right() - 1 - text_width(&right) as i32;
        canvas.draw_text(right_x, b.y, &right, Brush::fg(p.accent), b);

        // Links only when they fit between brand and action
        let links = self.links.join("   ");
        let links_width = text_width(&links) as i32;
        let center = b.x + (i32::from(b.width) - links_width) / 2;
        if !links.is_empty() && center > brand_end + 1 && center + links_width < right_x - 1 {
            canvas.draw_text(center, b.y, &links, Brush::fg(p.muted), b);
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
