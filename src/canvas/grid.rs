//! Canvas: a row-major grid of glyphs for one frame.

use super::glyph::{Brush, Glyph, Rgb};
use crate::layout::Rect;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A frame of styled glyphs.
///
/// Coordinates passed to drawing methods are signed so callers can draw
/// content that is partially scrolled off-screen; anything outside the
/// canvas or the clip rectangle is dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    width: u16,
    height: u16,
}

impl Canvas {
    /// Create a blank canvas. Zero dimensions are allowed.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            glyphs: vec![Glyph::BLANK; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Width in columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The whole canvas as a rectangle at the origin.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// All glyphs in row-major order.
    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < usize::from(self.width) && y < usize::from(self.height))
            .then(|| y * usize::from(self.width) + x)
    }

    /// Glyph at (x, y).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Glyph> {
        self.index_of(x, y).map(|i| &self.glyphs[i])
    }

    /// Replace the glyph at (x, y). Returns `false` when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) -> bool {
        match self.index_of(x, y) {
            Some(i) => {
                self.glyphs[i] = glyph;
                true
            }
            None => false,
        }
    }

    /// Reset every cell to a blank with background `bg`.
    pub fn clear(&mut self, bg: Rgb) {
        self.glyphs.fill(Glyph::blank(bg));
    }

    /// Resize, discarding content.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs
            .resize(usize::from(width) * usize::from(height), Glyph::BLANK);
    }

    /// Paint the background of `rect` (clipped to the canvas).
    pub fn fill(&mut self, rect: Rect, bg: Rgb) {
        let Some(area) = rect.intersection(&self.area()) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index_of(x, y) {
                    self.glyphs[i] = Glyph::blank(bg);
                }
            }
        }
    }

    /// Repaint only the background of `rect`, keeping the text.
    pub fn tint(&mut self, rect: Rect, bg: Rgb) {
        let Some(area) = rect.intersection(&self.area()) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(i) = self.index_of(x, y) {
                    self.glyphs[i].set_bg(bg);
                }
            }
        }
    }

    /// Draw `text` on one row starting at column `x`, clipped to `clip`.
    ///
    /// Text is laid out by grapheme cluster. A wide grapheme that would
    /// straddle either clip edge is skipped. Returns the column after the
    /// last grapheme, clipped or not.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, brush: Brush, clip: Rect) -> i32 {
        let clip = clip.intersection(&self.area()).unwrap_or(Rect::ZERO);
        let row_visible = y >= clip.y && y < clip.bottom();
        let mut col = x;

        for grapheme in text.graphemes(true) {
            let width = grapheme.width();
            if width == 0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let w = width as i32;

            if row_visible && col >= clip.x && col + w <= clip.right() {
                self.put(col, y, grapheme, w, brush);
            }
            col += w;
        }

        col
    }

    fn put(&mut self, x: i32, y: i32, grapheme: &str, width: i32, brush: Brush) {
        let Some(lead) = self.index_of(x, y) else {
            return;
        };
        let bg = brush.bg.unwrap_or_else(|| self.glyphs[lead].bg());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let glyph = Glyph::new(grapheme, width as u8, brush.fg, bg, brush.modifiers);
        self.glyphs[lead] = glyph;
        for dx in 1..width {
            if let Some(i) = self.index_of(x + dx, y) {
                self.glyphs[i] = Glyph::continuation(brush.fg, bg);
            }
        }
    }

    /// Row `y` as plain text, continuation cells omitted.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = usize::from(y) * usize::from(self.width);
        self.glyphs[start..start + usize::from(self.width)]
            .iter()
            .map(Glyph::symbol)
            .collect()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Display width of `text` in columns.
pub fn text_width(text: &str) -> usize {
    text.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_ascii() {
        let mut canvas = Canvas::new(10, 2);
        let end = canvas.draw_text(2, 1, "Luna", Brush::fg(Rgb::WHITE), canvas.area());
        assert_eq!(end, 6);
        assert_eq!(canvas.row_text(1), "  Luna    ");
        assert_eq!(canvas.row_text(0), "          ");
    }

    #[test]
    fn test_draw_clips_left_and_right() {
        let mut canvas = Canvas::new(6, 1);
        canvas.draw_text(-2, 0, "abcdefgh", Brush::fg(Rgb::WHITE), canvas.area());
        assert_eq!(canvas.row_text(0), "cdefgh");

        let mut canvas = Canvas::new(6, 1);
        let clip = Rect::new(1, 0, 3, 1);
        canvas.draw_text(0, 0, "abcdef", Brush::fg(Rgb::WHITE), clip);
        assert_eq!(canvas.row_text(0), " bcd  ");
    }

    #[test]
    fn test_draw_offscreen_row_is_noop() {
        let mut canvas = Canvas::new(4, 1);
        let before = canvas.clone();
        let end = canvas.draw_text(0, -1, "abc", Brush::fg(Rgb::WHITE), canvas.area());
        assert_eq!(end, 3);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_wide_grapheme_uses_continuation() {
        let mut canvas = Canvas::new(4, 1);
        let end = canvas.draw_text(0, 0, "中a", Brush::fg(Rgb::WHITE), canvas.area());
        assert_eq!(end, 3);
        assert_eq!(canvas.get(0, 0).map(Glyph::width), Some(2));
        assert!(canvas.get(1, 0).is_some_and(Glyph::is_continuation));
        assert_eq!(canvas.row_text(0), "中a ");
    }

    #[test]
    fn test_wide_grapheme_not_split_at_edge() {
        let mut canvas = Canvas::new(3, 1);
        canvas.draw_text(2, 0, "中", Brush::fg(Rgb::WHITE), canvas.area());
        assert_eq!(canvas.row_text(0), "   ");
    }

    #[test]
    fn test_brush_without_bg_keeps_fill() {
        let teal = Rgb::from_u32(0x00_80_80);
        let mut canvas = Canvas::new(3, 1);
        canvas.fill(canvas.area(), teal);
        canvas.draw_text(0, 0, "x", Brush::fg(Rgb::WHITE), canvas.area());
        assert_eq!(canvas.get(0, 0).map(Glyph::bg), Some(teal));
    }

    #[test]
    fn test_tint_keeps_text() {
        let mut canvas = Canvas::new(3, 1);
        canvas.draw_text(0, 0, "abc", Brush::fg(Rgb::WHITE), canvas.area());
        canvas.tint(Rect::new(1, 0, 1, 1), Rgb::WHITE);
        assert_eq!(canvas.row_text(0), "abc");
        assert_eq!(canvas.get(1, 0).map(Glyph::bg), Some(Rgb::WHITE));
        assert_eq!(canvas.get(0, 0).map(Glyph::bg), Some(Rgb::BLACK));
    }

    #[test]
    fn test_zero_sized_canvas() {
        let mut canvas = Canvas::new(0, 0);
        assert!(canvas.glyphs().is_empty());
        assert_eq!(canvas.draw_text(0, 0, "hi", Brush::default(), canvas.area()), 2);
        canvas.resize(2, 1);
        assert_eq!(canvas.row_text(0), "  ");
    }
}
