//! Diffing: emit the minimal crossterm commands that turn one frame into
//! the next.
//!
//! Commands are queued into any `Write` (normally a reusable `Vec<u8>`) and
//! flushed by the caller in one write, so a frame never lands half-drawn.

use super::glyph::{Glyph, Modifiers, Rgb};
use super::grid::Canvas;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// What the terminal currently has set, so redundant commands are skipped.
#[derive(Debug, Clone, Default)]
pub struct DiffState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    modifiers: Option<Modifiers>,
}

impl DiffState {
    /// Unknown terminal state.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
            modifiers: None,
        }
    }

    /// Forget everything (after a clear or a foreign write).
    pub const fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Counters for one diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Cells written.
    pub cells_changed: usize,
    /// Cursor moves emitted.
    pub cursor_moves: usize,
    /// Color changes emitted.
    pub color_changes: usize,
}

/// Queue commands turning `current` into `next`.
///
/// Both canvases must share dimensions; on a mismatch the whole of `next`
/// is redrawn.
pub fn render_diff<W: Write>(
    current: &Canvas,
    next: &Canvas,
    out: &mut W,
    state: &mut DiffState,
) -> io::Result<DiffStats> {
    if current.width() != next.width() || current.height() != next.height() {
        return render_full(next, out, state);
    }

    let mut stats = DiffStats::default();
    let width = usize::from(next.width());
    let pairs = current.glyphs().iter().zip(next.glyphs());

    for (index, (was, now)) in pairs.enumerate() {
        if was == now || now.is_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((index % width) as u16, (index / width) as u16);
        emit_glyph(out, now, x, y, state, &mut stats)?;
    }

    Ok(stats)
}

/// Clear the screen and queue every cell of `next`.
pub fn render_full<W: Write>(
    next: &Canvas,
    out: &mut W,
    state: &mut DiffState,
) -> io::Result<DiffStats> {
    queue!(out, SetAttribute(Attribute::Reset), Clear(ClearType::All))?;
    state.reset();

    let mut stats = DiffStats::default();
    let width = usize::from(next.width());
    for (index, glyph) in next.glyphs().iter().enumerate() {
        if glyph.is_continuation() {
            continue;
        }
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = ((index % width) as u16, (index / width) as u16);
        emit_glyph(out, glyph, x, y, state, &mut stats)?;
    }
    Ok(stats)
}

fn emit_glyph<W: Write>(
    out: &mut W,
    glyph: &Glyph,
    x: u16,
    y: u16,
    state: &mut DiffState,
    stats: &mut DiffStats,
) -> io::Result<()> {
    stats.cells_changed += 1;

    if state.cursor != Some((x, y)) {
        queue!(out, MoveTo(x, y))?;
        stats.cursor_moves += 1;
    }

    // Attributes can only be cleared wholesale, which also drops colors.
    let mods = glyph.modifiers();
    let current = state.modifiers.unwrap_or_else(Modifiers::empty);
    if !current.difference(mods).is_empty() {
        queue!(out, SetAttribute(Attribute::Reset))?;
        state.fg = None;
        state.bg = None;
        state.modifiers = None;
    }

    if state.fg != Some(glyph.fg()) {
        queue!(out, SetForegroundColor(glyph.fg().into()))?;
        state.fg = Some(glyph.fg());
        stats.color_changes += 1;
    }
    if state.bg != Some(glyph.bg()) {
        queue!(out, SetBackgroundColor(glyph.bg().into()))?;
        state.bg = Some(glyph.bg());
        stats.color_changes += 1;
    }

    let applied = state.modifiers.unwrap_or_else(Modifiers::empty);
    for (flag, attribute) in ATTRIBUTES {
        if mods.contains(flag) && !applied.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    state.modifiers = Some(mods);

    let symbol = glyph.symbol();
    queue!(out, Print(if symbol.is_empty() { " " } else { symbol }))?;
    let advance = u16::from(glyph.width().max(1));
    state.cursor = Some((x.saturating_add(advance), y));
    Ok(())
}

const ATTRIBUTES: [(Modifiers, Attribute); 5] = [
    (Modifiers::BOLD, Attribute::Bold),
    (Modifiers::DIM, Attribute::Dim),
    (Modifiers::ITALIC, Attribute::Italic),
    (Modifiers::UNDERLINE, Attribute::Underlined),
    (Modifiers::REVERSED, Attribute::Reverse),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Brush;

    fn diff(current: &Canvas, next: &Canvas, state: &mut DiffState) -> (Vec<u8>, DiffStats) {
        let mut out = Vec::new();
        let stats = render_diff(current, next, &mut out, state).unwrap();
        (out, stats)
    }

    #[test]
    fn test_identical_frames_emit_nothing() {
        let a = Canvas::new(8, 2);
        let (out, stats) = diff(&a, &a.clone(), &mut DiffState::new());
        assert!(out.is_empty());
        assert_eq!(stats, DiffStats::default());
    }

    #[test]
    fn test_single_change() {
        let a = Canvas::new(8, 2);
        let mut b = a.clone();
        b.draw_text(3, 1, "x", Brush::fg(Rgb::WHITE), b.area());

        let (out, stats) = diff(&a, &b, &mut DiffState::new());
        assert_eq!(stats.cells_changed, 1);
        assert_eq!(stats.cursor_moves, 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[2;4H"));
        assert!(text.ends_with('x'));
    }

    #[test]
    fn test_adjacent_cells_share_one_move() {
        let a = Canvas::new(8, 1);
        let mut b = a.clone();
        b.draw_text(0, 0, "abc", Brush::fg(Rgb::WHITE), b.area());

        let (_, stats) = diff(&a, &b, &mut DiffState::new());
        assert_eq!(stats.cells_changed, 3);
        assert_eq!(stats.cursor_moves, 1);
        assert_eq!(stats.color_changes, 2);
    }

    #[test]
    fn test_continuation_cells_skipped() {
        let a = Canvas::new(4, 1);
        let mut b = a.clone();
        b.draw_text(0, 0, "中", Brush::fg(Rgb::WHITE), b.area());

        let (out, stats) = diff(&a, &b, &mut DiffState::new());
        assert_eq!(stats.cells_changed, 1);
        assert!(String::from_utf8(out).unwrap().contains('中'));
    }

    #[test]
    fn test_removed_modifier_resets_attributes() {
        let a = Canvas::new(2, 1);
        let mut b = a.clone();
        b.draw_text(0, 0, "a", Brush::fg(Rgb::WHITE).with(Modifiers::BOLD), b.area());
        b.draw_text(1, 0, "b", Brush::fg(Rgb::WHITE), b.area());

        let (out, _) = diff(&a, &b, &mut DiffState::new());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[1m"));
        assert!(text.contains("\x1b[0m"));
    }

    #[test]
    fn test_size_mismatch_redraws_everything() {
        let a = Canvas::new(2, 1);
        let b = Canvas::new(3, 1);
        let (out, stats) = diff(&a, &b, &mut DiffState::new());
        assert_eq!(stats.cells_changed, 3);
        assert!(String::from_utf8(out).unwrap().contains("\x1b[2J"));
    }
}
