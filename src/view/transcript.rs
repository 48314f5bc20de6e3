//! Transcript: the chat message list with follow-to-end scrolling.
//!
//! Lines are rebuilt from the playback state whenever a turn lands or the
//! typing indicator toggles, and the view snaps back to the newest line on
//! each such change.

use super::palette::Palette;
use super::traits::View;
use super::wrap::wrap;
use crate::canvas::{text_width, Brush, Canvas, Modifiers};
use crate::layout::Rect;
use crate::sequencer::{PlaybackState, Sender, Turn};
use std::collections::VecDeque;

/// Glyph shown beside agent bubbles.
pub const AGENT_AVATAR: &str = "✦";
/// Glyph shown beside user bubbles.
pub const USER_AVATAR: &str = "♡";

/// What a transcript line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Part of an agent bubble.
    Agent,
    /// Part of a user bubble.
    User,
    /// The typing indicator.
    Typing,
    /// Gap between bubbles.
    Spacer,
}

/// One wrapped row of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Owner of this row.
    pub kind: LineKind,
    /// Text, already wrapped to the bubble width.
    pub text: String,
    /// Whether the avatar is drawn on this row.
    pub avatar: bool,
}

impl TranscriptLine {
    const fn spacer() -> Self {
        Self {
            kind: LineKind::Spacer,
            text: String::new(),
            avatar: false,
        }
    }
}

/// Scrollable chat transcript.
#[derive(Debug)]
pub struct Transcript {
    lines: VecDeque<TranscriptLine>,
    /// Maximum rows retained.
    max_lines: usize,
    /// Rows scrolled up from the bottom (0 = following).
    scroll_offset: usize,
    bounds: Rect,
    palette: Palette,
    /// Turns rendered so far.
    turns: Vec<Turn>,
    typing: bool,
    /// Animation frame for the typing dots.
    frame: u64,
    dirty: bool,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new(bounds: Rect, palette: Palette) -> Self {
        Self {
            lines: VecDeque::new(),
            max_lines: 1_000,
            scroll_offset: 0,
            bounds,
            palette,
            turns: Vec::new(),
            typing: false,
            frame: 0,
            dirty: true,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Row by index from the top.
    pub fn get(&self, index: usize) -> Option<&TranscriptLine> {
        self.lines.get(index)
    }

    /// Follow the playback state.
    ///
    /// Returns `true` when messages or the typing flag changed; the view is
    /// then scrolled to the end.
    pub fn sync(&mut self, state: &PlaybackState) -> bool {
        if self.turns == state.delivered() && self.typing == state.is_typing() {
            return false;
        }

        self.turns = state.delivered().to_vec();
        self.typing = state.is_typing();
        self.rebuild();
        self.scroll_to_bottom();
        true
    }

    /// Advance the typing animation.
    pub fn set_frame(&mut self, frame: u64) {
        if self.typing && frame / 4 != self.frame / 4 {
            self.dirty = true;
        }
        self.frame = frame;
    }

    /// Width available to bubble text.
    fn text_width(&self) -> usize {
        // Avatar, gap and bubble padding on one side; bubbles take 80%
        let inner = usize::from(self.bounds.width).saturating_sub(4);
        (inner * 4 / 5).max(1)
    }

    fn rebuild(&mut self) {
        let width = self.text_width();
        self.lines.clear();

        for turn in &self.turns {
            let kind = match turn.sender {
                Sender::Agent => LineKind::Agent,
                Sender::User => LineKind::User,
            };
            if !self.lines.is_empty() {
                self.lines.push_back(TranscriptLine::spacer());
            }
            let rows = wrap(turn.content, width);
            let last = rows.len().saturating_sub(1);
            for (i, text) in rows.into_iter().enumerate() {
                self.lines.push_back(TranscriptLine {
                    kind,
                    text,
                    avatar: i == last,
                });
            }
        }

        if self.typing {
            if !self.lines.is_empty() {
                self.lines.push_back(TranscriptLine::spacer());
            }
            self.lines.push_back(TranscriptLine {
                kind: LineKind::Typing,
                text: String::new(),
                avatar: true,
            });
        }

        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
        self.dirty = true;
    }

    /// Rows visible in a viewport of `height`, honoring the scroll offset.
    pub fn visible_lines(&self, height: usize) -> impl Iterator<Item = &TranscriptLine> {
        let end = self.lines.len().saturating_sub(self.scroll_offset);
        let start = end.saturating_sub(height);
        self.lines.range(start..end)
    }

    /// Scroll toward older messages.
    pub fn scroll_up(&mut self, rows: usize) {
        let max_offset = self
            .lines
            .len()
            .saturating_sub(usize::from(self.bounds.height));
        self.scroll_offset = (self.scroll_offset + rows).min(max_offset);
        self.dirty = true;
    }

    /// Scroll toward newer messages.
    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
        self.dirty = true;
    }

    /// Snap to the newest line.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
        self.dirty = true;
    }

    /// Whether the newest line is in view.
    pub const fn at_bottom(&self) -> bool {
        self.scroll_offset == 0
    }

    /// The three typing dots for the current frame.
    fn typing_dots(&self) -> String {
        let lit = usize::try_from(self.frame / 4 % 3).unwrap_or(0);
        (0..3)
            .map(|i| if i == lit { "●" } else { "·" })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn render_line(&self, canvas: &mut Canvas, line: &TranscriptLine, y: i32) {
        let p = &self.palette;
        let clip = self.bounds;
        let left = self.bounds.x;
        let right = self.bounds.right();

        match line.kind {
            LineKind::Spacer => {}
            LineKind::Agent | LineKind::Typing => {
                if line.avatar {
                    canvas.draw_text(left, y, AGENT_AVATAR, Brush::fg(p.primary), clip);
                }
                let text = if line.kind == LineKind::Typing {
                    self.typing_dots()
                } else {
                    line.text.clone()
                };
                let bubble = Brush::fg(p.foreground).on(p.surface);
                let x = left + 2;
                let end = canvas.draw_text(x, y, " ", bubble, clip);
                let end = canvas.draw_text(end, y, &text, bubble, clip);
                canvas.draw_text(end, y, " ", bubble, clip);
            }
            LineKind::User => {
                if line.avatar {
                    canvas.draw_text(right - 1, y, USER_AVATAR, Brush::fg(p.muted), clip);
                }
                let bubble = Brush::fg(p.foreground)
                    .on(p.primary.mix(p.accent, 0.35))
                    .with(Modifiers::BOLD);
                let text = format!(" {} ", line.text);
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let x = right - 2 - text_width(&text) as i32;
                canvas.draw_text(x, y, &text, bubble, clip);
            }
        }
    }
}

impl View for Transcript {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let rewrap = bounds.width != self.bounds.width;
        self.bounds = bounds;
        if rewrap {
            self.rebuild();
            self.scroll_to_bottom();
        }
        self.dirty = true;
    }

    fn render(&self, canvas: &mut Canvas) {
        let height = usize::from(self.bounds.height);
        let visible: Vec<_> = self.visible_lines(height).collect();
        // Short transcripts sit at the top of the panel
        for (row, line) in visible.into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let y = self.bounds.y + row as i32;
            self.render_line(canvas, line, y);
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}
