//! Chat panel: the framed demo conversation inside the page.

use crate::canvas::{text_width, Brush, Canvas, Modifiers};
use crate::layout::Rect;
use crate::sequencer::PlaybackState;
use crate::view::{Palette, Transcript, View, AGENT_AVATAR};

const NAME: &str = "Luna";
const STATUS: &str = "● Always here for you";
const REPLAY: &str = "↻ Replay (r)";
const PLACEHOLDER: &str = "Type a message...";
const SEND: &str = "➤";

/// Header, transcript and a read-only input row.
#[derive(Debug)]
pub struct ChatPanel {
    transcript: Transcript,
    bounds: Rect,
    palette: Palette,
    complete: bool,
    dirty: bool,
}

impl ChatPanel {
    /// Create an empty panel.
    pub fn new(bounds: Rect, palette: Palette) -> Self {
        Self {
            transcript: Transcript::new(Self::transcript_area(bounds), palette),
            bounds,
            palette,
            complete: false,
            dirty: true,
        }
    }

    /// Rows between the header and the input row.
    fn transcript_area(bounds: Rect) -> Rect {
        Rect::new(
            bounds.x + 1,
            bounds.y + 2,
            bounds.width.saturating_sub(2),
            bounds.height.saturating_sub(4),
        )
    }

    /// Follow a playback snapshot. Returns `true` if anything changed.
    pub fn sync(&mut self, state: &PlaybackState) -> bool {
        let mut changed = self.transcript.sync(state);
        if self.complete != state.is_complete() {
            self.complete = state.is_complete();
            changed = true;
        }
        if changed {
            self.dirty = true;
        }
        changed
    }

    /// Whether the replay control is offered.
    pub const fn can_replay(&self) -> bool {
        self.complete
    }

    /// Advance the typing dots.
    pub fn set_frame(&mut self, frame: u64) {
        self.transcript.set_frame(frame);
    }

    /// The message list.
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

impl View for ChatPanel {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if bounds != self.bounds {
            self.bounds = bounds;
            self.transcript.set_bounds(Self::transcript_area(bounds));
            self.dirty = true;
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn render(&self, canvas: &mut Canvas) {
        let p = &self.palette;
        let b = self.bounds;
        if b.height < 4 || b.width < 8 {
            return;
        }
        canvas.fill(b, p.surface);

        let header = Rect::new(b.x, b.y, b.width, 1);
        canvas.fill(header, p.primary.mix(p.surface, 0.6));
        let mut x = canvas.draw_text(b.x + 1, b.y, AGENT_AVATAR, Brush::fg(p.accent), header);
        x = canvas.draw_text(x + 1, b.y, NAME, Brush::fg(p.foreground).with(Modifiers::BOLD), header);
        canvas.draw_text(x + 2, b.y, STATUS, Brush::fg(p.online), header);
        if self.complete {
            let replay_x = b.right() - 1 - text_width(REPLAY) as i32;
            canvas.draw_text(replay_x, b.y, REPLAY, Brush::fg(p.accent).with(Modifiers::BOLD), header);
        }

        if self.transcript.bounds().height > 0 {
            self.transcript.render(canvas);
        }

        let input_y = b.bottom() - 1;
        let input = Rect::new(b.x + 1, input_y, b.width.saturating_sub(2), 1);
        canvas.fill(input, p.background);
        canvas.draw_text(input.x + 1, input_y, PLACEHOLDER, Brush::fg(p.muted).with(Modifiers::ITALIC), input);
        canvas.draw_text(input.right() - 2, input_y, SEND, Brush::fg(p.primary), input);
    }

    fn needs_redraw(&self) -> bool {
        self.dirty || self.transcript.needs_redraw()
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
        self.transcript.clear_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::{advance, PlaybackEvent, Script, Turn};

    const TURNS: &[Turn] = &[Turn::agent("Hi, I'm Luna."), Turn::user("Hello!")];
    const CHAT: Script = Script::new(TURNS);

    fn finished() -> PlaybackState {
        let mut state = PlaybackState::new();
        for cursor in 0..TURNS.len() {
            state = advance(&state, CHAT, PlaybackEvent::Evaluate).0;
            state = advance(&state, CHAT, PlaybackEvent::DelayElapsed { cursor }).0;
        }
        advance(&state, CHAT, PlaybackEvent::Evaluate).0
    }

    #[test]
    fn test_replay_offered_only_when_complete() {
        let mut panel = ChatPanel::new(Rect::new(0, 0, 40, 10), Palette::default());
        assert!(!panel.can_replay());
        assert!(panel.sync(&finished()));
        assert!(panel.can_replay());
        assert!(panel.sync(&PlaybackState::new()));
        assert!(!panel.can_replay());
    }

    #[test]
    fn test_render_frame() {
        let mut panel = ChatPanel::new(Rect::new(0, 0, 40, 10), Palette::default());
        panel.sync(&finished());
        let mut canvas = Canvas::new(40, 10);
        panel.render(&mut canvas);

        let header = canvas.row_text(0);
        assert!(header.contains("Luna"));
        assert!(header.contains("Replay"));
        assert!(canvas.row_text(9).contains(PLACEHOLDER));
        assert!((2..8).any(|y| canvas.row_text(y).contains("Hello!")));
    }

    #[test]
    fn test_too_small_draws_nothing() {
        let panel = ChatPanel::new(Rect::new(0, 0, 40, 3), Palette::default());
        let mut canvas = Canvas::new(40, 3);
        panel.render(&mut canvas);
        assert!(!canvas.row_text(0).contains("Luna"));
    }
}
