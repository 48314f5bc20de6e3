//! Stage: the event loop that ties the page, the chat panel and the actors
//! together.
//!
//! ```text
//!   InputActor ──InputEvent──┐
//!   TickerActor ───Tick──────┼──▶ Stage loop ──PresentCommand──▶ PresenterActor
//!   Player ──PlaybackState───┘        │
//!                                     └──reset()──▶ Player
//! ```
//!
//! Everything the loop touches (page, observer, chat panel, nav) lives on
//! the loop's thread. [`Stage`] holds that state and can be driven without a
//! terminal; [`Stage::run`] wires it to the real one.

use super::chat::ChatPanel;
use super::page::Page;
use super::section::SectionSpec;
use crate::actor::{Control, InputActor, InputEvent, PresentCommand, PresenterActor, TickerActor};
use crate::canvas::Canvas;
use crate::config::StageConfig;
use crate::error::StageError;
use crate::layout::Rect;
use crate::reveal::Observer;
use crate::sequencer::{PlaybackState, PlaybackTiming, Player, Script, LUNA_SCRIPT};
use crate::view::{NavBar, Palette, View};
use crossbeam_channel::{bounded, select, Sender, TrySendError};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything the stage shows.
#[derive(Debug, Clone)]
pub struct Landing {
    /// Brand shown in the nav bar.
    pub brand: String,
    /// Nav bar links.
    pub links: Vec<String>,
    /// Nav bar call to action.
    pub action: String,
    /// Page content, top to bottom.
    pub sections: Vec<SectionSpec>,
    /// Conversation played in the chat panel.
    pub script: Script,
    /// Colors.
    pub palette: Palette,
}

impl Landing {
    /// A landing page with Luna's branding and no sections.
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        Self {
            brand: "Luna".to_string(),
            links: Vec::new(),
            action: String::new(),
            sections,
            script: LUNA_SCRIPT,
            palette: Palette::default(),
        }
    }
}

/// What the loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Restart the chat demo.
    Replay,
    /// Leave the stage.
    Quit,
}

/// Page, chat panel and nav bar for one terminal.
#[derive(Debug)]
pub struct Stage {
    config: StageConfig,
    page: Page,
    chat: ChatPanel,
    nav: NavBar,
    width: u16,
    height: u16,
    pointer: Option<(u16, u16)>,
    full_redraw: bool,
}

impl Stage {
    /// Build the stage for a `width` x `height` terminal.
    pub fn new(landing: Landing, config: StageConfig, observer: Observer, width: u16, height: u16) -> Self {
        let palette = landing.palette;
        let page = Page::new(landing.sections, observer, config.metrics, palette);
        let mut nav = NavBar::new(Rect::ZERO, landing.brand, palette);
        nav.set_links(landing.links);
        nav.set_action(landing.action);

        let mut stage = Self {
            config,
            page,
            chat: ChatPanel::new(Rect::ZERO, palette),
            nav,
            width,
            height,
            pointer: None,
            full_redraw: true,
        };
        stage.resize(width, height);
        stage
    }

    /// Lay everything out for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.nav.set_bounds(Rect::new(0, 0, width, 1.min(height)));
        self.page.set_bounds(Rect::new(0, 1, width, height.saturating_sub(1)));
        self.follow_page();
        self.full_redraw = true;
        debug!(width, height, "stage resized");
    }

    /// Keep the chat panel and progress in step with the page scroll.
    fn follow_page(&mut self) {
        self.chat.set_bounds(self.page.chat_rect().unwrap_or(Rect::ZERO));
        self.nav.set_progress(self.page.progress());
        self.refresh_hover();
    }

    fn refresh_hover(&mut self) {
        self.page.set_pointer(self.pointer);
    }

    /// React to one input event.
    pub fn handle_input(&mut self, event: &InputEvent) -> Flow {
        match event {
            InputEvent::Resize { width, height } => {
                self.resize(*width, *height);
                return Flow::Continue;
            }
            InputEvent::PointerMove { x, y } => {
                self.pointer = Some((*x, *y));
                self.refresh_hover();
                return Flow::Continue;
            }
            InputEvent::PointerLeave => {
                self.pointer = None;
                self.refresh_hover();
                return Flow::Continue;
            }
            InputEvent::Error(message) => {
                warn!(%message, "input error");
                return Flow::Continue;
            }
            InputEvent::Shutdown => return Flow::Quit,
            InputEvent::Key { .. } | InputEvent::Scroll { .. } => {}
        }

        let Some(control) = event.control(self.config.scroll_step) else {
            return Flow::Continue;
        };
        let scrolled = match control {
            Control::ScrollBy(rows) => self.page.scroll_by(rows),
            Control::Page(pages) => self.page.scroll_page(pages),
            Control::Top => self.page.scroll_to_top(),
            Control::Bottom => self.page.scroll_to_bottom(),
            Control::Replay if self.chat.can_replay() => return Flow::Replay,
            Control::Replay => false,
            Control::Quit => return Flow::Quit,
        };
        if scrolled {
            self.follow_page();
        }
        Flow::Continue
    }

    /// Show a playback snapshot in the chat panel.
    pub fn on_playback(&mut self, state: &PlaybackState) {
        self.chat.sync(state);
    }

    /// Advance animations. Returns `true` if a repaint is due.
    pub fn tick(&mut self, now: Instant, frame: u64) -> bool {
        self.page.tick(now);
        self.chat.set_frame(frame);
        self.needs_redraw()
    }

    /// Whether anything changed since the last presented frame.
    pub fn needs_redraw(&self) -> bool {
        self.full_redraw || self.page.needs_redraw() || self.chat.needs_redraw() || self.nav.needs_redraw()
    }

    /// Whether the next frame must be written in full.
    pub const fn wants_full_redraw(&self) -> bool {
        self.full_redraw
    }

    /// Paint the whole screen.
    pub fn paint(&self) -> Canvas {
        let mut canvas = Canvas::new(self.width, self.height);
        self.page.render(&mut canvas);
        if self.chat.bounds().intersects(&self.page.bounds()) {
            self.chat.render(&mut canvas);
        }
        // Last, so content scrolled under it stays hidden
        self.nav.render(&mut canvas);
        canvas
    }

    /// Mark the current state as on screen.
    pub fn presented(&mut self) {
        self.full_redraw = false;
        self.page.clear_redraw();
        self.chat.clear_redraw();
        self.nav.clear_redraw();
    }

    /// Last known pointer cell.
    pub const fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    /// Whether the pointer is over the hero crescent.
    pub fn is_hovering(&self) -> bool {
        self.page.is_hovering()
    }

    /// The page.
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// The chat panel.
    pub const fn chat(&self) -> &ChatPanel {
        &self.chat
    }

    /// Take over the terminal and run until the visitor quits.
    pub fn run(landing: Landing, config: StageConfig) -> Result<(), StageError> {
        let guard = TerminalGuard::enter(&config)?;

        let size = terminal::size().ok().filter(|&(w, h)| w > 0 && h > 1);
        let observer = if size.is_some() {
            Observer::new(config.metrics)
        } else {
            Observer::unsupported()
        };
        let (width, height) = size.unwrap_or((80, 24));
        let script = landing.script;
        let mut stage = Self::new(landing, config.clone(), observer, width, height);

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input = InputActor::spawn(input_tx, config.input_poll_timeout)?;
        let ticker = TickerActor::spawn(config.frame_interval())?;
        let (present_tx, present_rx) = bounded::<PresentCommand>(2);
        let presenter = PresenterActor::spawn(present_rx)?;
        let player = Player::spawn(script, PlaybackTiming::default())?;
        info!(width, height, turns = script.len(), "stage running");

        loop {
            select! {
                recv(input_rx) -> event => {
                    let Ok(event) = event else { break };
                    match stage.handle_input(&event) {
                        Flow::Continue => {}
                        Flow::Replay => {
                            debug!("replay requested");
                            player.reset();
                        }
                        Flow::Quit => break,
                    }
                }
                recv(player.receiver()) -> state => {
                    let Ok(state) = state else { break };
                    stage.on_playback(&state);
                }
                recv(ticker.receiver()) -> tick => {
                    let Ok(tick) = tick else { break };
                    if stage.tick(tick.at, tick.frame) {
                        present(&mut stage, &present_tx)?;
                    }
                }
            }
        }

        player.join();
        ticker.join();
        input.join();
        let _ = present_tx.send(PresentCommand::Shutdown);
        let stats = presenter.join();
        info!(
            frames = stats.frames,
            cells = stats.cells_changed,
            bytes = stats.bytes_written,
            avg_us = stats.avg_present_us,
            "stage stopped"
        );
        drop(guard);
        Ok(())
    }
}

/// Hand the next frame to the presenter.
fn present(stage: &mut Stage, tx: &Sender<PresentCommand>) -> Result<(), StageError> {
    let canvas = Box::new(stage.paint());
    let command = if stage.wants_full_redraw() {
        PresentCommand::FullRedraw(canvas)
    } else {
        PresentCommand::Frame(canvas)
    };
    match tx.try_send(command) {
        Ok(()) => {
            stage.presented();
            Ok(())
        }
        // Presenter is behind; repaint on the next tick
        Err(TrySendError::Full(_)) => Ok(()),
        Err(TrySendError::Disconnected(_)) => Err(StageError::Disconnected("presenter")),
    }
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
struct TerminalGuard {
    mouse: bool,
    alternate_screen: bool,
}

impl TerminalGuard {
    fn enter(config: &StageConfig) -> Result<Self, StageError> {
        terminal::enable_raw_mode()?;
        // From here on, Drop undoes whatever was switched on
        let mut guard = Self {
            mouse: false,
            alternate_screen: false,
        };
        let mut stdout = io::stdout();
        if config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
            guard.alternate_screen = true;
        }
        if config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
            guard.mouse = true;
        }
        execute!(stdout, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, KeyModifiers};
    use crate::animation::AnimationVariant;
    use crate::config::CellMetrics;
    use crate::sequencer::{advance, PlaybackEvent, Turn};
    use crate::stage::{Block, Group};

    const TURNS: &[Turn] = &[Turn::agent("hi"), Turn::user("hello")];
    const CHAT: Script = Script::new(TURNS);

    fn landing() -> Landing {
        let mut landing = Landing::new(vec![
            SectionSpec::new("hero").group(Group::fixed().block(Block::Moon).block(Block::title("Meet ", "Luna"))),
            SectionSpec::new("features").group(
                Group::reveal(AnimationVariant::FadeUp)
                    .block(Block::heading("Why Choose Luna?"))
                    .block(Block::Spacer(20)),
            ),
            SectionSpec::new("demo").group(Group::fixed().block(Block::Chat { rows: 10 })),
        ]);
        landing.script = CHAT;
        landing.links = vec!["Features".to_string(), "Demo".to_string()];
        landing
    }

    fn stage() -> Stage {
        Stage::new(landing(), StageConfig::default(), Observer::new(CellMetrics::default()), 60, 20)
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    fn complete() -> PlaybackState {
        let mut state = PlaybackState::new();
        for cursor in 0..TURNS.len() {
            state = advance(&state, CHAT, PlaybackEvent::Evaluate).0;
            state = advance(&state, CHAT, PlaybackEvent::DelayElapsed { cursor }).0;
        }
        advance(&state, CHAT, PlaybackEvent::Evaluate).0
    }

    #[test]
    fn test_quit_keys() {
        let mut stage = stage();
        assert_eq!(stage.handle_input(&key('q')), Flow::Quit);
        assert_eq!(stage.handle_input(&InputEvent::Shutdown), Flow::Quit);
        let ctrl_c = InputEvent::Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(stage.handle_input(&ctrl_c), Flow::Quit);
    }

    #[test]
    fn test_replay_only_when_complete() {
        let mut stage = stage();
        assert_eq!(stage.handle_input(&key('r')), Flow::Continue);
        stage.on_playback(&complete());
        assert_eq!(stage.handle_input(&key('r')), Flow::Replay);
    }

    #[test]
    fn test_scrolling_moves_page_and_progress() {
        let mut stage = stage();
        assert_eq!(stage.page().scroll(), 0);
        stage.handle_input(&key('j'));
        assert_eq!(stage.page().scroll(), 2);
        stage.handle_input(&InputEvent::Key {
            code: KeyCode::End,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(stage.page().scroll(), stage.page().max_scroll());
        assert!(stage.page().is_revealed("features"));

        let canvas = stage.paint();
        assert!(canvas.row_text(0).contains("100%"));
    }

    #[test]
    fn test_wheel_scrolls_down() {
        let mut stage = stage();
        stage.handle_input(&InputEvent::Scroll { x: 0, y: 5, delta: -1 });
        assert_eq!(stage.page().scroll(), 2);
    }

    #[test]
    fn test_pointer_hover_and_leave() {
        let mut stage = stage();
        stage.handle_input(&InputEvent::PointerMove { x: 30, y: 4 });
        assert_eq!(stage.pointer(), Some((30, 4)));
        assert!(stage.is_hovering());
        stage.handle_input(&InputEvent::PointerLeave);
        assert!(!stage.is_hovering());
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut stage = stage();
        stage.presented();
        assert!(!stage.wants_full_redraw());
        stage.handle_input(&InputEvent::Resize { width: 40, height: 12 });
        assert!(stage.wants_full_redraw());
        let canvas = stage.paint();
        assert_eq!((canvas.width(), canvas.height()), (40, 12));
    }

    #[test]
    fn test_chat_panel_follows_scroll() {
        let mut stage = stage();
        stage.handle_input(&InputEvent::Key {
            code: KeyCode::End,
            modifiers: KeyModifiers::NONE,
        });
        stage.on_playback(&complete());
        assert_eq!(stage.chat().bounds(), stage.page().chat_rect().unwrap_or(Rect::ZERO));
        let canvas = stage.paint();
        assert!((0..20).any(|y| canvas.row_text(y).contains("hello")));
    }

    #[test]
    fn test_paint_draws_nav_over_page() {
        let stage = stage();
        let canvas = stage.paint();
        assert!(canvas.row_text(0).contains("Luna"));
        assert!(canvas.row_text(0).contains("Features"));
    }
}
