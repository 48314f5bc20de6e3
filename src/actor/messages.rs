//! Message types for actor communication.
//!
//! These enums define the protocol between the stage loop and its actors.

use crate::canvas::Canvas;

/// Key codes the stage reacts to.
///
/// A subset of crossterm's `KeyCode`; everything else is dropped by the
/// input actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Space bar.
    Space,
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Only Control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Check if any modifier is active.
    pub const fn any(&self) -> bool {
        self.shift || self.control || self.alt
    }
}

/// Events from the input thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Pointer moved over the terminal (move or drag).
    PointerMove {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
    },

    /// Pointer left the terminal window.
    PointerLeave,

    /// Mouse wheel.
    Scroll {
        /// Column.
        x: u16,
        /// Row.
        y: u16,
        /// Scroll delta (positive = up, negative = down).
        delta: i16,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

/// What an input asks the stage to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Scroll the page by a signed number of rows (positive = down).
    ScrollBy(i32),
    /// Scroll by a signed number of viewport heights.
    Page(i32),
    /// Jump to the top of the page.
    Top,
    /// Jump to the bottom of the page.
    Bottom,
    /// Replay the chat demo.
    Replay,
    /// Leave the stage.
    Quit,
}

impl InputEvent {
    /// Map an event to a stage control, given the scroll step in rows.
    pub fn control(&self, scroll_step: i32) -> Option<Control> {
        match *self {
            Self::Key { code, modifiers } => match code {
                KeyCode::Char('c') if modifiers.control => Some(Control::Quit),
                KeyCode::Char('q') | KeyCode::Esc => Some(Control::Quit),
                KeyCode::Char('r') => Some(Control::Replay),
                KeyCode::Up | KeyCode::Char('k') => Some(Control::ScrollBy(-scroll_step)),
                KeyCode::Down | KeyCode::Char('j') => Some(Control::ScrollBy(scroll_step)),
                KeyCode::PageUp => Some(Control::Page(-1)),
                KeyCode::PageDown | KeyCode::Space => Some(Control::Page(1)),
                KeyCode::Home | KeyCode::Char('g') => Some(Control::Top),
                KeyCode::End | KeyCode::Char('G') => Some(Control::Bottom),
                _ => None,
            },
            Self::Scroll { delta, .. } => Some(Control::ScrollBy(-i32::from(delta) * scroll_step)),
            _ => None,
        }
    }
}

/// Commands sent to the presenter thread.
#[derive(Debug)]
pub enum PresentCommand {
    /// Diff this frame against the last one and write the changes.
    Frame(Box<Canvas>),

    /// Write this frame in full, ignoring what is on screen.
    FullRedraw(Box<Canvas>),

    /// Shutdown the presenter thread.
    Shutdown,
}
