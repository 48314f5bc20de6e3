//! Glyph: one styled terminal cell.
//!
//! Graphemes of up to four bytes are stored inline. Longer clusters (emoji
//! ZWJ sequences, flags) spill to the heap. A wide grapheme occupies its
//! lead cell plus continuation cells with zero width.

use bitflags::bitflags;

/// True-color RGB.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Mix toward `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let channel = |a: u8, b: u8| (f32::from(b) - f32::from(a)).mul_add(t, f32::from(a)).round() as u8;
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(c: Rgb) -> Self {
        Self::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

bitflags! {
    /// Text style modifiers.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0001_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Colors and modifiers to draw with.
///
/// `bg: None` keeps whatever background is already painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Brush {
    /// Foreground color
    pub fg: Rgb,
    /// Background color, if painted
    pub bg: Option<Rgb>,
    /// Modifiers
    pub modifiers: Modifiers,
}

impl Brush {
    /// Foreground-only brush.
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// Same brush with a background.
    #[must_use]
    pub const fn on(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    /// Same brush with extra modifiers.
    #[must_use]
    pub const fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = self.modifiers.union(modifiers);
        self
    }

    /// Fade the foreground into `backdrop` as `opacity` falls to zero.
    #[must_use]
    pub fn faded(mut self, opacity: f32, backdrop: Rgb) -> Self {
        self.fg = backdrop.mix(self.fg, opacity);
        self
    }
}

#[derive(Clone, PartialEq, Eq)]
enum Symbol {
    Inline { bytes: [u8; 4], len: u8 },
    Heap(Box<str>),
}

impl Symbol {
    const SPACE: Self = Self::Inline {
        bytes: [b' ', 0, 0, 0],
        len: 1,
    };
    const NONE: Self = Self::Inline {
        bytes: [0; 4],
        len: 0,
    };

    fn from_str(s: &str) -> Self {
        if s.len() <= 4 {
            let mut bytes = [0; 4];
            bytes[..s.len()].copy_from_slice(s.as_bytes());
            #[allow(clippy::cast_possible_truncation)]
            let len = s.len() as u8;
            Self::Inline { bytes, len }
        } else {
            Self::Heap(s.into())
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Inline { bytes, len } => {
                std::str::from_utf8(&bytes[..usize::from(*len)]).unwrap_or("\u{fffd}")
            }
            Self::Heap(s) => s,
        }
    }
}

/// A single styled cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Glyph {
    symbol: Symbol,
    /// Display width (0 = continuation, 1 = normal, 2 = wide).
    width: u8,
    fg: Rgb,
    bg: Rgb,
    modifiers: Modifiers,
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

impl Glyph {
    /// A space on black.
    pub const BLANK: Self = Self {
        symbol: Symbol::SPACE,
        width: 1,
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        modifiers: Modifiers::empty(),
    };

    /// A blank cell with the given background.
    pub const fn blank(bg: Rgb) -> Self {
        Self {
            symbol: Symbol::SPACE,
            width: 1,
            fg: Rgb::WHITE,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// A grapheme with explicit display width and colors.
    pub fn new(grapheme: &str, width: u8, fg: Rgb, bg: Rgb, modifiers: Modifiers) -> Self {
        Self {
            symbol: Symbol::from_str(grapheme),
            width,
            fg,
            bg,
            modifiers,
        }
    }

    /// Trailing half of a wide grapheme.
    pub(crate) const fn continuation(fg: Rgb, bg: Rgb) -> Self {
        Self {
            symbol: Symbol::NONE,
            width: 0,
            fg,
            bg,
            modifiers: Modifiers::empty(),
        }
    }

    /// The grapheme text; empty for continuation cells.
    #[inline]
    pub fn symbol(&self) -> &str {
        self.symbol.as_str()
    }

    /// Display width.
    #[inline]
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Modifiers.
    #[inline]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether this cell continues a wide grapheme to its left.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    /// Repaint the background, leaving the symbol.
    #[inline]
    pub(crate) const fn set_bg(&mut self, bg: Rgb) {
        self.bg = bg;
    }
}

impl std::fmt::Debug for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Glyph")
            .field("symbol", &self.symbol())
            .field("width", &self.width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("modifiers", &self.modifiers)
            .finish()
    }
}
