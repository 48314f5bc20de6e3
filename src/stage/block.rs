//! Content blocks: the pieces a section is built from.

use super::paint::Projection;
use crate::canvas::{text_width, Canvas, Modifiers, Rgb};
use crate::layout::Rect;
use crate::view::{wrap, Palette};

/// Crescent drawn in the hero in place of the 3D avatar.
const MOON: [&str; 7] = [
    "    .-'''''-.   ",
    "  .'   .-'   '. ",
    " /    /        \\",
    "|    |     *    |",
    " \\    \\        /",
    "  '.   '-.   .' ",
    "    '-.....-'   ",
];

/// Placement of a single-line block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Flush left.
    Left,
    /// Centered in the block.
    Center,
}

/// One piece of page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Small pill label above a heading.
    Badge(String),
    /// Large title; `highlight` is drawn in the brand color.
    Title {
        /// Plain part.
        lead: String,
        /// Brand-colored part.
        highlight: String,
    },
    /// Section heading.
    Heading(String),
    /// Wrapped body text.
    Text(String),
    /// Feature card.
    Card {
        /// Leading symbol.
        icon: String,
        /// Card title.
        title: String,
        /// Card body.
        body: String,
    },
    /// Numbered step.
    Step {
        /// Step number.
        number: u8,
        /// Step title.
        title: String,
        /// Step body.
        body: String,
    },
    /// Testimonial.
    Quote {
        /// Quoted text.
        text: String,
        /// Who said it.
        author: String,
        /// Their role.
        role: String,
    },
    /// Call-to-action button.
    Button(String),
    /// The hero crescent; tinted while the pointer hovers it.
    Moon,
    /// Rows reserved for the chat panel.
    Chat {
        /// Panel height.
        rows: u16,
    },
    /// Empty rows.
    Spacer(u16),
}

impl Block {
    /// Wrapped body text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Section heading.
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading(text.into())
    }

    /// Badge label.
    pub fn badge(text: impl Into<String>) -> Self {
        Self::Badge(text.into())
    }

    /// Title with a highlighted tail.
    pub fn title(lead: impl Into<String>, highlight: impl Into<String>) -> Self {
        Self::Title {
            lead: lead.into(),
            highlight: highlight.into(),
        }
    }

    /// Button label.
    pub fn button(label: impl Into<String>) -> Self {
        Self::Button(label.into())
    }

    /// Feature card.
    pub fn card(icon: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Card {
            icon: icon.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Numbered step.
    pub fn step(number: u8, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Step {
            number,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Testimonial.
    pub fn quote(text: impl Into<String>, author: impl Into<String>, role: impl Into<String>) -> Self {
        Self::Quote {
            text: text.into(),
            author: author.into(),
            role: role.into(),
        }
    }

    /// Height in rows at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        let w = usize::from(width);
        let rows = |text: &str, inset: usize| -> u16 {
            u16::try_from(wrap(text, w.saturating_sub(inset)).len()).unwrap_or(u16::MAX)
        };
        match self {
            Self::Badge(_) | Self::Button(_) => 1,
            Self::Title { lead, highlight } => {
                if text_width(lead) + text_width(highlight) <= w {
                    1
                } else {
                    2
                }
            }
            Self::Heading(text) | Self::Text(text) => rows(text, 0),
            Self::Card { body, .. } => 3 + rows(body, 4),
            Self::Step { body, .. } => 1 + rows(body, 6),
            Self::Quote { text, .. } => 3 + rows(text, 4),
            Self::Moon => u16::try_from(MOON.len()).unwrap_or(u16::MAX),
            Self::Chat { rows } | Self::Spacer(rows) => *rows,
        }
    }

    /// Whether this block is the chat panel placeholder.
    pub const fn is_chat(&self) -> bool {
        matches!(self, Self::Chat { .. })
    }

    /// Whether this block is the hero crescent.
    pub const fn is_moon(&self) -> bool {
        matches!(self, Self::Moon)
    }

    /// Paint into `rect` (screen coordinates) with the ink's projection.
    pub fn paint(&self, ink: &mut Ink<'_>, rect: Rect) {
        let p = ink.palette;
        let width = usize::from(rect.width);
        match self {
            Self::Badge(label) => {
                let label = format!(" ✦ {label} ");
                ink.line(rect, 0, &label, p.muted, Some(p.surface), Modifiers::empty(), Align::Center);
            }
            Self::Title { lead, highlight } => {
                let lead_width = text_width(lead);
                let total = lead_width + text_width(highlight);
                if total <= width {
                    let x = ink.aligned_x(rect, 0, &format!("{lead}{highlight}"), Align::Center);
                    let split = x + i32::try_from(lead_width).unwrap_or(0);
                    ink.put(x, rect.y, lead, p.foreground, None, Modifiers::BOLD);
                    ink.put(split, rect.y, highlight, p.primary, None, Modifiers::BOLD);
                } else {
                    ink.line(rect, 0, lead.trim_end(), p.foreground, None, Modifiers::BOLD, Align::Center);
                    ink.line(rect, 1, highlight, p.primary, None, Modifiers::BOLD, Align::Center);
                }
            }
            Self::Heading(text) => {
                for (row, line) in wrap(text, width).iter().enumerate() {
                    let row = u16::try_from(row).unwrap_or(u16::MAX);
                    ink.line(rect, row, line, p.foreground, None, Modifiers::BOLD, Align::Center);
                }
            }
            Self::Text(text) => {
                for (row, line) in wrap(text, width).iter().enumerate() {
                    let row = u16::try_from(row).unwrap_or(u16::MAX);
                    ink.line(rect, row, line, p.muted, None, Modifiers::empty(), Align::Center);
                }
            }
            Self::Card { icon, title, body } => {
                ink.fill(rect, p.surface);
                let inner = Rect::new(rect.x + 2, rect.y, rect.width.saturating_sub(4), rect.height);
                let heading = format!("{icon}  {title}");
                ink.line(inner, 1, &heading, p.foreground, None, Modifiers::BOLD, Align::Left);
                for (row, line) in wrap(body, usize::from(inner.width)).iter().enumerate() {
                    let row = u16::try_from(row + 2).unwrap_or(u16::MAX);
                    ink.line(inner, row, line, p.muted, None, Modifiers::empty(), Align::Left);
                }
            }
            Self::Step { number, title, body } => {
                let badge = format!(" {number} ");
                ink.line(rect, 0, &badge, p.background, Some(p.primary), Modifiers::BOLD, Align::Left);
                let inner = Rect::new(rect.x + 6, rect.y, rect.width.saturating_sub(6), rect.height);
                ink.line(inner, 0, title, p.foreground, None, Modifiers::BOLD, Align::Left);
                for (row, line) in wrap(body, usize::from(inner.width)).iter().enumerate() {
                    let row = u16::try_from(row + 1).unwrap_or(u16::MAX);
                    ink.line(inner, row, line, p.muted, None, Modifiers::empty(), Align::Left);
                }
            }
            Self::Quote { text, author, role } => {
                ink.fill(rect, p.surface);
                let inner = Rect::new(rect.x + 2, rect.y, rect.width.saturating_sub(4), rect.height);
                let lines = wrap(&format!("“{text}”"), usize::from(inner.width));
                for (row, line) in lines.iter().enumerate() {
                    let row = u16::try_from(row + 1).unwrap_or(u16::MAX);
                    ink.line(inner, row, line, p.foreground, None, Modifiers::ITALIC, Align::Left);
                }
                let signature = format!("★★★★★  {author} · {role}");
                let row = u16::try_from(lines.len() + 1).unwrap_or(u16::MAX);
                ink.line(inner, row, &signature, p.accent, None, Modifiers::empty(), Align::Left);
            }
            Self::Button(label) => {
                let label = format!("  {label}  ");
                ink.line(rect, 0, &label, p.background, Some(p.primary), Modifiers::BOLD, Align::Center);
            }
            Self::Moon => {
                let (color, modifiers) = if ink.hover {
                    (p.accent, Modifiers::BOLD)
                } else {
                    (p.primary, Modifiers::empty())
                };
                // Centered as one shape, not line by line
                let art_width = MOON.iter().map(|l| text_width(l)).max().unwrap_or(0);
                let art_width = u16::try_from(art_width).unwrap_or(u16::MAX);
                let offset = rect.width.saturating_sub(art_width) / 2;
                let art = Rect::new(rect.x + i32::from(offset), rect.y, art_width, rect.height);
                for (row, line) in MOON.iter().enumerate() {
                    let row = u16::try_from(row).unwrap_or(u16::MAX);
                    ink.line(art, row, line, color, None, modifiers, Align::Left);
                }
            }
            Self::Chat { .. } | Self::Spacer(_) => {}
        }
    }
}

/// Drawing context for one block: canvas, clip, projection and colors.
pub struct Ink<'a> {
    /// Target canvas.
    pub canvas: &'a mut Canvas,
    /// Screen region drawing is confined to.
    pub clip: Rect,
    /// Style applied to everything drawn.
    pub projection: Projection,
    /// Colors.
    pub palette: Palette,
    /// Pointer is over this block.
    pub hover: bool,
    /// Block height, for shear.
    pub rows: u16,
}

impl Ink<'_> {
    fn aligned_x(&self, rect: Rect, row: u16, text: &str, align: Align) -> i32 {
        let shear = self.projection.shear_at(row, self.rows);
        let x = match align {
            Align::Left => rect.x,
            Align::Center => {
                let w = i32::try_from(text_width(text)).unwrap_or(i32::MAX);
                rect.x + (i32::from(rect.width) - w).max(0) / 2
            }
        };
        x + shear
    }

    fn put(&mut self, x: i32, y: i32, text: &str, fg: Rgb, bg: Option<Rgb>, modifiers: Modifiers) {
        let backdrop = self.palette.background;
        let mut brush = self.projection.brush(fg, backdrop).with(modifiers);
        if let Some(bg) = bg {
            brush = brush.on(self.projection.fill(bg, backdrop));
        }
        self.canvas.draw_text(x, y, text, brush, self.clip);
    }

    #[allow(clippy::too_many_arguments)]
    fn line(
        &mut self,
        rect: Rect,
        row: u16,
        text: &str,
        fg: Rgb,
        bg: Option<Rgb>,
        modifiers: Modifiers,
        align: Align,
    ) {
        let x = self.aligned_x(rect, row, text, align);
        self.put(x, rect.y + i32::from(row), text, fg, bg, modifiers);
    }

    fn fill(&mut self, rect: Rect, bg: Rgb) {
        let bg = self.projection.fill(bg, self.palette.background);
        for row in 0..rect.height {
            let shear = self.projection.shear_at(row, self.rows);
            let line = Rect::new(rect.x + shear, rect.y + i32::from(row), rect.width, 1);
            if let Some(visible) = line.intersection(&self.clip) {
                self.canvas.fill(visible, bg);
            }
        }
    }
}
