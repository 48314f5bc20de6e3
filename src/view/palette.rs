//! Luna's colors.

use crate::canvas::Rgb;

/// Colors shared by the page, the chat panel and the nav bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page background.
    pub background: Rgb,
    /// Raised surfaces (cards, agent bubbles).
    pub surface: Rgb,
    /// Brand violet.
    pub primary: Rgb,
    /// Secondary pink.
    pub accent: Rgb,
    /// Body text.
    pub foreground: Rgb,
    /// Secondary text.
    pub muted: Rgb,
    /// "Online" dot.
    pub online: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::from_u32(0x0d_0a_1a),
            surface: Rgb::from_u32(0x1c_17_33),
            primary: Rgb::from_u32(0xa7_8b_fa),
            accent: Rgb::from_u32(0xf0_ab_fc),
            foreground: Rgb::from_u32(0xf5_f3_ff),
            muted: Rgb::from_u32(0x9c_94_b8),
            online: Rgb::from_u32(0x22_c5_5e),
        }
    }
}
