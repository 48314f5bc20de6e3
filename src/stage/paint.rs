//! Projection of a style snapshot onto terminal cells.
//!
//! A terminal cannot blur or rotate, so each property maps onto the
//! nearest cell-level effect:
//!
//! | property  | cells                                        |
//! |-----------|----------------------------------------------|
//! | opacity   | foreground blended into the page background  |
//! | translate | whole-cell offset via [`CellMetrics`]        |
//! | scale     | symmetric horizontal indent                  |
//! | blur      | `DIM` once past a small radius               |
//! | rotate    | per-row horizontal shear                     |

use crate::animation::StyleSnapshot;
use crate::canvas::{Brush, Modifiers, Rgb};
use crate::config::CellMetrics;

/// Blur radius (px) at which text is dimmed.
const DIM_BLUR_PX: f32 = 1.5;
/// Below this opacity nothing is drawn.
const MIN_OPACITY: f32 = 0.02;

/// A style snapshot resolved for a block of a given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Column offset.
    pub dx: i32,
    /// Row offset.
    pub dy: i32,
    /// Columns trimmed from each side.
    pub indent: i32,
    /// Extra modifiers (blur).
    pub modifiers: Modifiers,
    /// Column shift per row away from the block's middle row.
    pub shear: f32,
}

impl Projection {
    /// Untransformed and opaque.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        dx: 0,
        dy: 0,
        indent: 0,
        modifiers: Modifiers::empty(),
        shear: 0.0,
    };

    /// Resolve `style` for a block `width` columns wide.
    pub fn resolve(style: &StyleSnapshot, width: u16, metrics: CellMetrics) -> Self {
        let modifiers = if style.blur > DIM_BLUR_PX {
            Modifiers::DIM
        } else {
            Modifiers::empty()
        };

        #[allow(clippy::cast_possible_truncation)]
        let indent = ((1.0 - style.scale).max(0.0) * f32::from(width) / 2.0).round() as i32;

        // tan(angle) in px converted to columns per row
        let shear = style.rotate.to_radians().tan() * metrics.px_per_row / metrics.px_per_col;

        Self {
            opacity: style.opacity.clamp(0.0, 1.0),
            dx: metrics.cols(style.translate_x),
            dy: metrics.rows(style.translate_y),
            indent,
            modifiers,
            shear,
        }
    }

    /// Whether anything would be drawn.
    pub fn is_visible(&self) -> bool {
        self.opacity >= MIN_OPACITY
    }

    /// Column shift for `row` of a block `rows` tall.
    #[allow(clippy::cast_possible_truncation)]
    pub fn shear_at(&self, row: u16, rows: u16) -> i32 {
        let from_middle = f32::from(row) - f32::from(rows.saturating_sub(1)) / 2.0;
        (self.shear * from_middle).round() as i32
    }

    /// A brush for `fg` faded toward `backdrop`.
    pub fn brush(&self, fg: Rgb, backdrop: Rgb) -> Brush {
        Brush::fg(fg)
            .faded(self.opacity, backdrop)
            .with(self.modifiers)
    }

    /// Blend a background color the same way as text.
    pub fn fill(&self, bg: Rgb, backdrop: Rgb) -> Rgb {
        backdrop.mix(bg, self.opacity)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationVariant;

    fn resolve(style: &StyleSnapshot) -> Projection {
        Projection::resolve(style, 40, CellMetrics::default())
    }

    #[test]
    fn test_rest_is_identity() {
        assert_eq!(resolve(&StyleSnapshot::REST), Projection::IDENTITY);
        for variant in AnimationVariant::ALL {
            let p = resolve(&variant.visible());
            assert_eq!(p.dx, 0);
            assert_eq!(p.dy, 0);
            assert_eq!(p.indent, 0);
            assert!(p.modifiers.is_empty());
            assert!(p.is_visible());
        }
    }

    #[test]
    fn test_initial_snapshots_are_hidden() {
        for variant in AnimationVariant::ALL {
            assert!(!resolve(&variant.initial()).is_visible(), "{variant}");
        }
    }

    #[test]
    fn test_translate_maps_to_cells() {
        let p = resolve(&AnimationVariant::FadeUp.initial());
        assert_eq!(p.dy, 2);
        let p = resolve(&AnimationVariant::FadeLeft.initial());
        assert_eq!(p.dx, -4);
    }

    #[test]
    fn test_scale_indents_and_blur_dims() {
        let p = resolve(&AnimationVariant::Scale.initial());
        assert_eq!(p.indent, 2);
        let p = resolve(&AnimationVariant::Blur.initial());
        assert!(p.modifiers.contains(Modifiers::DIM));
    }

    #[test]
    fn test_rotate_shears_about_middle() {
        let p = resolve(&AnimationVariant::Rotate.initial());
        assert!(p.shear < 0.0);
        assert_eq!(p.shear_at(10, 21), 0);
        assert!(p.shear_at(0, 21) > 0);
        assert!(p.shear_at(20, 21) < 0);
    }

    #[test]
    fn test_half_faded_brush() {
        let mut p = Projection::IDENTITY;
        p.opacity = 0.5;
        let brush = p.brush(Rgb::WHITE, Rgb::BLACK);
        assert_eq!(brush.fg, Rgb::new(128, 128, 128));
    }
}
