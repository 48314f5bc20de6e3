//! Animation variants and their style snapshots.

use crate::error::RevealError;
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Style properties a snapshot sets.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleProps: u8 {
        /// Opacity.
        const OPACITY = 0b0000_0001;
        /// Horizontal or vertical translation.
        const TRANSLATE = 0b0000_0010;
        /// Uniform scale.
        const SCALE = 0b0000_0100;
        /// Blur radius.
        const BLUR = 0b0000_1000;
        /// Rotation.
        const ROTATE = 0b0001_0000;
    }
}

impl fmt::Debug for StyleProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// One endpoint of a reveal: a set of style property values.
///
/// Lengths are CSS pixels; the painter converts them to cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSnapshot {
    /// Which properties are meaningful.
    pub props: StyleProps,
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    /// Horizontal offset in px.
    pub translate_x: f32,
    /// Vertical offset in px.
    pub translate_y: f32,
    /// Uniform scale factor.
    pub scale: f32,
    /// Blur radius in px.
    pub blur: f32,
    /// Rotation in degrees.
    pub rotate: f32,
}

impl StyleSnapshot {
    /// Fully visible, untransformed.
    pub const REST: Self = Self {
        props: StyleProps::empty(),
        opacity: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
        blur: 0.0,
        rotate: 0.0,
    };

    const fn hidden(props: StyleProps) -> Self {
        Self {
            props: props.union(StyleProps::OPACITY),
            opacity: 0.0,
            ..Self::REST
        }
    }

    const fn shown(props: StyleProps) -> Self {
        Self {
            props: props.union(StyleProps::OPACITY),
            ..Self::REST
        }
    }

    const fn translated(mut self, x: f32, y: f32) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    const fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    const fn blurred(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }

    const fn rotated(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    /// Linear blend from `self` toward `to` by `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| (b - a).mul_add(t, a);
        Self {
            props: self.props | to.props,
            opacity: mix(self.opacity, to.opacity),
            translate_x: mix(self.translate_x, to.translate_x),
            translate_y: mix(self.translate_y, to.translate_y),
            scale: mix(self.scale, to.scale),
            blur: mix(self.blur, to.blur),
            rotate: mix(self.rotate, to.rotate),
        }
    }
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self::REST
    }
}

/// The seven reveal presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationVariant {
    /// Fade in while rising 40px.
    #[default]
    FadeUp,
    /// Fade in while dropping 40px.
    FadeDown,
    /// Fade in from 40px to the left.
    FadeLeft,
    /// Fade in from 40px to the right.
    FadeRight,
    /// Fade in while growing from 90%.
    Scale,
    /// Fade in while a 10px blur clears.
    Blur,
    /// Fade in while turning from -5 degrees at 95%.
    Rotate,
}

const T: StyleProps = StyleProps::TRANSLATE;

/// `(initial, visible)` per variant, indexed by discriminant.
static VARIANT_STYLES: [(StyleSnapshot, StyleSnapshot); 7] = [
    (StyleSnapshot::hidden(T).translated(0.0, 40.0), StyleSnapshot::shown(T)),
    (StyleSnapshot::hidden(T).translated(0.0, -40.0), StyleSnapshot::shown(T)),
    (StyleSnapshot::hidden(T).translated(-40.0, 0.0), StyleSnapshot::shown(T)),
    (StyleSnapshot::hidden(T).translated(40.0, 0.0), StyleSnapshot::shown(T)),
    (
        StyleSnapshot::hidden(StyleProps::SCALE).scaled(0.9),
        StyleSnapshot::shown(StyleProps::SCALE),
    ),
    (
        StyleSnapshot::hidden(StyleProps::BLUR).blurred(10.0),
        StyleSnapshot::shown(StyleProps::BLUR),
    ),
    (
        StyleSnapshot::hidden(StyleProps::ROTATE.union(StyleProps::SCALE))
            .rotated(-5.0)
            .scaled(0.95),
        StyleSnapshot::shown(StyleProps::ROTATE.union(StyleProps::SCALE)),
    ),
];

impl AnimationVariant {
    /// All variants in table order.
    pub const ALL: [Self; 7] = [
        Self::FadeUp,
        Self::FadeDown,
        Self::FadeLeft,
        Self::FadeRight,
        Self::Scale,
        Self::Blur,
        Self::Rotate,
    ];

    /// Style before the region is revealed.
    pub fn initial(self) -> StyleSnapshot {
        VARIANT_STYLES[self as usize].0
    }

    /// Style once the region is revealed.
    pub fn visible(self) -> StyleSnapshot {
        VARIANT_STYLES[self as usize].1
    }

    /// Endpoint for a reveal flag.
    pub fn snapshot(self, visible: bool) -> StyleSnapshot {
        if visible {
            self.visible()
        } else {
            self.initial()
        }
    }

    /// Kebab-case preset name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FadeUp => "fade-up",
            Self::FadeDown => "fade-down",
            Self::FadeLeft => "fade-left",
            Self::FadeRight => "fade-right",
            Self::Scale => "scale",
            Self::Blur => "blur",
            Self::Rotate => "rotate",
        }
    }
}

impl FromStr for AnimationVariant {
    type Err = RevealError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| RevealError::UnknownVariant(name.to_string()))
    }
}

impl fmt::Display for AnimationVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_fades() {
        for variant in AnimationVariant::ALL {
            assert_eq!(variant.initial().opacity, 0.0, "{variant}");
            assert_eq!(variant.visible().opacity, 1.0, "{variant}");
            assert!(variant.initial().props.contains(StyleProps::OPACITY));
        }
    }

    #[test]
    fn test_table_values() {
        assert_eq!(AnimationVariant::FadeUp.initial().translate_y, 40.0);
        assert_eq!(AnimationVariant::FadeDown.initial().translate_y, -40.0);
        assert_eq!(AnimationVariant::FadeLeft.initial().translate_x, -40.0);
        assert_eq!(AnimationVariant::FadeRight.initial().translate_x, 40.0);
        assert_eq!(AnimationVariant::Scale.initial().scale, 0.9);
        assert_eq!(AnimationVariant::Blur.initial().blur, 10.0);

        let rotate = AnimationVariant::Rotate.initial();
        assert_eq!(rotate.rotate, -5.0);
        assert_eq!(rotate.scale, 0.95);
        assert_eq!(AnimationVariant::Rotate.visible().rotate, 0.0);
    }

    #[test]
    fn test_visible_snapshots_are_at_rest() {
        for variant in AnimationVariant::ALL {
            let v = variant.visible();
            assert_eq!((v.translate_x, v.translate_y, v.scale, v.blur, v.rotate), (0.0, 0.0, 1.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_variant_names_round_trip() {
        for variant in AnimationVariant::ALL {
            assert_eq!(variant.name().parse::<AnimationVariant>(), Ok(variant));
        }
        assert_eq!(
            "wiggle".parse::<AnimationVariant>(),
            Err(RevealError::UnknownVariant("wiggle".into()))
        );
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = AnimationVariant::FadeUp.initial();
        let to = AnimationVariant::FadeUp.visible();
        let mid = from.lerp(&to, 0.5);
        assert!((mid.opacity - 0.5).abs() < 1e-6);
        assert!((mid.translate_y - 20.0).abs() < 1e-6);
        assert_eq!(from.lerp(&to, 2.0), to.lerp(&to, 0.0));
    }
}
