//! Reveal options: threshold, root margin and latch behavior.

use crate::config::{CellMetrics, DEFAULT_THRESHOLD, DEFAULT_TRIGGER_ONCE};
use crate::error::RevealError;
use crate::layout::{Insets, Rect};
use std::fmt;
use std::str::FromStr;

/// Fraction of a region's area that must intersect the viewport.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f32);

impl Threshold {
    /// Validate a threshold in `[0, 1]`.
    pub fn new(value: f32) -> Result<Self, RevealError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RevealError::InvalidThreshold(value))
        }
    }

    /// The raw fraction.
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Whether an intersection ratio meets this threshold (inclusive).
    pub fn is_met_by(self, ratio: f32) -> bool {
        ratio >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

/// One side of a root margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    /// Absolute CSS pixels.
    Px(f32),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f32),
}

impl MarginValue {
    #[allow(clippy::cast_possible_truncation)]
    fn resolve(self, extent: u16, px_to_cells: impl Fn(f32) -> i32) -> i32 {
        match self {
            Self::Px(px) => px_to_cells(px),
            Self::Percent(pct) => (f32::from(extent) * pct / 100.0).round() as i32,
        }
    }
}

impl FromStr for MarginValue {
    type Err = &'static str;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (number, unit) = if let Some(n) = token.strip_suffix("px") {
            (n, "px")
        } else if let Some(n) = token.strip_suffix('%') {
            (n, "%")
        } else {
            (token, "")
        };
        let value: f32 = number.parse().map_err(|_| "expected a number")?;
        if !value.is_finite() {
            return Err("expected a finite number");
        }
        match unit {
            "px" => Ok(Self::Px(value)),
            "%" => Ok(Self::Percent(value)),
            // A bare zero is unambiguous.
            _ if value == 0.0 => Ok(Self::Px(0.0)),
            _ => Err("values must end in px or %"),
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Signed offsets that grow or shrink the viewport before testing.
///
/// Parsed from CSS shorthand: one to four values, each in `px` or `%`,
/// ordered top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    /// Top offset.
    pub top: MarginValue,
    /// Right offset.
    pub right: MarginValue,
    /// Bottom offset.
    pub bottom: MarginValue,
    /// Left offset.
    pub left: MarginValue,
}

impl RootMargin {
    /// No margin.
    pub const ZERO: Self = Self {
        top: MarginValue::Px(0.0),
        right: MarginValue::Px(0.0),
        bottom: MarginValue::Px(0.0),
        left: MarginValue::Px(0.0),
    };

    /// Convert to cell insets for a given root rectangle.
    pub fn resolve(&self, root: Rect, metrics: CellMetrics) -> Insets {
        Insets {
            top: self.top.resolve(root.height, |px| metrics.rows(px)),
            right: self.right.resolve(root.width, |px| metrics.cols(px)),
            bottom: self.bottom.resolve(root.height, |px| metrics.rows(px)),
            left: self.left.resolve(root.width, |px| metrics.cols(px)),
        }
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl FromStr for RootMargin {
    type Err = RevealError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| RevealError::InvalidMargin {
            input: input.to_string(),
            reason,
        };
        let values = input
            .split_whitespace()
            .map(str::parse::<MarginValue>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            [] => return Err(invalid("expected at least one value")),
            _ => return Err(invalid("expected at most four values")),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

/// Options for a single observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Required intersection fraction.
    pub threshold: Threshold,
    /// Viewport adjustment.
    pub root_margin: RootMargin,
    /// Latch visible after the first reveal.
    pub trigger_once: bool,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            root_margin: RootMargin::ZERO,
            trigger_once: DEFAULT_TRIGGER_ONCE,
        }
    }
}

impl RevealOptions {
    /// Set the threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Result<Self, RevealError> {
        self.threshold = Threshold::new(threshold)?;
        Ok(self)
    }

    /// Set the root margin from CSS shorthand.
    pub fn with_root_margin(mut self, margin: &str) -> Result<Self, RevealError> {
        self.root_margin = margin.parse()?;
        Ok(self)
    }

    /// Set the latch behavior.
    #[must_use]
    pub const fn trigger_once(mut self, once: bool) -> Self {
        self.trigger_once = once;
        self
    }
}
