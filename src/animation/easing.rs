//! Easing curves and timed transitions.

use crate::config::{DEFAULT_DURATION, DEFAULT_EASING};
use std::time::Duration;

/// A CSS `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    /// `linear`.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Reveal default, a fast start with a long soft landing.
    pub const REVEAL: Self = Self::new(
        DEFAULT_EASING.0,
        DEFAULT_EASING.1,
        DEFAULT_EASING.2,
        DEFAULT_EASING.3,
    );

    /// Create a curve. `x1` and `x2` are clamped to `[0, 1]` when evaluated.
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Bezier polynomial for one axis with endpoints 0 and 1.
    fn curve(p1: f32, p2: f32, t: f32) -> f32 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        ((a * t + b) * t + c) * t
    }

    fn curve_derivative(p1: f32, p2: f32, t: f32) -> f32 {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (3.0 * a * t + 2.0 * b) * t + c
    }

    /// Solve for the curve parameter whose x equals `x`.
    fn solve_t(&self, x: f32) -> f32 {
        let (x1, x2) = (self.x1.clamp(0.0, 1.0), self.x2.clamp(0.0, 1.0));

        // Newton first; it converges in a few steps for well-behaved curves.
        let mut t = x;
        for _ in 0..8 {
            let err = Self::curve(x1, x2, t) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let slope = Self::curve_derivative(x1, x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        // Bisection fallback for flat regions.
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let value = Self::curve(x1, x2, t);
            if (value - x).abs() < 1e-6 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        t
    }

    /// Map linear progress `x` in `[0, 1]` to eased progress.
    pub fn ease(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::curve(self.y1, self.y2, self.solve_t(x))
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::REVEAL
    }
}

/// Timing of one reveal: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Time from start to rest.
    pub duration: Duration,
    /// Wait before starting.
    pub delay: Duration,
    /// Timing function.
    pub easing: CubicBezier,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            delay: Duration::ZERO,
            easing: CubicBezier::REVEAL,
        }
    }
}

impl Transition {
    /// Same transition with a different start delay.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Same transition with a different duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Eased progress `elapsed` after the transition was triggered.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let Some(running) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let linear = running.as_secs_f32() / self.duration.as_secs_f32();
        self.easing.ease(linear.min(1.0))
    }

    /// Whether the transition has reached rest `elapsed` after triggering.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay + self.duration
    }
}
