//! Configuration: compile-time defaults and the stage configuration struct.
//!
//! Everything the landing page tunes lives here as a constant, so the values
//! can be read at a glance and overridden per instance through `Default`-backed
//! structs.

use std::time::Duration;

/// Lower bound of the agent "typing" delay.
pub const AGENT_DELAY_MIN: Duration = Duration::from_millis(1500);
/// Upper bound (exclusive) of the agent "typing" delay.
pub const AGENT_DELAY_MAX: Duration = Duration::from_millis(2500);
/// Fixed delay before a user turn appears.
pub const USER_DELAY: Duration = Duration::from_millis(2000);

/// Default fraction of a region that must intersect the viewport.
pub const DEFAULT_THRESHOLD: f32 = 0.1;
/// Default root margin expression.
pub const DEFAULT_ROOT_MARGIN: &str = "0px";
/// Regions latch visible by default.
pub const DEFAULT_TRIGGER_ONCE: bool = true;

/// Default reveal transition duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);
/// Default per-child stagger step.
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(100);
/// Default reveal easing control points, `cubic-bezier(0.16, 1, 0.3, 1)`.
pub const DEFAULT_EASING: (f32, f32, f32, f32) = (0.16, 1.0, 0.3, 1.0);

/// Conversion from CSS pixels to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// CSS pixels per terminal column.
    pub px_per_col: f32,
    /// CSS pixels per terminal row.
    pub px_per_row: f32,
}

impl CellMetrics {
    /// Convert a horizontal pixel offset to whole columns.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cols(&self, px: f32) -> i32 {
        (px / self.px_per_col).round() as i32
    }

    /// Convert a vertical pixel offset to whole rows.
    #[allow(clippy::cast_possible_truncation)]
    pub fn rows(&self, px: f32) -> i32 {
        (px / self.px_per_row).round() as i32
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            px_per_col: 10.0,
            px_per_row: 20.0,
        }
    }
}

/// Configuration for the [`Stage`](crate::stage::Stage).
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Target frames per second.
    pub target_fps: u32,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to enable mouse capture (wheel scrolling, pointer hover).
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Pixel to cell conversion for style offsets and pixel margins.
    pub metrics: CellMetrics,
    /// Rows moved per arrow key or wheel notch.
    pub scroll_step: i32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            target_fps: 30,
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
            metrics: CellMetrics::default(),
            scroll_step: 2,
        }
    }
}

impl StageConfig {
    /// Interval between frame ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}
