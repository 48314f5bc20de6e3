//! Rect: A signed rectangle primitive for page and viewport geometry.

/// A rectangle defined by position and size.
///
/// Position is signed: page coordinates translated by the scroll offset can
/// fall above or left of the viewport.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate (column) of the top-left corner.
    pub x: i32,
    /// Y coordinate (row) of the top-left corner.
    pub y: i32,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

/// Signed per-side offsets, in cells.
///
/// Positive values grow a rectangle outward, negative values shrink it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Insets {
    /// Offset applied above the top edge.
    pub top: i32,
    /// Offset applied past the right edge.
    pub right: i32,
    /// Offset applied below the bottom edge.
    pub bottom: i32,
    /// Offset applied before the left edge.
    pub left: i32,
}

impl Insets {
    /// No offset on any side.
    pub const ZERO: Self = Self::uniform(0);

    /// Same offset on every side.
    pub const fn uniform(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a terminal size (full screen).
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Zero-sized rectangle.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Get the area (number of cells).
    #[inline]
    pub const fn area(&self) -> u32 {
        (self.width as u32) * (self.height as u32)
    }

    /// Check if the rectangle is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Get the right edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width as i32)
    }

    /// Get the bottom edge (exclusive), saturating at `i32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height as i32)
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects with another.
    #[inline]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// The overlapping part of two rectangles, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Self::from_edges(x, y, right, bottom))
    }

    /// Grow (or with negative insets, shrink) the rectangle per side.
    ///
    /// Collapses to an empty rectangle at the shrunk origin when the insets
    /// consume the whole extent. Edges saturate at the `i32` range and the
    /// extent at `u16::MAX`.
    #[must_use]
    pub fn outset(&self, insets: Insets) -> Self {
        let x = self.x.saturating_sub(insets.left);
        let y = self.y.saturating_sub(insets.top);
        let right = self.right().saturating_add(insets.right).max(x);
        let bottom = self.bottom().saturating_add(insets.bottom).max(y);
        Self::from_edges(x, y, right, bottom)
    }

    /// Move the rectangle by a signed offset.
    #[inline]
    #[must_use]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn from_edges(x: i32, y: i32, right: i32, bottom: i32) -> Self {
        let span = |from: i32, to: i32| (i64::from(to) - i64::from(from)).clamp(0, i64::from(u16::MAX)) as u16;
        Self::new(x, y, span(x, right), span(y, bottom))
    }
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rect({}, {} {}x{})", self.x, self.y, self.width, self.height)
    }
}
