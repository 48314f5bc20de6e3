//! Reveal trigger: the per-region visibility state machine.

use super::options::{RevealOptions, Threshold};
use crate::layout::{Insets, Rect};

/// One intersection measurement for a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    /// Fraction of the target inside the root, in `[0, 1]`.
    pub ratio: f32,
    /// Whether the target touches the root at all.
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    /// Entry for a target entirely outside the root.
    pub const OUTSIDE: Self = Self {
        ratio: 0.0,
        is_intersecting: false,
    };
}

/// Measure how much of `target` lies inside `root` grown by `margin`.
///
/// A zero-area target counts as fully intersecting when its origin lies
/// within the adjusted root.
///
/// Edges are widened to `i64`, so a margin of any size grows or collapses
/// the root without overflowing the cell grid.
pub fn intersection_entry(target: Rect, root: Rect, margin: Insets) -> IntersectionEntry {
    let left = i64::from(root.x) - i64::from(margin.left);
    let top = i64::from(root.y) - i64::from(margin.top);
    let right = i64::from(root.right()) + i64::from(margin.right);
    let bottom = i64::from(root.bottom()) + i64::from(margin.bottom);
    if right <= left || bottom <= top {
        return IntersectionEntry::OUTSIDE;
    }

    let (tx, ty) = (i64::from(target.x), i64::from(target.y));
    if target.is_empty() {
        let inside = (left..right).contains(&tx) && (top..bottom).contains(&ty);
        return IntersectionEntry {
            ratio: if inside { 1.0 } else { 0.0 },
            is_intersecting: inside,
        };
    }

    let cols = right.min(i64::from(target.right())) - left.max(tx);
    let rows = bottom.min(i64::from(target.bottom())) - top.max(ty);
    if cols <= 0 || rows <= 0 {
        return IntersectionEntry::OUTSIDE;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = (cols * rows) as f32 / target.area() as f32;
    IntersectionEntry {
        ratio,
        is_intersecting: true,
    }
}

/// Lifecycle of a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    /// Receiving intersection updates.
    Watching,
    /// Revealed with `trigger_once`; no further updates are accepted.
    Latched,
}

/// Visibility state machine for one observed region.
#[derive(Debug, Clone)]
pub struct RevealTrigger {
    threshold: Threshold,
    trigger_once: bool,
    visible: bool,
    state: TriggerState,
}

impl RevealTrigger {
    /// A hidden, watching trigger.
    pub const fn new(options: &RevealOptions) -> Self {
        Self {
            threshold: options.threshold,
            trigger_once: options.trigger_once,
            visible: false,
            state: TriggerState::Watching,
        }
    }

    /// Current visibility.
    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current lifecycle state.
    #[inline]
    pub const fn state(&self) -> TriggerState {
        self.state
    }

    /// Whether the trigger still wants intersection updates.
    #[inline]
    pub fn is_watching(&self) -> bool {
        self.state == TriggerState::Watching
    }

    /// Feed one measurement.
    ///
    /// Reveals once an intersecting target meets the threshold. A reversible
    /// trigger hides again only after the target stops intersecting; dipping
    /// below the threshold while still on screen keeps it visible.
    ///
    /// Returns `Some(visible)` when visibility changed, `None` otherwise.
    /// Latched triggers ignore every update.
    pub fn update(&mut self, entry: IntersectionEntry) -> Option<bool> {
        if self.state == TriggerState::Latched {
            return None;
        }
        let visible = if entry.is_intersecting && self.threshold.is_met_by(entry.ratio) {
            true
        } else if !entry.is_intersecting && !self.trigger_once {
            false
        } else {
            self.visible
        };
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        if visible && self.trigger_once {
            self.state = TriggerState::Latched;
        }
        Some(visible)
    }

    /// Reveal unconditionally, used when intersections cannot be measured.
    pub fn force_visible(&mut self) {
        self.visible = true;
        if self.trigger_once {
            self.state = TriggerState::Latched;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ratio: f32) -> IntersectionEntry {
        IntersectionEntry {
            ratio,
            is_intersecting: ratio > 0.0,
        }
    }

    fn options(threshold: f32, once: bool) -> RevealOptions {
        RevealOptions::default()
            .with_threshold(threshold)
            .unwrap()
            .trigger_once(once)
    }

    #[test]
    fn test_threshold_boundary() {
        let mut at = RevealTrigger::new(&options(0.5, true));
        assert_eq!(at.update(entry(0.5)), Some(true));

        let mut below = RevealTrigger::new(&options(0.5, true));
        assert_eq!(below.update(entry(0.49999)), None);
        assert!(!below.is_visible());
    }

    #[test]
    fn test_trigger_once_latches() {
        let mut trigger = RevealTrigger::new(&options(0.1, true));
        assert_eq!(trigger.update(entry(0.6)), Some(true));
        assert_eq!(trigger.state(), TriggerState::Latched);

        // Leaving the viewport no longer matters.
        assert_eq!(trigger.update(IntersectionEntry::OUTSIDE), None);
        assert_eq!(trigger.update(entry(0.0)), None);
        assert!(trigger.is_visible());
    }

    #[test]
    fn test_reversible_trigger_toggles() {
        let mut trigger = RevealTrigger::new(&options(0.25, false));
        assert_eq!(trigger.update(entry(0.3)), Some(true));
        assert_eq!(trigger.update(entry(0.9)), None);
        assert_eq!(trigger.update(IntersectionEntry::OUTSIDE), Some(false));
        assert_eq!(trigger.update(IntersectionEntry::OUTSIDE), None);
        assert_eq!(trigger.update(entry(0.5)), Some(true));
        assert!(trigger.is_watching());
    }

    #[test]
    fn test_reversible_trigger_stays_visible_while_intersecting() {
        let mut trigger = RevealTrigger::new(&options(0.25, false));
        assert_eq!(trigger.update(entry(0.3)), Some(true));
        assert_eq!(trigger.update(entry(0.1)), None);
        assert_eq!(trigger.update(entry(0.01)), None);
        assert!(trigger.is_visible());

        // Below the threshold from a hidden start is still hidden.
        let mut hidden = RevealTrigger::new(&options(0.25, false));
        assert_eq!(hidden.update(entry(0.1)), None);
        assert!(!hidden.is_visible());
    }

    #[test]
    fn test_zero_threshold_requires_intersection() {
        let mut trigger = RevealTrigger::new(&options(0.0, false));
        assert_eq!(trigger.update(IntersectionEntry::OUTSIDE), None);
        assert_eq!(trigger.update(entry(0.01)), Some(true));
    }

    #[test]
    fn test_force_visible_fails_open() {
        let mut trigger = RevealTrigger::new(&options(1.0, true));
        trigger.force_visible();
        assert!(trigger.is_visible());
        assert!(!trigger.is_watching());
    }

    #[test]
    fn test_intersection_entry_ratio() {
        let root = Rect::from_size(80, 20);
        let half = intersection_entry(Rect::new(0, 15, 80, 10), root, Insets::ZERO);
        assert!(half.is_intersecting);
        assert!((half.ratio - 0.5).abs() < f32::EPSILON);

        let below = intersection_entry(Rect::new(0, 30, 80, 10), root, Insets::ZERO);
        assert_eq!(below, IntersectionEntry::OUTSIDE);
    }

    #[test]
    fn test_intersection_entry_margin() {
        let root = Rect::from_size(80, 20);
        let target = Rect::new(0, 22, 80, 4);
        assert!(!intersection_entry(target, root, Insets::ZERO).is_intersecting);

        let grown = Insets { bottom: 4, ..Insets::ZERO };
        let hit = intersection_entry(target, root, grown);
        assert!((hit.ratio - 0.5).abs() < f32::EPSILON);

        let shrunk = Insets { bottom: -10, ..Insets::ZERO };
        let miss = intersection_entry(Rect::new(0, 12, 80, 4), root, shrunk);
        assert!(!miss.is_intersecting);
    }

    #[test]
    fn test_intersection_entry_extreme_margins() {
        let root = Rect::from_size(80, 20);
        let target = Rect::new(0, 40, 80, 10);

        let everything = intersection_entry(target, root, Insets::uniform(i32::MAX));
        assert!(everything.is_intersecting);
        assert!((everything.ratio - 1.0).abs() < f32::EPSILON);

        let nothing = intersection_entry(Rect::new(0, 5, 80, 10), root, Insets::uniform(i32::MIN));
        assert_eq!(nothing, IntersectionEntry::OUTSIDE);
    }

    #[test]
    fn test_intersection_entry_zero_area_target() {
        let root = Rect::from_size(10, 10);
        assert!(intersection_entry(Rect::new(3, 3, 0, 0), root, Insets::ZERO).is_intersecting);
        assert!(!intersection_entry(Rect::new(30, 3, 0, 0), root, Insets::ZERO).is_intersecting);
    }
}
