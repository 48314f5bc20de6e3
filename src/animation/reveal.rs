//! Reveal animation: retargetable interpolation between variant snapshots.

use super::easing::Transition;
use super::variant::{AnimationVariant, StyleSnapshot};
use std::time::Instant;

/// Tracks the style of one revealed element over time.
///
/// When the reveal flag flips mid-flight the animation restarts from the
/// style currently shown, so reversals never jump.
#[derive(Debug, Clone)]
pub struct RevealAnimation {
    variant: AnimationVariant,
    transition: Transition,
    visible: bool,
    from: StyleSnapshot,
    started: Option<Instant>,
}

impl RevealAnimation {
    /// Start at rest on the variant's initial snapshot.
    pub fn new(variant: AnimationVariant, transition: Transition) -> Self {
        Self {
            variant,
            transition,
            visible: false,
            from: variant.initial(),
            started: None,
        }
    }

    /// Preset in use.
    pub const fn variant(&self) -> AnimationVariant {
        self.variant
    }

    /// Timing in use.
    pub const fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Last reveal flag seen.
    pub const fn target_visible(&self) -> bool {
        self.visible
    }

    /// Feed the current reveal flag; starts a transition when it changed.
    ///
    /// Returns `true` if a new transition started.
    pub fn sync(&mut self, visible: bool, now: Instant) -> bool {
        if visible == self.visible {
            return false;
        }
        self.from = self.style_at(now);
        self.visible = visible;
        self.started = Some(now);
        true
    }

    /// Interpolated style at `now`.
    pub fn style_at(&self, now: Instant) -> StyleSnapshot {
        let to = self.variant.snapshot(self.visible);
        match self.started {
            None => to,
            Some(start) => {
                let t = self.transition.progress(now.saturating_duration_since(start));
                self.from.lerp(&to, t)
            }
        }
    }

    /// Whether the style has stopped changing.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.started
            .is_none_or(|start| self.transition.is_finished(now.saturating_duration_since(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rest_before_reveal() {
        let anim = RevealAnimation::new(AnimationVariant::FadeUp, Transition::default());
        let now = Instant::now();
        assert_eq!(anim.style_at(now), AnimationVariant::FadeUp.initial());
        assert!(anim.is_settled(now));
    }

    #[test]
    fn test_reveal_reaches_visible() {
        let mut anim = RevealAnimation::new(AnimationVariant::Blur, Transition::default());
        let start = Instant::now();
        assert!(anim.sync(true, start));
        assert!(!anim.sync(true, start));

        let mid = anim.style_at(start + Duration::from_millis(150));
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(!anim.is_settled(start + Duration::from_millis(150)));

        let end = start + Duration::from_millis(600);
        assert_eq!(anim.style_at(end).opacity, 1.0);
        assert!(anim.is_settled(end));
    }

    #[test]
    fn test_delay_holds_initial_style() {
        let transition = Transition::default().with_delay(Duration::from_millis(300));
        let mut anim = RevealAnimation::new(AnimationVariant::Scale, transition);
        let start = Instant::now();
        anim.sync(true, start);
        assert_eq!(anim.style_at(start + Duration::from_millis(200)).opacity, 0.0);
    }

    #[test]
    fn test_reversal_starts_from_current_style() {
        let mut anim = RevealAnimation::new(AnimationVariant::FadeUp, Transition::default());
        let start = Instant::now();
        anim.sync(true, start);
        let flip = start + Duration::from_millis(100);
        let shown = anim.style_at(flip);
        anim.sync(false, flip);
        assert_eq!(anim.style_at(flip), shown);
        assert_eq!(
            anim.style_at(flip + Duration::from_secs(1)).opacity,
            0.0
        );
    }
}
