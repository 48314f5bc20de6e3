//! Delay policy: how long each kind of turn takes to appear.

use super::state::WaitKind;
use crate::config::{AGENT_DELAY_MAX, AGENT_DELAY_MIN, USER_DELAY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Half-open delay range `[min, max)`. `min == max` is a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    /// Shortest delay.
    pub min: Duration,
    /// Upper bound, exclusive unless equal to `min`.
    pub max: Duration,
}

impl DelayRange {
    /// A range between two bounds.
    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// A fixed delay.
    pub const fn fixed(delay: Duration) -> Self {
        Self::new(delay, delay)
    }

    /// Whether this range always yields `min`.
    pub fn is_fixed(&self) -> bool {
        self.max <= self.min
    }

    /// Whether `delay` lies in the range.
    pub fn contains(&self, delay: Duration) -> bool {
        if self.is_fixed() {
            delay == self.min
        } else {
            delay >= self.min && delay < self.max
        }
    }
}

/// Delay ranges per wait kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTiming {
    /// Agent typing delay.
    pub agent: DelayRange,
    /// User composing delay.
    pub user: DelayRange,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            agent: DelayRange::new(AGENT_DELAY_MIN, AGENT_DELAY_MAX),
            user: DelayRange::fixed(USER_DELAY),
        }
    }
}

impl PlaybackTiming {
    /// Range for a wait kind.
    pub const fn range_for(&self, kind: WaitKind) -> DelayRange {
        match kind {
            WaitKind::Typing => self.agent,
            WaitKind::Composing => self.user,
        }
    }

    /// Every bound divided by `divisor`, keeping the proportions.
    #[must_use]
    pub fn scaled_down(self, divisor: u32) -> Self {
        let divisor = divisor.max(1);
        let scale = |r: DelayRange| DelayRange::new(r.min / divisor, r.max / divisor);
        Self {
            agent: scale(self.agent),
            user: scale(self.user),
        }
    }
}

/// Picks a concrete delay from a range.
pub trait DelaySource {
    /// Sample one delay.
    fn sample(&mut self, range: DelayRange) -> Duration;
}

/// Uniformly random delays.
#[derive(Debug, Clone)]
pub struct RandomDelay {
    rng: StdRng,
}

impl RandomDelay {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelaySource for RandomDelay {
    fn sample(&mut self, range: DelayRange) -> Duration {
        if range.is_fixed() {
            range.min
        } else {
            self.rng.gen_range(range.min..range.max)
        }
    }
}

/// Always the shortest delay of each range.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay;

impl DelaySource for FixedDelay {
    fn sample(&mut self, range: DelayRange) -> Duration {
        range.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = PlaybackTiming::default();
        assert_eq!(timing.range_for(WaitKind::Typing).min, Duration::from_millis(1500));
        assert_eq!(timing.range_for(WaitKind::Typing).max, Duration::from_millis(2500));
        assert!(timing.range_for(WaitKind::Composing).is_fixed());
        assert_eq!(timing.user.min, Duration::from_millis(2000));
    }

    #[test]
    fn test_random_delay_stays_in_range() {
        let timing = PlaybackTiming::default();
        let mut delays = RandomDelay::seeded(7);
        for _ in 0..500 {
            let agent = delays.sample(timing.agent);
            assert!(timing.agent.contains(agent), "{agent:?}");
            assert_eq!(delays.sample(timing.user), Duration::from_millis(2000));
        }
    }

    #[test]
    fn test_scaled_down_keeps_shape() {
        let timing = PlaybackTiming::default().scaled_down(100);
        assert_eq!(timing.agent, DelayRange::new(Duration::from_millis(15), Duration::from_millis(25)));
        assert_eq!(timing.user, DelayRange::fixed(Duration::from_millis(20)));
    }

    #[test]
    fn test_fixed_delay_uses_minimum() {
        let mut delays = FixedDelay;
        let range = DelayRange::new(Duration::from_millis(3), Duration::from_millis(9));
        assert_eq!(delays.sample(range), Duration::from_millis(3));
    }
}
