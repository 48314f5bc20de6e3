//! Stagger: one reveal signal, increasing per-child delay.

use super::easing::Transition;
use crate::config::DEFAULT_STAGGER;
use std::time::Duration;

/// Delay schedule for a cascade of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stagger {
    /// Delay of the first child.
    pub base: Duration,
    /// Added per child index.
    pub step: Duration,
}

impl Default for Stagger {
    fn default() -> Self {
        Self {
            base: Duration::ZERO,
            step: DEFAULT_STAGGER,
        }
    }
}

impl Stagger {
    /// Cascade with the given step and no base delay.
    pub const fn new(step: Duration) -> Self {
        Self {
            base: Duration::ZERO,
            step,
        }
    }

    /// Delay for child `index`: `base + index * step`.
    pub fn delay_for(&self, index: usize) -> Duration {
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        self.base.saturating_add(self.step.saturating_mul(index))
    }

    /// Transitions for `count` children, each delayed by its position.
    pub fn transitions(&self, template: Transition, count: usize) -> Vec<Transition> {
        (0..count)
            .map(|i| template.with_delay(self.delay_for(i)))
            .collect()
    }
}
