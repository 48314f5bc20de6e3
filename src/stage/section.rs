//! Section specs: caller-supplied page content and how it reveals.

use super::block::Block;
use crate::animation::{AnimationVariant, Stagger, Transition};
use crate::reveal::RevealOptions;
use std::time::Duration;

/// How a group of blocks enters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entrance {
    /// Always shown; not observed.
    Static,
    /// All blocks reveal together on one signal.
    Reveal(AnimationVariant),
    /// Blocks share one signal and reveal in turn.
    Cascade(AnimationVariant, Stagger),
}

/// Blocks stacked vertically under one entrance.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Content, top to bottom.
    pub blocks: Vec<Block>,
    /// Entrance animation.
    pub entrance: Entrance,
    /// Observation options.
    pub options: RevealOptions,
    /// Timing template; cascades add their stagger to its delay.
    pub transition: Transition,
    /// Empty rows between blocks.
    pub gap: u16,
}

impl Group {
    fn with_entrance(entrance: Entrance) -> Self {
        Self {
            blocks: Vec::new(),
            entrance,
            options: RevealOptions::default(),
            transition: Transition::default(),
            gap: 1,
        }
    }

    /// A group that is always shown.
    pub fn fixed() -> Self {
        Self::with_entrance(Entrance::Static)
    }

    /// A group revealed as one unit.
    pub fn reveal(variant: AnimationVariant) -> Self {
        Self::with_entrance(Entrance::Reveal(variant))
    }

    /// A group whose blocks reveal in turn.
    pub fn cascade(variant: AnimationVariant, stagger: Stagger) -> Self {
        Self::with_entrance(Entrance::Cascade(variant, stagger))
    }

    /// Append a block.
    #[must_use]
    pub fn block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Delay before the entrance starts.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.transition = self.transition.with_delay(delay);
        self
    }

    /// Observation options.
    #[must_use]
    pub const fn options(mut self, options: RevealOptions) -> Self {
        self.options = options;
        self
    }

    /// Rows between blocks.
    #[must_use]
    pub const fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Total height at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        let blocks: u16 = self.blocks.iter().map(|b| b.height(width)).sum();
        let gaps = u16::try_from(self.blocks.len().saturating_sub(1)).unwrap_or(u16::MAX);
        blocks.saturating_add(gaps.saturating_mul(self.gap))
    }
}

/// One page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    /// Anchor name, as used by nav links.
    pub anchor: String,
    /// Groups, top to bottom.
    pub groups: Vec<Group>,
    /// Empty rows above and below.
    pub padding: u16,
}

impl SectionSpec {
    /// An empty section.
    pub fn new(anchor: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            groups: Vec::new(),
            padding: 1,
        }
    }

    /// Append a group.
    #[must_use]
    pub fn group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Rows above and below the content.
    #[must_use]
    pub const fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    /// Total height at `width` columns.
    pub fn height(&self, width: u16) -> u16 {
        let groups: u16 = self.groups.iter().map(|g| g.height(width)).sum();
        let gaps = u16::try_from(self.groups.len().saturating_sub(1)).unwrap_or(u16::MAX);
        groups
            .saturating_add(gaps.saturating_mul(2))
            .saturating_add(self.padding.saturating_mul(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_height_counts_gaps() {
        let group = Group::fixed()
            .block(Block::Spacer(3))
            .block(Block::Spacer(2))
            .gap(1);
        assert_eq!(group.height(40), 6);
        assert_eq!(Group::fixed().height(40), 0);
    }

    #[test]
    fn test_section_height() {
        let section = SectionSpec::new("demo")
            .padding(2)
            .group(Group::fixed().block(Block::Spacer(4)))
            .group(Group::fixed().block(Block::Spacer(1)));
        assert_eq!(section.height(40), 4 + 1 + 2 + 4);
    }

    #[test]
    fn test_delay_applies_to_template() {
        let group = Group::reveal(AnimationVariant::Scale).delay(Duration::from_millis(300));
        assert_eq!(group.transition.delay, Duration::from_millis(300));
        assert_eq!(group.entrance, Entrance::Reveal(AnimationVariant::Scale));
    }
}
