//! Page: the scrollable landing page and its reveal bookkeeping.
//!
//! The page lays its sections out in page space, registers one observation
//! per revealing group and moves the observer's root as the visitor
//! scrolls. Each frame it samples the reveal animations and paints the
//! visible blocks through their [`Projection`].

use super::block::{Block, Ink};
use super::paint::Projection;
use super::section::{Entrance, Group, SectionSpec};
use crate::animation::{RevealAnimation, StyleSnapshot};
use crate::canvas::Canvas;
use crate::config::CellMetrics;
use crate::layout::{Insets, Rect, SectionId, SectionStack};
use crate::reveal::{Observer, RevealHandle};
use crate::view::{Palette, View};
use std::time::Instant;
use tracing::{debug, trace};

/// Widest the content column gets.
const MAX_CONTENT_WIDTH: u16 = 88;
/// Rows between sections.
const SECTION_GAP: u16 = 2;

/// A group placed on the page.
struct Mounted {
    section: usize,
    group: usize,
    /// Page-space rectangle of each block.
    blocks: Vec<Rect>,
    /// Page-space rectangle of the whole group.
    rect: Rect,
    /// `None` for static groups.
    handle: Option<RevealHandle>,
    /// One per block for cascades, otherwise one for the group.
    animations: Vec<RevealAnimation>,
}

impl Mounted {
    fn is_visible(&self) -> bool {
        self.handle.as_ref().is_none_or(RevealHandle::is_visible)
    }

    fn style(&self, block: usize, now: Instant) -> StyleSnapshot {
        match self.animations.as_slice() {
            [] => StyleSnapshot::REST,
            [single] => single.style_at(now),
            many => many
                .get(block)
                .map_or(StyleSnapshot::REST, |a| a.style_at(now)),
        }
    }
}

/// The landing page.
pub struct Page {
    sections: Vec<SectionSpec>,
    stack: SectionStack,
    mounted: Vec<Mounted>,
    observer: Observer,
    metrics: CellMetrics,
    palette: Palette,
    /// Screen region the page is drawn into.
    viewport: Rect,
    /// First page row shown at the top of the viewport.
    scroll: i32,
    now: Instant,
    pointer: Option<(i32, i32)>,
    dirty: bool,
}

impl Page {
    /// Create a page; nothing is laid out until [`View::set_bounds`].
    pub fn new(
        sections: Vec<SectionSpec>,
        observer: Observer,
        metrics: CellMetrics,
        palette: Palette,
    ) -> Self {
        Self {
            sections,
            stack: SectionStack::new(0, SECTION_GAP),
            mounted: Vec::new(),
            observer,
            metrics,
            palette,
            viewport: Rect::ZERO,
            scroll: 0,
            now: Instant::now(),
            pointer: None,
            dirty: true,
        }
    }

    /// Width of the content column for the current viewport.
    fn content_width(&self) -> u16 {
        self.viewport.width.saturating_sub(4).min(MAX_CONTENT_WIDTH)
    }

    /// The viewport in page coordinates; the observer's root.
    pub const fn root(&self) -> Rect {
        Rect::new(0, self.scroll, self.viewport.width, self.viewport.height)
    }

    /// Recompute every rectangle; observe groups on the first call.
    ///
    /// Returns the number of visibility crossings the new geometry caused.
    fn layout(&mut self) -> usize {
        let width = self.content_width();
        let margin = i32::from(self.viewport.width.saturating_sub(width) / 2);

        self.stack = SectionStack::new(self.viewport.width, SECTION_GAP);
        let mut placed = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            let id = SectionId(u16::try_from(index).unwrap_or(u16::MAX));
            let slot = self.stack.push(id, section.height(width));

            let mut y = slot.y + i32::from(section.padding);
            for (group_index, group) in section.groups.iter().enumerate() {
                let top = y;
                let mut blocks = Vec::with_capacity(group.blocks.len());
                for block in &group.blocks {
                    let h = block.height(width);
                    blocks.push(Rect::new(margin, y, width, h));
                    y += i32::from(h) + i32::from(group.gap);
                }
                let height = group.height(width);
                placed.push(Mounted {
                    section: index,
                    group: group_index,
                    blocks,
                    rect: Rect::new(margin, top, width, height),
                    handle: None,
                    animations: Vec::new(),
                });
                y = top + i32::from(height) + 2;
            }
        }

        let mut crossings = 0;
        if self.mounted.is_empty() {
            // Measure against the viewport before anything is observed
            self.observer.set_root(self.root());
            for mut mounted in placed {
                let group = &self.sections[mounted.section].groups[mounted.group];
                match group.entrance {
                    Entrance::Static => {}
                    Entrance::Reveal(variant) => {
                        mounted.handle = Some(self.observer.observe(mounted.rect, &group.options));
                        mounted.animations = vec![RevealAnimation::new(variant, group.transition)];
                    }
                    Entrance::Cascade(variant, stagger) => {
                        mounted.handle = Some(self.observer.observe(mounted.rect, &group.options));
                        mounted.animations = stagger
                            .transitions(group.transition, mounted.blocks.len())
                            .into_iter()
                            .map(|t| RevealAnimation::new(variant, t))
                            .collect();
                    }
                }
                self.mounted.push(mounted);
            }
            debug!(
                groups = self.mounted.len(),
                watched = self.observer.watched(),
                height = self.stack.total_height(),
                "page mounted"
            );
        } else {
            for (mounted, fresh) in self.mounted.iter_mut().zip(placed) {
                mounted.rect = fresh.rect;
                mounted.blocks = fresh.blocks;
                if let Some(handle) = &mounted.handle {
                    crossings += usize::from(self.observer.retarget(handle, fresh.rect).is_some());
                }
            }
        }

        self.scroll = self.scroll.clamp(0, self.max_scroll());
        crossings += self.observer.set_root(self.root()).len();
        trace!(height = self.stack.total_height(), crossings, "page laid out");
        self.dirty = true;
        crossings
    }

    /// Total page height in rows.
    pub fn height(&self) -> i32 {
        self.stack.total_height()
    }

    /// Largest scroll offset.
    pub fn max_scroll(&self) -> i32 {
        (self.height() - i32::from(self.viewport.height)).max(0)
    }

    /// Current scroll offset.
    pub const fn scroll(&self) -> i32 {
        self.scroll
    }

    /// Scroll progress in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f32 {
        let max = self.max_scroll();
        if max == 0 {
            1.0
        } else {
            self.scroll as f32 / max as f32
        }
    }

    /// Scroll to an absolute row. Returns `true` if the offset changed.
    pub fn scroll_to(&mut self, row: i32) -> bool {
        let row = row.clamp(0, self.max_scroll());
        if row == self.scroll {
            return false;
        }
        self.scroll = row;
        let crossings = self.observer.set_root(self.root());
        trace!(scroll = row, crossings = crossings.len(), "page scrolled");
        self.dirty = true;
        true
    }

    /// Scroll by a signed number of rows.
    pub fn scroll_by(&mut self, rows: i32) -> bool {
        self.scroll_to(self.scroll.saturating_add(rows))
    }

    /// Scroll by whole viewports, keeping one row of overlap.
    pub fn scroll_page(&mut self, pages: i32) -> bool {
        let step = i32::from(self.viewport.height.saturating_sub(1)).max(1);
        self.scroll_by(pages.saturating_mul(step))
    }

    /// Jump to the top of the page.
    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    /// Jump to the bottom of the page.
    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(i32::MAX)
    }

    /// Scroll so the named section sits at the top.
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.anchor == anchor) else {
            return false;
        };
        let id = SectionId(u16::try_from(index).unwrap_or(u16::MAX));
        let Some(top) = self.stack.get(id).map(|slot| slot.rect.y) else {
            return false;
        };
        self.scroll_to(top)
    }

    /// Whether every revealing group of a section has been revealed.
    pub fn is_revealed(&self, anchor: &str) -> bool {
        let Some(index) = self.sections.iter().position(|s| s.anchor == anchor) else {
            return false;
        };
        self.mounted
            .iter()
            .filter(|m| m.section == index)
            .all(Mounted::is_visible)
    }

    /// Advance animations to `now`. Returns `true` while anything moves.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.now = now;
        let mut moving = false;
        for mounted in &mut self.mounted {
            let visible = mounted.is_visible();
            for animation in &mut mounted.animations {
                animation.sync(visible, now);
                moving |= !animation.is_settled(now);
            }
        }
        if moving {
            self.dirty = true;
        }
        moving
    }

    /// Screen rectangle reserved for the chat panel, if the page has one.
    pub fn chat_rect(&self) -> Option<Rect> {
        self.find_block(Block::is_chat).map(|r| self.to_screen(r))
    }

    /// Track the pointer (screen cells). Returns `true` if hover changed.
    pub fn set_pointer(&mut self, pointer: Option<(u16, u16)>) -> bool {
        let was = self.is_hovering();
        self.pointer = pointer.map(|(x, y)| (i32::from(x), i32::from(y)));
        let now = self.is_hovering();
        if was != now {
            self.dirty = true;
        }
        was != now
    }

    /// Whether the pointer is over the hero crescent.
    pub fn is_hovering(&self) -> bool {
        let Some((x, y)) = self.pointer else {
            return false;
        };
        self.find_block(Block::is_moon)
            .map(|r| self.to_screen(r))
            .is_some_and(|r| r.contains(x, y))
    }

    fn find_block(&self, pred: impl Fn(&Block) -> bool) -> Option<Rect> {
        self.mounted.iter().find_map(|m| {
            self.group_of(m)?
                .blocks
                .iter()
                .zip(&m.blocks)
                .find(|(block, _)| pred(*block))
                .map(|(_, rect)| *rect)
        })
    }

    fn group_of(&self, mounted: &Mounted) -> Option<&Group> {
        self.sections.get(mounted.section)?.groups.get(mounted.group)
    }

    const fn to_screen(&self, rect: Rect) -> Rect {
        rect.translate(self.viewport.x, self.viewport.y - self.scroll)
    }
}

impl View for Page {
    fn bounds(&self) -> Rect {
        self.viewport
    }

    fn set_bounds(&mut self, bounds: Rect) {
        let relayout = bounds.width != self.viewport.width || self.mounted.is_empty();
        self.viewport = bounds;
        if relayout {
            self.layout();
        } else {
            self.scroll = self.scroll.clamp(0, self.max_scroll());
            self.observer.set_root(self.root());
        }
        self.dirty = true;
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.fill(self.viewport, self.palette.background);
        let root = self.root();
        let hover = self.is_hovering();

        for mounted in &self.mounted {
            // Translations never exceed a few cells; pad the cull test
            if !mounted.rect.outset(Insets::uniform(4)).intersects(&root) {
                continue;
            }
            let Some(group) = self.group_of(mounted) else {
                continue;
            };
            for (index, (block, rect)) in group.blocks.iter().zip(&mounted.blocks).enumerate() {
                let style = mounted.style(index, self.now);
                let projection = Projection::resolve(&style, rect.width, self.metrics);
                if !projection.is_visible() {
                    continue;
                }
                let indent = u16::try_from(projection.indent).unwrap_or(0);
                let screen = self.to_screen(*rect).translate(
                    projection.dx + projection.indent,
                    projection.dy,
                );
                let screen = Rect::new(
                    screen.x,
                    screen.y,
                    rect.width.saturating_sub(indent.saturating_mul(2)),
                    rect.height,
                );
                let mut ink = Ink {
                    canvas: &mut *canvas,
                    clip: self.viewport,
                    projection,
                    palette: self.palette,
                    hover: hover && block.is_moon(),
                    rows: rect.height,
                };
                block.paint(&mut ink, screen);
            }
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("sections", &self.sections.len())
            .field("viewport", &self.viewport)
            .field("scroll", &self.scroll)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationVariant, Stagger};
    use crate::reveal::RevealOptions;
    use std::time::Duration;

    const VIEWPORT: Rect = Rect::new(0, 1, 60, 10);

    // hero: rows 0..8, features: 10..16 (group 11..15), cta: 18..28
    fn sections(features: RevealOptions) -> Vec<SectionSpec> {
        vec![
            SectionSpec::new("hero").group(Group::fixed().block(Block::Spacer(6))),
            SectionSpec::new("features").group(
                Group::reveal(AnimationVariant::FadeUp)
                    .options(features)
                    .block(Block::Spacer(4)),
            ),
            SectionSpec::new("cta").group(
                Group::cascade(AnimationVariant::Scale, Stagger::new(Duration::from_millis(100)))
                    .block(Block::Spacer(2))
                    .block(Block::Spacer(2))
                    .block(Block::Spacer(2)),
            ),
        ]
    }

    fn page_with(sections: Vec<SectionSpec>, observer: Observer) -> Page {
        let mut page = Page::new(sections, observer, CellMetrics::default(), Palette::default());
        page.set_bounds(VIEWPORT);
        page
    }

    fn page() -> Page {
        page_with(sections(RevealOptions::default()), Observer::new(CellMetrics::default()))
    }

    #[test]
    fn test_layout_stacks_sections() {
        let page = page();
        assert_eq!(page.height(), 28);
        assert_eq!(page.max_scroll(), 18);
        assert_eq!(page.mounted[1].rect, Rect::new(2, 11, 56, 4));
        let cta: Vec<i32> = page.mounted[2].blocks.iter().map(|r| r.y).collect();
        assert_eq!(cta, vec![19, 22, 25]);
    }

    #[test]
    fn test_static_groups_start_revealed() {
        let page = page();
        assert!(page.is_revealed("hero"));
        assert!(!page.is_revealed("features"));
        assert!(!page.is_revealed("missing"));
    }

    #[test]
    fn test_scroll_reveals_and_latches() {
        let mut page = page();
        assert!(page.scroll_by(5));
        assert!(page.is_revealed("features"));

        assert!(page.scroll_to_top());
        assert!(page.is_revealed("features"));
    }

    #[test]
    fn test_scroll_away_hides_without_latch() {
        let options = RevealOptions::default().trigger_once(false);
        let mut page = page_with(sections(options), Observer::new(CellMetrics::default()));
        page.scroll_by(5);
        assert!(page.is_revealed("features"));
        page.scroll_to_bottom();
        assert!(!page.is_revealed("features"));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut page = page();
        assert!(!page.scroll_by(-3));
        assert!(page.scroll_to_bottom());
        assert_eq!(page.scroll(), 18);
        assert!((page.progress() - 1.0).abs() < f32::EPSILON);
        assert!(!page.scroll_by(1));
        page.scroll_page(-1);
        assert_eq!(page.scroll(), 9);
    }

    #[test]
    fn test_scroll_to_anchor() {
        let mut page = page();
        assert!(page.scroll_to_anchor("features"));
        assert_eq!(page.scroll(), 10);
        assert!(!page.scroll_to_anchor("nowhere"));
    }

    #[test]
    fn test_cascade_delays_children() {
        let mut page = page();
        page.scroll_to_bottom();
        let t0 = Instant::now();
        assert!(page.tick(t0));

        let later = t0 + Duration::from_millis(150);
        let cascade = &page.mounted[2];
        assert!(cascade.style(0, later).opacity > 0.0);
        assert!(cascade.style(2, later).opacity.abs() < f32::EPSILON);

        let done = t0 + Duration::from_secs(2);
        assert!(!page.tick(done));
        let last = page.mounted[2].style(2, done);
        assert!((last.opacity - 1.0).abs() < f32::EPSILON);
        assert!((last.scale - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unsupported_observer_reveals_everything() {
        let page = page_with(sections(RevealOptions::default()), Observer::unsupported());
        assert!(page.is_revealed("features"));
        assert!(page.is_revealed("cta"));
    }

    #[test]
    fn test_pointer_hover_over_moon() {
        let hero = SectionSpec::new("hero").group(Group::fixed().block(Block::Moon));
        let mut page = page_with(vec![hero], Observer::new(CellMetrics::default()));
        // Moon sits at page row 1, screen row 2
        assert!(page.set_pointer(Some((30, 4))));
        assert!(page.is_hovering());
        assert!(!page.set_pointer(Some((31, 4))));
        assert!(page.set_pointer(None));
        assert!(!page.is_hovering());
    }

    #[test]
    fn test_chat_rect_in_screen_space() {
        let demo = SectionSpec::new("demo").group(Group::fixed().block(Block::Chat { rows: 6 }));
        let mut page = page_with(vec![demo], Observer::new(CellMetrics::default()));
        assert_eq!(page.chat_rect(), Some(Rect::new(2, 2, 56, 6)));
        page.set_bounds(Rect::new(0, 1, 60, 4));
        page.scroll_by(2);
        assert_eq!(page.chat_rect(), Some(Rect::new(2, 0, 56, 6)));
    }

    #[test]
    fn test_render_skips_hidden_groups() {
        let sections = vec![
            SectionSpec::new("hero").group(Group::fixed().block(Block::heading("Meet Luna"))),
            SectionSpec::new("later")
                .padding(20)
                .group(Group::reveal(AnimationVariant::FadeUp).block(Block::heading("Hidden"))),
        ];
        let page = page_with(sections, Observer::new(CellMetrics::default()));
        let mut canvas = Canvas::new(60, 11);
        page.render(&mut canvas);
        assert!(canvas.row_text(2).contains("Meet Luna"));
        assert!((0..11).all(|y| !canvas.row_text(y).contains("Hidden")));
    }

    #[test]
    fn test_relayout_hides_group_pushed_out_of_view() {
        let options = RevealOptions::default().trigger_once(false);
        let mut sections = sections(options);
        sections[0] = SectionSpec::new("hero")
            .group(Group::fixed().block(Block::text("moon ".repeat(20).trim_end().to_string())));
        let mut page = page_with(sections, Observer::new(CellMetrics::default()));
        assert!(page.is_revealed("features"));

        // Narrow columns rewrap the hero and push the features below the fold
        page.viewport = Rect::new(0, 1, 20, 10);
        assert_eq!(page.layout(), 1);
        assert!(!page.is_revealed("features"));
        assert_eq!(page.layout(), 0);
    }

    #[test]
    fn test_resize_keeps_observations() {
        let mut page = page();
        let watched = page.observer.watched();
        page.set_bounds(Rect::new(0, 1, 40, 10));
        assert_eq!(page.observer.watched(), watched);
        assert_eq!(page.mounted[1].rect.width, 36);
    }
}
