//! Section stack: pre-computed vertical placement of page sections.

use super::rect::Rect;

/// Unique identifier for a page section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SectionId(pub u16);

/// A placed section.
#[derive(Clone, Copy, Debug)]
pub struct Slot {
    /// Section this slot belongs to.
    pub id: SectionId,
    /// Page-space position and size.
    pub rect: Rect,
}

/// Flat, top-to-bottom list of section slots.
///
/// Positions are recomputed only when a section is pushed or the page width
/// changes; rendering just reads `slots`.
#[derive(Clone, Debug)]
pub struct SectionStack {
    slots: Vec<Slot>,
    heights: Vec<u16>,
    width: u16,
    gap: u16,
}

impl SectionStack {
    /// Create an empty stack for a page of the given width.
    pub const fn new(width: u16, gap: u16) -> Self {
        Self {
            slots: Vec::new(),
            heights: Vec::new(),
            width,
            gap,
        }
    }

    /// Append a section below the previous one and return its rectangle.
    pub fn push(&mut self, id: SectionId, height: u16) -> Rect {
        let y = self.total_height() + if self.slots.is_empty() { 0 } else { i32::from(self.gap) };
        let rect = Rect::new(0, y, self.width, height);
        self.slots.push(Slot { id, rect });
        self.heights.push(height);
        rect
    }

    /// Get a slot by section ID.
    pub fn get(&self, id: SectionId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// All slots, top to bottom.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Height of the whole page in rows.
    pub fn total_height(&self) -> i32 {
        self.slots.last().map_or(0, |s| s.rect.bottom())
    }

    /// Page width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Recompute slot positions for a new page width.
    pub fn resize(&mut self, width: u16) {
        self.width = width;
        let ids: Vec<_> = self.slots.iter().map(|s| s.id).collect();
        let heights = std::mem::take(&mut self.heights);
        self.slots.clear();
        for (id, height) in ids.into_iter().zip(heights) {
            self.push(id, height);
        }
    }

    /// Replace the height of one section, shifting everything below it.
    pub fn set_height(&mut self, id: SectionId, height: u16) {
        if let Some(index) = self.slots.iter().position(|s| s.id == id) {
            self.heights[index] = height;
            self.resize(self.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_places_sections_with_gap() {
        let mut stack = SectionStack::new(80, 2);
        let a = stack.push(SectionId(0), 10);
        let b = stack.push(SectionId(1), 5);
        assert_eq!(a, Rect::new(0, 0, 80, 10));
        assert_eq!(b, Rect::new(0, 12, 80, 5));
        assert_eq!(stack.total_height(), 17);
    }

    #[test]
    fn test_stack_resize_keeps_order() {
        let mut stack = SectionStack::new(80, 1);
        stack.push(SectionId(7), 3);
        stack.push(SectionId(9), 4);
        stack.resize(40);
        assert_eq!(stack.get(SectionId(9)).unwrap().rect, Rect::new(0, 4, 40, 4));
    }

    #[test]
    fn test_stack_set_height_shifts_below() {
        let mut stack = SectionStack::new(80, 0);
        stack.push(SectionId(0), 3);
        stack.push(SectionId(1), 3);
        stack.set_height(SectionId(0), 6);
        assert_eq!(stack.get(SectionId(1)).unwrap().rect.y, 6);
    }
}
