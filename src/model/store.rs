//! Ordered store of line items.
//!
//! Positions are zero-based row indices. Every accessor checks validity and
//! degrades to a no-op / `None` for out-of-range positions; index races
//! between input events and store mutations are expected in a live editor
//! and must never panic.

use super::line::LineItem;

#[derive(Debug, Clone)]
pub struct LineStore<T> {
    items: Vec<T>,
}

impl<T> Default for LineStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: LineItem> LineStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `0 <= position < len`
    pub fn is_valid(&self, position: usize) -> bool {
        position < self.items.len()
    }

    pub fn is_last(&self, position: usize) -> bool {
        !self.items.is_empty() && position == self.items.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    /// Raw string value of the row at `position`.
    pub fn raw(&self, position: usize) -> Option<String> {
        self.items.get(position).map(LineItem::raw_value)
    }

    /// Replace the item at `position`. Returns false (no-op) when invalid.
    pub fn replace(&mut self, position: usize, item: T) -> bool {
        match self.items.get_mut(position) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn insert(&mut self, position: usize, item: T) {
        let position = position.min(self.items.len());
        self.items.insert(position, item);
    }

    pub(crate) fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, position: usize) -> Option<T> {
        if self.is_valid(position) {
            Some(self.items.remove(position))
        } else {
            None
        }
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        if self.is_valid(a) && self.is_valid(b) {
            self.items.swap(a, b);
        }
    }
}
