//! Editor model - the complete state of a line-editing session.

pub mod line;
pub mod store;

pub use line::{LineItem, PlainLine};
pub use store::LineStore;

/// State of one editing session: the row store, the host's notion of the
/// currently focused row, and a revision counter bumped on every content
/// mutation (used to batch change notifications and detect staleness).
#[derive(Debug, Clone)]
pub struct EditorModel<T: LineItem> {
    pub lines: LineStore<T>,
    /// Row currently focused in the presentation, if any. Commands that take
    /// an implicit target (add-above, add-below, clone) operate on this.
    pub selected: Option<usize>,
    pub revision: u64,
}

impl<T: LineItem> Default for EditorModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LineItem> EditorModel<T> {
    pub fn new() -> Self {
        Self {
            lines: LineStore::new(),
            selected: None,
            revision: 0,
        }
    }

    pub fn from_lines(items: Vec<T>) -> Self {
        Self {
            lines: LineStore::from_items(items),
            selected: None,
            revision: 0,
        }
    }

    /// The selected position, dropped if it no longer addresses a row.
    pub fn valid_selection(&self) -> Option<usize> {
        self.selected.filter(|&p| self.lines.is_valid(p))
    }

    pub(crate) fn bump(&mut self) {
        self.revision += 1;
    }
}
