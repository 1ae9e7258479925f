//! Input messages for the line edit engine.
//!
//! The presentation layer translates its gestures (toolbar taps, return key,
//! paste, drag-reorder) into these messages and feeds them to
//! [`update`](crate::update::update) or [`Session::dispatch`](crate::Session).

/// A custom-keyboard symbol: a value spliced into the focused row, plus
/// optional extra rows appended below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub value: String,
    pub additional_values: Vec<String>,
}

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            additional_values: Vec::new(),
        }
    }

    pub fn with_additional(value: impl Into<String>, additional: Vec<String>) -> Self {
        Self {
            value: value.into(),
            additional_values: additional,
        }
    }
}

/// Row-level mutation messages.
///
/// All positions refer to the store state at the time the message is built;
/// invalid positions degrade to no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMsg {
    /// Insert a new empty row at `position`, shifting that row and everything
    /// below it down by one.
    InsertAbove { position: usize },
    /// Insert a new empty row after `position` (append when `position` is the
    /// last row, or when the store is empty).
    InsertBelow { position: usize },
    /// Remove the row at `position`.
    Delete { position: usize },
    /// Reorder rows: swap `from` and `to`, or rotate `from` to the end when
    /// `to` is the last index.
    Move { from: usize, to: usize },
    /// Duplicate the row at `position`, inserting the copy below it.
    Clone { position: usize },
    /// Multi-line paste: `lines[0]` has already been merged into the row at
    /// `position` by the ordinary text-change path; `lines[1..]` become new
    /// rows inserted consecutively after it.
    PasteExpand {
        position: usize,
        lines: Vec<String>,
    },
    /// Per-keystroke replacement of a row's raw text.
    SetText { position: usize, text: String },
    /// The presentation focused a row.
    Select { position: usize },
    /// Return pressed on a row: behaves as `InsertBelow`.
    ReturnPressed { position: usize },
    /// Splice a keyboard symbol into the row at the caret (char offset) and
    /// append its additional values as rows below.
    InsertSymbol {
        position: usize,
        caret: usize,
        symbol: Symbol,
    },
}
