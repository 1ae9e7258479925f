//! Per-row edit session: drives a [`SegmentModel`] from raw text-change
//! events and decides when the line must be re-segmented.
//!
//! The host owns one `SyntaxField` for the row currently being edited. Each
//! keystroke arrives as a [`TextChange`] against one editable segment; the
//! field splices the change into the stored text and reports back what the
//! presentation must rebuild.

use std::ops::Range;

use super::pattern::PatternSet;
use super::segment::SegmentModel;

/// What kind of edit a [`TextChange`] represents.
///
/// `Backspace` means the deletion gesture crossed the segment's boundary
/// (e.g. backspacing at offset 0 into a preceding token) and forces a full
/// re-segmentation. Hosts that can distinguish gestures should set this
/// explicitly; [`ChangeKind::infer`] keeps the legacy range-based inference
/// for those that cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Typing,
    Backspace,
}

impl ChangeKind {
    /// Legacy heuristic: an empty replacement spanning more than one
    /// character is treated as a backspace across a boundary.
    pub fn infer(range: &Range<usize>, replacement: &str) -> Self {
        if replacement.is_empty() && range.len() > 1 {
            ChangeKind::Backspace
        } else {
            ChangeKind::Typing
        }
    }
}

/// A raw text-change event against one editable segment.
///
/// `range` is in characters, relative to the segment's current text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChange {
    pub range: Range<usize>,
    pub replacement: String,
    pub kind: ChangeKind,
}

impl TextChange {
    pub fn typing(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
            kind: ChangeKind::Typing,
        }
    }

    pub fn backspace(range: Range<usize>) -> Self {
        Self {
            range,
            replacement: String::new(),
            kind: ChangeKind::Backspace,
        }
    }
}

/// What the presentation must do after a change was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEffect {
    /// Only the edited segment's stored text changed; nothing to rebuild.
    TextUpdated,
    /// The line was re-segmented. Rebuild widgets for segment indices
    /// `rebuild_from..` and, if `caret` is set, move editing focus to that
    /// segment with the caret at offset 0.
    Reparsed {
        rebuild_from: usize,
        caret: Option<usize>,
    },
    /// The change addressed a token or an invalid index; nothing happened.
    Ignored,
}

/// Edit session for a single row.
#[derive(Debug)]
pub struct SyntaxField<V> {
    model: SegmentModel<V>,
}

impl<V> SyntaxField<V> {
    pub fn new(patterns: PatternSet<V>) -> Self {
        Self {
            model: SegmentModel::new(patterns),
        }
    }

    /// Start a session from the row's raw text.
    pub fn set_line(&mut self, text: &str) {
        self.model.parse(text);
    }

    pub fn model(&self) -> &SegmentModel<V> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut SegmentModel<V> {
        &mut self.model
    }

    /// Reconstructed row text (legacy trailing-space serialization).
    pub fn line(&self) -> String {
        self.model.text()
    }

    /// Apply a text change to the editable segment at `index`.
    pub fn apply_change(&mut self, index: usize, change: &TextChange) -> FieldEffect {
        let Some(previous) = self.model.get_text(index) else {
            tracing::debug!(index, "change addressed a token or invalid index");
            return FieldEffect::Ignored;
        };

        let updated = splice(previous, &change.range, &change.replacement);
        self.model.set_text(&updated, index);

        match change.kind {
            ChangeKind::Backspace => {
                // The deletion may have swallowed a token boundary; rebuild
                // the whole line from the leading-trimmed reconstruction.
                let text = self.model.text().trim_start().to_string();
                self.model.reparse(&text, 0);
                let caret = self.editable_at_or_after(index.min(self.model.len() - 1));
                FieldEffect::Reparsed {
                    rebuild_from: 0,
                    caret,
                }
            }
            ChangeKind::Typing => {
                let inserted_whitespace = change.replacement.contains(char::is_whitespace);
                if inserted_whitespace && self.model.matches_any(&updated) {
                    let text = self.model.text();
                    let range = self.model.reparse(&text, index);
                    // Caret jumps past the newly recognized token, start of
                    // the following editable run.
                    let caret = self
                        .editable_strictly_after(index)
                        .or_else(|| self.editable_at_or_after(index));
                    FieldEffect::Reparsed {
                        rebuild_from: range.start,
                        caret,
                    }
                } else {
                    FieldEffect::TextUpdated
                }
            }
        }
    }

    fn editable_at_or_after(&self, from: usize) -> Option<usize> {
        (from..self.model.len()).find(|&i| self.model.get_text(i).is_some())
    }

    fn editable_strictly_after(&self, index: usize) -> Option<usize> {
        self.editable_at_or_after(index.saturating_add(1))
    }
}

/// Splice `replacement` into `text` over a character range. Out-of-bounds
/// ranges clamp to the text length.
fn splice(text: &str, range: &Range<usize>, replacement: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let start = range.start.min(chars.len());
    let end = range.end.clamp(start, chars.len());

    let mut out: String = chars[..start].iter().collect();
    out.push_str(replacement);
    out.extend(&chars[end..]);
    out
}
