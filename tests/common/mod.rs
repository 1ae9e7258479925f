//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use linekit::model::{EditorModel, LineItem, PlainLine};
use linekit::syntax::{Pattern, PatternSet};
use linekit::{FocusTarget, Presenter, Session};

/// Records every presentation callback, in call order, and can be told to
/// refuse focus a number of times (simulating rows that are not laid out yet).
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub focus_failures_left: u32,
    pub focus_attempts: Vec<usize>,
    pub revealed: Vec<usize>,
    pub inserted: Vec<Range<usize>>,
    pub removed: Vec<usize>,
    pub refreshed_from: Vec<usize>,
    /// Interleaved call log, for asserting sequencing.
    pub call_log: Vec<String>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing_focus(failures: u32) -> Self {
        Self {
            focus_failures_left: failures,
            ..Self::default()
        }
    }
}

impl FocusTarget for RecordingPresenter {
    fn try_focus(&mut self, position: usize) -> bool {
        self.focus_attempts.push(position);
        self.call_log.push(format!("focus({position})"));
        if self.focus_failures_left > 0 {
            self.focus_failures_left -= 1;
            false
        } else {
            true
        }
    }

    fn reveal(&mut self, position: usize) {
        self.revealed.push(position);
        self.call_log.push(format!("reveal({position})"));
    }
}

impl Presenter for RecordingPresenter {
    fn rows_inserted(&mut self, range: Range<usize>) {
        self.call_log
            .push(format!("insert({}..{})", range.start, range.end));
        self.inserted.push(range);
    }

    fn row_removed(&mut self, position: usize) {
        self.removed.push(position);
        self.call_log.push(format!("remove({position})"));
    }

    fn refresh_rows_from(&mut self, position: usize) {
        self.refreshed_from.push(position);
        self.call_log.push(format!("refresh({position})"));
    }
}

/// Session over a plain-string store with the given initial rows.
pub fn test_session(lines: &[&str]) -> Session<PlainLine> {
    let items = lines.iter().map(|s| PlainLine::from(*s)).collect();
    Session::new(EditorModel::from_lines(items))
}

pub fn store_to_vec(session: &Session<PlainLine>) -> Vec<String> {
    session.lines().iter().map(LineItem::raw_value).collect()
}

/// The `participant` keyword, case-insensitive, recognized only at word 0.
pub fn participant_patterns() -> PatternSet<()> {
    PatternSet::from_patterns(vec![Pattern::with_skip(
        r"(?i)^participant\b",
        || (),
        |index, _| index > 0,
    )
    .expect("pattern compiles")])
}
