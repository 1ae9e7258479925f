//! Segment list for one line: parse, incremental reparse, and compaction.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

use super::pattern::{PatternSet, TokenFactory};

/// One atomic unit of a parsed line.
pub enum Segment<V> {
    /// A word recognized by a pattern. Immutable; never merged with neighbors.
    Token {
        text: String,
        factory: TokenFactory<V>,
    },
    /// A freely editable run of ordinary words.
    Editable { text: String },
}

impl<V> Segment<V> {
    pub fn text(&self) -> &str {
        match self {
            Segment::Token { text, .. } => text,
            Segment::Editable { text } => text,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Segment::Token { .. })
    }
}

impl<V> Clone for Segment<V> {
    fn clone(&self) -> Self {
        match self {
            Segment::Token { text, factory } => Segment::Token {
                text: text.clone(),
                factory: factory.clone(),
            },
            Segment::Editable { text } => Segment::Editable { text: text.clone() },
        }
    }
}

// The factory is an opaque closure; keep Debug output readable.
impl<V> fmt::Debug for Segment<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Token { text, .. } => f.debug_tuple("Token").field(text).finish(),
            Segment::Editable { text } => f.debug_tuple("Editable").field(text).finish(),
        }
    }
}

/// Internal invariant violation: the parser tried to append trailing text
/// onto a segment already classified as a token. Always recovered locally.
#[derive(Debug, Error)]
#[error("value '{0}' is a token")]
struct InvalidMerge(String);

/// Owns the ordered segment sequence for one line.
///
/// Invariants maintained after every completed mutation:
/// - tokens are atomic (never merged with neighbors),
/// - no two adjacent `Editable` segments,
/// - the sequence is never empty (an empty line is one empty `Editable`).
pub struct SegmentModel<V> {
    segments: Vec<Segment<V>>,
    patterns: PatternSet<V>,
}

impl<V> SegmentModel<V> {
    pub fn new(patterns: PatternSet<V>) -> Self {
        Self {
            segments: vec![Segment::Editable {
                text: String::new(),
            }],
            patterns,
        }
    }

    pub fn patterns(&self) -> &PatternSet<V> {
        &self.patterns
    }

    pub fn segments(&self) -> &[Segment<V>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true: the degenerate state is a single empty editable segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        index < self.segments.len()
    }

    /// Segment indices from `from` through the end.
    pub fn indices_from(&self, from: usize) -> Range<usize> {
        from.min(self.segments.len())..self.segments.len()
    }

    /// Full parse: replaces the segment sequence with the parse of `text`.
    pub fn parse(&mut self, text: &str) {
        self.segments = self.parse_segments(text);
    }

    /// Reparse `text` and report which segment indices (>= `from_index`) the
    /// presentation must rebuild. Segments before `from_index` are assumed
    /// structurally unaffected by the edit.
    pub fn reparse(&mut self, text: &str, from_index: usize) -> Range<usize> {
        self.parse(text);
        self.indices_from(from_index)
    }

    /// Replace the text of the editable segment at `index`.
    /// Silently ignored for tokens and out-of-range indices.
    pub fn set_text(&mut self, text: &str, index: usize) {
        let Some(segment) = self.segments.get_mut(index) else {
            return;
        };
        if let Segment::Editable { text: value } = segment {
            *value = text.to_string();
        }
    }

    /// Text of the editable segment at `index`, or `None` for tokens and
    /// out-of-range indices.
    pub fn get_text(&self, index: usize) -> Option<&str> {
        match self.segments.get(index) {
            Some(Segment::Editable { text }) => Some(text),
            _ => None,
        }
    }

    /// Text and view factory of the token at `index`, or `None` for editable
    /// segments and out-of-range indices.
    pub fn get_token(&self, index: usize) -> Option<(&str, TokenFactory<V>)> {
        match self.segments.get(index) {
            Some(Segment::Token { text, factory }) => Some((text, factory.clone())),
            _ => None,
        }
    }

    /// Remove the segment at `index`, then compact: consecutive non-token
    /// entries fold into a single `Editable` joined with single spaces.
    /// Out-of-range indices are a no-op.
    pub fn remove_element(&mut self, index: usize) {
        if !self.is_valid(index) {
            return;
        }
        self.segments.remove(index);
        self.compact();
        if self.segments.is_empty() {
            self.segments.push(Segment::Editable {
                text: String::new(),
            });
        }
    }

    /// Reconstruct the line: every segment's text followed by one space,
    /// including the last (legacy serialization used for row round-tripping).
    pub fn text(&self) -> String {
        self.segments.iter().fold(String::new(), |mut acc, s| {
            acc.push_str(s.text());
            acc.push(' ');
            acc
        })
    }

    /// Whether any word of `text` matches a pattern. See
    /// [`PatternSet::matches_any_word`].
    pub fn matches_any(&self, text: &str) -> bool {
        self.patterns.matches_any_word(text)
    }

    fn parse_segments(&self, text: &str) -> Vec<Segment<V>> {
        let words: Vec<&str> = text.split(' ').collect();

        let mut result: Vec<Segment<V>> = Vec::new();
        let mut current: Option<Segment<V>> = None;

        for (index, word) in words.iter().enumerate() {
            if let Some(pattern) = self.patterns.matches(word, index, &words) {
                if let Some(run) = current.take() {
                    result.push(run);
                }
                result.push(Segment::Token {
                    text: (*word).to_string(),
                    factory: pattern.factory(),
                });
            } else {
                current = Some(match merge(current.take(), word) {
                    Ok(segment) => segment,
                    Err(err) => {
                        // Invariant violation; discard the malformed merge and
                        // start a fresh run with the offending word.
                        tracing::warn!("recovering from invalid merge: {err}");
                        Segment::Editable {
                            text: (*word).to_string(),
                        }
                    }
                });
            }
        }

        if let Some(run) = current {
            result.push(run);
        } else if result.is_empty() {
            result.push(Segment::Editable {
                text: String::new(),
            });
        }
        result
    }

    fn compact(&mut self) {
        let mut result: Vec<Segment<V>> = Vec::with_capacity(self.segments.len());
        let mut run: Option<String> = None;

        for segment in self.segments.drain(..) {
            match segment {
                Segment::Token { .. } => {
                    if let Some(text) = run.take() {
                        result.push(Segment::Editable { text });
                    }
                    result.push(segment);
                }
                Segment::Editable { text } => match run.as_mut() {
                    Some(acc) => {
                        acc.push(' ');
                        acc.push_str(&text);
                    }
                    None => run = Some(text),
                },
            }
        }
        if let Some(text) = run {
            result.push(Segment::Editable { text });
        }
        self.segments = result;
    }
}

impl<V> fmt::Debug for SegmentModel<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentModel")
            .field("segments", &self.segments)
            .finish()
    }
}

/// Append `right` onto the current non-token run.
///
/// Merging onto a token cannot happen by construction (tokens are pushed
/// directly, never kept as the accumulator); if it ever does, the caller
/// recovers by starting a new run.
fn merge<V>(left: Option<Segment<V>>, right: &str) -> Result<Segment<V>, InvalidMerge> {
    match left {
        None => Ok(Segment::Editable {
            text: right.to_string(),
        }),
        Some(Segment::Token { text, .. }) => Err(InvalidMerge(text)),
        Some(Segment::Editable { mut text }) => {
            text.push(' ');
            text.push_str(right);
            Ok(Segment::Editable { text })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::pattern::Pattern;
    use super::*;

    fn participant_model() -> SegmentModel<()> {
        let set = PatternSet::from_patterns(vec![Pattern::with_skip(
            r"(?i)^participant\b",
            || (),
            |index, _| index > 0,
        )
        .expect("pattern compiles")]);
        SegmentModel::new(set)
    }

    fn kinds(model: &SegmentModel<()>) -> Vec<(bool, String)> {
        model
            .segments()
            .iter()
            .map(|s| (s.is_token(), s.text().to_string()))
            .collect()
    }

    #[test]
    fn test_parse_token_then_text() {
        let mut model = participant_model();
        model.parse("participant p1 foo bar");

        assert_eq!(
            kinds(&model),
            vec![
                (true, "participant".to_string()),
                (false, "p1 foo bar".to_string()),
            ]
        );
    }

    #[test]
    fn test_skip_rule_suppresses_mid_line_keyword() {
        let mut model = participant_model();
        model.parse("foo participant bar");

        assert_eq!(kinds(&model), vec![(false, "foo participant bar".to_string())]);
    }

    #[test]
    fn test_parse_empty_yields_single_editable() {
        let mut model = participant_model();
        model.parse("");

        assert_eq!(model.len(), 1);
        assert!(!model.segments()[0].is_token());
        assert_eq!(model.segments()[0].text(), "");
    }

    #[test]
    fn test_consecutive_spaces_preserved_in_run() {
        let mut model = participant_model();
        model.parse("a  b");

        // "a", "", "b" re-joined with single spaces
        assert_eq!(kinds(&model), vec![(false, "a  b".to_string())]);
    }

    #[test]
    fn test_token_atomicity() {
        let mut model = participant_model();
        model.parse("participant p1");

        model.set_text("overwritten", 0);
        assert_eq!(model.segments()[0].text(), "participant");
        assert!(model.get_text(0).is_none());
        assert!(model.get_token(0).is_some());
        assert!(model.get_token(1).is_none());
    }

    #[test]
    fn test_out_of_range_accessors_are_noops() {
        let mut model = participant_model();
        model.parse("participant p1");

        model.set_text("x", 99);
        assert!(model.get_text(99).is_none());
        assert!(model.get_token(99).is_none());
        model.remove_element(99);
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_remove_token_compacts_neighbors() {
        let mut model = participant_model();
        model.parse("aaa participant bbb");
        assert_eq!(model.len(), 3);

        model.remove_element(1);
        assert_eq!(kinds(&model), vec![(false, "aaa bbb".to_string())]);
    }

    #[test]
    fn test_remove_leading_token() {
        let mut model = participant_model();
        model.parse("participant p1");

        model.remove_element(0);
        assert_eq!(kinds(&model), vec![(false, "p1".to_string())]);
    }

    #[test]
    fn test_remove_last_segment_restores_degenerate() {
        let mut model = participant_model();
        model.parse("participant");
        assert_eq!(model.len(), 1);

        model.remove_element(0);
        assert_eq!(model.len(), 1);
        assert_eq!(model.get_text(0), Some(""));
    }

    #[test]
    fn test_compaction_invariant_after_any_remove() {
        let mut model = participant_model();
        model.parse("aa participant bb participant cc");

        for index in [3, 1] {
            model.remove_element(index);
            let adjacent_editables = model
                .segments()
                .windows(2)
                .any(|w| !w[0].is_token() && !w[1].is_token());
            assert!(!adjacent_editables);
        }
    }

    #[test]
    fn test_text_reconstruction_trailing_space() {
        let mut model = participant_model();
        model.parse("participant p1");

        assert_eq!(model.text(), "participant p1 ");
    }

    #[test]
    fn test_reparse_reports_suffix_range() {
        let mut model = participant_model();
        model.parse("participant p1");

        let range = model.reparse("participant p1 extra", 1);
        assert_eq!(range, 1..2);

        let clamped = model.reparse("participant p1", 10);
        assert!(clamped.is_empty());
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let mut model = participant_model();
        let first = model.reparse("participant p1 foo", 0);
        let snapshot = kinds(&model);

        let second = model.reparse("participant p1 foo", 0);
        assert_eq!(first, second);
        assert_eq!(kinds(&model), snapshot);
    }

    #[test]
    fn test_merge_onto_token_recovers() {
        let err = merge(
            Some(Segment::<()>::Token {
                text: "participant".into(),
                factory: std::sync::Arc::new(|| ()),
            }),
            "x",
        )
        .expect_err("merging onto a token is an invariant violation");
        assert!(err.to_string().contains("participant"));
    }
}
