//! Token-aware segmentation of a single line of text.
//!
//! A line is parsed into an alternating sequence of immutable [`Segment::Token`]
//! entries (words recognized by a [`PatternSet`]) and mutable
//! [`Segment::Editable`] text runs. The host renders each segment as its own
//! widget (a tag view for tokens, a text field for editable runs) and feeds
//! edits back through [`SyntaxField`], which decides when the line must be
//! re-segmented.

mod field;
mod pattern;
mod segment;

pub use field::{ChangeKind, FieldEffect, SyntaxField, TextChange};
pub use pattern::{Pattern, PatternError, PatternSet, SkipPredicate, TokenFactory};
pub use segment::{Segment, SegmentModel};
