//! linekit - embeddable line-oriented text editor core
//!
//! An ordered collection of editable text rows plus an optional per-row
//! "syntax field" that decomposes a line into immutable keyword tokens and
//! freely editable text runs. The crate is presentation-agnostic: a host UI
//! feeds raw text-change and row-command messages in, and receives back
//! side-effect descriptions (row refresh ranges, insertions, focus requests)
//! to apply to whatever widget tree it renders.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod focus;
pub mod messages;
pub mod model;
pub mod session;
pub mod syntax;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::{LineEditorConfig, TokenRule};
pub use focus::{FocusAdvancer, FocusTarget};
pub use messages::{LineMsg, Symbol};
pub use model::{EditorModel, LineItem, LineStore, PlainLine};
pub use session::{Presenter, Session};
pub use syntax::{
    ChangeKind, FieldEffect, Pattern, PatternError, PatternSet, Segment, SegmentModel, SyntaxField,
    TextChange,
};
