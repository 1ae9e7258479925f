//! Update functions: all state transformations flow through here.
//!
//! Each handler mutates the [`EditorModel`] synchronously, bumps its revision
//! when content changed, and returns a [`Cmd`] describing the presentation
//! work (row materialization, refresh ranges, focus advancement).

mod lines;
mod symbol;

pub use lines::FOCUS_RETRIES_ON_INSERT;

use crate::commands::Cmd;
use crate::messages::LineMsg;
use crate::model::{EditorModel, LineItem};

/// Main update function - dispatches to the row-mutation handlers.
pub fn update<T: LineItem>(model: &mut EditorModel<T>, msg: LineMsg) -> Cmd {
    match msg {
        LineMsg::InsertAbove { position } => lines::insert_above(model, position),
        LineMsg::InsertBelow { position } => lines::insert_below(model, position),
        LineMsg::Delete { position } => lines::delete(model, position),
        LineMsg::Move { from, to } => lines::move_row(model, from, to),
        LineMsg::Clone { position } => lines::clone_row(model, position),
        LineMsg::PasteExpand { position, lines } => {
            lines::paste_expand(model, position, &lines)
        }
        LineMsg::SetText { position, text } => lines::set_text(model, position, &text),
        LineMsg::Select { position } => lines::select(model, position),
        LineMsg::ReturnPressed { position } => lines::insert_below(model, position),
        LineMsg::InsertSymbol {
            position,
            caret,
            symbol,
        } => symbol::insert_symbol(model, position, caret, &symbol),
    }
}
