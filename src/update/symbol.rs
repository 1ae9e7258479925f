//! Keyboard-symbol insertion.
//!
//! A custom keyboard key carries a value spliced into the focused row at the
//! caret, and optionally additional values that become whole new rows below
//! it (e.g. a "loop" symbol that also inserts its closing "end" line).

use crate::commands::Cmd;
use crate::messages::Symbol;
use crate::model::{EditorModel, LineItem};

use super::lines::FOCUS_RETRIES_ON_INSERT;

pub fn insert_symbol<T: LineItem>(
    model: &mut EditorModel<T>,
    position: usize,
    caret: usize,
    symbol: &Symbol,
) -> Cmd {
    let Some(raw) = model.lines.raw(position) else {
        tracing::debug!(position, "insert_symbol: invalid position");
        return Cmd::None;
    };

    let updated = splice_at(&raw, caret, &symbol.value);
    let Some(item) = T::from_raw(&updated) else {
        return Cmd::None;
    };
    model.lines.replace(position, item);
    model.bump();
    tracing::debug!(position, symbol = %symbol.value, "inserted symbol");

    let mut cmds = vec![Cmd::RefreshFrom { position }];

    let extra: Vec<T> = symbol
        .additional_values
        .iter()
        .filter_map(|v| T::from_raw(v))
        .collect();
    if !extra.is_empty() {
        let first = position + 1;
        let mut target = first;
        for item in extra {
            if target == model.lines.len() {
                model.lines.push(item);
            } else {
                model.lines.insert(target, item);
            }
            target += 1;
        }
        cmds.push(Cmd::RowsInserted {
            range: first..target,
        });
        cmds.push(Cmd::RefreshFrom { position: first });
        cmds.push(Cmd::RequestFocus {
            position: target - 1,
            max_retries: FOCUS_RETRIES_ON_INSERT,
        });
    }

    Cmd::batch(cmds)
}

/// Insert `value` at a character offset, clamping to the end of `text`.
fn splice_at(text: &str, caret: usize, value: &str) -> String {
    let byte_offset = text
        .char_indices()
        .nth(caret)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let mut out = String::with_capacity(text.len() + value.len());
    out.push_str(&text[..byte_offset]);
    out.push_str(value);
    out.push_str(&text[byte_offset..]);
    out
}
