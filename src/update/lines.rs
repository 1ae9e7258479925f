//! Row mutation handlers: insert, delete, move, clone, paste expansion.
//!
//! Every handler validates its positions up front and degrades to
//! `Cmd::None` without touching the model when they are stale; callers are
//! expected to re-validate focus state on every user-visible action rather
//! than trust old indices.

use crate::commands::Cmd;
use crate::model::{EditorModel, LineItem};

/// Retries used when focus targets a row the presentation may still be
/// materializing (insert-below, clone, paste).
pub const FOCUS_RETRIES_ON_INSERT: u32 = 5;

pub fn insert_above<T: LineItem>(model: &mut EditorModel<T>, position: usize) -> Cmd {
    if !model.lines.is_valid(position) {
        tracing::debug!(position, "insert_above: invalid position");
        return Cmd::None;
    }
    let Some(item) = T::from_raw("") else {
        return Cmd::None;
    };

    model.lines.insert(position, item);
    model.bump();
    tracing::debug!(position, len = model.lines.len(), "inserted row above");

    Cmd::batch(vec![
        Cmd::RowsInserted {
            range: position..position + 1,
        },
        Cmd::RefreshFrom { position },
        // The row replaces an on-screen one, no scroll needed first.
        Cmd::RequestFocus {
            position,
            max_retries: 0,
        },
    ])
}

pub fn insert_below<T: LineItem>(model: &mut EditorModel<T>, position: usize) -> Cmd {
    let target = if model.lines.is_empty() {
        0
    } else if !model.lines.is_valid(position) {
        tracing::debug!(position, "insert_below: invalid position");
        return Cmd::None;
    } else {
        position + 1
    };
    let Some(item) = T::from_raw("") else {
        return Cmd::None;
    };

    if target == model.lines.len() {
        model.lines.push(item);
    } else {
        model.lines.insert(target, item);
    }
    model.bump();
    tracing::debug!(target, len = model.lines.len(), "inserted row below");

    Cmd::batch(vec![
        Cmd::RowsInserted {
            range: target..target + 1,
        },
        Cmd::RefreshFrom { position: target },
        Cmd::RequestFocus {
            position: target,
            max_retries: FOCUS_RETRIES_ON_INSERT,
        },
    ])
}

pub fn delete<T: LineItem>(model: &mut EditorModel<T>, position: usize) -> Cmd {
    if model.lines.remove(position).is_none() {
        tracing::debug!(position, "delete: invalid position");
        return Cmd::None;
    }
    if model.selected == Some(position) {
        model.selected = None;
    }
    model.bump();
    tracing::debug!(position, len = model.lines.len(), "deleted row");

    Cmd::batch(vec![
        Cmd::RowRemoved { position },
        Cmd::RefreshFrom { position },
    ])
}

/// Reorder rows. Destination at the last index rotates the source row to the
/// end; any other destination swaps the two rows. Focus is unaffected.
pub fn move_row<T: LineItem>(model: &mut EditorModel<T>, from: usize, to: usize) -> Cmd {
    if !model.lines.is_valid(from) || !model.lines.is_valid(to) || from == to {
        tracing::debug!(from, to, "move_row: invalid positions");
        return Cmd::None;
    }

    if model.lines.is_last(to) {
        if let Some(item) = model.lines.remove(from) {
            model.lines.push(item);
        }
    } else {
        model.lines.swap(from, to);
    }
    model.bump();
    tracing::debug!(from, to, "moved row");

    Cmd::RefreshFrom {
        position: from.min(to),
    }
}

pub fn clone_row<T: LineItem>(model: &mut EditorModel<T>, position: usize) -> Cmd {
    let Some(raw) = model.lines.raw(position) else {
        tracing::debug!(position, "clone_row: invalid position");
        return Cmd::None;
    };
    let Some(item) = T::from_raw(&raw) else {
        return Cmd::None;
    };

    let target = position + 1;
    if target == model.lines.len() {
        model.lines.push(item);
    } else {
        model.lines.insert(target, item);
    }
    model.bump();
    tracing::debug!(position, target, "cloned row");

    Cmd::batch(vec![
        Cmd::RowsInserted {
            range: target..target + 1,
        },
        Cmd::RefreshFrom { position: target },
        Cmd::RequestFocus {
            position: target,
            max_retries: FOCUS_RETRIES_ON_INSERT,
        },
    ])
}

/// Expand a multi-line paste into new rows.
///
/// `lines[0]` was already merged into the row at `position` by the ordinary
/// text-change path; the remaining lines are inserted consecutively starting
/// at `position + 1`. Lines the item type rejects are skipped.
pub fn paste_expand<T: LineItem>(
    model: &mut EditorModel<T>,
    position: usize,
    lines: &[String],
) -> Cmd {
    if !model.lines.is_valid(position) || lines.len() < 2 {
        return Cmd::None;
    }

    let items: Vec<T> = lines[1..].iter().filter_map(|l| T::from_raw(l)).collect();
    if items.is_empty() {
        return Cmd::None;
    }

    let first = position + 1;
    let mut target = first;
    for item in items {
        if target == model.lines.len() {
            model.lines.push(item);
        } else {
            model.lines.insert(target, item);
        }
        target += 1;
    }
    let last = target - 1;
    model.bump();
    tracing::debug!(position, rows = last - first + 1, "expanded pasted lines");

    Cmd::batch(vec![
        Cmd::RowsInserted {
            range: first..target,
        },
        Cmd::RefreshFrom { position: last },
        Cmd::RequestFocus {
            position: last,
            max_retries: FOCUS_RETRIES_ON_INSERT,
        },
    ])
}

/// Per-keystroke replacement of a row's raw text. Rows the item type rejects
/// keep their previous value.
pub fn set_text<T: LineItem>(model: &mut EditorModel<T>, position: usize, text: &str) -> Cmd {
    if !model.lines.is_valid(position) {
        return Cmd::None;
    }
    let Some(item) = T::from_raw(text) else {
        tracing::debug!(position, "set_text: item rejected raw value");
        return Cmd::None;
    };

    model.lines.replace(position, item);
    model.bump();
    // The edited row already displays the text; nothing to refresh.
    Cmd::None
}

pub fn select<T: LineItem>(model: &mut EditorModel<T>, position: usize) -> Cmd {
    if model.lines.is_valid(position) {
        model.selected = Some(position);
    }
    Cmd::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlainLine;

    fn model(lines: &[&str]) -> EditorModel<PlainLine> {
        EditorModel::from_lines(lines.iter().map(|s| PlainLine::from(*s)).collect())
    }

    fn raws(model: &EditorModel<PlainLine>) -> Vec<String> {
        model.lines.iter().map(|l| l.raw_value()).collect()
    }

    #[test]
    fn test_insert_above_shifts_rows_down() {
        let mut m = model(&["a", "b", "c"]);
        let cmd = insert_above(&mut m, 1);

        assert_eq!(raws(&m), vec!["a", "", "b", "c"]);
        match cmd {
            Cmd::Batch(cmds) => {
                assert!(cmds.contains(&Cmd::RefreshFrom { position: 1 }));
                assert!(cmds.contains(&Cmd::RequestFocus {
                    position: 1,
                    max_retries: 0
                }));
            }
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn test_insert_below_appends_at_last_row() {
        let mut m = model(&["a", "b"]);
        insert_below(&mut m, 1);
        assert_eq!(raws(&m), vec!["a", "b", ""]);
    }

    #[test]
    fn test_insert_below_into_empty_store() {
        let mut m = model(&[]);
        let cmd = insert_below(&mut m, 0);
        assert_eq!(raws(&m), vec![""]);
        assert!(!cmd.is_none());
    }

    #[test]
    fn test_delete_clears_matching_selection() {
        let mut m = model(&["a", "b"]);
        m.selected = Some(1);
        delete(&mut m, 1);
        assert_eq!(raws(&m), vec!["a"]);
        assert_eq!(m.selected, None);
    }

    #[test]
    fn test_move_to_last_rotates() {
        let mut m = model(&["a", "b"]);
        move_row(&mut m, 0, 1);
        assert_eq!(raws(&m), vec!["b", "a"]);
    }

    #[test]
    fn test_move_mid_list_swaps() {
        let mut m = model(&["a", "b", "c"]);
        let cmd = move_row(&mut m, 2, 0);
        assert_eq!(raws(&m), vec!["c", "b", "a"]);
        assert_eq!(cmd, Cmd::RefreshFrom { position: 0 });
    }

    #[test]
    fn test_invalid_positions_are_noops() {
        let mut m = model(&["a"]);
        let before = m.revision;

        assert!(insert_above(&mut m, 5).is_none());
        assert!(delete(&mut m, 5).is_none());
        assert!(move_row(&mut m, 0, 5).is_none());
        assert!(clone_row(&mut m, 5).is_none());
        assert_eq!(raws(&m), vec!["a"]);
        assert_eq!(m.revision, before);
    }

    #[test]
    fn test_clone_duplicates_content_below() {
        let mut m = model(&["a", "b"]);
        clone_row(&mut m, 0);
        assert_eq!(raws(&m), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_paste_expand_inserts_tail_lines() {
        let mut m = model(&["x"]);
        let cmd = paste_expand(
            &mut m,
            0,
            &["first".to_string(), "x2".to_string(), "x3".to_string()],
        );

        assert_eq!(raws(&m), vec!["x", "x2", "x3"]);
        match cmd {
            Cmd::Batch(cmds) => {
                assert!(cmds.contains(&Cmd::RowsInserted { range: 1..3 }));
                assert!(cmds.contains(&Cmd::RequestFocus {
                    position: 2,
                    max_retries: FOCUS_RETRIES_ON_INSERT
                }));
            }
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn test_paste_expand_single_line_is_noop() {
        let mut m = model(&["x"]);
        let cmd = paste_expand(&mut m, 0, &["only".to_string()]);
        assert!(cmd.is_none());
        assert_eq!(raws(&m), vec!["x"]);
    }

    #[test]
    fn test_set_text_replaces_row() {
        let mut m = model(&["a"]);
        set_text(&mut m, 0, "edited");
        assert_eq!(raws(&m), vec!["edited"]);
    }

    #[test]
    fn test_position_validity_after_mutations() {
        let mut m = model(&["a", "b", "c"]);
        let n = m.lines.len();

        insert_below(&mut m, 1);
        assert_eq!(m.lines.len(), n + 1);
        assert!(m.lines.is_valid(n));
        assert!(!m.lines.is_valid(n + 1));

        delete(&mut m, 0);
        assert_eq!(m.lines.len(), n);
        assert!(m.lines.is_valid(n - 1));
    }
}
