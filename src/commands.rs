//! Command types: side effects the presentation must perform after an update.
//!
//! Update handlers mutate the model synchronously and describe the required
//! presentation work as data. The session facade executes commands in order
//! against a [`Presenter`](crate::session::Presenter).

use std::ops::Range;

/// A presentation side effect. Row indices always refer to the
/// post-mutation store state; the engine never reports stale indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// No side effect.
    #[default]
    None,
    /// New rows were inserted at `range`; the presentation should materialize
    /// them (possibly with an animation) before any refresh runs.
    RowsInserted { range: Range<usize> },
    /// The row previously at `position` was removed.
    RowRemoved { position: usize },
    /// Every visible row at `position..` must re-render: its displayed index
    /// (line-number label) has shifted.
    RefreshFrom { position: usize },
    /// Move editing focus to `position`, retrying while the presentation
    /// materializes the row. See [`FocusAdvancer`](crate::focus::FocusAdvancer).
    RequestFocus { position: usize, max_retries: u32 },
    /// Execute multiple commands in order.
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Collapse a command list: empty becomes `None`, singleton unwraps.
    pub fn batch(mut cmds: Vec<Cmd>) -> Cmd {
        cmds.retain(|c| !matches!(c, Cmd::None));
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.remove(0),
            _ => Cmd::Batch(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Cmd::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_collapses() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        assert_eq!(
            Cmd::batch(vec![Cmd::None, Cmd::RefreshFrom { position: 1 }]),
            Cmd::RefreshFrom { position: 1 }
        );
        assert_eq!(
            Cmd::batch(vec![
                Cmd::RowRemoved { position: 0 },
                Cmd::RefreshFrom { position: 0 }
            ]),
            Cmd::Batch(vec![
                Cmd::RowRemoved { position: 0 },
                Cmd::RefreshFrom { position: 0 }
            ])
        );
    }
}
