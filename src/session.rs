//! Session facade: dispatches messages, executes commands against the
//! presentation, and batches change notifications.
//!
//! Mutation sequencing per structural edit:
//! 1. the update handler mutates the store synchronously,
//! 2. the presenter materializes / removes rows (its own animation),
//! 3. affected rows are refreshed (index labels shifted),
//! 4. focus advancement runs, possibly spanning scheduled retries.
//!
//! The presentation owns the session and passes itself in per call; the
//! session never stores a presentation handle, so ownership stays acyclic.

use std::ops::Range;
use std::time::Instant;

use crate::commands::Cmd;
use crate::config::LineEditorConfig;
use crate::focus::{FocusAdvancer, FocusTarget};
use crate::messages::LineMsg;
use crate::model::{EditorModel, LineItem, LineStore};
use crate::update::update;

/// Presentation-side receiver of row side effects.
pub trait Presenter: FocusTarget {
    /// New rows materialized at `range` (post-mutation indices).
    fn rows_inserted(&mut self, range: Range<usize>);
    /// The row previously at `position` was removed.
    fn row_removed(&mut self, position: usize);
    /// Re-render every visible row at `position..`; displayed row indices
    /// (line-number labels) have shifted.
    fn refresh_rows_from(&mut self, position: usize);
}

type ChangeListener = Box<dyn FnMut(u64) + Send>;

/// One in-memory editing session over a line store.
pub struct Session<T: LineItem> {
    model: EditorModel<T>,
    advancer: FocusAdvancer,
    listeners: Vec<ChangeListener>,
}

impl<T: LineItem> Session<T> {
    pub fn new(model: EditorModel<T>) -> Self {
        Self {
            model,
            advancer: FocusAdvancer::new(),
            listeners: Vec::new(),
        }
    }

    pub fn with_config(model: EditorModel<T>, config: &LineEditorConfig) -> Self {
        Self {
            model,
            advancer: FocusAdvancer::with_interval(config.focus_retry_interval()),
            listeners: Vec::new(),
        }
    }

    pub fn model(&self) -> &EditorModel<T> {
        &self.model
    }

    pub fn lines(&self) -> &LineStore<T> {
        &self.model.lines
    }

    /// Subscribe to the model-changed event. Fires exactly once per
    /// dispatched message that mutated content, with the new revision.
    pub fn subscribe(&mut self, listener: impl FnMut(u64) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Dispatch a message and run the resulting commands against `presenter`.
    pub fn dispatch<P: Presenter>(&mut self, msg: LineMsg, presenter: &mut P) {
        self.dispatch_at(msg, presenter, Instant::now());
    }

    /// Like [`dispatch`](Self::dispatch) with an explicit clock, so tests can
    /// drive focus retries deterministically.
    pub fn dispatch_at<P: Presenter>(&mut self, msg: LineMsg, presenter: &mut P, now: Instant) {
        let before = self.model.revision;
        let cmd = update(&mut self.model, msg);
        self.run_cmd(cmd, presenter, now);

        // One notification per logical mutation, however many commands it
        // produced.
        if self.model.revision != before {
            let revision = self.model.revision;
            for listener in &mut self.listeners {
                listener(revision);
            }
        }
    }

    /// When the host should next call [`tick_focus_at`](Self::tick_focus_at).
    pub fn next_focus_deadline(&self) -> Option<Instant> {
        self.advancer.next_deadline()
    }

    /// Drive a pending focus retry with the host's clock.
    pub fn tick_focus_at<P: Presenter>(&mut self, presenter: &mut P, now: Instant) -> bool {
        self.advancer.on_tick(now, presenter)
    }

    pub fn tick_focus<P: Presenter>(&mut self, presenter: &mut P) -> bool {
        self.tick_focus_at(presenter, Instant::now())
    }

    fn run_cmd<P: Presenter>(&mut self, cmd: Cmd, presenter: &mut P, now: Instant) {
        match cmd {
            Cmd::None => {}
            Cmd::RowsInserted { range } => presenter.rows_inserted(range),
            Cmd::RowRemoved { position } => presenter.row_removed(position),
            Cmd::RefreshFrom { position } => presenter.refresh_rows_from(position),
            Cmd::RequestFocus {
                position,
                max_retries,
            } => {
                self.advancer
                    .request_focus(position, max_retries, presenter, now);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.run_cmd(cmd, presenter, now);
                }
            }
        }
    }
}

impl<T: LineItem + std::fmt::Debug> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.model)
            .field("advancer", &self.advancer)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
