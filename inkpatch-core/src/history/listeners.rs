//! # Change notification
//!
//! Listeners are called synchronously, in the order they were added, from within the history operation that
//! caused the change. A listener returning an error is logged and skipped - it can affect neither the other
//! listeners nor the operation that triggered it, which has already completed by the time listeners run.

use std::sync::Arc;

use super::{HistoryEntry, HistoryLimit};

pub struct ListenerIDMarker;
pub type ListenerID = crate::InkID<ListenerIDMarker>;

/// What kind of operation produced a [`HistoryChange`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, strum::AsRefStr)]
#[cfg_attr(test, derive(strum::EnumIter))]
#[strum(serialize_all = "lowercase")]
pub enum ChangeKind {
    /// Not a change - delivered once to a listener registered with `immediate`.
    Snapshot,
    Push,
    Undo,
    Redo,
    Replace,
    Metadata,
    Limit,
    Clear,
}

/// The state of the history right after a change.
#[derive(Debug)]
pub struct HistoryChange<P, M = ()> {
    pub kind: ChangeKind,
    /// Counts successful changes. Unchanged for [`ChangeKind::Snapshot`].
    pub version: u64,
    /// Number of retained entries.
    pub size: usize,
    pub cursor: Option<usize>,
    pub limit: HistoryLimit,
    pub can_undo: bool,
    pub can_redo: bool,
    pub undo_peek: Option<Arc<HistoryEntry<P, M>>>,
    pub redo_peek: Option<Arc<HistoryEntry<P, M>>>,
    /// The entry that was pushed, undone, redone, or swapped in.
    /// None for changes that affect the stack as a whole.
    pub changed_entry: Option<Arc<HistoryEntry<P, M>>>,
}

pub(super) type Callback<P, M> = Box<dyn FnMut(&HistoryChange<P, M>) -> anyhow::Result<()>>;

pub(super) struct Listeners<P, M> {
    // Very rarely more than a UI panel or two.
    slots: smallvec::SmallVec<[(ListenerID, Callback<P, M>); 2]>,
}
impl<P, M> Default for Listeners<P, M> {
    fn default() -> Self {
        Self {
            slots: smallvec::SmallVec::new(),
        }
    }
}
impl<P, M> Listeners<P, M> {
    pub(super) fn insert(&mut self, id: ListenerID, callback: Callback<P, M>) {
        self.slots.push((id, callback));
    }
    pub(super) fn remove(&mut self, id: ListenerID) -> bool {
        let before = self.slots.len();
        self.slots.retain(|(other, _)| *other != id);
        self.slots.len() != before
    }
    pub(super) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    pub(super) fn dispatch(&mut self, change: &HistoryChange<P, M>) {
        for (id, callback) in &mut self.slots {
            call_guarded(*id, callback, change);
        }
    }
}

/// Call a single listener, logging rather than propagating its failure.
pub(super) fn call_guarded<P, M>(
    id: ListenerID,
    callback: &mut Callback<P, M>,
    change: &HistoryChange<P, M>,
) {
    if let Err(err) = callback(change) {
        log::warn!(
            "History listener {id} failed on {} (v{}): {err:#}",
            change.kind.as_ref(),
            change.version
        );
    }
}
