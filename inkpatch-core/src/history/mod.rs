//! # History
//!
//! The linear undo/redo history of a document. Entries are kept oldest-first, with a cursor splitting those
//! which are currently applied (undoable) from those which were undone (redoable). Pushing while some entries are
//! undone throws the undone ones away - there is no branching. The history may be limited to a number of entries,
//! in which case the oldest are dropped first.
//!
//! Entries are immutable once pushed and handed out as `Arc`s, so a caller holding one will never see it change.
//! "Replacing" or "updating" the top entry swaps a brand new entry into its place.

pub mod listeners;

use std::{collections::VecDeque, num::NonZeroUsize, sync::Arc};

pub use listeners::{ChangeKind, HistoryChange, ListenerID};

pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Maximum number of entries a history may retain.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum HistoryLimit {
    #[default]
    Unbounded,
    Entries(NonZeroUsize),
}
impl HistoryLimit {
    /// Interpret a user-provided limit, where zero or negative means unbounded.
    #[must_use]
    pub fn from_requested(requested: i64) -> Self {
        usize::try_from(requested)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(Self::Unbounded, Self::Entries)
    }
    /// The maximum entry count, or None if unbounded.
    #[must_use]
    pub fn get(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Entries(max) => Some(max.get()),
        }
    }
}
impl std::fmt::Display for HistoryLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbounded => write!(f, "unbounded"),
            Self::Entries(max) => write!(f, "{max}"),
        }
    }
}

/// The descriptive parts of an entry, everything but the patch.
///
/// When pushing, absent fields are simply absent (the timestamp defaults to now). When replacing or updating,
/// absent fields are inherited from the entry being replaced.
pub struct EntryMeta<M = ()> {
    pub label: Option<String>,
    pub metadata: Option<Arc<M>>,
    pub timestamp: Option<Timestamp>,
}
impl<M> Default for EntryMeta<M> {
    fn default() -> Self {
        Self {
            label: None,
            metadata: None,
            timestamp: None,
        }
    }
}
impl<M> Clone for EntryMeta<M> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            metadata: self.metadata.clone(),
            timestamp: self.timestamp,
        }
    }
}
impl<M> EntryMeta<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn labeled(label: impl Into<String>) -> Self {
        Self::new().label(label)
    }
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    #[must_use]
    pub fn metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(Arc::new(metadata));
        self
    }
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// One undoable unit of change.
#[derive(Debug)]
pub struct HistoryEntry<P, M = ()> {
    patch: Arc<P>,
    label: Option<String>,
    metadata: Option<Arc<M>>,
    timestamp: Timestamp,
}
impl<P, M> HistoryEntry<P, M> {
    #[must_use]
    pub fn patch(&self) -> &Arc<P> {
        &self.patch
    }
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
    #[must_use]
    pub fn metadata(&self) -> Option<&Arc<M>> {
        self.metadata.as_ref()
    }
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
    /// Everything but the patch, as it would be inherited by a replacement.
    #[must_use]
    pub fn meta(&self) -> EntryMeta<M> {
        EntryMeta {
            label: self.label.clone(),
            metadata: self.metadata.clone(),
            timestamp: Some(self.timestamp),
        }
    }
    /// A new entry with this entry's descriptive fields, overridden by any in `meta`.
    fn inherit(&self, patch: Arc<P>, meta: EntryMeta<M>) -> Self {
        Self {
            patch,
            label: meta.label.or_else(|| self.label.clone()),
            metadata: meta.metadata.or_else(|| self.metadata.clone()),
            timestamp: meta.timestamp.unwrap_or(self.timestamp),
        }
    }
}

pub struct HistoryStack<P, M = ()> {
    /// Oldest first.
    entries: VecDeque<Arc<HistoryEntry<P, M>>>,
    /// How many entries, from the front, are currently applied.
    /// The "cursor" is the last of them.
    applied: usize,
    limit: HistoryLimit,
    version: u64,
    listeners: listeners::Listeners<P, M>,
}
impl<P, M> Default for HistoryStack<P, M> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
            applied: 0,
            limit: HistoryLimit::Unbounded,
            version: 0,
            listeners: listeners::Listeners::default(),
        }
    }
}
// Queries
impl<P, M> HistoryStack<P, M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn with_limit(limit: HistoryLimit) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
    /// Number of retained entries, applied or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Index of the most recently applied entry, or None if every entry is undone.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }
    #[must_use]
    pub fn limit(&self) -> HistoryLimit {
        self.limit
    }
    /// Incremented once per successful change.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.applied < self.entries.len()
    }
    /// The entry [`Self::undo`] would undo.
    #[must_use]
    pub fn peek_undo(&self) -> Option<Arc<HistoryEntry<P, M>>> {
        self.entries.get(self.cursor()?).cloned()
    }
    /// The entry [`Self::redo`] would redo.
    #[must_use]
    pub fn peek_redo(&self) -> Option<Arc<HistoryEntry<P, M>>> {
        self.entries.get(self.applied).cloned()
    }
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<HistoryEntry<P, M>>> {
        self.entries.get(index)
    }
    /// All retained entries, oldest first.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = &Arc<HistoryEntry<P, M>>> + '_ {
        self.entries.iter()
    }
    fn change(
        &self,
        kind: ChangeKind,
        changed_entry: Option<Arc<HistoryEntry<P, M>>>,
    ) -> HistoryChange<P, M> {
        HistoryChange {
            kind,
            version: self.version,
            size: self.entries.len(),
            cursor: self.cursor(),
            limit: self.limit,
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            undo_peek: self.peek_undo(),
            redo_peek: self.peek_redo(),
            changed_entry,
        }
    }
}
// Mutations
impl<P, M> HistoryStack<P, M> {
    /// Record a new entry on top of the applied ones, discarding any undone entries.
    ///
    /// Does nothing and returns None if there is no patch.
    pub fn push(
        &mut self,
        patch: impl Into<Option<P>>,
        meta: EntryMeta<M>,
    ) -> Option<Arc<HistoryEntry<P, M>>> {
        let patch = patch.into()?;

        let discarded = self.entries.len() - self.applied;
        self.entries.truncate(self.applied);

        let timestamp = meta.timestamp.unwrap_or_else(|| self.next_timestamp());
        let entry = Arc::new(HistoryEntry {
            patch: Arc::new(patch),
            label: meta.label,
            metadata: meta.metadata,
            timestamp,
        });
        self.entries.push_back(entry.clone());
        self.applied = self.entries.len();
        let evicted = self.evict();

        log::trace!(
            "History push {:?}: discarded {discarded} redo, evicted {evicted}",
            entry.label()
        );
        self.notify(ChangeKind::Push, Some(entry.clone()));
        Some(entry)
    }
    /// Step the cursor back, returning the patch of the entry that should now be reverted.
    pub fn undo(&mut self) -> Option<Arc<P>> {
        let cursor = self.cursor()?;
        let entry = self.entries.get(cursor)?.clone();
        self.applied = cursor;

        log::trace!("History undo {:?}", entry.label());
        let patch = entry.patch.clone();
        self.notify(ChangeKind::Undo, Some(entry));
        Some(patch)
    }
    /// Step the cursor forward, returning the patch of the entry that should now be reapplied.
    pub fn redo(&mut self) -> Option<Arc<P>> {
        let entry = self.entries.get(self.applied)?.clone();
        self.applied += 1;

        log::trace!("History redo {:?}", entry.label());
        let patch = entry.patch.clone();
        self.notify(ChangeKind::Redo, Some(entry));
        Some(patch)
    }
    /// Swap the entry at the cursor for one with a new patch. Label, metadata, and timestamp not given in `meta`
    /// are inherited from the old entry.
    ///
    /// Does nothing and returns None if nothing is undoable or there is no patch.
    pub fn replace_top(
        &mut self,
        patch: impl Into<Option<P>>,
        meta: EntryMeta<M>,
    ) -> Option<Arc<HistoryEntry<P, M>>> {
        let cursor = self.cursor()?;
        let patch = patch.into()?;
        let slot = self.entries.get_mut(cursor)?;
        let entry = Arc::new(slot.inherit(Arc::new(patch), meta));
        *slot = entry.clone();

        log::trace!("History replace top {:?}", entry.label());
        self.notify(ChangeKind::Replace, Some(entry.clone()));
        Some(entry)
    }
    /// Overwrite the label, metadata, or timestamp of the entry at the cursor with those present in `meta`.
    /// The patch is kept.
    pub fn update_top_metadata(&mut self, meta: EntryMeta<M>) -> Option<Arc<HistoryEntry<P, M>>> {
        self.swap_top_meta(|top| {
            let patch = top.patch.clone();
            top.inherit(patch, meta)
        })
    }
    /// Edit the label, metadata, and timestamp of the entry at the cursor in place.
    ///
    /// `update` sees the current values and may change or clear them, except the timestamp which is kept if cleared.
    /// The patch is kept.
    pub fn update_top_with<F>(&mut self, update: F) -> Option<Arc<HistoryEntry<P, M>>>
    where
        F: FnOnce(&mut EntryMeta<M>),
    {
        self.swap_top_meta(|top| {
            let mut meta = top.meta();
            update(&mut meta);
            HistoryEntry {
                patch: top.patch.clone(),
                label: meta.label,
                metadata: meta.metadata,
                timestamp: meta.timestamp.unwrap_or(top.timestamp),
            }
        })
    }
    fn swap_top_meta<F>(&mut self, make: F) -> Option<Arc<HistoryEntry<P, M>>>
    where
        F: FnOnce(&HistoryEntry<P, M>) -> HistoryEntry<P, M>,
    {
        let cursor = self.cursor()?;
        let slot = self.entries.get_mut(cursor)?;
        let entry = Arc::new(make(slot));
        *slot = entry.clone();

        log::trace!("History metadata update {:?}", entry.label());
        self.notify(ChangeKind::Metadata, Some(entry.clone()));
        Some(entry)
    }
    /// Set the limit from a user-provided count, where zero or negative means unbounded.
    /// See [`Self::set_limit_to`].
    pub fn set_limit(&mut self, requested: i64) -> HistoryLimit {
        self.set_limit_to(HistoryLimit::from_requested(requested))
    }
    /// Set the limit, immediately dropping the oldest entries if there are now too many.
    /// Returns the limit now in effect.
    pub fn set_limit_to(&mut self, limit: HistoryLimit) -> HistoryLimit {
        let changed = self.limit != limit;
        self.limit = limit;
        let evicted = self.evict();
        if changed || evicted != 0 {
            log::trace!("History limit {limit}, evicted {evicted}");
            self.notify(ChangeKind::Limit, None);
        }
        limit
    }
    /// Drop every entry. Returns false if there were none.
    pub fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.clear();
        self.applied = 0;

        log::trace!("History cleared");
        self.notify(ChangeKind::Clear, None);
        true
    }
    /// Call `listener` after every successful change. If `immediate`, it is also called right away with
    /// a [`ChangeKind::Snapshot`] of the current state.
    pub fn on_change<F>(&mut self, listener: F, immediate: bool) -> ListenerID
    where
        F: FnMut(&HistoryChange<P, M>) -> anyhow::Result<()> + 'static,
    {
        let id = ListenerID::default();
        let mut callback: listeners::Callback<P, M> = Box::new(listener);
        if immediate {
            let snapshot = self.change(ChangeKind::Snapshot, None);
            listeners::call_guarded(id, &mut callback, &snapshot);
        }
        self.listeners.insert(id, callback);
        id
    }
    /// Stop calling a listener. Returns false if it was already removed.
    pub fn remove_listener(&mut self, id: ListenerID) -> bool {
        self.listeners.remove(id)
    }
    /// Drop from the front until the limit is satisfied, returning how many were dropped.
    fn evict(&mut self) -> usize {
        let Some(max) = self.limit.get() else {
            return 0;
        };
        let excess = self.entries.len().saturating_sub(max);
        if excess != 0 {
            self.entries.drain(..excess);
            self.applied = self.applied.saturating_sub(excess);
        }
        excess
    }
    /// Now, but never before the newest entry.
    fn next_timestamp(&self) -> Timestamp {
        let now = chrono::Utc::now();
        self.entries
            .back()
            .map_or(now, |newest| now.max(newest.timestamp))
    }
    fn notify(&mut self, kind: ChangeKind, changed_entry: Option<Arc<HistoryEntry<P, M>>>) {
        self.version += 1;
        if self.listeners.is_empty() {
            return;
        }
        let change = self.change(kind, changed_entry);
        self.listeners.dispatch(&change);
    }
}

#[cfg(test)]
mod test {
    use super::{ChangeKind, EntryMeta, HistoryLimit, HistoryStack};
    use std::{cell::RefCell, num::NonZeroUsize, rc::Rc, sync::Arc};

    /// Record every change a stack reports as `(kind, version, cursor)`.
    fn record<P: 'static, M: 'static>(
        stack: &mut HistoryStack<P, M>,
        immediate: bool,
    ) -> Rc<RefCell<Vec<(ChangeKind, u64, Option<usize>)>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        stack.on_change(
            move |change| {
                sink.borrow_mut()
                    .push((change.kind, change.version, change.cursor));
                Ok(())
            },
            immediate,
        );
        seen
    }

    #[test]
    fn stroke_scenario() {
        use crate::{patch::Patch, util::Rect};
        let layer = crate::InkID::default();
        let patch = Patch::new(layer, Rect::new(0, 0, 4, 4), 1, vec![0; 16], vec![1; 16]).unwrap();

        let mut history = HistoryStack::<Patch>::new();
        let pushed = history
            .push(patch, EntryMeta::labeled("stroke-1"))
            .unwrap();
        assert_eq!(pushed.label(), Some("stroke-1"));
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let undone = history.undo().unwrap();
        assert!(Arc::ptr_eq(&undone, pushed.patch()));
        assert_eq!(undone.after(), &[1; 16]);
        assert_eq!(history.cursor(), None);

        let redone = history.redo().unwrap();
        assert!(Arc::ptr_eq(&redone, &undone));
        assert_eq!(history.cursor(), Some(0));

        assert_eq!(history.set_limit(0), HistoryLimit::Unbounded);
        assert_eq!(history.limit(), HistoryLimit::Unbounded);
        assert_eq!(history.len(), 1);
    }
    #[test]
    fn round_trip_keeps_cursor() {
        let mut history = HistoryStack::<u32>::new();
        for i in 0..5 {
            history.push(i, EntryMeta::new());
            let before = history.cursor();
            let undone = history.undo().unwrap();
            let redone = history.redo().unwrap();
            assert!(Arc::ptr_eq(&undone, &redone));
            assert_eq!(*redone, i);
            assert_eq!(history.cursor(), before);
        }
    }
    #[test]
    fn push_discards_redo_branch() {
        let mut history = HistoryStack::<&str>::new();
        history.push("p1", EntryMeta::new());
        history.push("p2", EntryMeta::new());
        assert_eq!(history.undo().as_deref(), Some(&"p2"));
        history.push("p3", EntryMeta::new());

        assert!(!history.can_redo());
        assert_eq!(**history.peek_undo().unwrap().patch(), "p3");
        assert_eq!(history.len(), 2);
        let all: Vec<&str> = history.entries().map(|entry| **entry.patch()).collect();
        assert_eq!(all, ["p1", "p3"]);
    }
    #[test]
    fn boundaries_are_silent() {
        let mut history = HistoryStack::<u8>::new();
        let seen = record(&mut history, false);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.push(None, EntryMeta::new()).is_none());
        assert!(history.replace_top(1, EntryMeta::new()).is_none());
        assert!(history.update_top_metadata(EntryMeta::labeled("x")).is_none());
        assert!(!history.clear());
        assert_eq!(history.version(), 0);
        assert!(seen.borrow().is_empty());

        history.push(1, EntryMeta::new());
        assert!(history.redo().is_none());
        assert!(history.replace_top(None, EntryMeta::new()).is_none());
        assert_eq!(history.version(), 1);
    }
    #[test]
    fn eviction_keeps_newest_in_order() {
        let mut history = HistoryStack::<usize>::with_limit(HistoryLimit::from_requested(3));
        for i in 0..10 {
            history.push(i, EntryMeta::new());
            assert!(history.len() <= 3);
        }
        let kept: Vec<usize> = history.entries().map(|entry| **entry.patch()).collect();
        assert_eq!(kept, [7, 8, 9]);
        assert_eq!(history.cursor(), Some(2));
    }
    #[test]
    fn set_limit_evicts_immediately() {
        let mut history = HistoryStack::<usize>::new();
        for i in 0..6 {
            history.push(i, EntryMeta::new());
        }
        // Undo down to entry 1 applied.
        for _ in 0..4 {
            history.undo();
        }
        assert_eq!(history.cursor(), Some(1));

        let seen = record(&mut history, false);
        assert_eq!(
            history.set_limit(3),
            HistoryLimit::Entries(NonZeroUsize::new(3).unwrap())
        );
        let kept: Vec<usize> = history.entries().map(|entry| **entry.patch()).collect();
        assert_eq!(kept, [3, 4, 5]);
        // Cursor clamps to "nothing applied".
        assert_eq!(history.cursor(), None);
        assert!(history.can_redo());
        assert_eq!(seen.borrow().as_slice(), &[(ChangeKind::Limit, 11, None)]);

        // Same limit again is not a change.
        history.set_limit(3);
        assert_eq!(seen.borrow().len(), 1);
        // Negative normalizes to unbounded.
        assert_eq!(history.set_limit(-5), HistoryLimit::Unbounded);
        assert_eq!(seen.borrow().len(), 2);
    }
    #[test]
    fn replace_inherits_meta() {
        let mut history = HistoryStack::<u8, String>::new();
        let stamp = chrono::DateTime::from_timestamp(1_000, 0).unwrap();
        let original = history
            .push(
                1,
                EntryMeta::labeled("fill")
                    .metadata("tool=bucket".to_owned())
                    .timestamp(stamp),
            )
            .unwrap();

        let replaced = history.replace_top(2, EntryMeta::new()).unwrap();
        assert_eq!(**replaced.patch(), 2);
        assert_eq!(replaced.label(), Some("fill"));
        assert_eq!(replaced.metadata().map(|m| m.as_str()), Some("tool=bucket"));
        assert_eq!(replaced.timestamp(), stamp);
        // The old snapshot is untouched.
        assert_eq!(**original.patch(), 1);
        assert!(Arc::ptr_eq(&history.peek_undo().unwrap(), &replaced));

        let relabeled = history
            .replace_top(3, EntryMeta::labeled("fill 2"))
            .unwrap();
        assert_eq!(relabeled.label(), Some("fill 2"));
        assert_eq!(relabeled.metadata().map(|m| m.as_str()), Some("tool=bucket"));
        assert_eq!(history.len(), 1);
    }
    #[test]
    fn metadata_updates_keep_patch() {
        let mut history = HistoryStack::<u8, u32>::new();
        let pushed = history.push(9, EntryMeta::labeled("a").metadata(1)).unwrap();
        let seen = record(&mut history, false);

        let updated = history
            .update_top_metadata(EntryMeta::new().metadata(2))
            .unwrap();
        assert!(Arc::ptr_eq(updated.patch(), pushed.patch()));
        assert_eq!(updated.label(), Some("a"));
        assert_eq!(updated.metadata().map(|m| **m), Some(2));
        assert_eq!(updated.timestamp(), pushed.timestamp());

        let cleared = history
            .update_top_with(|meta| {
                meta.label = None;
                meta.metadata = meta.metadata.as_ref().map(|m| Arc::new(**m + 40));
            })
            .unwrap();
        assert_eq!(cleared.label(), None);
        assert_eq!(cleared.metadata().map(|m| **m), Some(42));
        assert_eq!(cleared.timestamp(), pushed.timestamp());
        // Snapshots handed out earlier never change.
        assert_eq!(pushed.label(), Some("a"));
        assert_eq!(pushed.metadata().map(|m| **m), Some(1));

        let kinds: Vec<ChangeKind> = seen.borrow().iter().map(|(kind, ..)| *kind).collect();
        assert_eq!(kinds, [ChangeKind::Metadata, ChangeKind::Metadata]);
    }
    #[test]
    fn timestamps_non_decreasing() {
        let mut history = HistoryStack::<u8>::new();
        let future = chrono::Utc::now() + chrono::Duration::hours(1);
        history.push(0, EntryMeta::new().timestamp(future));
        // Defaulted stamp can't be before the explicit future one.
        let next = history.push(1, EntryMeta::new()).unwrap();
        assert!(next.timestamp() >= future);
        // But an explicit one is taken as-is.
        let past = chrono::DateTime::from_timestamp(0, 0).unwrap();
        let explicit = history.push(2, EntryMeta::new().timestamp(past)).unwrap();
        assert_eq!(explicit.timestamp(), past);
    }
    #[test]
    fn notifications_and_versions() {
        let mut history = HistoryStack::<u8>::new();
        history.push(1, EntryMeta::new());
        let seen = record(&mut history, true);
        history.push(2, EntryMeta::new());
        history.undo();
        history.redo();
        history.clear();
        assert_eq!(
            seen.borrow().as_slice(),
            &[
                (ChangeKind::Snapshot, 1, Some(0)),
                (ChangeKind::Push, 2, Some(1)),
                (ChangeKind::Undo, 3, Some(0)),
                (ChangeKind::Redo, 4, Some(1)),
                (ChangeKind::Clear, 5, None),
            ]
        );
    }
    #[test]
    fn change_payload() {
        let mut history = HistoryStack::<u8>::new();
        let last = Rc::new(RefCell::new(None));
        let sink = last.clone();
        history.on_change(
            move |change| {
                *sink.borrow_mut() = Some((
                    change.size,
                    change.can_undo,
                    change.can_redo,
                    change.undo_peek.as_ref().map(|entry| **entry.patch()),
                    change.redo_peek.as_ref().map(|entry| **entry.patch()),
                    change.changed_entry.as_ref().map(|entry| **entry.patch()),
                ));
                Ok(())
            },
            false,
        );
        history.push(1, EntryMeta::new());
        history.push(2, EntryMeta::new());
        history.undo();
        assert_eq!(
            *last.borrow(),
            Some((2, true, true, Some(1), Some(2), Some(2)))
        );
    }
    #[test]
    fn failing_listener_is_isolated() {
        let mut history = HistoryStack::<u8>::new();
        history.on_change(|_| anyhow::bail!("broken panel"), true);
        let seen = record(&mut history, false);
        assert!(history.push(1, EntryMeta::new()).is_some());
        assert!(history.undo().is_some());
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(history.cursor(), None);
    }
    #[test]
    fn unsubscribe() {
        let mut history = HistoryStack::<u8>::new();
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let id = history.on_change(
            move |_| {
                *sink.borrow_mut() += 1;
                Ok(())
            },
            false,
        );
        history.push(1, EntryMeta::new());
        assert!(history.remove_listener(id));
        history.push(2, EntryMeta::new());
        assert_eq!(*count.borrow(), 1);
        // Still versioned without listeners.
        assert_eq!(history.version(), 2);
    }
}
