//! # Document sessions
//!
//! A session is one open document: its layers, its history, and the gesture currently being drawn, if any.
//! Tools are handed the session rather than reaching for global state, so any number of documents may be open.

use std::sync::Arc;

use super::{layers::LayerStore, DocumentID, LayerID};
use crate::{
    history::{EntryMeta, HistoryEntry, HistoryLimit, HistoryStack},
    patch::{Direction, DirtyRegionAccumulator, GestureError, Patch, PatchPlayer},
    pixels::BufferError,
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no gesture in progress")]
    NoGesture,
    #[error(transparent)]
    Gesture(#[from] GestureError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Recorded alongside every gesture in the history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GestureSummary {
    /// How many marks the tool reported over the course of the gesture.
    pub touches: usize,
}

pub type DocumentHistory = HistoryStack<Patch, GestureSummary>;
pub type DocumentEntry = HistoryEntry<Patch, GestureSummary>;

pub struct DocumentSession {
    id: DocumentID,
    /// Name of the document, shown to the user.
    pub name: String,
    layers: LayerStore,
    history: DocumentHistory,
    gesture: Option<DirtyRegionAccumulator>,
}
impl Default for DocumentSession {
    fn default() -> Self {
        Self::new("New Document", HistoryLimit::Unbounded)
    }
}
impl DocumentSession {
    #[must_use]
    pub fn new(name: impl Into<String>, limit: HistoryLimit) -> Self {
        Self {
            id: DocumentID::default(),
            name: name.into(),
            layers: LayerStore::default(),
            history: DocumentHistory::with_limit(limit),
            gesture: None,
        }
    }
    #[must_use]
    pub fn id(&self) -> DocumentID {
        self.id
    }
    #[must_use]
    pub fn layers(&self) -> &LayerStore {
        &self.layers
    }
    /// Direct access to the pixels, for tools to draw into during a gesture.
    ///
    /// Changes made outside of a gesture are not recorded!
    pub fn pixels_mut(&mut self) -> &mut LayerStore {
        &mut self.layers
    }
    /// Add a blank layer. Layer creation is not itself an undoable change.
    pub fn add_layer(
        &mut self,
        width: u32,
        height: u32,
        bytes_per_pixel: u32,
    ) -> Result<LayerID, SessionError> {
        Ok(self.layers.insert(width, height, bytes_per_pixel)?)
    }
    #[must_use]
    pub fn history(&self) -> &DocumentHistory {
        &self.history
    }
    /// Access to the history for listeners, limits, and metadata edits.
    ///
    /// Pushing, undoing, or redoing through this bypasses the pixels - prefer the session's own methods for those.
    pub fn history_mut(&mut self) -> &mut DocumentHistory {
        &mut self.history
    }
    /// The gesture in progress, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&DirtyRegionAccumulator> {
        self.gesture.as_ref()
    }
    /// Heap used by every patch in the history.
    #[must_use]
    pub fn history_bytes(&self) -> usize {
        self.history
            .entries()
            .map(|entry| entry.patch().size_bytes())
            .sum()
    }

    /// Start drawing on `layer`. A gesture already in progress is cancelled first.
    pub fn begin_gesture(&mut self, layer: LayerID) -> Result<(), SessionError> {
        if self.gesture.is_some() {
            log::warn!("Gesture began while another was in progress, cancelling the old one");
            self.cancel_gesture()?;
        }
        self.gesture = Some(DirtyRegionAccumulator::begin(&self.layers, layer)?);
        Ok(())
    }
    /// Report a rectangle touched by the current gesture.
    pub fn touch_rect(&mut self, x: i32, y: i32, w: i32, h: i32) -> Result<(), SessionError> {
        self.gesture
            .as_mut()
            .ok_or(SessionError::NoGesture)?
            .expand_by_rect(x, y, w, h);
        Ok(())
    }
    /// Report a round mark touched by the current gesture.
    pub fn touch_point(&mut self, x: f32, y: f32, radius: f32) -> Result<(), SessionError> {
        self.gesture
            .as_mut()
            .ok_or(SessionError::NoGesture)?
            .expand_by_point(x, y, radius);
        Ok(())
    }
    /// Finish the current gesture and record it.
    ///
    /// Returns the new history entry, or `None` if the gesture touched nothing.
    pub fn end_gesture(
        &mut self,
        label: Option<String>,
    ) -> Result<Option<Arc<DocumentEntry>>, SessionError> {
        let gesture = self.gesture.take().ok_or(SessionError::NoGesture)?;
        let touches = gesture.touches();
        let Some(patch) = gesture.end(&self.layers)? else {
            return Ok(None);
        };
        let meta = EntryMeta {
            label,
            ..EntryMeta::new()
        }
        .metadata(GestureSummary { touches });
        let entry = self.history.push(patch, meta);
        log::debug!(
            "{}: {} entries, {} of patches",
            self.name,
            self.history.len(),
            human_bytes::human_bytes(self.history_bytes() as f64)
        );
        Ok(entry)
    }
    /// Abandon the current gesture, restoring the pixels it touched.
    ///
    /// Returns false if there was no gesture.
    pub fn cancel_gesture(&mut self) -> Result<bool, SessionError> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(false);
        };
        gesture.revert(&mut self.layers)?;
        Ok(true)
    }
    /// Undo the most recent change, restoring its pixels.
    ///
    /// Returns false if there was nothing to undo. A gesture in progress is cancelled first.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        self.replay(Direction::for_undo())
    }
    /// Redo the most recently undone change.
    ///
    /// Returns false if there was nothing to redo. A gesture in progress is cancelled first.
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        self.replay(Direction::for_redo())
    }
    fn replay(&mut self, direction: Direction) -> Result<bool, SessionError> {
        if self.gesture.is_some() {
            log::warn!("History navigation during a gesture, cancelling the gesture");
            self.cancel_gesture()?;
        }
        let entry = match direction {
            Direction::Before => self.history.peek_undo(),
            Direction::After => self.history.peek_redo(),
        };
        let Some(entry) = entry else {
            return Ok(false);
        };
        // Pixels first, so a failed write leaves the cursor where it was.
        PatchPlayer::apply(&mut self.layers, entry.patch(), direction)?;
        match direction {
            Direction::Before => self.history.undo(),
            Direction::After => self.history.redo(),
        };
        Ok(true)
    }
}
