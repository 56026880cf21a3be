//! # Patches
//!
//! A [`Patch`] is the reversible record of one gesture: the dirty rectangle of a single layer, along with
//! the bytes of that rectangle before and after the gesture. Patches are built by the
//! [`gesture::DirtyRegionAccumulator`] and replayed onto pixels by the [`player::PatchPlayer`].

pub mod gesture;
pub mod player;

pub use gesture::{DirtyRegionAccumulator, GestureError};
pub use player::PatchPlayer;

use crate::{state::LayerID, util::Rect};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PatchError {
    #[error("patch rect {} is empty", .0)]
    EmptyRect(Rect),
    #[error("patch data must be {} bytes, got {} before and {} after", .expected, .before, .after)]
    LengthMismatch {
        expected: usize,
        before: usize,
        after: usize,
    },
    #[error("bytes per pixel must be nonzero")]
    ZeroBytesPerPixel,
}

/// Which side of a patch to project onto the pixels.
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum::AsRefStr)]
pub enum Direction {
    /// State before the gesture. Written on undo.
    Before,
    /// State after the gesture. Written on redo.
    After,
}
impl Direction {
    #[must_use]
    pub fn for_undo() -> Self {
        Self::Before
    }
    #[must_use]
    pub fn for_redo() -> Self {
        Self::After
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Patch {
    layer: LayerID,
    rect: Rect,
    bytes_per_pixel: u32,
    before: Box<[u8]>,
    after: Box<[u8]>,
}
impl Patch {
    /// Build a patch, checking that both sides exactly cover `rect`.
    pub fn new(
        layer: LayerID,
        rect: Rect,
        bytes_per_pixel: u32,
        before: impl Into<Box<[u8]>>,
        after: impl Into<Box<[u8]>>,
    ) -> Result<Self, PatchError> {
        if rect.is_empty() {
            return Err(PatchError::EmptyRect(rect));
        }
        if bytes_per_pixel == 0 {
            return Err(PatchError::ZeroBytesPerPixel);
        }
        let (before, after) = (before.into(), after.into());
        let expected = rect.area().saturating_mul(bytes_per_pixel as usize);
        if before.len() != expected || after.len() != expected {
            return Err(PatchError::LengthMismatch {
                expected,
                before: before.len(),
                after: after.len(),
            });
        }
        Ok(Self {
            layer,
            rect,
            bytes_per_pixel,
            before,
            after,
        })
    }
    #[must_use]
    pub fn layer(&self) -> LayerID {
        self.layer
    }
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
    #[must_use]
    pub fn bytes_per_pixel(&self) -> u32 {
        self.bytes_per_pixel
    }
    #[must_use]
    pub fn before(&self) -> &[u8] {
        &self.before
    }
    #[must_use]
    pub fn after(&self) -> &[u8] {
        &self.after
    }
    /// The bytes for one side of the patch.
    #[must_use]
    pub fn side(&self, direction: Direction) -> &[u8] {
        match direction {
            Direction::Before => &self.before,
            Direction::After => &self.after,
        }
    }
    /// Heap footprint of the pixel data.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.before.len() + self.after.len()
    }
    /// The gesture touched pixels without changing any of them.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}
// Don't dump megabytes of pixels into the logs.
impl std::fmt::Debug for Patch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Patch")
            .field("layer", &self.layer)
            .field("rect", &self.rect)
            .field("bytes_per_pixel", &self.bytes_per_pixel)
            .field("size", &human_bytes::human_bytes(self.size_bytes() as f64))
            .finish_non_exhaustive()
    }
}
