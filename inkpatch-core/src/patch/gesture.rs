//! # Gestures
//!
//! Collects the dirty region of one continuous edit (pointer down to pointer up) and turns it into a [`Patch`].
//!
//! The whole target layer is snapshotted when the gesture begins, since the final dirty rect isn't known until
//! it ends. Only the dirty rect is kept in the resulting patch. The "before" side always comes from the snapshot -
//! by the time the gesture ends, the live pixels already hold the edit.

use super::{Patch, PatchError};
use crate::{
    pixels::{BufferError, LayerBounds, PixelBuffer},
    state::LayerID,
    util::Rect,
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GestureError {
    #[error("layer {} is unknown", .0)]
    UnknownLayer(LayerID),
    #[error("layer {} was resized during the gesture", .0)]
    LayerResized(LayerID),
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// State of one in-progress gesture.
///
/// Created by [`Self::begin`], and consumed by one of [`Self::end`], [`Self::cancel`], or [`Self::revert`].
pub struct DirtyRegionAccumulator {
    layer: LayerID,
    bounds: LayerBounds,
    /// Whole-layer copy as of [`Self::begin`].
    snapshot: Vec<u8>,
    /// Union of every touch so far, always within `bounds`. None if nothing has been touched.
    dirty: Option<Rect>,
    touches: usize,
}
impl DirtyRegionAccumulator {
    /// Start a gesture on `layer`, snapshotting all of its pixels.
    pub fn begin(pixels: &impl PixelBuffer, layer: LayerID) -> Result<Self, GestureError> {
        let bounds = pixels
            .layer_bounds(layer)
            .ok_or(GestureError::UnknownLayer(layer))?;
        let snapshot = if bounds.rect().is_empty() {
            // Zero-sized layer, every touch will clamp away to nothing anyway.
            Vec::new()
        } else {
            pixels.read_region(layer, bounds.rect())?
        };
        log::debug!(
            "Gesture began on {layer}, snapshot {}",
            human_bytes::human_bytes(snapshot.len() as f64)
        );
        Ok(Self {
            layer,
            bounds,
            snapshot,
            dirty: None,
            touches: 0,
        })
    }
    #[must_use]
    pub fn layer(&self) -> LayerID {
        self.layer
    }
    /// The bounding rect of all touches so far, clamped to the layer.
    #[must_use]
    pub fn dirty_rect(&self) -> Option<Rect> {
        self.dirty
    }
    /// Number of touches which landed on the layer.
    #[must_use]
    pub fn touches(&self) -> usize {
        self.touches
    }
    /// Report that the pixels of the given rect may have changed.
    ///
    /// Out-of-layer portions are clipped off. Rects with no extent, or entirely off the layer, are ignored.
    pub fn expand_by_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let Some(clamped) = Rect::new(x, y, w, h).clamp_to(self.bounds.width, self.bounds.height)
        else {
            return;
        };
        self.touches += 1;
        self.dirty = Some(match self.dirty {
            None => clamped,
            Some(dirty) => dirty.union(&clamped),
        });
    }
    /// Report a round mark of `radius` at the given point.
    ///
    /// Covers a margin of twice the radius on every side, to catch antialiasing and feathering.
    pub fn expand_by_point(&mut self, x: f32, y: f32, radius: f32) {
        if !(radius.is_finite() && radius >= 0.0) {
            return;
        }
        let margin = radius * 2.0;
        let Some(rect) = Rect::from_float_bounds([x - margin, y - margin], [x + margin, y + margin])
        else {
            return;
        };
        self.expand_by_rect(rect.x, rect.y, rect.w, rect.h);
    }
    /// Finish the gesture, reading the final state of the dirty rect from `pixels`.
    ///
    /// Returns `Ok(None)` if nothing was touched.
    pub fn end(self, pixels: &impl PixelBuffer) -> Result<Option<Patch>, GestureError> {
        let Some(dirty) = self.dirty else {
            log::debug!("Gesture on {} ended without touches", self.layer);
            return Ok(None);
        };
        let now_bounds = pixels
            .layer_bounds(self.layer)
            .ok_or(GestureError::UnknownLayer(self.layer))?;
        if now_bounds != self.bounds {
            return Err(GestureError::LayerResized(self.layer));
        }

        let after = pixels.read_region(self.layer, dirty)?;
        let before = crate::pixels::crop(&self.bounds, &self.snapshot, dirty)?;
        let patch = Patch::new(
            self.layer,
            dirty,
            self.bounds.bytes_per_pixel,
            before,
            after,
        )?;
        log::debug!(
            "Gesture on {} ended, dirty {dirty} over {} touches ({})",
            self.layer,
            self.touches,
            human_bytes::human_bytes(patch.size_bytes() as f64)
        );
        Ok(Some(patch))
    }
    /// Abandon the gesture. Nothing is recorded, and the pixels are left as they are.
    pub fn cancel(self) {
        log::debug!("Gesture on {} cancelled", self.layer);
    }
    /// Abandon the gesture, writing the snapshot back over everything it touched.
    pub fn revert(self, pixels: &mut impl PixelBuffer) -> Result<(), GestureError> {
        if let Some(dirty) = self.dirty {
            if pixels.layer_bounds(self.layer) != Some(self.bounds) {
                return Err(GestureError::LayerResized(self.layer));
            }
            let before = crate::pixels::crop(&self.bounds, &self.snapshot, dirty)?;
            pixels.write_region(self.layer, dirty, &before)?;
        }
        log::debug!("Gesture on {} reverted", self.layer);
        Ok(())
    }
}
