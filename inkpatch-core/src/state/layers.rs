//! # Layers
//!
//! In-memory raster layers. This is the simplest possible [`PixelBuffer`] - every layer is one contiguous,
//! tightly packed, row-major allocation.

use super::LayerID;
use crate::{
    pixels::{self, BufferError, LayerBounds, PixelBuffer},
    util::Rect,
};

#[derive(Clone)]
pub struct RasterLayer {
    bounds: LayerBounds,
    data: Vec<u8>,
}
impl RasterLayer {
    /// A layer of all-zero bytes.
    pub fn new(width: u32, height: u32, bytes_per_pixel: u32) -> Result<Self, BufferError> {
        if bytes_per_pixel == 0 {
            return Err(BufferError::ZeroBytesPerPixel);
        }
        Ok(Self::blank(LayerBounds {
            width,
            height,
            bytes_per_pixel,
        }))
    }
    fn blank(bounds: LayerBounds) -> Self {
        Self {
            data: vec![0; bounds.layer_len()],
            bounds,
        }
    }
    #[must_use]
    pub fn bounds(&self) -> LayerBounds {
        self.bounds
    }
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Layers by ID, in creation order.
#[derive(Clone, Default)]
pub struct LayerStore {
    layers: hashbrown::HashMap<LayerID, RasterLayer>,
    order: Vec<LayerID>,
}
impl LayerStore {
    /// Create a blank layer, returning its new ID.
    pub fn insert(
        &mut self,
        width: u32,
        height: u32,
        bytes_per_pixel: u32,
    ) -> Result<LayerID, BufferError> {
        let layer = RasterLayer::new(width, height, bytes_per_pixel)?;
        let id = LayerID::default();
        self.layers.insert(id, layer);
        self.order.push(id);
        Ok(id)
    }
    /// Remove a layer, returning it if it existed.
    pub fn remove(&mut self, id: LayerID) -> Option<RasterLayer> {
        let layer = self.layers.remove(&id)?;
        self.order.retain(|&other| other != id);
        Some(layer)
    }
    /// Resize a layer, keeping the overlapping top-left pixels and zeroing the rest.
    /// Returns false if the layer doesn't exist.
    pub fn resize(&mut self, id: LayerID, width: u32, height: u32) -> bool {
        let Some(layer) = self.layers.get_mut(&id) else {
            return false;
        };
        let mut resized = RasterLayer::blank(LayerBounds {
            width,
            height,
            ..layer.bounds
        });
        if let Some(keep) = layer.bounds.rect().clamp_to(width, height) {
            // `keep` lies within both layers.
            let copied = pixels::crop(&layer.bounds, &layer.data, keep).and_then(|bytes| {
                pixels::paste(&resized.bounds, &mut resized.data, keep, &bytes)
            });
            debug_assert!(copied.is_ok(), "resize copy failed: {copied:?}");
        }
        *layer = resized;
        true
    }
    #[must_use]
    pub fn get(&self, id: LayerID) -> Option<&RasterLayer> {
        self.layers.get(&id)
    }
    /// IDs of every layer, oldest first.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = LayerID> + '_ {
        self.order.iter().copied()
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    /// Bytes held by all layers.
    #[must_use]
    pub fn resident_bytes(&self) -> usize {
        self.layers.values().map(|layer| layer.data.len()).sum()
    }
}
impl PixelBuffer for LayerStore {
    fn layer_bounds(&self, layer: LayerID) -> Option<LayerBounds> {
        self.layers.get(&layer).map(RasterLayer::bounds)
    }
    fn read_region(&self, layer: LayerID, rect: Rect) -> Result<Vec<u8>, BufferError> {
        let raster = self
            .layers
            .get(&layer)
            .ok_or(BufferError::UnknownLayer(layer))?;
        pixels::crop(&raster.bounds, &raster.data, rect)
    }
    fn write_region(
        &mut self,
        layer: LayerID,
        rect: Rect,
        bytes: &[u8],
    ) -> Result<(), BufferError> {
        let raster = self
            .layers
            .get_mut(&layer)
            .ok_or(BufferError::UnknownLayer(layer))?;
        pixels::paste(&raster.bounds, &mut raster.data, rect, bytes)
    }
}
