//! # Pixels
//!
//! The seam between history and whatever actually stores layer pixels. History never interprets
//! pixel bytes, it only moves rectangular regions of them in and out. Regions are always tightly packed,
//! row-major, `bytes_per_pixel` bytes per sample.

use crate::{state::LayerID, util::Rect};

/// Size and sample format of a layer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LayerBounds {
    pub width: u32,
    pub height: u32,
    pub bytes_per_pixel: u32,
}
impl LayerBounds {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
    /// Number of bytes a region of `rect` occupies in this format.
    #[must_use]
    pub fn region_len(&self, rect: Rect) -> usize {
        rect.area().saturating_mul(self.bytes_per_pixel as usize)
    }
    /// Bytes of the whole layer.
    #[must_use]
    pub fn layer_len(&self) -> usize {
        self.region_len(self.rect())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    #[error("layer {} is unknown", .0)]
    UnknownLayer(LayerID),
    #[error("region {} is empty or not within the {}x{} layer", .rect, .width, .height)]
    OutOfBounds { rect: Rect, width: u32, height: u32 },
    #[error("expected {} bytes for region, got {}", .expected, .actual)]
    LengthMismatch { expected: usize, actual: usize },
    #[error("layers must store at least one byte per pixel")]
    ZeroBytesPerPixel,
}

/// Storage for the pixels of many layers.
pub trait PixelBuffer {
    /// Size and format of the layer, or `None` if it doesn't exist.
    fn layer_bounds(&self, layer: LayerID) -> Option<LayerBounds>;
    /// Copy out the bytes of `rect`, which must lie entirely within the layer.
    fn read_region(&self, layer: LayerID, rect: Rect) -> Result<Vec<u8>, BufferError>;
    /// Overwrite the bytes of `rect`, which must lie entirely within the layer.
    /// `bytes` must be exactly as long as [`LayerBounds::region_len`].
    fn write_region(&mut self, layer: LayerID, rect: Rect, bytes: &[u8])
        -> Result<(), BufferError>;
}
impl<Buffer: PixelBuffer + ?Sized> PixelBuffer for &mut Buffer {
    fn layer_bounds(&self, layer: LayerID) -> Option<LayerBounds> {
        (**self).layer_bounds(layer)
    }
    fn read_region(&self, layer: LayerID, rect: Rect) -> Result<Vec<u8>, BufferError> {
        (**self).read_region(layer, rect)
    }
    fn write_region(
        &mut self,
        layer: LayerID,
        rect: Rect,
        bytes: &[u8],
    ) -> Result<(), BufferError> {
        (**self).write_region(layer, rect, bytes)
    }
}

/// Check `rect` against the layer, for implementors of [`PixelBuffer`].
pub fn check_region(bounds: &LayerBounds, rect: Rect) -> Result<(), BufferError> {
    if rect.is_empty() || rect.x < 0 || rect.y < 0 || !bounds.rect().contains(&rect) {
        Err(BufferError::OutOfBounds {
            rect,
            width: bounds.width,
            height: bounds.height,
        })
    } else {
        Ok(())
    }
}

/// Copy `rect` out of a whole-layer byte grid described by `bounds`.
///
/// `layer` must be exactly [`LayerBounds::layer_len`] bytes long.
pub fn crop(bounds: &LayerBounds, layer: &[u8], rect: Rect) -> Result<Vec<u8>, BufferError> {
    check_region(bounds, rect)?;
    if layer.len() != bounds.layer_len() {
        return Err(BufferError::LengthMismatch {
            expected: bounds.layer_len(),
            actual: layer.len(),
        });
    }
    let bpp = bounds.bytes_per_pixel as usize;
    let stride = bounds.width as usize * bpp;
    // Non-negative, checked above.
    let (x, y, w, h) = (rect.x as usize, rect.y as usize, rect.w as usize, rect.h as usize);
    let row_len = w * bpp;

    let mut out = Vec::with_capacity(row_len * h);
    for row in y..y + h {
        let start = row * stride + x * bpp;
        out.extend_from_slice(&layer[start..start + row_len]);
    }
    Ok(out)
}

/// Paste `bytes` into `rect` of a whole-layer byte grid. Inverse of [`crop`].
pub fn paste(
    bounds: &LayerBounds,
    layer: &mut [u8],
    rect: Rect,
    bytes: &[u8],
) -> Result<(), BufferError> {
    check_region(bounds, rect)?;
    let expected = bounds.region_len(rect);
    if bytes.len() != expected {
        return Err(BufferError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    if layer.len() != bounds.layer_len() {
        return Err(BufferError::LengthMismatch {
            expected: bounds.layer_len(),
            actual: layer.len(),
        });
    }
    let bpp = bounds.bytes_per_pixel as usize;
    let stride = bounds.width as usize * bpp;
    let (x, y, w) = (rect.x as usize, rect.y as usize, rect.w as usize);
    let row_len = w * bpp;

    for (row_idx, row) in bytes.chunks_exact(row_len).enumerate() {
        let start = (y + row_idx) * stride + x * bpp;
        layer[start..start + row_len].copy_from_slice(row);
    }
    Ok(())
}
