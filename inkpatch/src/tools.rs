//! # Tools
//!
//! Tools draw straight into the layer of the open gesture, then report what they touched so the
//! gesture can record it. They never talk to the history directly.

mod brush;
mod fill;

pub use brush::Dab;
pub use fill::Fill;

use inkpatch_core::{
    pixels::{BufferError, LayerBounds, PixelBuffer},
    state::{DocumentSession, LayerID, SessionError},
};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ToolError {
    #[error("tool used with no gesture in progress")]
    NoGesture,
    #[error("color has {} bytes, layer stores {} per pixel", .actual, .expected)]
    ColorFormat { expected: usize, actual: usize },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

pub trait PenTool {
    /// Draw into the layer of the session's current gesture.
    fn apply(&self, session: &mut DocumentSession) -> Result<(), ToolError>;
}

/// The layer of the open gesture, checking that `color` is one of its pixels.
fn target(session: &DocumentSession, color: &[u8]) -> Result<(LayerID, LayerBounds), ToolError> {
    let layer = session
        .gesture()
        .map(|gesture| gesture.layer())
        .ok_or(ToolError::NoGesture)?;
    let bounds = session
        .layers()
        .layer_bounds(layer)
        .ok_or(BufferError::UnknownLayer(layer))?;
    if bounds.bytes_per_pixel == 0 {
        return Err(BufferError::ZeroBytesPerPixel.into());
    }
    if color.len() != bounds.bytes_per_pixel as usize {
        return Err(ToolError::ColorFormat {
            expected: bounds.bytes_per_pixel as usize,
            actual: color.len(),
        });
    }
    Ok((layer, bounds))
}
