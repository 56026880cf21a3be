use super::{PenTool, ToolError};
use inkpatch_core::{pixels::PixelBuffer, state::DocumentSession, util::Rect};

/// Flood a rectangle with `color`. Parts outside the layer are ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct Fill {
    pub rect: Rect,
    pub color: Vec<u8>,
}
impl PenTool for Fill {
    fn apply(&self, session: &mut DocumentSession) -> Result<(), ToolError> {
        let (layer, bounds) = super::target(session, &self.color)?;
        if let Some(rect) = self.rect.clamp_to(bounds.width, bounds.height) {
            let region = self.color.repeat(rect.area());
            session.pixels_mut().write_region(layer, rect, &region)?;
        }
        let Rect { x, y, w, h } = self.rect;
        session.touch_rect(x, y, w, h)?;
        Ok(())
    }
}
