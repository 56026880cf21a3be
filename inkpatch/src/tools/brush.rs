use super::{PenTool, ToolError};
use inkpatch_core::{pixels::PixelBuffer, state::DocumentSession, util::Rect};

/// A single hard round dab. Pixels whose centers fall within `radius` take on `color`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dab {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Vec<u8>,
}
impl PenTool for Dab {
    fn apply(&self, session: &mut DocumentSession) -> Result<(), ToolError> {
        let (layer, bounds) = super::target(session, &self.color)?;
        let Self {
            x,
            y,
            radius,
            ref color,
        } = *self;

        let covered = if radius.is_finite() && radius > 0.0 {
            Rect::from_float_bounds([x - radius, y - radius], [x + radius, y + radius])
                .and_then(|rect| rect.clamp_to(bounds.width, bounds.height))
        } else {
            None
        };
        if let Some(rect) = covered {
            let pixels = session.pixels_mut();
            let mut region = pixels.read_region(layer, rect)?;
            let stride = color.len();
            let radius_sq = radius * radius;
            // Clamped rects are never empty.
            let width = rect.w as usize;
            for (idx, pixel) in region.chunks_exact_mut(stride).enumerate() {
                let px = rect.x as f32 + (idx % width) as f32 + 0.5;
                let py = rect.y as f32 + (idx / width) as f32 + 0.5;
                let (dx, dy) = (px - x, py - y);
                if dx * dx + dy * dy <= radius_sq {
                    pixel.copy_from_slice(color);
                }
            }
            pixels.write_region(layer, rect, &region)?;
        }
        session.touch_point(x, y, radius)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::Dab;
    use crate::tools::{PenTool, ToolError};
    use inkpatch_core::{history::HistoryLimit, state::DocumentSession};

    #[test]
    fn paints_disc() {
        let mut session = DocumentSession::new("dab", HistoryLimit::Unbounded);
        let layer = session.add_layer(5, 5, 1).unwrap();
        session.begin_gesture(layer).unwrap();
        Dab {
            x: 2.5,
            y: 2.5,
            radius: 1.0,
            color: vec![7],
        }
        .apply(&mut session)
        .unwrap();
        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 0, 0,
            0, 0, 7, 0, 0,
            0, 7, 7, 7, 0,
            0, 0, 7, 0, 0,
            0, 0, 0, 0, 0,
        ];
        assert_eq!(session.layers().get(layer).unwrap().bytes(), &expected);
        assert_eq!(session.gesture().unwrap().touches(), 1);
    }
    #[test]
    fn needs_gesture_and_matching_color() {
        let mut session = DocumentSession::default();
        let layer = session.add_layer(4, 4, 4).unwrap();
        let dab = Dab {
            x: 1.0,
            y: 1.0,
            radius: 1.0,
            color: vec![1, 2, 3],
        };
        assert_eq!(dab.apply(&mut session), Err(ToolError::NoGesture));
        session.begin_gesture(layer).unwrap();
        assert_eq!(
            dab.apply(&mut session),
            Err(ToolError::ColorFormat {
                expected: 4,
                actual: 3
            })
        );
    }
    #[test]
    fn off_canvas_paints_nothing() {
        let mut session = DocumentSession::default();
        let layer = session.add_layer(4, 4, 1).unwrap();
        session.begin_gesture(layer).unwrap();
        Dab {
            x: -20.0,
            y: 2.0,
            radius: 2.0,
            color: vec![1],
        }
        .apply(&mut session)
        .unwrap();
        assert!(session.layers().get(layer).unwrap().bytes().iter().all(|&b| b == 0));
        assert!(session.end_gesture(None).unwrap().is_none());
    }
}
