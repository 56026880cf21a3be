use super::{Direction, Patch};
use crate::pixels::{BufferError, PixelBuffer};

/// Projects patches back onto pixels. Keeps no state of its own, and applying the same side twice
/// is the same as applying it once.
pub struct PatchPlayer;
impl PatchPlayer {
    /// Write one side of the patch over its rect.
    pub fn apply(
        pixels: &mut impl PixelBuffer,
        patch: &Patch,
        direction: Direction,
    ) -> Result<(), BufferError> {
        log::trace!(
            "Replaying {} of {} at {}",
            direction.as_ref(),
            patch.layer(),
            patch.rect()
        );
        pixels.write_region(patch.layer(), patch.rect(), patch.side(direction))
    }
}
