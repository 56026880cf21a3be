//! Utility types, used throughout the crate.

/// Integer pixel rectangle, `x`/`y` of the top-left corner extending `w`/`h` down-right.
///
/// Rectangles handed out by this crate are never empty, but the type itself allows it so that
/// clamping can report "nothing left" via [`Rect::is_empty`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}
impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
    /// Rect covering `[0, width) x [0, height)`. Saturates sizes too large for `i32`.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            w: i32::try_from(width).unwrap_or(i32::MAX),
            h: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }
    /// Smallest integer rect containing the float box `min..max`. Rounds outward.
    ///
    /// Returns `None` if any coordinate is not finite.
    #[must_use]
    pub fn from_float_bounds(min: [f32; 2], max: [f32; 2]) -> Option<Self> {
        if !min.iter().chain(max.iter()).all(|v| v.is_finite()) {
            return None;
        }
        // `as` saturates for out-of-range floats, which is what we want here.
        let x0 = min[0].floor() as i32;
        let y0 = min[1].floor() as i32;
        let x1 = max[0].ceil() as i32;
        let y1 = max[1].ceil() as i32;
        Some(Self::from_min_max([x0, y0], [x1, y1]))
    }
    /// Rect from an inclusive min and exclusive max corner.
    #[must_use]
    pub fn from_min_max(min: [i32; 2], max: [i32; 2]) -> Self {
        Self {
            x: min[0],
            y: min[1],
            w: max[0].saturating_sub(min[0]),
            h: max[1].saturating_sub(min[1]),
        }
    }
    #[must_use]
    pub fn min(&self) -> [i32; 2] {
        [self.x, self.y]
    }
    /// Exclusive bottom-right corner.
    #[must_use]
    pub fn max(&self) -> [i32; 2] {
        [self.x.saturating_add(self.w), self.y.saturating_add(self.h)]
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
    /// Number of pixels covered, zero if empty.
    #[must_use]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            // Both positive, lossless.
            (self.w as usize).saturating_mul(self.h as usize)
        }
    }
    /// Intersection of `self` and `other`. May be empty!
    #[must_use = "returns a new rect and does not modify `self`"]
    pub fn intersect(&self, other: &Self) -> Self {
        let [ax1, ay1] = self.max();
        let [bx1, by1] = other.max();
        let min = [self.x.max(other.x), self.y.max(other.y)];
        let max = [ax1.min(bx1), ay1.min(by1)];
        let rect = Self::from_min_max(min, max);
        if rect.is_empty() {
            Self::default()
        } else {
            rect
        }
    }
    /// Clip to `[0, width) x [0, height)`, or `None` if nothing remains.
    #[must_use]
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        if self.is_empty() {
            return None;
        }
        let clipped = self.intersect(&Self::from_size(width, height));
        (!clipped.is_empty()).then_some(clipped)
    }
    /// Bounding box of both rects. Empty rects do not contribute.
    #[must_use = "returns a new rect and does not modify `self`"]
    pub fn union(&self, other: &Self) -> Self {
        match (self.is_empty(), other.is_empty()) {
            (true, _) => *other,
            (_, true) => *self,
            (false, false) => {
                let [ax1, ay1] = self.max();
                let [bx1, by1] = other.max();
                Self::from_min_max(
                    [self.x.min(other.x), self.y.min(other.y)],
                    [ax1.max(bx1), ay1.max(by1)],
                )
            }
        }
    }
    /// True if every pixel of `other` is also within `self`. Empty rects are contained by anything.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        let [ax1, ay1] = self.max();
        let [bx1, by1] = other.max();
        self.x <= other.x && self.y <= other.y && ax1 >= bx1 && ay1 >= by1
    }
}
impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.w, self.h)
    }
}

#[cfg(test)]
mod test {
    use super::Rect;
    #[test]
    fn clamp_negative_origin() {
        let rect = Rect::new(-3, -3, 4, 4);
        assert_eq!(rect.clamp_to(100, 100), Some(Rect::new(0, 0, 1, 1)));
        // Entirely outside
        assert_eq!(Rect::new(-10, 0, 5, 5).clamp_to(100, 100), None);
        assert_eq!(Rect::new(100, 0, 5, 5).clamp_to(100, 100), None);
        // Straddling the far edge
        assert_eq!(
            Rect::new(95, 98, 10, 10).clamp_to(100, 100),
            Some(Rect::new(95, 98, 5, 2))
        );
    }
    #[test]
    fn union_ignores_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.union(&b), Rect::new(0, 0, 15, 15));
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&b), b);
        assert!(a.union(&b).contains(&a));
        assert!(a.union(&b).contains(&b));
    }
    #[test]
    fn float_bounds_round_outward() {
        let rect = Rect::from_float_bounds([1.5, -0.5], [3.2, 2.0]).unwrap();
        assert_eq!(rect, Rect::new(1, -1, 3, 3));
        assert_eq!(Rect::from_float_bounds([f32::NAN, 0.0], [1.0, 1.0]), None);
    }
    #[test]
    fn area() {
        assert_eq!(Rect::new(0, 0, 4, 4).area(), 16);
        assert_eq!(Rect::new(0, 0, -4, 4).area(), 0);
    }
}
