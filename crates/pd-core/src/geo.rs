//! Planar coordinates and the rectangle tests used for placement and
//! neighbor discovery.
//!
//! Coordinates follow canvas convention: `x` grows to the right, `y` grows
//! downward, so a rectangle's `top` is numerically smaller than its `bottom`.
//! `f32` is ample for a 500-unit arena.

/// A point in arena coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// An axis-aligned rectangle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub top:    f32,
    pub bottom: f32,
    pub left:   f32,
    pub right:  f32,
}

impl Rect {
    /// Square of half-side `half` centered on `center`.
    #[inline]
    pub fn centered(center: Point, half: f32) -> Self {
        Self {
            top:    center.y - half,
            bottom: center.y + half,
            left:   center.x - half,
            right:  center.x + half,
        }
    }

    /// The same rectangle grown by `margin` on every side.
    #[inline]
    pub fn expanded(self, margin: f32) -> Self {
        Self {
            top:    self.top - margin,
            bottom: self.bottom + margin,
            left:   self.left - margin,
            right:  self.right + margin,
        }
    }
}

/// `true` iff `a` and `b` intersect.
///
/// All four half-plane tests are strict, so rectangles that only share an
/// edge or a corner do not overlap.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.top < b.bottom && a.bottom > b.top && a.left < b.right && a.right > b.left
}

/// `true` iff `a`, grown by `radius` on every side, intersects `b`.
///
/// This is the interaction-range test: `b` is a neighbor of `a` when it pokes
/// into `a`'s search halo.  Symmetric in `a` and `b` for a fixed radius.
#[inline]
pub fn within(a: Rect, b: Rect, radius: f32) -> bool {
    overlaps(a.expanded(radius), b)
}
