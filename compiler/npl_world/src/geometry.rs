//! Axis-aligned rectangles in world pixels.

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the vertical extents of the two rectangles intersect.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.bottom() < other.top() && other.bottom() < self.top()
    }

    /// Whether the horizontal extents of the two rectangles intersect.
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.left() < other.right() && other.left() < self.right()
    }
}
