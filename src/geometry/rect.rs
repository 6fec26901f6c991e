//! Integer pixel rectangles in XYXY format.

use serde::Serialize;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// Coordinates are whole pixels, as they appear in VOC annotation files.
///
/// Note: This type does NOT enforce that min <= max in the constructor.
/// Shifting a box into a crop origin can legitimately produce negative
/// coordinates, and parse-time validation is where malformed input boxes
/// get reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl Rect {
    /// Creates a new rectangle from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns the width of the rectangle.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> i64 {
        self.xmax - self.xmin
    }

    /// Returns the height of the rectangle.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> i64 {
        self.ymax - self.ymin
    }

    /// Returns the area of the rectangle, `(ymax - ymin) * (xmax - xmin)`.
    ///
    /// Saturates instead of overflowing for boxes near the `i64` limits.
    #[inline]
    pub fn area(&self) -> i64 {
        self.height().saturating_mul(self.width())
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Returns true if `other` overlaps this rectangle or shares an edge with it.
    ///
    /// Two boxes are disjoint only when one lies strictly beyond the other on
    /// some axis.
    #[inline]
    pub fn intersects_or_touches(&self, other: &Rect) -> bool {
        !(other.xmax < self.xmin
            || other.xmin > self.xmax
            || other.ymax < self.ymin
            || other.ymin > self.ymax)
    }

    /// Returns true if `other` lies entirely inside this rectangle (edges inclusive).
    #[inline]
    pub fn contains(&self, other: &Rect) -> bool {
        other.xmin >= self.xmin
            && other.ymin >= self.ymin
            && other.xmax <= self.xmax
            && other.ymax <= self.ymax
    }

    /// Returns a new rectangle moved by `(-dx, -dy)`.
    #[inline]
    pub fn shifted(&self, dx: i64, dy: i64) -> Self {
        Self::from_xyxy(self.xmin - dx, self.ymin - dy, self.xmax - dx, self.ymax - dy)
    }

    /// Returns the coordinates as a `[xmin, ymin, xmax, ymax]` array.
    #[inline]
    pub fn to_array(&self) -> [i64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.xmin, self.ymin, self.xmax, self.ymax
        )
    }
}
