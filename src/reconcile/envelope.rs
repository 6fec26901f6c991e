//! The working crop region and its growth rules.

use serde::Serialize;

use crate::geometry::Rect;

/// How the envelope grows over a retained small box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExpansionMode {
    /// Correct only the first violated edge, checked in the order
    /// left, top, right, bottom. Reproduces outputs of the existing
    /// dataset tooling, but can leave a retained box partly outside the crop.
    #[default]
    FirstMatch,
    /// Correct every violated edge, so the crop always covers each retained box.
    AllAxes,
}

/// A crop region in pixel coordinates; `right` and `bottom` are exclusive
/// when used to cut the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl Envelope {
    /// Bounding box of `rects`, or `None` if there are none.
    pub fn bounding(rects: &[Rect]) -> Option<Self> {
        let first = rects.first()?;
        let seed = Self {
            left: first.xmin,
            top: first.ymin,
            right: first.xmax,
            bottom: first.ymax,
        };
        Some(rects[1..].iter().fold(seed, |env, rect| Self {
            left: env.left.min(rect.xmin),
            top: env.top.min(rect.ymin),
            right: env.right.max(rect.xmax),
            bottom: env.bottom.max(rect.ymax),
        }))
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    /// The envelope as a `(left, top, right, bottom)` rectangle.
    #[inline]
    pub fn as_rect(&self) -> Rect {
        Rect::from_xyxy(self.left, self.top, self.right, self.bottom)
    }

    /// Returns true if a small box should survive the crop.
    ///
    /// A box survives when it intersects or touches the envelope; it is
    /// dropped only when it lies strictly beyond one of the four edges.
    #[inline]
    pub fn retains(&self, rect: &Rect) -> bool {
        self.as_rect().intersects_or_touches(rect)
    }

    /// Grow the envelope over `rect`. The envelope never shrinks.
    pub fn expand(&mut self, rect: &Rect, mode: ExpansionMode) {
        match mode {
            ExpansionMode::FirstMatch => {
                if rect.xmin < self.left {
                    self.left = rect.xmin;
                } else if rect.ymin < self.top {
                    self.top = rect.ymin;
                } else if rect.xmax > self.right {
                    self.right = rect.xmax;
                } else if rect.ymax > self.bottom {
                    self.bottom = rect.ymax;
                }
            }
            ExpansionMode::AllAxes => {
                self.left = self.left.min(rect.xmin);
                self.top = self.top.min(rect.ymin);
                self.right = self.right.max(rect.xmax);
                self.bottom = self.bottom.max(rect.ymax);
            }
        }
    }
}
