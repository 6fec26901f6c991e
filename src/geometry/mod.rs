//! Pixel-space geometry shared by the annotation reader and the crop engine.

mod rect;

pub use rect::Rect;
