//! Raster image load, crop and save.

use std::path::Path;

use image::{imageops, DynamicImage, GenericImageView};

use crate::error::BboxtrimError;
use crate::reconcile::Envelope;

/// Decode the image at `path`; the format is inferred from its contents.
pub fn load(path: &Path) -> Result<DynamicImage, BboxtrimError> {
    image::open(path).map_err(|source| BboxtrimError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Cut `envelope` out of `image`, treating `right` and `bottom` as exclusive.
///
/// The result always measures `envelope.width() x envelope.height()`. Any part
/// of the envelope that falls outside the source image is left zero-filled.
/// Returns the cropped image with its `(width, height)`.
pub fn crop(image: &DynamicImage, envelope: &Envelope) -> (DynamicImage, u32, u32) {
    let width = clamp_to_u32(envelope.width());
    let height = clamp_to_u32(envelope.height());
    let (src_width, src_height) = image.dimensions();

    let inside = envelope.left >= 0
        && envelope.top >= 0
        && envelope.right <= i64::from(src_width)
        && envelope.bottom <= i64::from(src_height);

    let cropped = if inside {
        image.crop_imm(envelope.left as u32, envelope.top as u32, width, height)
    } else {
        let mut canvas = DynamicImage::new(width, height, image.color());
        imageops::replace(&mut canvas, image, -envelope.left, -envelope.top);
        canvas
    };

    (cropped, width, height)
}

/// Encode `image` to `path`; the format follows the file extension.
pub fn save(image: &DynamicImage, path: &Path) -> Result<(), BboxtrimError> {
    image.save(path).map_err(|source| BboxtrimError::Image {
        path: path.to_path_buf(),
        source,
    })
}

fn clamp_to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
