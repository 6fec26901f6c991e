//! Crop reconciliation: decide where to crop an image and which boxes survive.
//!
//! Given every box of one image and an area threshold, this module
//!
//! 1. splits the boxes into *large* (`area > threshold`) and *small* ones,
//! 2. takes the bounding box of the large ones as the initial crop envelope,
//! 3. keeps each small box that intersects or touches that initial envelope,
//! 4. grows the envelope over the kept small boxes.
//!
//! Everything here is pure; reading and rewriting files happens in
//! [`crate::batch`].

mod envelope;

pub use envelope::{Envelope, ExpansionMode};

use serde::Serialize;

use crate::error::BboxtrimError;
use crate::geometry::Rect;

/// The outcome of reconciling one image's boxes against a threshold.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    /// Area threshold the plan was computed with.
    pub threshold: i64,
    /// Bounding box of the large boxes, before expansion.
    pub initial: Envelope,
    /// Final crop region.
    pub envelope: Envelope,
    /// Boxes with area above the threshold, in input order.
    pub large: Vec<Rect>,
    /// Small boxes that touch the initial envelope, in input order.
    pub retained: Vec<Rect>,
    /// Small boxes that lie strictly outside the initial envelope.
    pub dropped: Vec<Rect>,
}

impl CropPlan {
    /// Returns true if an object with this box stays in the rewritten annotation.
    ///
    /// An object is removed only when it is small *and* was not retained.
    pub fn keeps(&self, rect: &Rect) -> bool {
        rect.area() > self.threshold || self.retained.contains(rect)
    }
}

/// Partition boxes into `(large, small)` by area, preserving input order.
///
/// `large` holds every box with `area > threshold`, `small` the rest.
pub fn classify(rects: &[Rect], threshold: i64) -> (Vec<Rect>, Vec<Rect>) {
    rects.iter().partition(|rect| rect.area() > threshold)
}

/// Returns true if no box of the item is larger than `threshold`.
///
/// Items answering `true` are candidates for removal from the dataset.
pub fn is_all_small(id: &str, rects: &[Rect], threshold: i64) -> Result<bool, BboxtrimError> {
    let largest = rects
        .iter()
        .map(Rect::area)
        .max()
        .ok_or_else(|| BboxtrimError::EmptyAnnotation { id: id.to_string() })?;
    Ok(largest <= threshold)
}

/// Split small boxes into `(retained, dropped)` against a fixed envelope.
///
/// All decisions use the envelope as given; growing it afterwards does not
/// revisit boxes that were already dropped.
pub fn select_retained(envelope: &Envelope, small: &[Rect]) -> (Vec<Rect>, Vec<Rect>) {
    small.iter().partition(|rect| envelope.retains(rect))
}

/// Compute the crop plan for one item.
///
/// Fails with [`BboxtrimError::EmptyAnnotation`] if `rects` is empty and with
/// [`BboxtrimError::NoLargeObjects`] if every box is at or below `threshold`.
pub fn plan_crop(
    id: &str,
    rects: &[Rect],
    threshold: i64,
    mode: ExpansionMode,
) -> Result<CropPlan, BboxtrimError> {
    if rects.is_empty() {
        return Err(BboxtrimError::EmptyAnnotation { id: id.to_string() });
    }

    let (large, small) = classify(rects, threshold);
    let initial = Envelope::bounding(&large).ok_or_else(|| BboxtrimError::NoLargeObjects {
        id: id.to_string(),
        threshold,
    })?;

    log::info!(
        "Image {} initial cropping coordinates: {}",
        id,
        initial.as_rect()
    );
    log::info!("Count of small bounding box: {}", small.len());

    let (retained, dropped) = select_retained(&initial, &small);
    for rect in &dropped {
        log::debug!("Image {}: dropping small box {}", id, rect);
    }

    let mut envelope = initial;
    for rect in &retained {
        log::debug!("Image {}: keeping small box {}", id, rect);
        envelope.expand(rect, mode);
    }

    log::info!(
        "Image {} finalized cropping coordinates: {}",
        id,
        envelope.as_rect()
    );

    Ok(CropPlan {
        threshold,
        initial,
        envelope,
        large,
        retained,
        dropped,
    })
}
