//! Batch drivers for the `crop` and `list` operations.
//!
//! Every identifier found in the annotation folder is processed on its own.
//! A failing item is logged and recorded in the [`BatchReport`]; it never
//! stops the rest of the batch.

mod report;

pub use report::{BatchMode, BatchReport, ItemOutcome, ItemReport};

use std::fs;
use std::path::{Path, PathBuf};

use image::GenericImageView;
use rayon::prelude::*;

use crate::annotation::AnnotationRecord;
use crate::dataset;
use crate::error::{ArtifactKind, BboxtrimError};
use crate::raster;
use crate::reconcile::{self, ExpansionMode};

pub const DEFAULT_OUTPUT_IMAGE_DIR: &str = "crop_sbbox_img";
pub const DEFAULT_OUTPUT_ANNOTATION_DIR: &str = "crop_sbbox_xml";
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Options for the crop operation.
#[derive(Clone, Debug)]
pub struct CropOptions {
    /// Boxes with area at or below this value are "small".
    pub threshold: i64,
    pub image_dir: PathBuf,
    pub annotation_dir: PathBuf,
    pub output_image_dir: PathBuf,
    pub output_annotation_dir: PathBuf,
    /// Extension of input images, reused for the cropped output.
    pub image_extension: String,
    pub expansion: ExpansionMode,
    /// Process items on the rayon thread pool.
    pub parallel: bool,
}

impl CropOptions {
    pub fn new(threshold: i64, image_dir: PathBuf, annotation_dir: PathBuf) -> Self {
        Self {
            threshold,
            image_dir,
            annotation_dir,
            output_image_dir: PathBuf::from(DEFAULT_OUTPUT_IMAGE_DIR),
            output_annotation_dir: PathBuf::from(DEFAULT_OUTPUT_ANNOTATION_DIR),
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            expansion: ExpansionMode::default(),
            parallel: false,
        }
    }
}

/// Options for the list operation.
#[derive(Clone, Debug)]
pub struct ListOptions {
    pub threshold: i64,
    pub annotation_dir: PathBuf,
}

/// Crop every item in `opts.annotation_dir`.
///
/// Fails only if the options are invalid or the annotation folder cannot be
/// listed; per-item failures are reported in the returned report.
pub fn crop_dataset(opts: &CropOptions) -> Result<BatchReport, BboxtrimError> {
    validate_threshold(opts.threshold)?;
    if opts.image_extension.trim().is_empty() {
        return Err(BboxtrimError::InvalidOption {
            message: "image extension must not be empty".to_string(),
        });
    }

    let ids = dataset::list_identifiers(&opts.annotation_dir)?;
    log::info!(
        "Cropping {} item(s) from {} at area threshold {}",
        ids.len(),
        opts.annotation_dir.display(),
        opts.threshold
    );

    let outcomes: Vec<(String, ItemOutcome)> = if opts.parallel {
        ids.into_par_iter()
            .map(|id| {
                let outcome = crop_outcome(&id, opts);
                (id, outcome)
            })
            .collect()
    } else {
        ids.into_iter()
            .map(|id| {
                let outcome = crop_outcome(&id, opts);
                (id, outcome)
            })
            .collect()
    };

    let mut report = BatchReport::new(BatchMode::Crop, opts.threshold);
    for (id, outcome) in outcomes {
        report.add(id, outcome);
    }
    Ok(report.finish())
}

/// Report which items in `opts.annotation_dir` have only small objects.
///
/// Nothing is written.
pub fn list_all_small(opts: &ListOptions) -> Result<BatchReport, BboxtrimError> {
    validate_threshold(opts.threshold)?;

    let ids = dataset::list_identifiers(&opts.annotation_dir)?;
    let mut report = BatchReport::new(BatchMode::List, opts.threshold);

    for id in ids {
        let outcome = match classify_item(&id, opts) {
            Ok(true) => ItemOutcome::AllSmall,
            Ok(false) => ItemOutcome::HasLarge,
            Err(err) => failed(&id, err),
        };
        report.add(id, outcome);
    }

    Ok(report.finish())
}

/// Crop a single item and write its image and annotation.
///
/// Returns the outcome recorded for a successful item.
pub fn crop_item(id: &str, opts: &CropOptions) -> Result<ItemOutcome, BboxtrimError> {
    let annotation_path = dataset::require_artifact(
        id,
        ArtifactKind::Annotation,
        dataset::annotation_path(&opts.annotation_dir, id),
    )?;
    let image_path = dataset::require_artifact(
        id,
        ArtifactKind::Image,
        dataset::image_path(&opts.image_dir, id, &opts.image_extension),
    )?;

    let mut record = AnnotationRecord::read(&annotation_path)?;
    let plan = reconcile::plan_crop(id, &record.rects(), opts.threshold, opts.expansion)?;
    let envelope = plan.envelope;

    let source = raster::load(&image_path)?;
    let (image_width, image_height) = source.dimensions();
    record.check_within(image_width, image_height)?;
    let (cropped, width, height) = raster::crop(&source, &envelope);

    let removed = record.retain_objects(|object| plan.keeps(&object.rect));
    record.set_size(width, height);
    record.shift_objects(envelope.left, envelope.top);

    dataset::ensure_dir(&opts.output_image_dir)?;
    dataset::ensure_dir(&opts.output_annotation_dir)?;

    let image_out = dataset::image_path(&opts.output_image_dir, id, &opts.image_extension);
    raster::save(&cropped, &image_out)?;
    if let Err(err) = record.write(&dataset::annotation_path(&opts.output_annotation_dir, id)) {
        discard_output(&image_out);
        return Err(err);
    }

    Ok(ItemOutcome::Cropped {
        envelope: envelope.as_rect(),
        width,
        height,
        kept: record.objects().len(),
        removed,
    })
}

fn crop_outcome(id: &str, opts: &CropOptions) -> ItemOutcome {
    crop_item(id, opts).unwrap_or_else(|err| failed(id, err))
}

/// Remove an output image whose annotation could not be written.
fn discard_output(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        log::warn!("Could not remove {}: {}", path.display(), err);
    }
}

fn classify_item(id: &str, opts: &ListOptions) -> Result<bool, BboxtrimError> {
    let path = dataset::require_artifact(
        id,
        ArtifactKind::Annotation,
        dataset::annotation_path(&opts.annotation_dir, id),
    )?;
    let record = AnnotationRecord::read(&path)?;
    reconcile::is_all_small(id, &record.rects(), opts.threshold)
}

fn failed(id: &str, err: BboxtrimError) -> ItemOutcome {
    log::error!("Item {} failed: {}", id, err);
    ItemOutcome::Failed {
        error: err.to_string(),
    }
}

fn validate_threshold(threshold: i64) -> Result<(), BboxtrimError> {
    if threshold < 0 {
        return Err(BboxtrimError::InvalidOption {
            message: format!("area threshold must be >= 0, got {threshold}"),
        });
    }
    Ok(())
}
