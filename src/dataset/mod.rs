//! Dataset folder layout: item identifiers and the files they pair up.
//!
//! An item identifier is the file stem shared by an annotation
//! `<id>.xml` and its image `<id>.<ext>`. Output files reuse the identifier.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{ArtifactKind, BboxtrimError};

pub const ANNOTATION_EXTENSION: &str = "xml";

/// List the identifiers of every `.xml` file directly inside `dir`, sorted.
///
/// Sub-directories are not scanned; a warning is logged if they hold
/// annotation files.
pub fn list_identifiers(dir: &Path) -> Result<Vec<String>, BboxtrimError> {
    if !dir.is_dir() {
        return Err(BboxtrimError::InvalidOption {
            message: format!("annotation folder {} is not a directory", dir.display()),
        });
    }

    let mut ids = Vec::new();
    let mut nested = 0usize;

    for entry in WalkDir::new(dir).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| {
            BboxtrimError::Io(
                source
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            )
        })?;

        if !entry.file_type().is_file() || !has_extension(entry.path(), ANNOTATION_EXTENSION) {
            continue;
        }
        if entry.depth() > 1 {
            nested += 1;
            continue;
        }
        if let Some(stem) = entry.path().file_stem().and_then(|stem| stem.to_str()) {
            ids.push(stem.to_string());
        } else {
            log::warn!("Skipping non UTF-8 file name {}", entry.path().display());
        }
    }

    if nested > 0 {
        log::warn!(
            "Annotation folder is scanned flat; skipping {} nested .{} file(s) under {}",
            nested,
            ANNOTATION_EXTENSION,
            dir.display()
        );
    }

    ids.sort();
    Ok(ids)
}

/// Path of the annotation file for `id` in `dir`.
pub fn annotation_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.{ANNOTATION_EXTENSION}"))
}

/// Path of the image file for `id` in `dir`.
pub fn image_path(dir: &Path, id: &str, extension: &str) -> PathBuf {
    dir.join(format!("{id}.{extension}"))
}

/// Return `path` if it is an existing file, otherwise `MissingArtifact`.
pub fn require_artifact(
    id: &str,
    kind: ArtifactKind,
    path: PathBuf,
) -> Result<PathBuf, BboxtrimError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(BboxtrimError::MissingArtifact {
            id: id.to_string(),
            kind,
            path,
        })
    }
}

/// Create `dir` and its parents; an existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> Result<(), BboxtrimError> {
    fs::create_dir_all(dir).map_err(BboxtrimError::Io)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
