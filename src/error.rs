use std::path::PathBuf;
use thiserror::Error;

/// Which half of an item's artifact pair is missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    Image,
    Annotation,
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactKind::Image => write!(f, "image"),
            ArtifactKind::Annotation => write!(f, "annotation"),
        }
    }
}

/// The main error type for bboxtrim operations.
#[derive(Debug, Error)]
pub enum BboxtrimError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Item '{id}' has no annotated objects")]
    EmptyAnnotation { id: String },

    #[error("Item '{id}' has no object with area above {threshold}; lower the threshold")]
    NoLargeObjects { id: String, threshold: i64 },

    #[error("Item '{id}' is missing its {kind} file: {path}")]
    MissingArtifact {
        id: String,
        kind: ArtifactKind,
        path: PathBuf,
    },

    #[error("Failed to parse annotation XML from {path}: {message}")]
    AnnotationParse { path: PathBuf, message: String },

    #[error("Failed to write annotation XML to {path}: {message}")]
    AnnotationWrite { path: PathBuf, message: String },

    #[error("Invalid rectangle #{index} in {path}: {message}")]
    InvalidRectangle {
        path: PathBuf,
        index: usize,
        message: String,
    },

    #[error("Image error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{failed} of {total} item(s) failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("Invalid option: {message}")]
    InvalidOption { message: String },
}
