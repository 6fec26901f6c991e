//! Pascal VOC XML annotation records.
//!
//! A record is read once per image, edited in memory (objects removed, canvas
//! size replaced, boxes shifted) and written to a new file. Every element the
//! crop does not touch, such as `<filename>`, `<source>` or per-object
//! `<difficult>`, is carried through unchanged.

mod tree;

pub use tree::XmlElement;

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::BboxtrimError;
use crate::geometry::Rect;

const BBOX_TAGS: [&str; 4] = ["xmin", "ymin", "xmax", "ymax"];

/// One `<object>` of an annotation: its class label and pixel box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnnotatedObject {
    pub label: String,
    pub rect: Rect,
}

/// A parsed VOC annotation file.
#[derive(Clone, Debug)]
pub struct AnnotationRecord {
    path: PathBuf,
    root: XmlElement,
    objects: Vec<AnnotatedObject>,
    width: u32,
    height: u32,
}

impl AnnotationRecord {
    /// Read and validate the annotation at `path`.
    pub fn read(path: &Path) -> Result<Self, BboxtrimError> {
        let xml = fs::read_to_string(path).map_err(BboxtrimError::Io)?;
        Self::parse_str(&xml, path)
    }

    /// Parse an annotation from an in-memory string.
    ///
    /// `path` is used only for error messages.
    pub fn parse_str(xml: &str, path: &Path) -> Result<Self, BboxtrimError> {
        let document =
            roxmltree::Document::parse(xml).map_err(|source| BboxtrimError::AnnotationParse {
                path: path.to_path_buf(),
                message: source.to_string(),
            })?;

        let root = XmlElement::from_node(document.root_element());
        if root.name != "annotation" {
            return Err(parse_error(path, "missing <annotation> root element"));
        }

        let size = root
            .child("size")
            .ok_or_else(|| parse_error(path, "missing <size> in <annotation>"))?;
        let width = parse_required_u32(size, "width", path, "<size>")?;
        let height = parse_required_u32(size, "height", path, "<size>")?;

        let mut objects = Vec::new();
        for (index, object) in root.children_named("object").enumerate() {
            let label = object
                .child_text("name")
                .ok_or_else(|| parse_error(path, "missing <name> in <object>"))?
                .to_string();
            let rect = parse_bndbox(object, path)?;
            validate_rect(&rect, width, height, index, path)?;
            objects.push(AnnotatedObject { label, rect });
        }

        Ok(Self {
            path: path.to_path_buf(),
            root,
            objects,
            width,
            height,
        })
    }

    /// Objects in document order.
    pub fn objects(&self) -> &[AnnotatedObject] {
        &self.objects
    }

    /// Boxes of all objects in document order.
    pub fn rects(&self) -> Vec<Rect> {
        self.objects.iter().map(|object| object.rect).collect()
    }

    /// Canvas size as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check every box against the size of the decoded image.
    ///
    /// `<size>` may be zero or disagree with the image on disk; crops are cut
    /// from the image, so its dimensions bound every box.
    pub fn check_within(&self, width: u32, height: u32) -> Result<(), BboxtrimError> {
        for (index, object) in self.objects.iter().enumerate() {
            let rect = &object.rect;
            if rect.xmax > i64::from(width) || rect.ymax > i64::from(height) {
                return Err(BboxtrimError::InvalidRectangle {
                    path: self.path.clone(),
                    index,
                    message: format!("{rect} extends past image size {width}x{height}"),
                });
            }
        }
        Ok(())
    }

    /// Keep only the objects for which `keep` returns true.
    ///
    /// Every decision is made before any element is removed. Returns the
    /// number of objects removed.
    pub fn retain_objects<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&AnnotatedObject) -> bool,
    {
        let decisions: Vec<bool> = self.objects.iter().map(&mut keep).collect();

        let mut object_decisions = decisions.iter().copied();
        self.root.children.retain(|child| {
            child.name != "object" || object_decisions.next().unwrap_or(true)
        });

        let mut cached_decisions = decisions.iter().copied();
        self.objects
            .retain(|_| cached_decisions.next().unwrap_or(true));

        decisions.iter().filter(|kept| !**kept).count()
    }

    /// Replace the canvas size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        if let Some(size) = self.root.child_mut("size") {
            size.set_child_text("width", width);
            size.set_child_text("height", height);
        }
        self.width = width;
        self.height = height;
    }

    /// Move every box by `(-dx, -dy)`.
    pub fn shift_objects(&mut self, dx: i64, dy: i64) {
        let objects = self
            .root
            .children
            .iter_mut()
            .filter(|child| child.name == "object");

        for (element, object) in objects.zip(self.objects.iter_mut()) {
            object.rect = object.rect.shifted(dx, dy);
            if let Some(bndbox) = element.child_mut("bndbox") {
                for (tag, value) in BBOX_TAGS.iter().zip(object.rect.to_array()) {
                    bndbox.set_child_text(tag, value);
                }
            }
        }
    }

    /// Serialize the record as an XML document.
    pub fn to_xml_string(&self) -> String {
        self.root.to_document_string()
    }

    /// Write the record to `path`, replacing any existing file.
    pub fn write(&self, path: &Path) -> Result<(), BboxtrimError> {
        let write_error = |source: std::io::Error| BboxtrimError::AnnotationWrite {
            path: path.to_path_buf(),
            message: source.to_string(),
        };

        let file = fs::File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(self.to_xml_string().as_bytes())
            .map_err(write_error)?;
        writer.flush().map_err(write_error)
    }
}

fn parse_error(path: &Path, message: impl Into<String>) -> BboxtrimError {
    BboxtrimError::AnnotationParse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn parse_required_u32(
    node: &XmlElement,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<u32, BboxtrimError> {
    let raw = node
        .child_text(tag)
        .ok_or_else(|| parse_error(path, format!("missing <{tag}> in {context}")))?;
    raw.parse::<u32>().map_err(|_| {
        parse_error(
            path,
            format!("invalid <{tag}> value '{raw}' in {context}; expected u32"),
        )
    })
}

fn parse_required_i64(
    node: &XmlElement,
    tag: &str,
    path: &Path,
    context: &str,
) -> Result<i64, BboxtrimError> {
    let raw = node
        .child_text(tag)
        .ok_or_else(|| parse_error(path, format!("missing <{tag}> in {context}")))?;
    raw.parse::<i64>().map_err(|_| {
        parse_error(
            path,
            format!("invalid <{tag}> value '{raw}' in {context}; expected integer"),
        )
    })
}

fn parse_bndbox(object: &XmlElement, path: &Path) -> Result<Rect, BboxtrimError> {
    let bndbox = object
        .child("bndbox")
        .ok_or_else(|| parse_error(path, "missing <bndbox> in <object>"))?;

    Ok(Rect::from_xyxy(
        parse_required_i64(bndbox, "xmin", path, "<bndbox>")?,
        parse_required_i64(bndbox, "ymin", path, "<bndbox>")?,
        parse_required_i64(bndbox, "xmax", path, "<bndbox>")?,
        parse_required_i64(bndbox, "ymax", path, "<bndbox>")?,
    ))
}

/// Reject boxes that are negative, inverted, or outside a non-zero canvas.
fn validate_rect(
    rect: &Rect,
    width: u32,
    height: u32,
    index: usize,
    path: &Path,
) -> Result<(), BboxtrimError> {
    let invalid = |message: String| BboxtrimError::InvalidRectangle {
        path: path.to_path_buf(),
        index,
        message,
    };

    if rect.xmin < 0 || rect.ymin < 0 {
        return Err(invalid(format!("{rect} has a negative coordinate")));
    }
    if rect.xmax > i64::from(u32::MAX) || rect.ymax > i64::from(u32::MAX) {
        return Err(invalid(format!("{rect} exceeds the pixel coordinate range")));
    }
    if !rect.is_ordered() {
        return Err(invalid(format!("{rect} has min greater than max")));
    }
    if width > 0 && rect.xmax > i64::from(width) {
        return Err(invalid(format!("{rect} extends past canvas width {width}")));
    }
    if height > 0 && rect.ymax > i64::from(height) {
        return Err(invalid(format!("{rect} extends past canvas height {height}")));
    }
    Ok(())
}
