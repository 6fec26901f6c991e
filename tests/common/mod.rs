#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Input and output folders of a throwaway dataset.
pub struct Layout {
    pub root: tempfile::TempDir,
    pub images: PathBuf,
    pub annotations: PathBuf,
    pub out_images: PathBuf,
    pub out_annotations: PathBuf,
}

impl Layout {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        let images = root.path().join("JPEGImages");
        let annotations = root.path().join("Annotations");
        fs::create_dir_all(&images).expect("create images dir");
        fs::create_dir_all(&annotations).expect("create annotations dir");
        Self {
            images,
            annotations,
            out_images: root.path().join("out_img"),
            out_annotations: root.path().join("out_xml"),
            root,
        }
    }

    /// Write `<id>.xml` with the given `(label, [xmin, ymin, xmax, ymax])` objects.
    pub fn add_annotation(&self, id: &str, width: u32, height: u32, objects: &[(&str, [i64; 4])]) {
        fs::write(
            self.annotations.join(format!("{id}.xml")),
            voc_xml(id, width, height, objects),
        )
        .expect("write annotation");
    }

    /// Write `<id>.<ext>` as a solid gray image.
    pub fn add_image(&self, id: &str, ext: &str, width: u32, height: u32) {
        write_image(&self.images.join(format!("{id}.{ext}")), width, height);
    }
}

pub fn voc_xml(id: &str, width: u32, height: u32, objects: &[(&str, [i64; 4])]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<annotation>\n  <folder>JPEGImages</folder>\n  <filename>{id}.jpg</filename>\n  <source><database>Unknown</database></source>\n  <size>\n    <width>{width}</width>\n    <height>{height}</height>\n    <depth>3</depth>\n  </size>\n  <segmented>0</segmented>\n"
    );
    for (label, [xmin, ymin, xmax, ymax]) in objects {
        xml.push_str(&format!(
            "  <object>\n    <name>{label}</name>\n    <pose>Unspecified</pose>\n    <truncated>0</truncated>\n    <difficult>0</difficult>\n    <bndbox>\n      <xmin>{xmin}</xmin>\n      <ymin>{ymin}</ymin>\n      <xmax>{xmax}</xmax>\n      <ymax>{ymax}</ymax>\n    </bndbox>\n  </object>\n"
        ));
    }
    xml.push_str("</annotation>\n");
    xml
}

pub fn write_image(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
        .save(path)
        .expect("write image file");
}
