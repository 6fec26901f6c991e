//! Fuzz target for VOC annotation parsing and rewriting.
//!
//! Arbitrary bytes are parsed as an annotation record; records that parse
//! are shifted, resized and serialized, which must never panic.

#![no_main]

use std::path::Path;

use bboxtrim::annotation::AnnotationRecord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(mut record) = AnnotationRecord::parse_str(xml, Path::new("<memory>")) {
        let (width, height) = record.size();
        record.retain_objects(|object| object.rect.area() > 0);
        record.set_size(width / 2, height / 2);
        record.shift_objects(1, 1);
        let _ = record.to_xml_string();
    }
});
