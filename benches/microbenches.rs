//! Criterion microbenches for bboxtrim annotation parsing and crop planning.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - VOC XML parsing into an annotation record (AnnotationRecord::parse_str)
//! - Crop planning over a crowded image (plan_crop)

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use std::path::Path;

use bboxtrim::annotation::AnnotationRecord;
use bboxtrim::geometry::Rect;
use bboxtrim::reconcile::{plan_crop, ExpansionMode};

fn voc_fixture(objects: usize) -> String {
    let mut xml = String::from(
        "<annotation><filename>bench.jpg</filename><size><width>2000</width><height>2000</height><depth>3</depth></size>",
    );
    for i in 0..objects {
        let x = (i * 37) % 1900;
        let y = (i * 53) % 1900;
        let side = 5 + (i % 7) * 10;
        xml.push_str(&format!(
            "<object><name>obj{}</name><bndbox><xmin>{}</xmin><ymin>{}</ymin><xmax>{}</xmax><ymax>{}</ymax></bndbox></object>",
            i % 5,
            x,
            y,
            x + side,
            y + side
        ));
    }
    xml.push_str("</annotation>");
    xml
}

/// Benchmark VOC XML parsing from string.
fn bench_voc_parse(c: &mut Criterion) {
    let xml = voc_fixture(200);
    let mut group = c.benchmark_group("voc_parse");
    group.throughput(Throughput::Bytes(xml.len() as u64));

    group.bench_function("parse_str", |b| {
        b.iter(|| {
            let record =
                AnnotationRecord::parse_str(black_box(&xml), Path::new("bench.xml")).unwrap();
            black_box(record)
        })
    });

    group.finish();
}

/// Benchmark crop planning in both expansion modes.
fn bench_plan_crop(c: &mut Criterion) {
    let rects: Vec<Rect> = AnnotationRecord::parse_str(&voc_fixture(500), Path::new("bench.xml"))
        .expect("Failed to parse bench fixture")
        .rects();

    let mut group = c.benchmark_group("plan_crop");
    group.throughput(Throughput::Elements(rects.len() as u64));

    for (name, mode) in [
        ("first_match", ExpansionMode::FirstMatch),
        ("all_axes", ExpansionMode::AllAxes),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let plan = plan_crop("bench", black_box(&rects), 400, mode).unwrap();
                black_box(plan)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_voc_parse, bench_plan_crop);
criterion_main!(benches);
