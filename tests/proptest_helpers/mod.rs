#![allow(dead_code)]

use bboxtrim::geometry::Rect;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// An ordered, non-negative rectangle inside a `canvas x canvas` image.
pub fn arb_rect(canvas: i64) -> impl Strategy<Value = Rect> {
    (0..canvas, 0..canvas, 0..canvas, 0..canvas).prop_map(|(x1, y1, x2, y2)| {
        Rect::from_xyxy(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    })
}

pub fn arb_rects(canvas: i64, max_len: usize) -> impl Strategy<Value = Vec<Rect>> {
    proptest::collection::vec(arb_rect(canvas), 1..=max_len)
}
