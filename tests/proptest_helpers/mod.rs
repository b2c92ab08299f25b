#![allow(dead_code)]

use imgsign::{Color, LabelSpec, Origin};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 256;
    config
}

pub fn arb_origin() -> impl Strategy<Value = Origin> {
    prop_oneof![Just(Origin::TopLeft), Just(Origin::BottomLeft)]
}

pub fn arb_color() -> impl Strategy<Value = Color> {
    any::<[u8; 4]>().prop_map(Color)
}

/// Printable ASCII labels, including the empty label.
pub fn arb_text() -> impl Strategy<Value = String> {
    "[ -~]{0,12}"
}

/// Labels placed anywhere from well off-canvas to well past it.
pub fn arb_label(canvas: u32) -> impl Strategy<Value = LabelSpec> {
    let reach = f64::from(canvas) * 3.0;
    (
        arb_text(),
        -reach..reach,
        -reach..reach,
        1.0f32..64.0,
        arb_origin(),
        arb_color(),
    )
        .prop_map(|(text, x, y, size, origin, color)| {
            LabelSpec::new(text, x, y, size)
                .with_origin(origin)
                .with_color(color)
        })
}
