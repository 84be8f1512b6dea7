#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use slm_hologram::{BeamFamily, LaguerreGaussian, ModeParameters};
use slm_testing::TestRenderer;

fn vortex() -> ModeParameters {
    ModeParameters::new(BeamFamily::LaguerreGaussian(LaguerreGaussian {
        l: 1,
        p: 0,
        w0: 0.1,
    }))
}

#[test]
fn screenshot_round_trips_through_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vortex.png");

    let mut t = TestRenderer::new(48, 32).unwrap();
    t.render(vortex()).unwrap();
    t.screenshot(&path).unwrap();

    let img = image::open(&path).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (48, 32));
    assert_eq!(img.as_raw().as_slice(), t.buffer().unwrap().as_slice());
}

#[test]
fn golden_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let golden = dir.path().join("golden.png");

    let mut t = TestRenderer::new(48, 32).unwrap();
    t.render(vortex()).unwrap();
    assert!(t.assert_matches_golden(&golden, 0).is_err(), "golden does not exist yet");

    t.screenshot(&golden).unwrap();
    t.assert_matches_golden(&golden, 0).unwrap();

    t.render(ModeParameters::new(BeamFamily::Zero)).unwrap();
    assert!(t.assert_matches_golden(&golden, 0).is_err());
}

#[test]
fn screenshot_before_render_fails() {
    let dir = tempfile::tempdir().unwrap();
    let t = TestRenderer::new(8, 8).unwrap();
    assert!(t.screenshot(dir.path().join("empty.png")).is_err());
}
