//! Re-rendering identical inputs must give bit-identical buffers, and
//! composition must hand buffers through untouched.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::Arc;

use slm_hologram::{
    render_buffer, BeamFamily, CalibrationTable, Canvas, HermiteGaussian, HologramEncoder,
    LaguerreGaussian, ModeParameters, Noise, NoiseDistribution, RenderRequest, Renderer,
    RendererConfig, SamplingGrid, Screen, ScreenId,
};
use slm_testing::TestRenderer;

fn modes() -> Vec<ModeParameters> {
    vec![
        ModeParameters::new(BeamFamily::LaguerreGaussian(LaguerreGaussian {
            l: 2,
            p: 1,
            w0: 0.08,
        }))
        .with_displacement(0.01, -0.02),
        ModeParameters::new(BeamFamily::HermiteGaussian(HermiteGaussian {
            m: 1,
            n: 2,
            w0: 0.06,
        }))
        .with_propagation(50.0, 0.000_78),
        ModeParameters::new(BeamFamily::Noise(Noise {
            seed: Some(42),
            distribution: NoiseDistribution::Normal {
                mean: 0.0,
                std_dev: 1.0,
            },
        })),
        ModeParameters::new(BeamFamily::Zero),
    ]
}

#[test]
fn identical_inputs_give_identical_buffers() {
    let mut t = TestRenderer::new(96, 64).unwrap();
    for mode in modes() {
        for encoder in [
            HologramEncoder::DEFAULT,
            HologramEncoder::SCALED,
            HologramEncoder::SINC,
        ] {
            let first = t.render_with(mode.clone(), encoder).unwrap().clone();
            t.render_with(mode.clone(), encoder).unwrap();
            t.assert_matches(&first)
                .unwrap_or_else(|e| panic!("{} / {encoder:?}: {e}", mode.family.name()));
        }
    }
}

#[test]
fn separate_renderers_agree() {
    let mut a = TestRenderer::new(40, 30).unwrap();
    let mut b = TestRenderer::new(40, 30).unwrap();
    for mode in modes() {
        let expected = a.render(mode.clone()).unwrap().clone();
        b.render(mode).unwrap();
        b.assert_matches(&expected).unwrap();
    }
}

#[test]
fn renderer_agrees_with_pure_pipeline() {
    let mut t = TestRenderer::new(40, 30).unwrap();
    let grid = SamplingGrid::new(40, 30, RendererConfig::DEFAULT.pixel_pitch_mm).unwrap();
    let table = CalibrationTable::linear();
    for mode in modes() {
        let expected = render_buffer(&mode, &HologramEncoder::DEFAULT, &grid, &table).unwrap();
        t.render(mode).unwrap();
        t.assert_matches(&expected).unwrap();
    }
}

#[test]
fn unseeded_noise_differs_between_renders() {
    let mut t = TestRenderer::new(64, 64).unwrap();
    let mode = ModeParameters::new(BeamFamily::Noise(Noise::default()));
    let first = t.render(mode.clone()).unwrap().clone();
    t.render(mode).unwrap();
    assert!(t.assert_matches(&first).is_err());
}

#[test]
fn parallel_renders_match_sequential() {
    let table = Arc::new(CalibrationTable::linear());
    let request = RenderRequest::new("slm", modes().remove(0));
    let sequential = {
        let canvas = Canvas::new().with_screen(Screen::new("slm", 48, 32)).unwrap();
        let mut renderer =
            Renderer::new(canvas, Arc::clone(&table), RendererConfig::DEFAULT).unwrap();
        renderer.render(&request).unwrap()
    };

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            let request = request.clone();
            std::thread::spawn(move || {
                let canvas = Canvas::new().with_screen(Screen::new("slm", 48, 32)).unwrap();
                let mut renderer = Renderer::new(canvas, table, RendererConfig::DEFAULT).unwrap();
                renderer.render(&request).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), sequential);
    }
}

#[test]
fn composed_buffer_is_bit_identical() {
    let canvas = Canvas::new()
        .with_screen(Screen::new("left", 40, 30))
        .unwrap()
        .with_screen(Screen::new("right", 40, 30).with_offset(40, 0))
        .unwrap();
    let grid = SamplingGrid::new(40, 30, 0.008).unwrap();
    let buffer = render_buffer(
        &modes().remove(0),
        &HologramEncoder::DEFAULT,
        &grid,
        &CalibrationTable::linear(),
    )
    .unwrap();

    let frame = canvas.compose(&ScreenId::from("right"), buffer.clone()).unwrap();
    assert_eq!(frame.buffer().as_slice(), buffer.as_slice());
    assert_eq!(frame.offset(), (40, 0));

    let err = canvas
        .compose(
            &ScreenId::from("left"),
            slm_hologram::ScreenBuffer::filled(30, 40, 0),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "ResolutionMismatch");
}
