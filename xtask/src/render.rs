//! xtask render: run one render request and write the buffer as a PNG.
//!
//! The screen named in the request is sized from a device template. The
//! calibration table comes from `--cmap` when given, otherwise from the
//! device's measured response, otherwise the linear ramp.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use colored::Colorize;
use slm_hologram::{
    CalibrationTable, Canvas, RenderRequest, Renderer, RendererConfig, Screen, ScreenBuffer,
};
use slm_specs::devices::{find_device, GENERIC_1080P};
use slm_specs::SlmSpec;
use tracing::info;

use crate::calibration;

/// Samples taken from a measured phase response
const RESPONSE_SAMPLES: usize = 256;

pub struct RenderArgs {
    pub request: PathBuf,
    pub cmap: Option<PathBuf>,
    pub spec: Option<String>,
    pub config: Option<PathBuf>,
    pub out: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    println!();
    println!("{}", "🌀 Rendering hologram...".cyan().bold());
    println!();

    let start = Instant::now();
    let buffer = render(args)?;
    save_png(&buffer, &args.out)?;

    println!(
        "{}",
        format!(
            "✓ {}×{} hologram written to {} in {:.2}s",
            buffer.width(),
            buffer.height(),
            args.out.display(),
            start.elapsed().as_secs_f64()
        )
        .green()
    );
    println!();
    Ok(())
}

/// Load every input and render the request
pub(crate) fn render(args: &RenderArgs) -> Result<ScreenBuffer> {
    let request_json = std::fs::read_to_string(&args.request)
        .with_context(|| format!("Failed to read request {}", args.request.display()))?;
    let request = RenderRequest::from_json(&request_json)
        .with_context(|| format!("Invalid render request {}", args.request.display()))?;

    let spec = resolve_spec(args.spec.as_deref())?;
    let table = resolve_table(args.cmap.as_deref(), spec)?;
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            RendererConfig::from_json(&json)
                .with_context(|| format!("Invalid renderer config {}", path.display()))?
        }
        None => RendererConfig::DEFAULT,
    };

    info!(
        screen = %request.screen,
        device = spec.id,
        family = request.mode.family.name(),
        "rendering"
    );

    let canvas = Canvas::new().with_screen(Screen::from_spec(request.screen.clone(), spec))?;
    let mut renderer = Renderer::new(canvas, Arc::new(table), config)?;
    let frame = renderer
        .render(&request)
        .with_context(|| format!("Failed to render onto screen `{}`", request.screen))?;
    let (_, buffer) = frame.into_parts();
    Ok(buffer)
}

fn resolve_spec(id: Option<&str>) -> Result<&'static SlmSpec> {
    match id {
        Some(id) => find_device(id).with_context(|| {
            format!("Unknown device `{id}`; run `cargo xtask specs` for the list")
        }),
        None => Ok(&GENERIC_1080P),
    }
}

fn resolve_table(cmap: Option<&Path>, spec: &SlmSpec) -> Result<CalibrationTable> {
    if let Some(path) = cmap {
        return calibration::load(path);
    }
    match spec.phase_response {
        Some(response) => Ok(CalibrationTable::from_response(response, RESPONSE_SAMPLES)?),
        None => Ok(CalibrationTable::linear()),
    }
}

fn save_png(buffer: &ScreenBuffer, path: &Path) -> Result<()> {
    let (width, height) = buffer.dimensions();
    let img = image::GrayImage::from_raw(width, height, buffer.as_slice().to_vec())
        .context("Buffer length does not match its dimensions")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    img.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
