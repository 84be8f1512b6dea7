//! xtask specs: list device templates or show one in detail.

use std::f64::consts::PI;

use anyhow::{Context, Result};
use colored::Colorize;
use slm_hologram::{CalibrationTable, SamplingGrid};
use slm_specs::devices::{find_device, ALL_DEVICES};
use slm_specs::SlmSpec;

/// Phases shown in the calibration preview
const PREVIEW_PHASES: [f64; 5] = [-PI, -PI / 2.0, 0.0, PI / 2.0, PI];

pub fn run(device: Option<&str>) -> Result<()> {
    match device {
        Some(id) => {
            let spec = find_device(id).with_context(|| format!("Unknown device `{id}`"))?;
            show(spec)
        }
        None => {
            list();
            Ok(())
        }
    }
}

fn list() {
    println!();
    println!("{}", "📐 SLM device templates".cyan().bold());
    println!();
    println!(
        "  {:<16} {:<28} {:>11} {:>9}  {}",
        "id".bold(),
        "name".bold(),
        "resolution".bold(),
        "pitch".bold(),
        "calibration".bold()
    );
    for spec in ALL_DEVICES {
        let calibration = match spec.phase_response {
            Some(response) => response.name.green(),
            None => "linear".dimmed(),
        };
        println!(
            "  {:<16} {:<28} {:>11} {:>7.2}µm  {}",
            spec.id,
            spec.name,
            format!("{}×{}", spec.width, spec.height),
            spec.pixel_pitch_um,
            calibration
        );
    }
    println!();
    println!(
        "   {}",
        "Show one device with 'cargo xtask specs --device <id>'".dimmed()
    );
    println!();
}

fn show(spec: &SlmSpec) -> Result<()> {
    let (w_mm, h_mm) = spec.active_area_mm();
    let grid = SamplingGrid::for_spec(spec)?;
    let (half_x, half_y) = grid.half_extent();

    println!();
    println!("{}", format!("📐 {} ({})", spec.name, spec.id).cyan().bold());
    println!();
    println!("  Resolution:    {}×{} pixels", spec.width, spec.height);
    println!("  Pixel pitch:   {:.2} µm", spec.pixel_pitch_um);
    println!(
        "  Active area:   {w_mm:.2} × {h_mm:.2} mm ({:.2}\")",
        spec.diagonal_inches()
    );
    println!("  Grid extent:   x ∈ ±{half_x:.3} mm, y ∈ ±{half_y:.3} mm");
    println!("  Drive levels:  {}", spec.drive_levels());
    println!(
        "  Wavelength:    {}–{} nm",
        spec.wavelength_min_nm, spec.wavelength_max_nm
    );

    let table = match spec.phase_response {
        Some(response) => {
            println!(
                "  Calibration:   {} (order {})",
                response.name,
                response.order()
            );
            CalibrationTable::from_response(response, 256)?
        }
        None => {
            println!("  Calibration:   {}", "none (linear ramp)".dimmed());
            CalibrationTable::linear()
        }
    };

    println!();
    println!("  {}", "phase → drive level".bold());
    for phase in PREVIEW_PHASES {
        println!("    {:>7.3} rad → {:>3}", phase, table.gray_level(phase));
    }
    println!();
    Ok(())
}
