//! Device Information Example
//!
//! Lists every shipped SLM template with its derived geometry.
//!
//! Run with: cargo run -p slm-specs --example device_info

#![allow(missing_docs, clippy::use_debug)]

use slm_specs::devices::ALL_DEVICES;
use slm_specs::SlmSpec;

fn print_device_info(spec: &SlmSpec) {
    println!("\n{}", "=".repeat(60));
    println!("Device: {} ({})", spec.name, spec.id);
    println!("{}", "=".repeat(60));

    let (w_mm, h_mm) = spec.active_area_mm();
    println!("  Resolution: {}×{} pixels", spec.width, spec.height);
    println!("  Pixel pitch: {:.2} µm", spec.pixel_pitch_um);
    println!("  Active area: {:.2} × {:.2} mm ({:.2}\")", w_mm, h_mm, spec.diagonal_inches());
    println!("  Manufacturer: {:?}", spec.manufacturer);
    println!("  Modulation: {:?}", spec.modulation);
    println!("  Drive levels: {}", spec.drive_levels());
    println!(
        "  Wavelength: {}–{} nm",
        spec.wavelength_min_nm, spec.wavelength_max_nm
    );

    match spec.phase_response {
        Some(response) => println!(
            "  Phase response: {} (order {})",
            response.name,
            response.order()
        ),
        None => println!("  Phase response: none (linear ramp)"),
    }
}

fn main() {
    for spec in ALL_DEVICES {
        print_device_info(spec);
    }
}
