//! Calibration files on disk
//!
//! Three formats are accepted:
//!
//! - `.cmap`: 256 rows of `r g b` in `[0, 1]`, as written by the custom
//!   colormap utility. The green channel scaled to 0–255 is the drive level and
//!   row `i` of `n` holds phase `-π + 2π·i/(n-1)`.
//! - Two columns `phase gray`, phase in radians, gray 0–255.
//! - `.json`: the versioned calibration format of `slm-hologram`.
//!
//! Blank lines and lines starting with `#` are skipped in the text formats.

use std::f64::consts::PI;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use slm_hologram::{CalibrationPoint, CalibrationTable};

/// Load a table, picking the format from the extension or the column count
pub fn load(path: &Path) -> Result<CalibrationTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read calibration file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match extension.as_str() {
        "json" => CalibrationTable::from_json(&text).map_err(anyhow::Error::from),
        "cmap" => parse_cmap(&text),
        _ => match data_lines(&text).next().map(|(_, fields)| fields.len()) {
            Some(3) => parse_cmap(&text),
            Some(2) => parse_pairs(&text),
            Some(n) => bail!("expected 2 or 3 columns, found {n}"),
            None => bail!("calibration file is empty"),
        },
    };
    table.with_context(|| format!("Invalid calibration file {}", path.display()))
}

/// Parse `r g b` rows; the green channel is the drive level
pub fn parse_cmap(text: &str) -> Result<CalibrationTable> {
    let mut greens = Vec::new();
    for (line_no, fields) in data_lines(text) {
        let [_, green, _] = fields.as_slice() else {
            bail!(
                "line {line_no}: expected `r g b`, found {} columns",
                fields.len()
            );
        };
        let green = parse_number(green, line_no)?;
        ensure!(
            (0.0..=1.0).contains(&green),
            "line {line_no}: green channel {green} is outside [0, 1]"
        );
        greens.push(green);
    }
    ensure!(greens.len() >= 2, "a colormap needs at least 2 rows");

    let last = greens.len() - 1;
    let points = greens
        .iter()
        .enumerate()
        .map(|(i, &green)| CalibrationPoint {
            phase: row_phase(i, last),
            gray: to_level(green * 255.0),
        })
        .collect();
    Ok(CalibrationTable::new(points)?)
}

/// Parse `phase gray` rows
pub fn parse_pairs(text: &str) -> Result<CalibrationTable> {
    let mut points = Vec::new();
    for (line_no, fields) in data_lines(text) {
        let [phase, gray] = fields.as_slice() else {
            bail!(
                "line {line_no}: expected `phase gray`, found {} columns",
                fields.len()
            );
        };
        let phase = parse_number(phase, line_no)?;
        let gray = parse_number(gray, line_no)?;
        ensure!(
            (0.0..=255.0).contains(&gray) && gray.fract() == 0.0,
            "line {line_no}: gray {gray} is not an integer in 0..=255"
        );
        points.push(CalibrationPoint {
            phase,
            gray: to_level(gray),
        });
    }
    Ok(CalibrationTable::new(points)?)
}

/// Non-blank, non-comment lines with 1-based line numbers, split on whitespace
fn data_lines(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines().enumerate().filter_map(|(i, line)| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            None
        } else {
            Some((i + 1, line.split_whitespace().collect()))
        }
    })
}

fn parse_number(field: &str, line_no: usize) -> Result<f64> {
    field
        .parse()
        .with_context(|| format!("line {line_no}: `{field}` is not a number"))
}

#[allow(clippy::cast_precision_loss)]
fn row_phase(index: usize, last: usize) -> f64 {
    if index == last {
        PI
    } else {
        -PI + 2.0 * PI * (index as f64) / (last as f64)
    }
}

// SAFETY: clamped to 0.0..=255.0 and rounded before the cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_level(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
