//! Phase wrapping helpers

use core::f64::consts::{PI, TAU};

/// Wrap a phase into the half-open interval `[-π, π)`.
///
/// Subtracts the nearest multiple of 2π. Non-finite input passes through
/// unchanged, so callers must check finiteness first.
pub fn wrap_phase(value: f64) -> f64 {
    if (-PI..PI).contains(&value) {
        return value;
    }
    let wrapped = (value + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to exactly TAU
    if wrapped >= PI {
        -PI
    } else {
        wrapped
    }
}

/// Normalize a phase into the principal interval `(-π, π]`.
///
/// Field phases use this convention (the range of `atan2`), so `-π` maps to `π`.
pub fn principal_phase(value: f64) -> f64 {
    let wrapped = wrap_phase(value);
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}
