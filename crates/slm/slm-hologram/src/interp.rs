//! Clamped piecewise-linear interpolation over a sorted table

/// Interpolate `(xs, ys)` at `x`, clamping to the end values outside the table.
///
/// `xs` must be strictly increasing and as long as `ys`. NaN maps to the
/// first value.
pub(crate) fn interpolate_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let (Some(&x_first), Some(&y_first)) = (xs.first(), ys.first()) else {
        return 0.0;
    };
    if x.is_nan() || x <= x_first {
        return y_first;
    }
    let (Some(&x_last), Some(&y_last)) = (xs.last(), ys.last()) else {
        return y_first;
    };
    if x >= x_last {
        return y_last;
    }

    // x_first < x < x_last, so 1 <= upper <= len - 1
    let upper = xs.partition_point(|&v| v <= x);
    let lower = upper.saturating_sub(1);
    match (xs.get(lower), xs.get(upper), ys.get(lower), ys.get(upper)) {
        (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) => {
            let t = (x - x0) / (x1 - x0);
            y0 + t * (y1 - y0)
        }
        _ => y_last,
    }
}
