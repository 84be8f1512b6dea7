//! Orthogonal polynomials for the beam families
//!
//! Both are evaluated by their three-term recurrences. The recurrence state is
//! kept as a mantissa and a power-of-two exponent, so orders in the hundreds
//! at arguments far out in the Gaussian tail stay finite.

use core::f64::consts::LN_2;

/// Bits moved into the exponent per rescale
const SCALE_BITS: i32 = 64;
/// 2^64
const SCALE: f64 = 18_446_744_073_709_551_616.0;
const INV_SCALE: f64 = 1.0 / SCALE;

/// A value stored as `mantissa · 2^exponent`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled {
    mantissa: f64,
    exponent: i32,
}

impl Scaled {
    /// `ln |value|`, `-∞` for zero
    pub fn ln_abs(self) -> f64 {
        if self.mantissa == 0.0 {
            f64::NEG_INFINITY
        } else {
            self.mantissa.abs().ln() + f64::from(self.exponent) * LN_2
        }
    }

    /// True when the value is below zero
    pub fn is_negative(self) -> bool {
        self.mantissa < 0.0
    }

    /// The value as a plain `f64`; overflows to `±∞` past the `f64` range
    pub fn value(self) -> f64 {
        libm::ldexp(self.mantissa, self.exponent)
    }
}

/// Move whole powers of 2^64 between the recurrence state and `exponent`
fn rescale(previous: &mut f64, current: &mut f64, exponent: &mut i32) {
    let mut big = previous.abs().max(current.abs());
    while big.is_finite() && big > SCALE {
        *previous *= INV_SCALE;
        *current *= INV_SCALE;
        *exponent += SCALE_BITS;
        big *= INV_SCALE;
    }
    while big > 0.0 && big < INV_SCALE {
        *previous *= SCALE;
        *current *= SCALE;
        *exponent -= SCALE_BITS;
        big *= SCALE;
    }
}

/// Generalized Laguerre polynomial `L_p^α(x)` in scaled form
pub fn generalized_laguerre_scaled(p: u32, alpha: f64, x: f64) -> Scaled {
    let mut previous = 1.0;
    let mut exponent = 0;
    if p == 0 {
        return Scaled {
            mantissa: previous,
            exponent,
        };
    }
    let mut current = 1.0 + alpha - x;
    rescale(&mut previous, &mut current, &mut exponent);
    for k in 1..p {
        let k = f64::from(k);
        let next = ((2.0 * k + 1.0 + alpha - x) * current - (k + alpha) * previous) / (k + 1.0);
        previous = current;
        current = next;
        rescale(&mut previous, &mut current, &mut exponent);
    }
    Scaled {
        mantissa: current,
        exponent,
    }
}

/// Physicists' Hermite polynomial `H_n(x)` in scaled form
pub fn hermite_scaled(n: u32, x: f64) -> Scaled {
    let mut previous = 1.0;
    let mut exponent = 0;
    if n == 0 {
        return Scaled {
            mantissa: previous,
            exponent,
        };
    }
    let mut current = 2.0 * x;
    rescale(&mut previous, &mut current, &mut exponent);
    for k in 1..n {
        let next = 2.0 * x * current - 2.0 * f64::from(k) * previous;
        previous = current;
        current = next;
        rescale(&mut previous, &mut current, &mut exponent);
    }
    Scaled {
        mantissa: current,
        exponent,
    }
}

/// Generalized Laguerre polynomial `L_p^α(x)`
pub fn generalized_laguerre(p: u32, alpha: f64, x: f64) -> f64 {
    generalized_laguerre_scaled(p, alpha, x).value()
}

/// Physicists' Hermite polynomial `H_n(x)`
pub fn hermite(n: u32, x: f64) -> f64 {
    hermite_scaled(n, x).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_laguerre_low_orders() {
        let x = 0.7;
        let a = 2.0;
        assert!((generalized_laguerre(0, a, x) - 1.0).abs() < EPS);
        assert!((generalized_laguerre(1, a, x) - (1.0 + a - x)).abs() < EPS);
        // L_2^α(x) = x²/2 - (α+2)x + (α+2)(α+1)/2
        let l2 = x * x / 2.0 - (a + 2.0) * x + (a + 2.0) * (a + 1.0) / 2.0;
        assert!((generalized_laguerre(2, a, x) - l2).abs() < EPS);
    }

    #[test]
    fn test_laguerre_at_zero() {
        // L_p^α(0) = C(p + α, p)
        assert!((generalized_laguerre(3, 1.0, 0.0) - 4.0).abs() < EPS);
        assert!((generalized_laguerre(2, 0.0, 0.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_hermite_low_orders() {
        let x = 0.3;
        assert!((hermite(0, x) - 1.0).abs() < EPS);
        assert!((hermite(1, x) - 2.0 * x).abs() < EPS);
        assert!((hermite(2, x) - (4.0 * x * x - 2.0)).abs() < EPS);
        assert!((hermite(3, x) - (8.0 * x * x * x - 12.0 * x)).abs() < EPS);
    }

    #[test]
    fn test_hermite_parity() {
        for n in 0..6 {
            let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
            assert!((hermite(n, -0.8) - sign * hermite(n, 0.8)).abs() < EPS);
        }
    }

    #[test]
    fn test_scaled_matches_plain_in_range() {
        let plain = generalized_laguerre(5, 1.0, 3.2);
        let scaled = generalized_laguerre_scaled(5, 1.0, 3.2);
        assert!((scaled.ln_abs() - plain.abs().ln()).abs() < EPS);
        assert_eq!(scaled.is_negative(), plain < 0.0);

        let plain = hermite(7, -1.3);
        let scaled = hermite_scaled(7, -1.3);
        assert!((scaled.ln_abs() - plain.abs().ln()).abs() < EPS);
        assert_eq!(scaled.is_negative(), plain < 0.0);
    }

    #[test]
    fn test_high_order_stays_finite() {
        // H_200(1e4) ≈ (2e4)^200 ≈ 10^860, far past f64::MAX
        let h = hermite_scaled(200, 1e4);
        assert!(h.value().is_infinite());
        let expected = 200.0 * 2e4_f64.ln();
        assert!((h.ln_abs() - expected).abs() / expected < 1e-3, "{}", h.ln_abs());
        assert!(!h.is_negative());

        // L_200(x) ≈ x^200 / 200! for large x
        let x = 1e8;
        let l = generalized_laguerre_scaled(200, 0.0, x);
        let ln_factorial: f64 = (1..=200).map(|k| f64::from(k).ln()).sum();
        let expected = 200.0 * x.ln() - ln_factorial;
        assert!((l.ln_abs() - expected).abs() / expected < 1e-3, "{}", l.ln_abs());
    }

    #[test]
    fn test_zero_has_negative_infinite_log() {
        assert_eq!(hermite_scaled(1, 0.0).ln_abs(), f64::NEG_INFINITY);
        assert_eq!(hermite_scaled(3, 0.0).ln_abs(), f64::NEG_INFINITY);
    }
}
