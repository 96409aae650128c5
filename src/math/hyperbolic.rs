//! Hyperbolic functions and their inverses, built on `exp`/`expm1` and
//! `ln`/`log1p`.

use super::bits::copysign;
use super::exp::{exp, expm1, LN_2};
use super::log::{ln, log1p};
use crate::simd::{Element, Lanes};

/// `|x|` above which `e^|x|` overflows before `sinh` and `cosh` do.
#[inline(always)]
fn overflow_threshold<T: Element, const W: usize>() -> Lanes<T, W> {
    Lanes::constant(T::MAX_EXPONENT as f64 * LN_2 - 1.0)
}

/// `|x|` above which `1 + x²` no longer differs from `x²`.
const HUGE_ARGUMENT: f64 = (1u64 << 28) as f64;

/// `e^(|x|/2)` squared in two steps, finite up to the true overflow point.
#[inline(always)]
fn half_exp_squared<T: Element, const W: usize>(a: Lanes<T, W>) -> Lanes<T, W> {
    let h = exp(a * Lanes::constant(0.5));
    h * (h * Lanes::constant(0.5))
}

/// Computes `sinh(x)`.
///
/// `expm1` below 1 in magnitude, where `(e^x - e^-x)/2` would cancel.
#[inline(always)]
pub fn sinh<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let one = Lanes::one();
    let half = Lanes::constant(0.5);
    let a = x.abs();

    let u = expm1(a);
    let small = (u + u / (u + one)) * half;
    let e = exp(a);
    let large = (e - e.recip()) * half;

    let r = Lanes::select(a.cmp_lt(one), small, large);
    let r = Lanes::select(a.cmp_gt(overflow_threshold()), half_exp_squared(a), r);
    copysign(r, x)
}

/// Computes `cosh(x)`.
#[inline(always)]
pub fn cosh<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let a = x.abs();
    let e = exp(a);
    let r = (e + e.recip()) * Lanes::constant(0.5);
    Lanes::select(a.cmp_gt(overflow_threshold()), half_exp_squared(a), r)
}

/// Computes `tanh(x)` as `u / (u + 2)` with `u = expm1(2|x|)`.
///
/// Saturates to `±1` beyond `T::TANH_SATURATION`.
#[inline(always)]
pub fn tanh<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let a = x.abs();
    let u = expm1(a + a);
    let r = u / (u + Lanes::constant(2.0));
    let r = Lanes::select(
        a.cmp_gt(Lanes::splat(T::TANH_SATURATION)),
        Lanes::one(),
        r,
    );
    copysign(r, x)
}

/// Computes `asinh(x) = ln(|x| + √(x² + 1))` with the sign of `x`.
#[inline(always)]
pub fn asinh<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let one = Lanes::one();
    let a = x.abs();
    let a2 = a * a;
    let r = log1p(a + a2 / (one + (one + a2).sqrt()));
    let huge = ln(a) + Lanes::constant(LN_2);
    let r = Lanes::select(a.cmp_gt(Lanes::constant(HUGE_ARGUMENT)), huge, r);
    copysign(r, x)
}

/// Computes `acosh(x) = ln(x + √(x² - 1))`. NaN for `x < 1`.
#[inline(always)]
pub fn acosh<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let t = x - Lanes::one();
    let r = log1p(t + (t * (t + Lanes::constant(2.0))).sqrt());
    let huge = ln(x) + Lanes::constant(LN_2);
    Lanes::select(x.cmp_gt(Lanes::constant(HUGE_ARGUMENT)), huge, r)
}

/// Computes `atanh(x) = ½·ln((1 + x)/(1 - x))`. NaN for `|x| > 1`.
#[inline(always)]
pub fn atanh<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let a = x.abs();
    let r = log1p((a + a) / (Lanes::one() - a)) * Lanes::constant(0.5);
    copysign(r, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::F64x4;

    fn check(f: fn(Lanes<f64, 1>) -> Lanes<f64, 1>, reference: fn(f64) -> f64, x: f64, ulps: f64) {
        let r = f(Lanes([x])).0[0];
        let expected = reference(x);
        let err = if expected == 0.0 {
            r.abs()
        } else {
            ((r - expected) / expected).abs()
        };
        assert!(
            err <= ulps * f64::EPSILON,
            "x={x:e} r={r:e} expected={expected:e} err={:.2} ulp",
            err / f64::EPSILON
        );
    }

    #[test]
    fn test_sinh_cosh_tanh() {
        for &x in &[1e-300f64, -1e-8, 0.1, -0.9, 1.0, 2.5, -10.0, 40.0, 300.0, -709.0, 710.0] {
            check(sinh, f64::sinh, x, 8.0);
            check(cosh, f64::cosh, x, 8.0);
            check(tanh, f64::tanh, x, 8.0);
        }
    }

    #[test]
    fn test_saturation_and_overflow() {
        let x = F64x4::from_slice(&[25.0, -25.0, 711.0, -711.0]);
        assert_eq!(&tanh(x).0[..2], &[1.0, -1.0]);
        assert_eq!(&sinh(x).0[2..], &[f64::INFINITY, f64::NEG_INFINITY]);
        assert_eq!(&cosh(x).0[2..], &[f64::INFINITY, f64::INFINITY]);
        assert_eq!(sinh(Lanes([-0.0f64])).0[0].to_bits(), (-0.0f64).to_bits());
    }

    #[test]
    fn test_inverse_functions() {
        for &x in &[1e-300f64, 1e-8, 0.3, -0.9, 2.0, -30.0, 1e9, -1e200] {
            check(asinh, f64::asinh, x, 8.0);
        }
        for &x in &[1.0f64, 1.5, 10.0, 1e5, 1e9, 1e300] {
            check(acosh, f64::acosh, x, 8.0);
        }
        // f64::acosh cancels just above 1; 50-digit value.
        let r = acosh(Lanes([1.0 + 1e-10f64])).0[0];
        assert!((r - 1.4142136208675862e-05).abs() <= 4.0 * f64::EPSILON * r);
        for &x in &[1e-300f64, 1e-8, 0.3, 0.5, 0.9, 0.999999] {
            check(atanh, f64::atanh, x, 8.0);
        }
        assert_eq!(atanh(Lanes([-0.5f64])).0[0], -atanh(Lanes([0.5f64])).0[0]);
    }

    #[test]
    fn test_inverse_domains() {
        assert!(acosh(Lanes([0.5f64])).0[0].is_nan());
        assert!(atanh(Lanes([1.5f64])).0[0].is_nan());
        assert_eq!(atanh(Lanes([1.0f64])).0[0], f64::INFINITY);
        assert_eq!(atanh(Lanes([-1.0f64])).0[0], f64::NEG_INFINITY);
        assert_eq!(asinh(Lanes([f64::NEG_INFINITY])).0[0], f64::NEG_INFINITY);
    }
}
