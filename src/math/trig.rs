//! Circular functions and their inverses.
//!
//! # Range reduction
//!
//! `sin`, `cos` and `tan` reduce `x` to `r ∈ [-π/4, π/4]` with a quadrant
//! count `q = round(x·2/π)`. `π/2` is split into three parts whose leading
//! parts have 24 significant bits, so `q·part` is exact in both precisions
//! and the subtraction loses nothing for `|q| < 2^24`. The low two bits of
//! `q` select the function and the sign with integer lane operations.
//!
//! `sincos` reduces modulo `2π` instead and picks among the angle
//! differences by range comparison, returning both values at once.
//!
//! # Precision
//!
//! | Function | Domain | Max error (f64) |
//! |----------|--------|-----------------|
//! | `sin`, `cos` | `|x| < 2^24·π/2` | 1.3 ulp on `r` |
//! | `atan` | all reals | 2.2 ulp |
//! | `asin`, `acos`, `atan2` | via `atan` | ~3 ulp |

use super::bits::{copysign, sign_bit};
use crate::simd::{Element, Lanes};

/// `sin(r) / r` as a polynomial in `r²` on `[-π/4, π/4]`.
const SIN_COEFFS: &[f64] = &[
    1.0,
    -0.16666666666666624,
    0.008333333333321348,
    -0.00019841269829229174,
    2.755731353765814e-06,
    -2.5050738268992355e-08,
    1.5895810760493836e-10,
];

/// `cos(r)` as a polynomial in `r²` on `[-π/4, π/4]`.
const COS_COEFFS: &[f64] = &[
    1.0,
    -0.49999999999999295,
    0.041666666666475255,
    -0.001388888887000704,
    2.480157851401154e-05,
    -2.7555227082889954e-07,
    2.0629959029350688e-09,
];

/// `atan(x) / x` as a rational in `x²` on `[0, 1]`, (6,6).
const ATAN_COEFFS: &[f64] = &[
    1.0,
    2.504675215775313,
    2.2811225606032695,
    0.9197545860849464,
    0.15887327045531813,
    0.009332392125765327,
    8.038037622477303e-05,
    2.838008549108643,
    3.0271254103063936,
    1.50405182254865,
    0.34911747764173406,
    0.03291581393866369,
    0.0008238083570190247,
];

const PIO2_A: f64 = 1.570796251296997;
const PIO2_B: f64 = 7.549789415861596e-08;
const PIO2_C: f64 = 5.390302858158119e-15;

const TAU_A: f64 = 6.283185005187988;
const TAU_B: f64 = 3.0199157663446385e-07;
const TAU_C: f64 = 2.1561211432632476e-14;

const PIO2_HI: f64 = 1.5707963267948966;
const PIO2_LO: f64 = 6.123233995736766e-17;

/// `x - k·π/2` with the three-part constant.
#[inline(always)]
fn sub_quadrants<T: Element, const W: usize>(x: Lanes<T, W>, k: Lanes<T, W>) -> Lanes<T, W> {
    let nk = -k;
    let r = nk.mul_add(Lanes::constant(PIO2_A), x);
    let r = nk.mul_add(Lanes::constant(PIO2_B), r);
    nk.mul_add(Lanes::constant(PIO2_C), r)
}

/// Polynomial core on the reduced argument: `(sin r, cos r)`.
#[inline(always)]
fn sincos_kernel<T: Element, const W: usize>(r: Lanes<T, W>) -> (Lanes<T, W>, Lanes<T, W>) {
    let r2 = r * r;
    (r * r2.polynomial(SIN_COEFFS), r2.polynomial(COS_COEFFS))
}

/// Quadrant reduction: returns `r` and `q` as integer lanes.
#[inline(always)]
fn reduce<T: Element, const W: usize>(x: Lanes<T, W>) -> (Lanes<T, W>, Lanes<T::Int, W>) {
    let bound = Lanes::constant((1u64 << T::MANTISSA_BITS) as f64);
    let q = (x * Lanes::splat(T::FRAC_2_PI()))
        .round()
        .min(bound)
        .max(-bound);
    (sub_quadrants(x, q), q.to_int())
}

/// Picks `sin` or `cos` by `q & 1` and flips the sign by `q & 2`.
#[inline(always)]
fn by_quadrant<T: Element, const W: usize>(
    q: Lanes<T::Int, W>,
    s: Lanes<T, W>,
    c: Lanes<T, W>,
) -> Lanes<T, W> {
    let one = Lanes::splat(T::int(1));
    let swap = (q & one).cmp_eq(one);
    let v = Lanes::select(swap, c, s);
    let flip = (q & Lanes::splat(T::int(2)))
        .shift_left(T::TOTAL_BITS - 2)
        .map_into(T::int_to_bits);
    Lanes::from_bits(v.to_bits() ^ flip)
}

#[inline(always)]
fn finite_or_nan<T: Element, const W: usize>(x: Lanes<T, W>, r: Lanes<T, W>) -> Lanes<T, W> {
    Lanes::select(x.is_finite(), r, Lanes::splat(T::nan()))
}

/// Computes `sin(x)`.
#[inline(always)]
pub fn sin<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let (r, q) = reduce(x);
    let (s, c) = sincos_kernel(r);
    finite_or_nan(x, by_quadrant(q, s, c))
}

/// Computes `cos(x)`.
#[inline(always)]
pub fn cos<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let (r, q) = reduce(x);
    let (s, c) = sincos_kernel(r);
    finite_or_nan(x, by_quadrant(q + Lanes::splat(T::int(1)), s, c))
}

/// Computes `tan(x)`.
///
/// Odd quadrants use `-cos(r)/sin(r)` so neither branch divides by a value
/// near zero inside its own quadrant.
#[inline(always)]
pub fn tan<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let (r, q) = reduce(x);
    let (s, c) = sincos_kernel(r);
    let one = Lanes::splat(T::int(1));
    let odd = (q & one).cmp_eq(one);
    finite_or_nan(x, Lanes::select(odd, -c / s, s / c))
}

/// Computes `(sin(x), cos(x))` with a reduction modulo `2π`.
///
/// # Algorithm
///
/// 1. `r = x - 2π·floor(x/2π)` with a three-part `2π`, so `r ∈ [0, 2π)`.
/// 2. Form the differences `r - kπ/2` for `k = 0..=4` (`k = 4` wraps to
///    `k = 0` one turn later).
/// 3. Pick the difference that lies in `[-π/4, π/4]` by comparing `r`
///    against the odd multiples of `π/4`, evaluate both polynomials once
///    and rotate the pair into place.
#[inline(always)]
pub fn sincos<T: Element, const W: usize>(x: Lanes<T, W>) -> (Lanes<T, W>, Lanes<T, W>) {
    let turns = (x * Lanes::constant(0.5 * std::f64::consts::FRAC_1_PI)).floor();
    let nt = -turns;
    let r = nt.mul_add(Lanes::constant(TAU_A), x);
    let r = nt.mul_add(Lanes::constant(TAU_B), r);
    let r = nt.mul_add(Lanes::constant(TAU_C), r);

    let quarter = std::f64::consts::FRAC_PI_4;
    let m1 = r.cmp_ge(Lanes::constant(quarter));
    let m2 = r.cmp_ge(Lanes::constant(3.0 * quarter));
    let m3 = r.cmp_ge(Lanes::constant(5.0 * quarter));
    let m4 = r.cmp_ge(Lanes::constant(7.0 * quarter));

    let k = |v: f64| sub_quadrants(r, Lanes::constant(v));
    let d = Lanes::select(
        m4,
        k(4.0),
        Lanes::select(m3, k(3.0), Lanes::select(m2, k(2.0), Lanes::select(m1, k(1.0), r))),
    );
    let (s, c) = sincos_kernel(d);

    let sin = Lanes::select(
        m4,
        s,
        Lanes::select(m3, -c, Lanes::select(m2, -s, Lanes::select(m1, c, s))),
    );
    let cos = Lanes::select(
        m4,
        c,
        Lanes::select(m3, s, Lanes::select(m2, -c, Lanes::select(m1, -s, c))),
    );
    (finite_or_nan(x, sin), finite_or_nan(x, cos))
}

/// Computes `atan(x)`.
///
/// `x·R(x²)` on `[-1, 1]`. Beyond that the identity
/// `atan(x) = π/2 - atan(1/x)` is applied to `|x|`, with `π/2` in two parts,
/// and the sign is restored at the end.
#[inline(always)]
pub fn atan<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let a = x.abs();
    let invert = a.cmp_gt(Lanes::one());
    let z = Lanes::select(invert, a.recip(), a);
    let p = z * (z * z).rational::<6>(ATAN_COEFFS);
    let folded = (Lanes::constant(PIO2_HI) - p) + Lanes::constant(PIO2_LO);
    copysign(Lanes::select(invert, folded, p), x)
}

/// Computes the four-quadrant `atan2(y, x)`.
///
/// Follows the C99 conventions on the axes: signed zeros choose between
/// `±0` and `±π`, and two infinities give the odd multiples of `π/4`.
#[inline(always)]
pub fn atan2<T: Element, const W: usize>(y: Lanes<T, W>, x: Lanes<T, W>) -> Lanes<T, W> {
    let zero = Lanes::zero();
    let inf = Lanes::splat(T::infinity());
    let pi = Lanes::splat(T::PI());

    let q = atan(y / x);
    // Sign bit rather than `x < 0`, so `x = -0.0` lands on the left half-plane.
    let r = Lanes::select(sign_bit(x), q + copysign(pi, y), q);

    let both_zero = y.cmp_eq(zero) & x.cmp_eq(zero);
    let axis = Lanes::select(sign_bit(x), copysign(pi, y), copysign(zero, y));
    let r = Lanes::select(both_zero, axis, r);

    let both_inf = y.abs().cmp_eq(inf) & x.abs().cmp_eq(inf);
    let diagonal = Lanes::select(
        x.cmp_gt(zero),
        Lanes::splat(T::FRAC_PI_4()),
        Lanes::constant(3.0 * std::f64::consts::FRAC_PI_4),
    );
    Lanes::select(both_inf, copysign(diagonal, y), r)
}

/// Computes `asin(x)` as `atan(x / √(1 - x²))`.
///
/// `1 - x²` is formed as `(1 - x)(1 + x)` to keep precision near `±1`.
/// Arguments outside `[-1, 1]` give NaN.
#[inline(always)]
pub fn asin<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let one = Lanes::one();
    atan(x / ((one - x) * (one + x)).sqrt())
}

/// Computes `acos(x)` as `atan(√(1 - x²) / x)`, plus `π` for negative `x`.
#[inline(always)]
pub fn acos<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let one = Lanes::one();
    let zero = Lanes::zero();
    let r = atan(((one - x) * (one + x)).sqrt() / x);
    let r = Lanes::select(x.cmp_lt(zero), r + Lanes::splat(T::PI()), r);
    Lanes::select(x.cmp_eq(zero), Lanes::splat(T::FRAC_PI_2()), r)
}
