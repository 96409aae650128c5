//! Exponentials: `exp2`, `exp`, `exp10` and `expm1`.
//!
//! Everything reduces to `exp2`: an integer power of two built directly in
//! the exponent field times a rational approximation of `2^f` on `[0, 1)`.
//! `exp` and `exp10` first scale by `log2 e` or `log2 10` and recover the
//! rounding error of that product with a fused multiply and a split
//! constant, which keeps them within a couple of ulp across the full range.
//!
//! | Function | Rational | Max error (f64) |
//! |----------|----------|-----------------|
//! | `exp2`   | (5,5) on `[0, 1)` | 1.6 ulp |
//! | `expm1`  | `x·R(x)`, (5,5) on `|x| < ln2/2` | 1.8 ulp |

use super::bits::ldexp;
use crate::simd::{Element, Lanes};

/// `2^f` on `[0, 1)`, numerator (5) then denominator (5).
const EXP2_COEFFS: &[f64] = &[
    1.0,
    0.35314264899312653,
    0.05568955794902862,
    0.004973759951799892,
    0.0002564974558543425,
    6.280407692320226e-06,
    -0.340004531566819,
    0.05113623342307976,
    -0.00429718376622491,
    0.00020431889331117746,
    -4.464604596229595e-06,
];

/// `expm1(x) / x` on `|x| < ln2/2`.
const EXPM1_COEFFS: &[f64] = &[
    1.0,
    0.04540718287483228,
    0.03029829182586099,
    0.0012611603185645353,
    0.0001261498382264159,
    3.0006174279774467e-06,
    -0.4545928171251677,
    0.09092803372177818,
    -0.010104053688130138,
    0.0006315384422105224,
    -1.8043140232725642e-05,
];

pub(crate) const LN_2: f64 = 0.6931471805599453;
const LOG2_E: f64 = 1.4426950408889634;
const LOG2_E_LO: f64 = 2.0355273740931033e-17;
const LOG2_10: f64 = 3.321928094887362;
const LOG2_10_LO: f64 = 1.661617516973592e-16;

/// Computes `2^x`.
///
/// # Algorithm
///
/// 1. Split `x = k + f` with `k = floor(x)` and `f ∈ [0, 1)`.
/// 2. Evaluate the rational approximation of `2^f`.
/// 3. Scale by `2^k` with [`ldexp`], which keeps subnormal results exact
///    up to the final rounding.
///
/// `k` is clamped before the integer conversion so it never overflows the
/// lane integer. Lanes above the finite range give `+inf`, lanes below the
/// smallest subnormal give 0 and NaN propagates.
#[inline(always)]
pub fn exp2<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let hi = T::MAX_EXPONENT + 1;
    let lo = T::MIN_EXPONENT - T::MANTISSA_BITS as i32 - 2;

    let fl = x.floor();
    let f = x - fl;
    let k = fl
        .max(Lanes::constant(lo as f64))
        .min(Lanes::constant(hi as f64))
        .to_int();
    let r = ldexp(f.rational::<5>(EXP2_COEFFS), k);

    let r = Lanes::select(
        x.cmp_ge(Lanes::constant(hi as f64)),
        Lanes::splat(T::infinity()),
        r,
    );
    let r = Lanes::select(x.cmp_lt(Lanes::constant(lo as f64)), Lanes::zero(), r);
    Lanes::select(x.is_nan(), x, r)
}

/// `2^(x·(hi + lo))`, with the product's rounding error folded back in.
///
/// `hi` is split again at the element precision so `f32` keeps the bits
/// lost when rounding it.
#[inline(always)]
fn exp2_scaled<T: Element, const W: usize>(x: Lanes<T, W>, hi: f64, lo: f64) -> Lanes<T, W> {
    let (h, l) = T::constant_split(hi);
    let hi = Lanes::splat(h);
    let lo = Lanes::splat(l) + Lanes::constant(lo);
    let y = x * hi;
    let err = x.mul_add(hi, -y) + x * lo;
    let r = exp2(y);
    let corrected = r.mul_add(err * Lanes::constant(LN_2), r);
    Lanes::select(r.is_finite() & err.is_finite(), corrected, r)
}

/// Computes `e^x`.
#[inline(always)]
pub fn exp<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    exp2_scaled(x, LOG2_E, LOG2_E_LO)
}

/// Computes `10^x`.
#[inline(always)]
pub fn exp10<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    exp2_scaled(x, LOG2_10, LOG2_10_LO)
}

/// Computes `e^x - 1`, accurate for small `x`.
///
/// Below `ln2/2` in magnitude the result comes from `x·R(x)` and never
/// forms `e^x` at all, so there is no cancellation.
#[inline(always)]
pub fn expm1<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let near_zero = x.abs().cmp_lt(Lanes::constant(LN_2 * 0.5));
    let direct = x * x.rational::<5>(EXPM1_COEFFS);
    Lanes::select(near_zero, direct, exp(x) - Lanes::one())
}
