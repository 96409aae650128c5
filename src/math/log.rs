//! Logarithms: `log2`, `ln`, `log10` and `log1p`.
//!
//! `log2` is the primitive. The mantissa from [`frexp`] is folded into
//! `[√½, √2)` so that `t = m - 1` is centred on zero, and `log2(1 + t)` is
//! approximated as `t·R(t)` (2.6 ulp in f64). The others scale it.

use super::bits::frexp;
use super::exp::LN_2;
use crate::simd::{Element, Lanes};

/// `log2(1 + t) / t` on `[√½ - 1, √2 - 1]`, numerator (6) then
/// denominator (6).
const LOG2_COEFFS: &[f64] = &[
    1.4426950408889634,
    3.938405622464188,
    3.9716847355547302,
    1.8050676771578495,
    0.35659874314781453,
    0.02344363365299902,
    0.00011626343370978089,
    3.229894753112488,
    4.034576119745643,
    2.4418340466438972,
    0.7307074184223995,
    0.09699066154229789,
    0.00400871600677682,
];

const LOG10_2: f64 = 0.3010299956639812;

/// Computes `log2(x)`.
///
/// Special cases: `log2(±0) = -inf`, `log2(x < 0) = NaN`,
/// `log2(+inf) = +inf`, NaN propagates.
#[inline(always)]
pub fn log2<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let (m, e) = frexp(x);
    let e = Lanes::from_int(e);

    let fold = m.cmp_lt(Lanes::constant(std::f64::consts::FRAC_1_SQRT_2));
    let m = Lanes::select(fold, m + m, m);
    let e = Lanes::select(fold, e - Lanes::one(), e);

    let t = m - Lanes::one();
    let r = t * t.rational::<6>(LOG2_COEFFS) + e;

    let r = Lanes::select(
        x.cmp_eq(Lanes::zero()),
        Lanes::splat(T::neg_infinity()),
        r,
    );
    let r = Lanes::select(
        x.cmp_eq(Lanes::splat(T::infinity())),
        Lanes::splat(T::infinity()),
        r,
    );
    Lanes::select(
        x.cmp_lt(Lanes::zero()) | x.is_nan(),
        Lanes::splat(T::nan()),
        r,
    )
}

/// Computes the natural logarithm.
#[inline(always)]
pub fn ln<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    log2(x) * Lanes::constant(LN_2)
}

/// Computes `log10(x)`.
#[inline(always)]
pub fn log10<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    log2(x) * Lanes::constant(LOG10_2)
}

/// Computes `ln(1 + x)`, accurate for small `x`.
///
/// Uses the correction `ln(u)·x/(u - 1)` with `u = 1 + x`, which cancels
/// the rounding error committed when forming `u`.
#[inline(always)]
pub fn log1p<T: Element, const W: usize>(x: Lanes<T, W>) -> Lanes<T, W> {
    let u = x + Lanes::one();
    let r = ln(u) * x / (u - Lanes::one());
    let r = Lanes::select(u.cmp_eq(Lanes::one()), x, r);
    Lanes::select(u.cmp_eq(Lanes::splat(T::infinity())), u, r)
}
