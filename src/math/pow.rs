//! Powers: `pow` for real exponents, `pown` for integer exponents.

use num::traits::Saturating;

use super::bits::{abs, sign_bit};
use super::exp::exp2;
use super::log::log2;
use crate::simd::{Element, Lanes};

/// Computes `x^e` as `2^(e·log2|x|)` with the IEEE754 special cases.
///
/// | Case | Result |
/// |------|--------|
/// | `e == ±0` | 1, even for NaN `x` |
/// | `x == 1` | 1, even for NaN `e` |
/// | `x == -1`, `e == ±inf` | 1 |
/// | `x < 0` finite, `e` not an integer | NaN |
/// | `x` with sign bit set, `e` an odd integer | sign of `x` carried to the result |
/// | `x == ±0` | 0 for `e > 0`, `+inf` for `e < 0` (signed when `e` is odd) |
///
/// Relative accuracy degrades with `|e·log2 x|`, roughly one ulp per unit
/// of the exponent's binary magnitude.
#[inline(always)]
pub fn pow<T: Element, const W: usize>(x: Lanes<T, W>, e: Lanes<T, W>) -> Lanes<T, W> {
    let one = Lanes::one();
    let ax = abs(x);
    let r = exp2(e * log2(ax));

    let integral = e.floor().cmp_eq(e);
    let half_floor = (e * Lanes::constant(0.5)).floor();
    let odd = integral & (half_floor + half_floor).cmp_ne(e);

    let r = Lanes::select(sign_bit(x) & odd, -r, r);
    let negative_finite = x.cmp_lt(Lanes::zero()) & x.cmp_gt(Lanes::splat(T::neg_infinity()));
    let r = Lanes::select(negative_finite.and_not(integral), Lanes::splat(T::nan()), r);

    let unit = ax.cmp_eq(one) & abs(e).cmp_eq(Lanes::splat(T::infinity()));
    let r = Lanes::select(unit, one, r);
    Lanes::select(e.cmp_eq(Lanes::zero()) | x.cmp_eq(one), one, r)
}

/// Computes `x^n` for integer lanes by square-and-multiply.
///
/// A negative exponent inverts the base first. The loop runs until the
/// largest exponent in the vector is exhausted, with finished lanes masked.
#[inline(always)]
pub fn pown<T: Element, const W: usize>(x: Lanes<T, W>, n: Lanes<T::Int, W>) -> Lanes<T, W> {
    let zero = Lanes::splat(T::int(0));
    let one = Lanes::splat(T::int(1));

    let negative = n.cmp_lt(zero);
    let mut base = Lanes::select(negative, x.recip(), x);
    let mut k = Lanes::select(negative, n.map(|v| T::int(0).saturating_sub(v)), n);
    let mut acc = Lanes::one();

    let mut active = k.cmp_gt(zero);
    while active.any() {
        let odd = (k & one).cmp_eq(one);
        acc = Lanes::select(odd, acc * base, acc);
        base = base * base;
        k = k.shift_right(1);
        active = k.cmp_gt(zero);
    }
    acc
}
